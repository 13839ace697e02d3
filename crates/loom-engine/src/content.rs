use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use loom_core::{GameState, ObjectType, Scene, Schemas};
use loom_llm::LlmConfig;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// Name of the narrator agent.
pub const NARRATOR: &str = "narrator";
/// Name of the scene generator agent.
pub const SCENE_GENERATOR: &str = "scene_generator";
/// Name of the structured-object agent.
pub const JSON_CRUNCHER: &str = "json_cruncher";

/// Prefix for environment overrides (`LOOM_AGENTS__NARRATOR__MODEL=gpt-4o`).
pub const ENV_PREFIX: &str = "LOOM";

/// Prompt material for synthesizing one object type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObjectPrompt {
    /// Instruction placed before the free text.
    pub user_prompt: String,
    /// Worked examples, shown as fenced JSON.
    #[serde(default)]
    pub examples: Vec<Value>,
}

/// One agent's prompts and model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentConfig {
    /// System prompt.
    pub system_prompt: String,
    /// Examples appended to the system prompt.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Per-object-type prompts, keyed by type name.
    #[serde(default)]
    pub object_prompts: BTreeMap<String, ObjectPrompt>,
    /// Model parameters; unset fields take the defaults.
    #[serde(flatten)]
    pub llm: LlmConfig,
}

impl AgentConfig {
    /// An agent with only a system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            examples: Vec::new(),
            object_prompts: BTreeMap::new(),
            llm: LlmConfig::default(),
        }
    }

    /// Append a system-prompt example.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Set the prompt for an object type.
    pub fn with_object_prompt(mut self, object_type: ObjectType, prompt: ObjectPrompt) -> Self {
        self.object_prompts
            .insert(object_type.name().to_string(), prompt);
        self
    }

    /// The system prompt followed by each example, blank-line separated.
    pub fn full_system_prompt(&self) -> String {
        let mut prompt = self.system_prompt.clone();
        for example in &self.examples {
            prompt.push_str("\n\n");
            prompt.push_str(example);
        }
        prompt
    }

    /// The prompt for `object_type`, if configured.
    pub fn object_prompt(&self, object_type: ObjectType) -> Option<&ObjectPrompt> {
        self.object_prompts.get(object_type.name())
    }
}

/// The contents of `config.yml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleConfig {
    /// Agents by name.
    pub agents: BTreeMap<String, AgentConfig>,
    /// The scene the game starts in.
    pub initial_scene: Value,
    /// The starting story document.
    pub story: Map<String, Value>,
    /// Starting inventory.
    #[serde(default)]
    pub inventory: Vec<String>,
}

/// A loaded content module.
#[derive(Debug)]
pub struct ContentModule {
    root: PathBuf,
    config: ModuleConfig,
    schemas: Schemas,
}

impl ContentModule {
    /// Load the module in `root`, applying `LOOM_` environment overrides.
    pub fn load(root: &Path) -> EngineResult<Self> {
        let config_path = root.join("config.yml");
        if !config_path.is_file() {
            return Err(EngineError::Content(format!(
                "{} not found",
                config_path.display()
            )));
        }

        let config: ModuleConfig = Config::builder()
            .add_source(File::from(config_path.as_path()).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::info!(
            module = %root.display(),
            agents = config.agents.len(),
            "loaded content module"
        );

        Ok(Self::from_parts(root, config))
    }

    /// Assemble a module from an already-parsed configuration.
    pub fn from_parts(root: &Path, config: ModuleConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            schemas: Schemas::from_dir(root.join("schemas")),
            config,
        }
    }

    /// The module directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The parsed configuration.
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// The module's schemas.
    pub fn schemas(&self) -> &Schemas {
        &self.schemas
    }

    /// Configuration for the agent called `name`.
    pub fn agent(&self, name: &str) -> EngineResult<&AgentConfig> {
        self.config
            .agents
            .get(name)
            .ok_or_else(|| EngineError::MissingAgent(name.to_string()))
    }

    /// The validated starting scene.
    pub fn initial_scene(&self) -> EngineResult<Scene> {
        Ok(Scene::from_value(
            self.config.initial_scene.clone(),
            &self.schemas,
        )?)
    }

    /// The validated starting story.
    pub fn initial_story(&self) -> EngineResult<Map<String, Value>> {
        let story = Value::Object(self.config.story.clone());
        self.schemas.validate(&story, ObjectType::Story)?;
        Ok(self.config.story.clone())
    }

    /// The validated starting game state.
    pub fn initial_state(&self) -> EngineResult<GameState> {
        Ok(GameState::initial(
            self.initial_scene()?,
            self.config.inventory.clone(),
            self.initial_story()?,
            &self.schemas,
        )?)
    }
}
