use loom_core::{GameState, ObjectType, Scene, Schemas};
use serde_json::Value;

use crate::directive::{Command, CommandKind, extract_commands};
use crate::error::{EngineError, EngineResult};

/// Builds scenes from prose descriptions.
#[cfg_attr(test, mockall::automock)]
pub trait SceneWriter {
    /// A new scene the player reaches from `last_scene`.
    fn generate_scene(&self, description: &str, last_scene: &Scene) -> EngineResult<Scene>;

    /// `scene` with `changes` applied.
    fn revise_scene(&self, changes: &str, scene: &Scene) -> EngineResult<Scene>;
}

/// Turns free text into a schema-valid document.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectSynthesizer {
    /// Return a document that validates against `object_type`'s schema.
    fn synthesize(&self, text: &str, object_type: ObjectType) -> EngineResult<Value>;
}

/// Applies extracted commands to a state, one at a time.
pub struct Dispatcher<'a> {
    scenes: &'a dyn SceneWriter,
    synthesizer: &'a dyn ObjectSynthesizer,
    schemas: &'a Schemas,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over the given collaborators.
    pub fn new(
        scenes: &'a dyn SceneWriter,
        synthesizer: &'a dyn ObjectSynthesizer,
        schemas: &'a Schemas,
    ) -> Self {
        Self {
            scenes,
            synthesizer,
            schemas,
        }
    }

    /// Extract the commands in `text` and apply them left to right.
    ///
    /// Each command sees the state produced by the one before it. Unknown
    /// directives are logged and skipped. Any other failure aborts the whole
    /// sequence; the caller's `state` is never modified.
    pub fn dispatch(&self, text: &str, state: &GameState) -> EngineResult<GameState> {
        let mut current = state.clone();

        for command in extract_commands(text, state) {
            let command = command.with_context_from(&current);
            match self.dispatch_command(&command, &current) {
                Ok(next) => current = next,
                Err(EngineError::UnknownCommand(kind)) => {
                    tracing::warn!(%kind, payload = %command.payload, "skipping unknown directive");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(current)
    }

    /// Apply a single command.
    pub fn dispatch_command(&self, command: &Command, state: &GameState) -> EngineResult<GameState> {
        tracing::info!(kind = %command.kind, "dispatching command");

        let context = command
            .context
            .as_ref()
            .map_or_else(|| state.current_scene(), |c| c.scene());

        match &command.kind {
            CommandKind::GenerateScene => {
                let scene = self.scenes.generate_scene(&command.payload, context)?;
                self.replace_scene(state, scene)
            }
            CommandKind::UpdateScene => {
                let scene = self.scenes.revise_scene(&command.payload, context)?;
                self.replace_scene(state, scene)
            }
            CommandKind::RestructureScene => {
                let doc = self
                    .synthesizer
                    .synthesize(&command.payload, ObjectType::Scene)?;
                let scene = Scene::from_value(doc, self.schemas)?;
                Ok(state.with_current_scene(scene, self.schemas)?)
            }
            CommandKind::Feedback => {
                Ok(state.with_feedback(Some(command.payload.clone()), self.schemas)?)
            }
            CommandKind::Noop => Ok(state.clone()),
            CommandKind::Unknown(kind) => Err(EngineError::UnknownCommand(kind.clone())),
        }
    }

    fn replace_scene(&self, state: &GameState, scene: Scene) -> EngineResult<GameState> {
        let next = state
            .with_current_scene(scene, self.schemas)?
            .with_feedback(None, self.schemas)?;
        Ok(next)
    }
}
