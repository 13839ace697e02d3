use loom_core::{ObjectType, Scene, Schemas};
use loom_llm::LlmClient;

use crate::content::AgentConfig;
use crate::dispatch::{ObjectSynthesizer, SceneWriter};
use crate::error::EngineResult;
use crate::render::scene_to_text;

/// Writes scenes through the model.
pub struct SceneGenerator<'a> {
    client: &'a dyn LlmClient,
    agent: &'a AgentConfig,
    synthesizer: &'a dyn ObjectSynthesizer,
    schemas: &'a Schemas,
}

impl<'a> SceneGenerator<'a> {
    /// Create a generator driving `agent` through `client`.
    pub fn new(
        client: &'a dyn LlmClient,
        agent: &'a AgentConfig,
        synthesizer: &'a dyn ObjectSynthesizer,
        schemas: &'a Schemas,
    ) -> Self {
        Self {
            client,
            agent,
            synthesizer,
            schemas,
        }
    }

    fn write(&self, message: &str) -> EngineResult<Scene> {
        let prose = self
            .client
            .complete(&self.agent.full_system_prompt(), message, &self.agent.llm)?;
        tracing::debug!(chars = prose.len(), "scene generator replied");

        let doc = self.synthesizer.synthesize(&prose, ObjectType::Scene)?;
        Ok(Scene::from_value(doc, self.schemas)?)
    }
}

impl SceneWriter for SceneGenerator<'_> {
    fn generate_scene(&self, description: &str, last_scene: &Scene) -> EngineResult<Scene> {
        self.write(&format!(
            "Here is the general description of the new scene to generate:\n\n{description}\n\n\
             Here is the last scene:\n\n{}\n\nPlease provide a full description of the new scene.",
            scene_to_text(last_scene)
        ))
    }

    fn revise_scene(&self, changes: &str, scene: &Scene) -> EngineResult<Scene> {
        self.write(&format!(
            "This is the current scene:\n\n{}\n\nHere is the general idea of the updates to make \
             to the scene:\n\n{changes}\n\nPlease provide a full description of the updated scene.",
            scene_to_text(scene)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MockObjectSynthesizer;
    use crate::error::EngineError;
    use loom_llm::ScriptedClient;
    use mockall::predicate::eq;
    use serde_json::json;

    fn schemas() -> Schemas {
        Schemas::from_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../content/default/schemas"
        ))
    }

    fn cell() -> Scene {
        Scene::new("cell").with_title("Cell").with_description("A damp cell.")
    }

    #[test]
    fn generate_feeds_prose_to_synthesizer() {
        let client = ScriptedClient::from_replies(["A vast library with a spiral staircase."]);
        let agent = AgentConfig::new("You write scenes.");
        let mut synth = MockObjectSynthesizer::new();
        synth
            .expect_synthesize()
            .with(eq("A vast library with a spiral staircase."), eq(ObjectType::Scene))
            .times(1)
            .returning(|_, _| Ok(json!({"id": "library", "title": "Library"})));
        let schemas = schemas();
        let generator = SceneGenerator::new(&client, &agent, &synth, &schemas);

        let scene = generator.generate_scene("A library.", &cell()).unwrap();
        assert_eq!(scene.id(), "library");

        let calls = client.calls();
        let message = &calls[0].user_message;
        assert!(message.contains("new scene to generate:\n\nA library."));
        assert!(message.contains("Here is the last scene:\n\nCell\nA damp cell."));
    }

    #[test]
    fn revise_includes_current_scene() {
        let client = ScriptedClient::from_replies(["The cell, now with an open trapdoor."]);
        let agent = AgentConfig::new("You write scenes.");
        let mut synth = MockObjectSynthesizer::new();
        synth
            .expect_synthesize()
            .returning(|_, _| Ok(json!({"id": "cell", "description": "Open trapdoor."})));
        let schemas = schemas();
        let generator = SceneGenerator::new(&client, &agent, &synth, &schemas);

        let scene = generator.revise_scene("Open the trapdoor.", &cell()).unwrap();
        assert_eq!(scene.description(), "Open trapdoor.");
        assert!(client.calls()[0]
            .user_message
            .starts_with("This is the current scene:\n\nCell\nA damp cell."));
    }

    #[test]
    fn synthesis_failure_propagates() {
        let client = ScriptedClient::from_replies(["prose"]);
        let agent = AgentConfig::new("sys");
        let mut synth = MockObjectSynthesizer::new();
        synth.expect_synthesize().returning(|_, object_type| {
            Err(EngineError::SynthesisExhausted {
                object_type,
                attempts: 5,
            })
        });
        let schemas = schemas();
        let generator = SceneGenerator::new(&client, &agent, &synth, &schemas);

        let err = generator.generate_scene("A hall.", &cell()).unwrap_err();
        assert!(matches!(err, EngineError::SynthesisExhausted { .. }));
    }
}
