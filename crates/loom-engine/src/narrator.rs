use loom_core::GameState;
use loom_llm::{LlmClient, LlmError};

use crate::content::AgentConfig;
use crate::error::EngineResult;
use crate::render::scene_to_text;

/// Reply used when the model returns nothing.
pub const NARRATOR_FALLBACK: &str =
    "<FEEDBACK> I'm sorry, something went wrong with the narrator agent.";

/// Prompts the narrator model for each kind of player action.
pub struct Narrator<'a> {
    client: &'a dyn LlmClient,
    agent: &'a AgentConfig,
}

impl<'a> Narrator<'a> {
    /// Create a narrator driving `agent` through `client`.
    pub fn new(client: &'a dyn LlmClient, agent: &'a AgentConfig) -> Self {
        Self { client, agent }
    }

    /// The player examines something.
    pub fn look_at(&self, target: &str, state: &GameState) -> EngineResult<String> {
        self.prompt(&format!(
            "{}They want to examine something specific: {target}. If that makes sense and is \
             possible, say <FEEDBACK> and give them a more detailed description of whatever they \
             are hoping to examine. If it doesn't make sense or isn't possible, say <FEEDBACK> \
             followed by a brief explanation of why. If the examination reveals something new \
             about the scene, say <UPDATE SCENE> followed by a brief updated description of the \
             scene, being sure to specify what changed.",
            scene_preamble(state)
        ))
    }

    /// The player tries to move.
    pub fn go(&self, direction: &str, state: &GameState) -> EngineResult<String> {
        self.prompt(&format!(
            "{}They want to go somewhere: {direction}. If that makes sense and is possible, say \
             <FEEDBACK> followed by a brief narration (e.g., 'You go through the north door') \
             then <GENERATE SCENE> followed by a brief description of the new scene that they \
             encounter. If it doesn't make sense, say <FEEDBACK> followed by a brief explanation \
             of why it isn't possible.",
            scene_preamble(state)
        ))
    }

    /// The player uses an item.
    pub fn use_item(&self, item: &str, state: &GameState) -> EngineResult<String> {
        self.prompt(&format!(
            "{}They want to use something: {item}. If that makes sense and is possible, say \
             <FEEDBACK> and describe the outcome of their action. If it doesn't make sense, say \
             <FEEDBACK> followed by a brief explanation of why. If the action changes the scene, \
             say <UPDATE SCENE> followed by a brief description of the new scene, being sure to \
             specify what changed.",
            scene_preamble(state)
        ))
    }

    /// Any other action.
    pub fn act(&self, action: &str, state: &GameState) -> EngineResult<String> {
        self.prompt(&format!(
            "{}They want to do something: {action}. Say <FEEDBACK> and describe the outcome, or \
             explain briefly why it isn't possible. If the action changes the scene, say \
             <UPDATE SCENE> followed by a brief description of what changed. If it takes them \
             somewhere new, say <GENERATE SCENE> followed by a brief description of the new \
             scene.",
            scene_preamble(state)
        ))
    }

    fn prompt(&self, message: &str) -> EngineResult<String> {
        match self
            .client
            .complete(&self.agent.full_system_prompt(), message, &self.agent.llm)
        {
            Ok(reply) if !reply.trim().is_empty() => Ok(reply),
            Ok(_) | Err(LlmError::EmptyResponse) => {
                tracing::warn!("narrator returned no content");
                Ok(NARRATOR_FALLBACK.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn scene_preamble(state: &GameState) -> String {
    let mut preamble = format!(
        "The player is in this scene:\n\n{}\n\n",
        scene_to_text(state.current_scene())
    );
    if !state.inventory().is_empty() {
        preamble.push_str(&format!(
            "They are carrying: {}.\n\n",
            state.inventory().join(", ")
        ));
    }
    preamble
}
