use loom_core::{CoreError, ObjectType};
use loom_llm::LlmError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Message shown to the player when synthesis gives up.
pub const STORY_STALLED: &str = "The story could not continue; please rephrase.";

/// Errors that can occur while running a turn.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The model reply could not be read as a JSON object at all.
    #[error("reply is not a structured object: {0}")]
    StructuralParse(String),

    /// A directive outside the known set.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The model never produced a schema-valid object.
    #[error("gave up synthesizing a {object_type} after {attempts} attempts")]
    SynthesisExhausted {
        /// The type being synthesized.
        object_type: ObjectType,
        /// How many replies were tried.
        attempts: u32,
    },

    /// The model call itself failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Schema resolution, validation, or a rejected state update.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The content module could not be loaded.
    #[error("content module error: {0}")]
    Content(String),

    /// The content module has no configuration for this agent.
    #[error("agent not configured: {0}")]
    MissingAgent(String),

    /// The agent has no prompt for this object type.
    #[error("agent {agent} has no prompt for object type {object_type}")]
    MissingObjectPrompt {
        /// Agent name.
        agent: String,
        /// Object type without a prompt.
        object_type: ObjectType,
    },
}

impl EngineError {
    /// The text shown to the player when a turn fails with this error.
    ///
    /// Parse and validation details stay in the logs.
    pub fn player_message(&self) -> String {
        match self {
            Self::SynthesisExhausted { .. } | Self::StructuralParse(_) | Self::Core(_) => {
                STORY_STALLED.to_string()
            }
            Self::Llm(e) if e.is_retryable() => {
                format!("The narrator could not be reached ({e}). Try again.")
            }
            Self::Llm(e) => format!("The narrator gave an unusable answer ({e}). Try something else."),
            other => other.to_string(),
        }
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(e: config::ConfigError) -> Self {
        Self::Content(e.to_string())
    }
}
