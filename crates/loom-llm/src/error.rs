use std::time::Duration;

use thiserror::Error;

/// Result type for model calls.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while talking to a model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network, authentication, or rate-limit failure.
    #[error("model request failed: {0}")]
    Transport(String),

    /// The request did not complete in time.
    #[error("model request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The endpoint answered with something other than a chat completion.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    /// The completion carried no text.
    #[error("model returned no content")]
    EmptyResponse,
}

impl LlmError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}
