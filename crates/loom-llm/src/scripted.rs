use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use crate::client::LlmClient;
use crate::config::LlmConfig;
use crate::error::{LlmError, LlmResult};

/// One request the scripted client received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The system prompt sent.
    pub system_prompt: String,
    /// The user message sent.
    pub user_message: String,
    /// The model the caller asked for.
    pub model: String,
}

/// Replays queued replies, one per call, and records every request.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: RefCell<VecDeque<LlmResult<String>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedClient {
    /// An empty script. Every call fails until replies are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A script of successful replies.
    pub fn from_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            calls: RefCell::default(),
        }
    }

    /// Load a JSON array of reply strings.
    pub fn from_json_file(path: &Path) -> LlmResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LlmError::Transport(format!("{}: {e}", path.display())))?;
        let replies: Vec<String> = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("{}: {e}", path.display())))?;
        Ok(Self::from_replies(replies))
    }

    /// Queue a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.borrow_mut().push_back(Ok(reply.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: LlmError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    /// Every request received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Number of replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl LlmClient for ScriptedClient {
    fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        config: &LlmConfig,
    ) -> LlmResult<String> {
        self.calls.borrow_mut().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_message: user_message.to_string(),
            model: config.model.clone(),
        });

        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Transport("scripted responses exhausted".into())))
    }
}
