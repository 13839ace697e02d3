//! Language-model collaborator for Loom.
//!
//! The engine only ever calls [`LlmClient::complete`] with a system prompt, a
//! user message, and the calling agent's [`LlmConfig`]. [`HttpClient`] talks to
//! an OpenAI-compatible chat-completions endpoint; [`ScriptedClient`] replays
//! canned replies for offline play and tests.

/// The client trait.
pub mod client;
/// Per-agent model parameters and endpoint selection.
pub mod config;
/// Error types for model calls.
pub mod error;
/// HTTP chat-completions client.
pub mod http;
/// A client that replays canned replies in order.
///
/// Used for offline play (`loom play --replay`) and for tests that need to
/// see exactly which prompts the engine sent.
pub mod scripted;

pub use client::LlmClient;
pub use config::{Endpoint, Endpoints, LlmConfig, ResponseFormat};
pub use error::{LlmError, LlmResult};
pub use http::HttpClient;
pub use scripted::{RecordedCall, ScriptedClient};
