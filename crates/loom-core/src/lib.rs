//! Core types for Loom: scenes, the game state store, and schema validation.
//!
//! Every [`GameState`] value is checked against the content module's
//! game-state schema before it is handed out. Updates produce new values and
//! leave the previous state untouched when validation fails.

/// Error types used throughout the crate.
pub mod error;
/// JSON-Schema subset validator and schema resolvers.
pub mod schema;
/// Scenes and their exits.
pub mod scene;
/// The authoritative game state and its controlled update operations.
pub mod state;

/// Re-export error types.
pub use error::{CoreError, CoreResult, ValidationError};
/// Re-export schema types.
pub use schema::{
    DirectoryResolver, MemoryResolver, ObjectType, SCHEMA_URI_PREFIX, SchemaResolver, Schemas,
    validate,
};
/// Re-export scene types.
pub use scene::{Exit, Scene};
/// Re-export state types.
pub use state::{EngineMeta, GameState};
