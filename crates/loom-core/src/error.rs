/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// A document violated a schema constraint.
///
/// `path` points at the offending value (`exits[0].id`, `(root)` for the
/// document itself) and `message` reads as a sentence naming the constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Location of the offending value inside the document.
    pub path: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for the value at `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by schema resolution, validation, and state updates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The URI does not use the schema scheme or names no schema file.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The schema is not a JSON document, or its `$ref`s loop back on
    /// themselves.
    #[error("invalid schema {uri}: {reason}")]
    InvalidSchema {
        /// URI of the broken schema.
        uri: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A document failed schema validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A state update was rejected; the previous state is unchanged.
    #[error("state update rejected: {0}")]
    StateValidation(ValidationError),

    /// The object type name is not one of the known structured types.
    #[error("unknown object type: {0}")]
    UnknownObjectType(String),
}

impl CoreError {
    /// The underlying validation failure, if this error carries one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) | Self::StateValidation(e) => Some(e),
            _ => None,
        }
    }
}
