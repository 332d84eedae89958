//! Error types for model parsing.

use thiserror::Error;

/// Errors raised when converting external text into model types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The text is not one of the known concept kinds.
    #[error("unknown concept kind: {0}")]
    UnknownConceptKind(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
