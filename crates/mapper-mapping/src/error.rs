//! Error types for mapping operations.

use thiserror::Error;

/// Errors from editing column mappings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Column not present in the file's schema.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Target IRI not present in the loaded catalog.
    #[error("unknown mapping target: {iri}")]
    UnknownTarget { iri: String },

    /// No catalog is loaded, so no target can be chosen.
    #[error("ontology catalog is unavailable")]
    CatalogUnavailable,
}

impl MappingError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ColumnNotFound(column) => format!("The column '{column}' does not exist."),
            Self::UnknownTarget { iri } => {
                format!("'{iri}' is not one of the available ontology objects.")
            }
            Self::CatalogUnavailable => {
                "Ontology objects are unavailable; mapping targets cannot be selected.".to_string()
            }
        }
    }
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
