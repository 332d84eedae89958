//! Error types for the ontology catalog cache.

use std::sync::Arc;

use mapper_store::StoreError;
use thiserror::Error;

/// Errors that can occur while filling or reading the catalog cache.
///
/// Errors are cheap to clone so that every caller sharing one in-flight
/// fill receives the same outcome.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum OntologyError {
    /// The remote (or bundled) catalog could not be retrieved.
    #[error("failed to fetch catalog from {source_name}: {message}")]
    CatalogFetch {
        source_name: String,
        message: String,
    },

    /// The catalog was retrieved but is not a JSON array of `{IRI, label}` objects.
    #[error("catalog from {source_name} is malformed: {message}")]
    InvalidCatalog {
        source_name: String,
        message: String,
    },

    /// The local cache could not be read or written.
    #[error("catalog cache storage failed")]
    Store(#[source] Arc<StoreError>),
}

impl OntologyError {
    /// Returns true for failures of the catalog source itself (network or format).
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::CatalogFetch { .. } | Self::InvalidCatalog { .. })
    }

    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::CatalogFetch { .. } => {
                "Error loading ontology objects: the catalog could not be downloaded.".to_string()
            }
            Self::InvalidCatalog { .. } => {
                "Error loading ontology objects: the catalog is not in the expected format."
                    .to_string()
            }
            Self::Store(e) => format!("Error loading ontology objects: {}", e.user_message()),
        }
    }
}

impl From<StoreError> for OntologyError {
    fn from(err: StoreError) -> Self {
        Self::Store(Arc::new(err))
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, OntologyError>;
