//! Error types for the session and its configuration.

use std::path::PathBuf;

use mapper_ingest::IngestError;
use mapper_mapping::MappingError;
use mapper_ontology::OntologyError;
use mapper_store::StoreError;
use thiserror::Error;

/// Errors while locating, reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform-specific directories could not be determined.
    #[error("could not determine the {kind} directory for this platform")]
    NoProjectDir { kind: &'static str },

    /// Reading or writing the file failed.
    #[error("failed to {operation} config file {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid TOML for [`crate::MapperConfig`].
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be serialized.
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors surfaced by [`crate::Session`] operations.
///
/// Every variant is recoverable: a failed operation leaves the session in
/// its previous state and the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Unsupported file type or malformed file content.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Durable storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The ontology catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] OntologyError),

    /// Invalid mapping edit.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A source file could not be read from disk.
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No stored file has the requested name.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A mapping edit was attempted with no file selected.
    #[error("no file is selected")]
    NoFileSelected,

    /// A background parsing task panicked or was cancelled.
    #[error("background task failed")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl SessionError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Ingest(e) => e.user_message(),
            Self::Store(e) => e.user_message(),
            Self::Catalog(e) => e.user_message(),
            Self::Mapping(e) => e.user_message(),
            Self::Config(e) => format!("Configuration error: {e}"),
            Self::ReadFile { path, .. } => format!("Could not read {}.", path.display()),
            Self::FileNotFound(name) => format!("No stored file named '{name}'."),
            Self::NoFileSelected => "Select a file first.".to_string(),
            Self::TaskFailed(_) => "An internal error occurred. Please try again.".to_string(),
        }
    }

    /// Returns true if the failure came from the catalog source.
    pub fn is_catalog_fetch(&self) -> bool {
        matches!(self, Self::Catalog(e) if e.is_fetch_error())
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
