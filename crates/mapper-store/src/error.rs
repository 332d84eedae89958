//! Store error types.
//!
//! All store operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store manifest is not readable.
    #[error("Invalid store manifest at {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// The store was written by a newer schema version.
    #[error("Store version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Serialization error.
    #[error("Failed to serialize {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background I/O task did not complete.
    #[error("Store task did not complete")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl StoreError {
    /// Returns true if the failing operation only read data.
    ///
    /// Failed reads leave stored data as it was.
    pub fn is_read_failure(&self) -> bool {
        match self {
            Self::Io { operation, .. } => operation.starts_with("read"),
            Self::Deserialization { .. } | Self::InvalidFormat { .. } => true,
            _ => false,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} {}", operation, path.display()),
            Self::InvalidFormat { path, .. } => format!(
                "The local data folder at {} is damaged.",
                path.parent().unwrap_or(path).display()
            ),
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => format!(
                "The local data was created by a newer version of the application \
                (store version {found}, this version supports up to {max_supported})."
            ),
            Self::Serialization { .. } => "An error occurred while saving data.".to_string(),
            Self::Deserialization { .. } => {
                "An error occurred while reading saved data. It may be corrupted.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::TaskFailed { .. } => "A background storage task was interrupted.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if operation.starts_with("read") {
                    Some("Check that the data folder exists and is readable.".into())
                } else {
                    Some("Check that you have permission to write to the data folder.".into())
                }
            }
            Self::InvalidFormat { .. } => {
                Some("Remove the data folder to start with an empty store.".into())
            }
            Self::UnsupportedVersion { .. } => Some("Update the application.".into()),
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data folder.".into())
            }
            Self::Serialization { .. } | Self::Deserialization { .. } | Self::TaskFailed { .. } => {
                None
            }
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
