//! Low-level document I/O shared by the collections.
//!
//! Every write goes to a temp file that is synced and then renamed over the
//! target, so readers see either the previous document or the new one.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::error::{Result, StoreError};

/// Suffix of every stored document.
pub(crate) const DOC_SUFFIX: &str = ".json";

/// Runs blocking file I/O on the blocking thread pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|source| StoreError::TaskFailed { source })?
}

/// Document file name for a key: the hex SHA-256 of the key.
///
/// Every key maps to a valid file name of the same length. The key itself
/// is stored inside the document.
pub(crate) fn key_file_name(key: &str) -> String {
    format!("{}{DOC_SUFFIX}", hex::encode(Sha256::digest(key.as_bytes())))
}

/// Creates a directory (and parents) if missing.
pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| StoreError::Io {
        operation: "create directory",
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads and parses a JSON document; `None` if it does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Deserialization {
            path: path.to_path_buf(),
            source,
        })
}

/// Serializes a value and atomically replaces the document at `path`.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote document");
    Ok(())
}

/// Removes a document; returns whether it existed.
pub(crate) fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Io {
            operation: "delete",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
