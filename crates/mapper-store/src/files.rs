//! The `files` collection: normalized record sets keyed by file name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;

use mapper_model::{FileEntry, NormalizedRecord};

use crate::error::{Result, StoreError};
use crate::io::{
    DOC_SUFFIX, blocking, key_file_name, read_json, remove_if_exists, write_json_atomic,
};
use crate::types::StoredFileEntry;

/// Only the name of a stored entry; the records are skipped while parsing.
#[derive(Deserialize)]
struct StoredName {
    name: String,
}

/// Persistent store of loaded files.
///
/// Cloning is cheap; clones share the same directory and write locks.
/// Writes to one name are serialized, so concurrent upserts never interleave
/// (the last one to finish wins). Writes to different names run independently.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    inner: Arc<FilesInner>,
}

#[derive(Debug)]
struct FilesInner {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl FileRecordStore {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(FilesInner {
                dir,
                locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Replaces the entry stored under `name` with `records`.
    ///
    /// The write finishes even if the returned future is dropped, and the
    /// name stays locked until it does.
    pub async fn upsert(&self, name: &str, records: Vec<NormalizedRecord>) -> Result<()> {
        let guard = self.lock_for(name).lock_owned().await;

        let path = self.path_for(name);
        let stored = StoredFileEntry::new(name, records);
        let count = stored.records.len();
        blocking(move || {
            let _guard = guard;
            write_json_atomic(&path, &stored)
        })
        .await?;

        tracing::info!(file = name, records = count, "Stored file entry");
        Ok(())
    }

    /// Loads one entry by name.
    pub async fn get(&self, name: &str) -> Result<Option<FileEntry>> {
        let path = self.path_for(name);
        let stored: Option<StoredFileEntry> = blocking(move || read_json(&path)).await?;
        Ok(stored
            .filter(|stored| stored.name == name)
            .map(FileEntry::from))
    }

    /// Loads every entry, ordered by name.
    ///
    /// Documents that cannot be read are skipped with a warning.
    pub async fn list_all(&self) -> Result<Vec<FileEntry>> {
        let dir = self.inner.dir.clone();
        let entries = blocking(move || read_all(&dir)).await?;
        tracing::debug!(files = entries.len(), "Listed stored files");
        Ok(entries)
    }

    /// Names of all stored entries, sorted.
    pub async fn names(&self) -> Result<Vec<String>> {
        let dir = self.inner.dir.clone();
        blocking(move || {
            let mut names: Vec<String> = read_documents::<StoredName>(&dir)?
                .into_iter()
                .map(|stored| stored.name)
                .collect();
            names.sort();
            Ok(names)
        })
        .await
    }

    /// Removes the entry stored under `name`. Absent names are not an error.
    ///
    /// Returns whether an entry was removed.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let guard = self.lock_for(name).lock_owned().await;

        let path = self.path_for(name);
        let removed = blocking(move || {
            let _guard = guard;
            remove_if_exists(&path)
        })
        .await?;
        if removed {
            tracing::info!(file = name, "Deleted file entry");
        }
        Ok(removed)
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.inner.dir.join(key_file_name(name))
    }

    /// Write lock for one name. Locks nobody holds or waits for are
    /// dropped from the map here, so it only tracks names in use.
    fn lock_for(&self, name: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(name.to_string()).or_default())
    }

    fn locks(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<tokio::sync::Mutex<()>>>> {
        self.inner
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Paths of every document in the directory.
fn document_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = fs::read_dir(dir).map_err(|e| StoreError::Io {
        operation: "read directory",
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| StoreError::Io {
            operation: "read directory",
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_document = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DOC_SUFFIX));
        if is_document && path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Parses every document in the directory, skipping unreadable ones with a warning.
fn read_documents<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut documents = Vec::new();
    for path in document_paths(dir)? {
        match read_json::<T>(&path) {
            Ok(Some(document)) => documents.push(document),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable stored file"
                );
            }
        }
    }
    Ok(documents)
}

fn read_all(dir: &Path) -> Result<Vec<FileEntry>> {
    let mut entries: Vec<FileEntry> = read_documents::<StoredFileEntry>(dir)?
        .into_iter()
        .map(FileEntry::from)
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_lock_map_drops_idle_names() {
        let dir = tempdir().unwrap();
        let files = FileRecordStore::new(dir.path().to_path_buf());

        for i in 0..10 {
            let name = format!("file-{i}.csv");
            files.upsert(&name, Vec::new()).await.unwrap();
            files.delete(&name).await.unwrap();
        }
        files.upsert("last.csv", Vec::new()).await.unwrap();

        // Only the name passed to the latest call can still be tracked.
        assert!(files.locks().len() <= 1);
    }

    #[tokio::test]
    async fn test_held_lock_survives_pruning() {
        let dir = tempdir().unwrap();
        let files = FileRecordStore::new(dir.path().to_path_buf());

        let held = files.lock_for("busy.csv").lock_owned().await;
        let _ = files.lock_for("other.csv");
        assert!(files.locks().contains_key("busy.csv"));

        // Same lock instance: a second writer must wait for the first.
        assert!(files.lock_for("busy.csv").try_lock().is_err());
        drop(held);
        assert!(files.lock_for("busy.csv").try_lock().is_ok());
    }
}
