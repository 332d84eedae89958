//! Store root: manifest handling and collection setup.

use std::path::{Path, PathBuf};

use crate::catalog::CatalogStore;
use crate::error::{Result, StoreError};
use crate::files::FileRecordStore;
use crate::io::{blocking, ensure_dir, read_json, write_json_atomic};
use crate::types::{
    CURRENT_SCHEMA_VERSION, FILES_DIR, MANIFEST_FILE, ONTOLOGY_DIR, ONTOLOGY_FILE, StoreManifest,
};

/// A durable local store with two independent collections.
///
/// ```text
/// <root>/
///   store.json            manifest (schema version)
///   files/<hex>.json      one document per loaded file
///   ontology/objects.json cached ontology catalog
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    files: FileRecordStore,
    catalog: CatalogStore,
}

impl Store {
    /// Opens the store at `root`, creating both collections on first open.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let manifest_root = root.clone();
        let manifest = blocking(move || open_manifest(&manifest_root)).await?;

        tracing::info!(
            root = %root.display(),
            schema_version = manifest.schema_version,
            "Opened local store"
        );

        Ok(Self {
            files: FileRecordStore::new(root.join(FILES_DIR)),
            catalog: CatalogStore::new(root.join(ONTOLOGY_DIR).join(ONTOLOGY_FILE)),
            root,
        })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `files` collection.
    pub fn files(&self) -> &FileRecordStore {
        &self.files
    }

    /// The `ontologyObjects` collection.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }
}

fn open_manifest(root: &Path) -> Result<StoreManifest> {
    ensure_dir(root)?;
    let manifest_path = root.join(MANIFEST_FILE);

    let manifest = match read_json::<StoreManifest>(&manifest_path) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => {
            let manifest = StoreManifest::new();
            write_json_atomic(&manifest_path, &manifest)?;
            tracing::info!(root = %root.display(), "Created new local store");
            manifest
        }
        Err(StoreError::Deserialization { path, source }) => {
            return Err(StoreError::InvalidFormat {
                path,
                reason: source.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    if manifest.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: manifest.schema_version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: manifest_path,
        });
    }

    ensure_dir(&root.join(FILES_DIR))?;
    ensure_dir(&root.join(ONTOLOGY_DIR))?;
    Ok(manifest)
}
