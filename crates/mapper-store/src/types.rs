//! On-disk document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mapper_model::{ConceptDescriptor, FileEntry, NormalizedRecord};

/// Current store schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Manifest file at the store root.
pub const MANIFEST_FILE: &str = "store.json";

/// Directory holding one document per loaded file.
pub const FILES_DIR: &str = "files";

/// Directory holding the cached ontology catalog.
pub const ONTOLOGY_DIR: &str = "ontology";

/// Catalog document inside [`ONTOLOGY_DIR`].
pub const ONTOLOGY_FILE: &str = "objects.json";

/// Store manifest, written on first open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreManifest {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
}

impl StoreManifest {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: Utc::now(),
        }
    }
}

impl Default for StoreManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Stored form of a [`FileEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFileEntry {
    #[serde(default = "default_version")]
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub name: String,
    pub records: Vec<NormalizedRecord>,
}

impl StoredFileEntry {
    pub fn new(name: &str, records: Vec<NormalizedRecord>) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            name: name.to_string(),
            records,
        }
    }
}

impl From<StoredFileEntry> for FileEntry {
    fn from(stored: StoredFileEntry) -> Self {
        FileEntry::new(stored.name, stored.records)
    }
}

/// Stored form of the ontology catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCatalog {
    #[serde(default = "default_version")]
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub objects: Vec<ConceptDescriptor>,
}

fn default_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
