//! The `ontologyObjects` collection: concept descriptors keyed by IRI.
//!
//! The whole collection is a single document, so a bulk replace is one
//! atomic rename: readers see the old catalog or the new one, never a mix
//! and never an empty gap.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use mapper_model::ConceptDescriptor;

use crate::error::Result;
use crate::io::{blocking, read_json, remove_if_exists, write_json_atomic};
use crate::types::{CURRENT_SCHEMA_VERSION, StoredCatalog};

/// Persistent cache of ontology concept descriptors.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CatalogStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                path,
                write_lock: Arc::new(Mutex::new(())),
            }),
        }
    }

    /// Path of the catalog document.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Reads every cached descriptor, ordered by IRI. Empty if nothing is cached.
    pub async fn load_all(&self) -> Result<Vec<ConceptDescriptor>> {
        let path = self.inner.path.clone();
        let stored: Option<StoredCatalog> = blocking(move || read_json(&path)).await?;
        let objects = stored.map(|s| s.objects).unwrap_or_default();
        tracing::debug!(objects = objects.len(), "Loaded cached catalog");
        Ok(objects)
    }

    /// Replaces the whole cached catalog.
    ///
    /// Descriptors are keyed by IRI; when an IRI repeats, the later descriptor
    /// wins. Returns the descriptors as stored.
    pub async fn replace_all(
        &self,
        objects: Vec<ConceptDescriptor>,
    ) -> Result<Vec<ConceptDescriptor>> {
        let guard = Arc::clone(&self.inner.write_lock).lock_owned().await;

        let keyed: BTreeMap<String, ConceptDescriptor> = objects
            .into_iter()
            .map(|object| (object.iri.clone(), object))
            .collect();
        let objects: Vec<ConceptDescriptor> = keyed.into_values().collect();

        let stored = StoredCatalog {
            version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            objects,
        };
        let path = self.inner.path.clone();
        let stored = blocking(move || {
            let _guard = guard;
            write_json_atomic(&path, &stored).map(|()| stored)
        })
        .await?;

        tracing::info!(objects = stored.objects.len(), "Replaced cached catalog");
        Ok(stored.objects)
    }

    /// Removes every cached descriptor.
    pub async fn clear(&self) -> Result<()> {
        let guard = Arc::clone(&self.inner.write_lock).lock_owned().await;
        let path = self.inner.path.clone();
        let removed = blocking(move || {
            let _guard = guard;
            remove_if_exists(&path)
        })
        .await?;
        if removed {
            tracing::info!("Cleared cached catalog");
        }
        Ok(())
    }
}
