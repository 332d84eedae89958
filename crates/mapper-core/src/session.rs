//! The host-facing session: one object holding the store, the catalog
//! cache, the selected file and its mappings.

use std::path::Path;
use std::sync::Arc;

use mapper_ingest::{IngestOptions, read_file_entry};
use mapper_mapping::MappingModel;
use mapper_model::{ConceptKind, FileEntry, NormalizedRecord};
use mapper_ontology::{Catalog, CatalogSource, CatalogState, OntologyCache};
use mapper_store::Store;

use crate::config::MapperConfig;
use crate::error::{Result, SessionError};
use crate::logging::redact_value;

/// Session state for one host UI.
///
/// File operations take `&mut self`; the catalog cache is a separate
/// cloneable handle (see [`Session::catalog`]) so a catalog fill can run
/// while files are being loaded.
#[derive(Debug)]
pub struct Session {
    store: Store,
    cache: OntologyCache,
    options: IngestOptions,
    current: Option<FileEntry>,
    mappings: Option<MappingModel>,
}

impl Session {
    /// Opens the store from `config` and sets up the catalog cache over `source`.
    pub async fn open(config: &MapperConfig, source: Arc<dyn CatalogSource>) -> Result<Self> {
        let dir = config.store_dir()?;
        let store = Store::open(&dir).await?;
        let cache = OntologyCache::new(store.catalog().clone(), source);
        tracing::info!(
            store = %dir.display(),
            catalog = %cache.source_name(),
            "Opened session"
        );
        Ok(Self {
            store,
            cache,
            options: config.ingest.clone(),
            current: None,
            mappings: None,
        })
    }

    /// Like [`Session::open`], with the catalog source named in `config`.
    pub async fn open_configured(config: &MapperConfig) -> Result<Self> {
        let source = config.catalog.source()?;
        Self::open(config, source).await
    }

    /// Parses, normalizes and stores a file, then selects it.
    ///
    /// Any failure leaves the stored files and the current selection as
    /// they were.
    pub async fn load_file(
        &mut self,
        name: &str,
        bytes: Vec<u8>,
        has_headers: bool,
    ) -> Result<&FileEntry> {
        tracing::info!(file = %name, bytes = bytes.len(), has_headers, "Loading file");

        let options = self.options.clone();
        let owned_name = name.to_string();
        let entry = tokio::task::spawn_blocking(move || {
            read_file_entry(&owned_name, &bytes, has_headers, &options)
        })
        .await??;

        self.store
            .files()
            .upsert(&entry.name, entry.records.clone())
            .await?;
        tracing::info!(file = %entry.name, records = entry.len(), "Stored file");

        Ok(self.select(entry))
    }

    /// Reads a file from disk and loads it under its file name.
    pub async fn load_path(&mut self, path: &Path, has_headers: bool) -> Result<&FileEntry> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SessionError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        self.load_file(&name, bytes, has_headers).await
    }

    /// Selects a stored file and rebuilds its mappings.
    pub async fn select_file(&mut self, name: &str) -> Result<&FileEntry> {
        let entry = self
            .store
            .files()
            .get(name)
            .await?
            .ok_or_else(|| SessionError::FileNotFound(name.to_string()))?;
        Ok(self.select(entry))
    }

    /// All stored files, ordered by name.
    pub async fn list_files(&self) -> Result<Vec<FileEntry>> {
        Ok(self.store.files().list_all().await?)
    }

    /// Deletes a stored file. Deleting the selected file clears the selection.
    pub async fn delete_file(&mut self, name: &str) -> Result<bool> {
        let removed = self.store.files().delete(name).await?;
        if self.current.as_ref().is_some_and(|entry| entry.name == name) {
            self.current = None;
            self.mappings = None;
        }
        Ok(removed)
    }

    /// The currently selected file.
    pub fn current_file(&self) -> Option<&FileEntry> {
        self.current.as_ref()
    }

    /// Headers and records of the selected file, for table rendering.
    pub fn table(&self) -> Option<(Vec<&str>, &[NormalizedRecord])> {
        self.current
            .as_ref()
            .map(|entry| (entry.headers(), entry.records.as_slice()))
    }

    /// Handle to the catalog cache; clone it to fill concurrently.
    pub fn catalog(&self) -> &OntologyCache {
        &self.cache
    }

    /// Current availability of the catalog.
    pub fn catalog_state(&self) -> CatalogState {
        self.cache.state()
    }

    /// Fills the catalog cache if needed, then rebuilds the mappings so
    /// they reflect the outcome (including an unavailable catalog).
    pub async fn init_catalog(&mut self) -> Result<Arc<Catalog>> {
        let result = self.cache.fill_if_empty().await;
        self.rebuild_mappings();
        match result {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                tracing::error!(error = %e, "Ontology catalog is unavailable");
                Err(e.into())
            }
        }
    }

    /// Rebuilds the mappings of the selected file against the current
    /// catalog state. Example values are sampled again.
    pub fn rebuild_mappings(&mut self) {
        self.mappings = self.current.as_ref().map(|entry| self.build_mappings(entry));
    }

    /// Mappings of the selected file.
    pub fn mappings(&self) -> Option<&MappingModel> {
        self.mappings.as_ref()
    }

    /// Sets the concept kind of a column of the selected file.
    pub fn set_kind(&mut self, column: &str, kind: ConceptKind) -> Result<()> {
        self.mappings_mut()?.set_kind(column, kind)?;
        Ok(())
    }

    /// Chooses the target concept of a column of the selected file.
    pub fn set_target(&mut self, column: &str, iri: &str) -> Result<()> {
        self.mappings_mut()?.set_target(column, iri)?;
        tracing::debug!(column, iri, "Mapping target set");
        Ok(())
    }

    fn mappings_mut(&mut self) -> Result<&mut MappingModel> {
        self.mappings.as_mut().ok_or(SessionError::NoFileSelected)
    }

    fn build_mappings(&self, entry: &FileEntry) -> MappingModel {
        let model = MappingModel::build(entry, &self.cache.state());
        for mapping in model.mappings() {
            tracing::trace!(
                column = %mapping.column,
                example = %redact_value(&mapping.example_value.to_string()),
                "Sampled example value"
            );
        }
        model
    }

    fn select(&mut self, entry: FileEntry) -> &FileEntry {
        self.mappings = Some(self.build_mappings(&entry));
        self.current.insert(entry)
    }
}
