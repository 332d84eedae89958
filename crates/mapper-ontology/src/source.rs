//! Catalog sources: where the full catalog comes from on a cache miss.

use std::path::PathBuf;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use mapper_model::ConceptDescriptor;

use crate::error::{OntologyError, Result};

/// User agent string for catalog requests.
const USER_AGENT_VALUE: &str = concat!("data-mapper/", env!("CARGO_PKG_VERSION"));

/// A read-only source of the full ontology catalog.
pub trait CatalogSource: Send + Sync + 'static {
    /// Human-readable name of the source, used in logs and errors.
    fn name(&self) -> String;

    /// Retrieves the complete catalog.
    fn fetch_catalog(&self) -> BoxFuture<'_, Result<Vec<ConceptDescriptor>>>;
}

/// Parses a catalog document: a JSON array of `{ "IRI": ..., "label": ... }`.
pub fn parse_catalog(source_name: &str, bytes: &[u8]) -> Result<Vec<ConceptDescriptor>> {
    serde_json::from_slice(bytes).map_err(|e| OntologyError::InvalidCatalog {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Fetches the catalog over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Creates a source for the given catalog URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| OntologyError::CatalogFetch {
                source_name: url.clone(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, url })
    }

    /// The catalog URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<ConceptDescriptor>> {
        tracing::debug!("Fetching catalog from {}", self.url);

        let fetch_error = |message: String| OntologyError::CatalogFetch {
            source_name: self.url.clone(),
            message,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP error! status: {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        parse_catalog(&self.url, &body)
    }
}

impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    fn fetch_catalog(&self) -> BoxFuture<'_, Result<Vec<ConceptDescriptor>>> {
        self.fetch().boxed()
    }
}

/// Reads the catalog from a local JSON file (e.g. a bundled `ontology-objects.json`).
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn fetch(&self) -> Result<Vec<ConceptDescriptor>> {
        let name = self.name();
        tracing::debug!("Reading catalog from {}", name);
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| OntologyError::CatalogFetch {
                source_name: name.clone(),
                message: e.to_string(),
            })?;
        parse_catalog(&name, &bytes)
    }
}

impl CatalogSource for FileCatalogSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_catalog(&self) -> BoxFuture<'_, Result<Vec<ConceptDescriptor>>> {
        self.fetch().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_catalog() {
        let objects = parse_catalog(
            "test",
            br#"[{"IRI":"http://ex.org/Person","label":"Person"}]"#,
        )
        .unwrap();
        assert_eq!(objects, vec![ConceptDescriptor::new("http://ex.org/Person", "Person")]);
    }

    #[test]
    fn test_parse_catalog_rejects_wrong_shape() {
        let err = parse_catalog("test", br#"{"IRI":"x"}"#).unwrap_err();
        assert!(matches!(err, OntologyError::InvalidCatalog { .. }));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ontology-objects.json");
        std::fs::write(&path, br#"[{"IRI":"a","label":"A"}]"#).unwrap();

        let source = FileCatalogSource::new(&path);
        let objects = source.fetch_catalog().await.unwrap();
        assert_eq!(objects, vec![ConceptDescriptor::new("a", "A")]);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("missing.json"));
        let err = source.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, OntologyError::CatalogFetch { .. }));
    }
}
