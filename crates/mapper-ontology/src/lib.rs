//! Ontology catalog cache for the data mapper.
//!
//! The catalog is a list of concept descriptors (`IRI` + label) used as
//! mapping targets. It is fetched once from a [`CatalogSource`] and then
//! served from the local store.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mapper_ontology::{HttpCatalogSource, OntologyCache};
//!
//! let source = HttpCatalogSource::new("https://example.org/ontology-objects.json")?;
//! let cache = OntologyCache::new(store.catalog().clone(), Arc::new(source));
//! let catalog = cache.fill_if_empty().await?;
//! ```

mod cache;
mod catalog;
mod error;
mod source;

pub use cache::OntologyCache;
pub use catalog::{Catalog, CatalogState};
pub use error::{OntologyError, Result};
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource, parse_catalog};
