//! In-memory view of the ontology catalog.

use std::sync::Arc;

use mapper_model::ConceptDescriptor;

/// An immutable catalog of concept descriptors, ordered and unique by IRI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    objects: Vec<ConceptDescriptor>,
}

impl Catalog {
    /// Builds a catalog; when an IRI repeats, the later descriptor wins.
    pub fn new(objects: Vec<ConceptDescriptor>) -> Self {
        let mut objects: Vec<ConceptDescriptor> = objects.into_iter().rev().collect();
        // Stable sort keeps the last occurrence first within equal IRIs.
        objects.sort_by(|a, b| a.iri.cmp(&b.iri));
        objects.dedup_by(|later, earlier| later.iri == earlier.iri);
        Self { objects }
    }

    /// Looks up a descriptor by IRI.
    pub fn get(&self, iri: &str) -> Option<&ConceptDescriptor> {
        self.objects
            .binary_search_by(|object| object.iri.as_str().cmp(iri))
            .ok()
            .map(|idx| &self.objects[idx])
    }

    /// Returns true if the IRI is in the catalog.
    pub fn contains(&self, iri: &str) -> bool {
        self.get(iri).is_some()
    }

    /// Descriptors in IRI order.
    pub fn descriptors(&self) -> &[ConceptDescriptor] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConceptDescriptor> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// What the cache can currently offer to consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    /// No fill has been attempted yet.
    NotLoaded,
    /// A fill is in flight.
    Loading,
    /// The catalog is loaded (it may still be empty).
    Ready(Arc<Catalog>),
    /// The last fill failed; carries the error text.
    Unavailable(String),
}

impl CatalogState {
    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// True when a non-empty catalog is loaded.
    pub fn is_available(&self) -> bool {
        self.catalog().is_some_and(|catalog| !catalog.is_empty())
    }
}
