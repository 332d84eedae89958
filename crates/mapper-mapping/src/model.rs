//! Per-column mapping state for one file.
//!
//! A [`MappingModel`] is built from a [`FileEntry`] and the current catalog
//! state. It is purely in-memory: building or editing it never persists
//! anything.

use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use mapper_model::{CellValue, ConceptDescriptor, ConceptKind, FileEntry};
use mapper_ontology::{Catalog, CatalogState};

use crate::error::{MappingError, Result};

/// How one source column maps to an ontology concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Column key from the file's schema.
    pub column: String,
    /// Kind of concept the column maps to.
    pub kind: ConceptKind,
    /// Chosen target concept, if any.
    pub target_iri: Option<String>,
    /// A value sampled from the column, shown as a hint.
    pub example_value: CellValue,
}

impl ColumnMapping {
    fn new(column: &str, example_value: CellValue) -> Self {
        Self {
            column: column.to_string(),
            kind: ConceptKind::default(),
            target_iri: None,
            example_value,
        }
    }

    /// Returns true once a target has been chosen.
    pub fn is_mapped(&self) -> bool {
        self.target_iri.is_some()
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MappingSummary {
    /// Number of columns.
    pub total: usize,
    /// Columns with a chosen target.
    pub mapped: usize,
    /// Columns without a target.
    pub unmapped: usize,
}

/// Column mappings for one file plus the selectable targets.
#[derive(Debug, Clone)]
pub struct MappingModel {
    file_name: String,
    mappings: Vec<ColumnMapping>,
    catalog: Option<Arc<Catalog>>,
}

impl MappingModel {
    /// Builds mappings for every column of `entry`, sampling example values
    /// with the thread-local RNG. Each build samples again.
    pub fn build(entry: &FileEntry, state: &CatalogState) -> Self {
        Self::build_with_rng(entry, state, &mut rand::rng())
    }

    /// Like [`MappingModel::build`], with a caller-supplied RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(
        entry: &FileEntry,
        state: &CatalogState,
        rng: &mut R,
    ) -> Self {
        let mappings: Vec<ColumnMapping> = entry
            .columns()
            .into_iter()
            .map(|column| {
                let values: Vec<&CellValue> = entry.column_values(column).collect();
                let example = values.choose(rng).map(|v| (*v).clone()).unwrap_or_default();
                ColumnMapping::new(column, example)
            })
            .collect();

        let catalog = state.catalog().filter(|c| !c.is_empty()).cloned();
        if catalog.is_none() {
            tracing::debug!(file = %entry.name, "Building mappings without a catalog");
        }
        tracing::debug!(
            file = %entry.name,
            columns = mappings.len(),
            "Built column mappings"
        );

        Self {
            file_name: entry.name.clone(),
            mappings,
            catalog,
        }
    }

    /// Name of the file the mappings belong to.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// All mappings, in column order.
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Mapping for one column.
    pub fn get(&self, column: &str) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.column == column)
    }

    /// True when no catalog is loaded (still loading, failed, or empty).
    /// Target lists are empty in that case.
    pub fn catalog_unavailable(&self) -> bool {
        self.catalog.is_none()
    }

    /// Selectable targets. Empty when the catalog is unavailable.
    pub fn options(&self) -> &[ConceptDescriptor] {
        self.catalog
            .as_deref()
            .map(Catalog::descriptors)
            .unwrap_or_default()
    }

    /// Sets the concept kind of a column.
    pub fn set_kind(&mut self, column: &str, kind: ConceptKind) -> Result<()> {
        self.get_mut(column)?.kind = kind;
        Ok(())
    }

    /// Chooses the target concept of a column. The IRI must be in the catalog.
    pub fn set_target(&mut self, column: &str, iri: &str) -> Result<()> {
        let catalog = self.catalog.as_ref().ok_or(MappingError::CatalogUnavailable)?;
        if !catalog.contains(iri) {
            return Err(MappingError::UnknownTarget {
                iri: iri.to_string(),
            });
        }
        self.get_mut(column)?.target_iri = Some(iri.to_string());
        Ok(())
    }

    /// Clears the target of a column. Returns true if one was set.
    pub fn clear_target(&mut self, column: &str) -> Result<bool> {
        Ok(self.get_mut(column)?.target_iri.take().is_some())
    }

    /// Get summary counts.
    pub fn summary(&self) -> MappingSummary {
        let mapped = self.mappings.iter().filter(|m| m.is_mapped()).count();
        MappingSummary {
            total: self.mappings.len(),
            mapped,
            unmapped: self.mappings.len() - mapped,
        }
    }

    fn get_mut(&mut self, column: &str) -> Result<&mut ColumnMapping> {
        self.mappings
            .iter_mut()
            .find(|m| m.column == column)
            .ok_or_else(|| MappingError::ColumnNotFound(column.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapper_model::NormalizedRecord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn entry() -> FileEntry {
        let records = (1..=5)
            .map(|id| {
                NormalizedRecord::new(
                    id,
                    vec![
                        ("name".to_string(), CellValue::text(format!("n{id}"))),
                        ("age".to_string(), CellValue::Number(id as f64 * 10.0)),
                    ],
                )
            })
            .collect();
        FileEntry::new("people.csv", records)
    }

    fn ready() -> CatalogState {
        CatalogState::Ready(Arc::new(Catalog::new(vec![
            ConceptDescriptor::new("http://ex.org/name", "name"),
            ConceptDescriptor::new("http://ex.org/age", "age"),
        ])))
    }

    #[test]
    fn test_defaults() {
        let model = MappingModel::build(&entry(), &ready());
        assert_eq!(model.file_name(), "people.csv");
        let columns: Vec<&str> = model.mappings().iter().map(|m| m.column.as_str()).collect();
        assert_eq!(columns, vec!["name", "age"]);
        for mapping in model.mappings() {
            assert_eq!(mapping.kind, ConceptKind::DataProperty);
            assert_eq!(mapping.target_iri, None);
        }
        assert!(!model.catalog_unavailable());
        assert_eq!(model.options().len(), 2);
    }

    #[test]
    fn test_example_values_come_from_the_column() {
        let source = entry();
        let model = MappingModel::build(&source, &ready());
        for mapping in model.mappings() {
            let values: Vec<&CellValue> = source.column_values(&mapping.column).collect();
            assert!(values.contains(&&mapping.example_value));
        }
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let a = MappingModel::build_with_rng(&entry(), &ready(), &mut StdRng::seed_from_u64(7));
        let b = MappingModel::build_with_rng(&entry(), &ready(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a.mappings(), b.mappings());
    }

    #[test]
    fn test_empty_entry_has_no_mappings() {
        let model = MappingModel::build(&FileEntry::new("empty.csv", Vec::new()), &ready());
        assert!(model.mappings().is_empty());
        assert_eq!(model.summary(), MappingSummary::default());
    }

    #[test]
    fn test_edit_mappings() {
        let mut model = MappingModel::build(&entry(), &ready());
        model.set_kind("name", ConceptKind::Individual).unwrap();
        model.set_target("age", "http://ex.org/age").unwrap();

        assert_eq!(model.get("name").map(|m| m.kind), Some(ConceptKind::Individual));
        assert_eq!(
            model.get("age").and_then(|m| m.target_iri.as_deref()),
            Some("http://ex.org/age")
        );
        assert_eq!(
            model.summary(),
            MappingSummary {
                total: 2,
                mapped: 1,
                unmapped: 1
            }
        );

        assert!(model.clear_target("age").unwrap());
        assert!(!model.clear_target("age").unwrap());
    }

    #[test]
    fn test_edit_errors() {
        let mut model = MappingModel::build(&entry(), &ready());
        assert_eq!(
            model.set_kind("missing", ConceptKind::Class),
            Err(MappingError::ColumnNotFound("missing".to_string()))
        );
        assert_eq!(
            model.set_target("age", "http://ex.org/nope"),
            Err(MappingError::UnknownTarget {
                iri: "http://ex.org/nope".to_string()
            })
        );
    }
}
