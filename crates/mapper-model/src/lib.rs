//! Data model definitions shared by the data mapper crates.
//!
//! # Types
//!
//! - [`CellValue`] - a single scalar read from a source file
//! - [`RawRow`] - one parsed row, before normalization
//! - [`NormalizedRecord`] - one row after normalization, with a synthetic `id`
//! - [`FileEntry`] - a named, normalized record set as stored
//! - [`ConceptDescriptor`] / [`ConceptKind`] - ontology catalog entries and mapping kinds

#![deny(unsafe_code)]

mod concept;
mod error;
mod record;
mod row;
mod value;

pub use concept::{ConceptDescriptor, ConceptKind};
pub use error::{ModelError, Result};
pub use record::{FileEntry, ID_KEY, NormalizedRecord};
pub use row::RawRow;
pub use value::CellValue;
