//! Column-to-concept mapping for the data mapper.
//!
//! Given a normalized file and the current ontology catalog state, this
//! crate builds one [`ColumnMapping`] per column and lets the host edit the
//! chosen kind and target.

#![deny(unsafe_code)]

mod error;
mod model;

pub use error::{MappingError, Result};
pub use model::{ColumnMapping, MappingModel, MappingSummary};
