//! Data ingestion for the data mapper.
//!
//! This crate turns raw file bytes into normalized records.
//!
//! # Features
//!
//! - **Format detection**: by file name suffix (`.csv`, `.tsv`, workbooks)
//! - **Delimited text**: CSV/TSV with optional header row and opportunistic typing
//! - **Workbooks**: first sheet of `.xlsx`/`.xlsm`/`.xls`/`.ods` files
//! - **Normalization**: synthetic `id` column and a schema fixed by the first row
//!
//! # Example
//!
//! ```ignore
//! use mapper_ingest::{IngestOptions, read_file_entry};
//!
//! let bytes = std::fs::read("people.csv")?;
//! let entry = read_file_entry("people.csv", &bytes, true, &IngestOptions::default())?;
//! assert_eq!(entry.headers()[0], "id");
//! ```

mod decode;
mod delimited;
mod error;
mod format;
mod header;
mod infer;
mod normalize;
mod options;
mod parser;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsing ===
pub use decode::decode_text;
pub use format::SourceFormat;
pub use infer::{infer_cell, looks_numeric};
pub use options::{IngestOptions, MAX_FILE_BYTES};
pub use parser::{parse, read_file_entry};

// === Normalization ===
pub use normalize::{Normalized, RowMismatch, normalize, normalize_with_report};
