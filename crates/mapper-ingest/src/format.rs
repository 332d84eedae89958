//! Source format detection by file name suffix.

use std::fmt;

use crate::error::{IngestError, Result};

/// Workbook suffixes read through the spreadsheet path.
const SPREADSHEET_SUFFIXES: [&str; 4] = [".xlsx", ".xlsm", ".xls", ".ods"];

/// Tabular source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with the given field delimiter.
    Delimited { delimiter: u8 },
    /// Spreadsheet workbook; only the first sheet is read.
    Spreadsheet,
}

impl SourceFormat {
    /// Comma-separated values.
    pub const CSV: Self = Self::Delimited { delimiter: b',' };
    /// Tab-separated values.
    pub const TSV: Self = Self::Delimited { delimiter: b'\t' };

    /// Determines the format from a file name suffix (case-insensitive).
    ///
    /// Content is never sniffed.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Ok(Self::CSV)
        } else if lower.ends_with(".tsv") {
            Ok(Self::TSV)
        } else if SPREADSHEET_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            Ok(Self::Spreadsheet)
        } else {
            Err(IngestError::UnsupportedFormat {
                name: name.to_string(),
            })
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delimited { delimiter: b'\t' } => f.write_str("tab-separated text"),
            Self::Delimited { delimiter } => {
                write!(f, "delimited text ('{}')", char::from(*delimiter))
            }
            Self::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}
