//! Error types for data ingestion.

use thiserror::Error;

/// Errors that can occur while turning file bytes into records.
///
/// Every variant is scoped to the single file being ingested; none of them
/// affect other files or previously stored data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file name suffix is not a supported tabular format.
    #[error("unsupported file type: {name}")]
    UnsupportedFormat { name: String },

    /// The input exceeds the configured size limit.
    #[error("file is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    /// Malformed delimited text.
    #[error("failed to parse delimited text{}: {source}", line_suffix(.line))]
    Delimited {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be opened or its first sheet could not be read.
    #[error("failed to read workbook: {message}")]
    Workbook { message: String },

    /// The workbook contains no sheets at all.
    #[error("workbook has no sheets")]
    EmptyWorkbook,
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl IngestError {
    /// Returns true for errors caused by malformed content in a recognized format.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Delimited { .. } | Self::Workbook { .. } | Self::EmptyWorkbook
        )
    }

    /// Short message suitable for a status label next to the file name.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFormat { .. } => {
                "Unsupported file type. Use .csv, .tsv, or a spreadsheet workbook.".to_string()
            }
            Self::FileTooLarge { max_size, .. } => {
                format!("The file is larger than the {} MB limit.", max_size / (1024 * 1024))
            }
            Self::Delimited { line: Some(line), .. } => {
                format!("The file could not be read (problem near line {line}).")
            }
            Self::Delimited { line: None, .. } | Self::Workbook { .. } => {
                "The file could not be read. It may be damaged.".to_string()
            }
            Self::EmptyWorkbook => "The workbook does not contain any sheets.".to_string(),
        }
    }
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
