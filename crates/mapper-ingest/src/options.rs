//! Ingestion options.

use serde::{Deserialize, Serialize};

/// Maximum input size (500 MB default).
pub const MAX_FILE_BYTES: u64 = 500 * 1024 * 1024;

/// Options controlling how source files are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Turn numeric-looking delimited fields into numbers and blanks into empty cells.
    pub infer_types: bool,
    /// Inputs larger than this are rejected before parsing.
    pub max_file_bytes: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            infer_types: true,
            max_file_bytes: MAX_FILE_BYTES,
        }
    }
}

impl IngestOptions {
    /// Enable or disable type inference for delimited text.
    #[must_use]
    pub fn with_infer_types(mut self, enable: bool) -> Self {
        self.infer_types = enable;
        self
    }

    /// Set the maximum accepted input size.
    #[must_use]
    pub fn with_max_file_bytes(mut self, max: u64) -> Self {
        self.max_file_bytes = max;
        self
    }
}
