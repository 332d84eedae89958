//! Parsed rows before normalization.

use std::borrow::Cow;

use crate::value::CellValue;

/// One row as produced by the parser.
///
/// Rows read without a header row are plain value lists; rows read with a
/// header carry their column labels, in column order.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRow {
    /// Unlabeled values, addressed by position.
    Values(Vec<CellValue>),
    /// Label/value pairs in column order.
    Labeled(Vec<(String, CellValue)>),
}

impl RawRow {
    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Labeled(fields) => fields.len(),
        }
    }

    /// Returns true if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column keys of this row. Positional rows use `"0"`, `"1"`, ...
    pub fn keys(&self) -> Vec<Cow<'_, str>> {
        match self {
            Self::Values(values) => (0..values.len())
                .map(|idx| Cow::Owned(idx.to_string()))
                .collect(),
            Self::Labeled(fields) => fields
                .iter()
                .map(|(key, _)| Cow::Borrowed(key.as_str()))
                .collect(),
        }
    }

    /// Looks up a value by key (label, or positional index for value rows).
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        match self {
            Self::Values(values) => key.parse::<usize>().ok().and_then(|idx| values.get(idx)),
            Self::Labeled(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }
}
