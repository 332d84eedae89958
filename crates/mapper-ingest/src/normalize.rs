//! Row normalization: synthetic ids and a fixed column schema.
//!
//! The first row fixes the schema for the whole file. Later rows are not
//! re-validated: keys outside the schema are dropped and schema keys a row
//! lacks become [`CellValue::Empty`]. Such rows are reported through
//! [`normalize_with_report`] and logged, but never rejected.

use std::borrow::Cow;
use std::collections::HashSet;

use mapper_model::{CellValue, ID_KEY, NormalizedRecord, RawRow};

use crate::header::{disambiguate, unique_labels};

/// A row whose shape differs from the schema fixed by the first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMismatch {
    /// Id assigned to the affected record.
    pub id: u64,
    /// Schema keys the row did not provide (filled with empty values).
    pub missing: Vec<String>,
    /// Row keys outside the schema (dropped).
    pub extra: Vec<String>,
}

/// Normalized records plus the rows that had to be padded or trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub records: Vec<NormalizedRecord>,
    pub mismatches: Vec<RowMismatch>,
}

/// One schema column: where to read it from, and the key to store it under.
#[derive(Debug, Clone)]
struct SchemaColumn {
    source: String,
    key: String,
}

/// Normalizes raw rows into records with ids `1..=n`.
pub fn normalize(rows: &[RawRow], has_headers: bool) -> Vec<NormalizedRecord> {
    normalize_with_report(rows, has_headers).records
}

/// Like [`normalize`], also returning the rows that did not match the schema.
///
/// With `has_headers`, a labeled first row (header already consumed by the
/// parser) only supplies the schema keys and is itself data. A positional
/// first row is an unconsumed header row: its values become the labels and
/// it is excluded from the output.
pub fn normalize_with_report(rows: &[RawRow], has_headers: bool) -> Normalized {
    let Some(first) = rows.first() else {
        return Normalized::default();
    };

    let (sources, data) = match (has_headers, first) {
        (true, RawRow::Values(labels)) => {
            let labels = unique_labels(labels.iter().map(ToString::to_string));
            let sources = labels
                .into_iter()
                .enumerate()
                .map(|(idx, label)| (idx.to_string(), label))
                .collect::<Vec<_>>();
            (sources, &rows[1..])
        }
        (false, RawRow::Values(_)) => {
            let width = rows.iter().map(RawRow::len).max().unwrap_or(0);
            let sources = (0..width).map(|idx| (idx.to_string(), idx.to_string())).collect();
            (sources, rows)
        }
        (_, RawRow::Labeled(_)) => {
            let sources = first
                .keys()
                .into_iter()
                .map(|key| (key.to_string(), key.into_owned()))
                .collect();
            (sources, rows)
        }
    };
    let schema = reserve_id_key(sources);

    let source_keys: HashSet<&str> = schema.iter().map(|c| c.source.as_str()).collect();
    let mut normalized = Normalized {
        records: Vec::with_capacity(data.len()),
        mismatches: Vec::new(),
    };

    for (idx, row) in data.iter().enumerate() {
        let id = idx as u64 + 1;
        let mut missing = Vec::new();
        let fields = schema
            .iter()
            .map(|column| {
                let value = match row.get(&column.source) {
                    Some(value) => value.clone(),
                    None => {
                        missing.push(column.key.clone());
                        CellValue::Empty
                    }
                };
                (column.key.clone(), value)
            })
            .collect();
        let extra: Vec<String> = row
            .keys()
            .into_iter()
            .filter(|key| !source_keys.contains(key.as_ref()))
            .map(Cow::into_owned)
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            normalized.mismatches.push(RowMismatch { id, missing, extra });
        }
        normalized.records.push(NormalizedRecord::new(id, fields));
    }

    if !normalized.mismatches.is_empty() {
        tracing::warn!(
            rows = normalized.mismatches.len(),
            "Rows do not match the column schema of the first row; values were padded or dropped"
        );
    }
    tracing::debug!(
        records = normalized.records.len(),
        columns = schema.len(),
        "Normalized rows"
    );
    normalized
}

/// Renames any column whose key collides with the reserved `id` key.
fn reserve_id_key(sources: Vec<(String, String)>) -> Vec<SchemaColumn> {
    let mut taken: HashSet<String> = sources.iter().map(|(_, key)| key.clone()).collect();
    taken.insert(ID_KEY.to_string());
    sources
        .into_iter()
        .map(|(source, key)| {
            let key = if key == ID_KEY {
                let renamed = disambiguate(ID_KEY, |candidate| taken.contains(candidate));
                taken.insert(renamed.clone());
                renamed
            } else {
                key
            };
            SchemaColumn { source, key }
        })
        .collect()
}
