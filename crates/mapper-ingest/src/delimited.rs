//! Delimited text (CSV/TSV) parsing.

use csv::{ReaderBuilder, StringRecord};

use mapper_model::{CellValue, RawRow};

use crate::decode::decode_text;
use crate::error::{IngestError, Result};
use crate::header::unique_labels;
use crate::infer::infer_cell;

/// Parses delimited text into raw rows.
///
/// With `has_headers` the first record supplies the column labels and every
/// later record becomes a [`RawRow::Labeled`]; fields past the header width
/// are keyed by their position. Without headers each record becomes a
/// [`RawRow::Values`]. Completely empty lines are skipped.
pub fn parse_delimited(
    bytes: &[u8],
    delimiter: u8,
    has_headers: bool,
    infer_types: bool,
) -> Result<Vec<RawRow>> {
    let text = decode_text(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let labels = if has_headers {
        match records.next() {
            Some(first) => Some(unique_labels(first.map_err(delimited_error)?.iter())),
            None => return Ok(Vec::new()),
        }
    } else {
        None
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(delimited_error)?;
        let row = match &labels {
            Some(labels) => labeled_row(labels, &record, infer_types),
            None => RawRow::Values(record.iter().map(|f| infer_cell(f, infer_types)).collect()),
        };
        rows.push(row);
    }

    tracing::debug!(
        rows = rows.len(),
        columns = labels.as_ref().map(Vec::len),
        "Parsed delimited text"
    );
    Ok(rows)
}

fn labeled_row(labels: &[String], record: &StringRecord, infer_types: bool) -> RawRow {
    let fields = record
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let key = labels.get(idx).cloned().unwrap_or_else(|| idx.to_string());
            (key, infer_cell(field, infer_types))
        })
        .collect::<Vec<(String, CellValue)>>();
    RawRow::Labeled(fields)
}

fn delimited_error(source: csv::Error) -> IngestError {
    let line = source.position().map(csv::Position::line);
    IngestError::Delimited { line, source }
}
