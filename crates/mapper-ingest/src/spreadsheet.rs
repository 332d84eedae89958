//! Spreadsheet workbook parsing (first sheet only).

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use mapper_model::{CellValue, RawRow};

use crate::error::{IngestError, Result};
use crate::header::unique_labels;

/// Parses the first sheet of a workbook into raw rows.
///
/// Cells keep their native spreadsheet types, so no text inference is
/// applied. Rows whose cells are all blank are skipped.
pub fn parse_spreadsheet(bytes: &[u8], has_headers: bool) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_name = workbook.sheet_names().first().cloned();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::EmptyWorkbook)??;

    let mut rows = range
        .rows()
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| cells.iter().map(cell_value).collect::<Vec<_>>());

    let parsed: Vec<RawRow> = if has_headers {
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let labels = unique_labels(header.iter().map(ToString::to_string));
        rows.map(|values| labeled_row(&labels, values)).collect()
    } else {
        rows.map(RawRow::Values).collect()
    };

    tracing::debug!(
        sheet = sheet_name.as_deref().unwrap_or_default(),
        rows = parsed.len(),
        "Parsed first worksheet"
    );
    Ok(parsed)
}

/// Converts one spreadsheet cell into a cell value.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// Pairs values with labels.
///
/// Blank cells under a header keep their column as an empty value; blank
/// cells past the header width are dropped.
fn labeled_row(labels: &[String], values: Vec<CellValue>) -> RawRow {
    let fields = values
        .into_iter()
        .enumerate()
        .filter(|(idx, value)| *idx < labels.len() || !value.is_empty())
        .map(|(idx, value)| {
            let key = labels.get(idx).cloned().unwrap_or_else(|| idx.to_string());
            (key, value)
        })
        .collect();
    RawRow::Labeled(fields)
}
