//! Format dispatch for the tabular parser.

use mapper_model::{FileEntry, RawRow};

use crate::delimited::parse_delimited;
use crate::error::{IngestError, Result};
use crate::format::SourceFormat;
use crate::normalize::normalize_with_report;
use crate::options::IngestOptions;
use crate::spreadsheet::parse_spreadsheet;

/// Parses file bytes in the given format into raw rows.
///
/// Either every row is returned or an error is; no partial output is
/// produced on failure.
pub fn parse(
    bytes: &[u8],
    format: SourceFormat,
    has_headers: bool,
    options: &IngestOptions,
) -> Result<Vec<RawRow>> {
    let size = bytes.len() as u64;
    if size > options.max_file_bytes {
        return Err(IngestError::FileTooLarge {
            size,
            max_size: options.max_file_bytes,
        });
    }

    match format {
        SourceFormat::Delimited { delimiter } => {
            parse_delimited(bytes, delimiter, has_headers, options.infer_types)
        }
        SourceFormat::Spreadsheet => parse_spreadsheet(bytes, has_headers),
    }
}

/// Parses and normalizes a named file into a [`FileEntry`].
///
/// The format is chosen from the file name suffix.
pub fn read_file_entry(
    name: &str,
    bytes: &[u8],
    has_headers: bool,
    options: &IngestOptions,
) -> Result<FileEntry> {
    let format = SourceFormat::from_file_name(name)?;
    let rows = parse(bytes, format, has_headers, options)?;
    let normalized = normalize_with_report(&rows, has_headers);
    if !normalized.mismatches.is_empty() {
        tracing::warn!(
            file = name,
            rows = normalized.mismatches.len(),
            "File has rows that do not match its header"
        );
    }
    tracing::info!(
        file = name,
        %format,
        records = normalized.records.len(),
        "Read source file"
    );
    Ok(FileEntry::new(name, normalized.records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit() {
        let options = IngestOptions::default().with_max_file_bytes(4);
        let err = parse(b"a,b\n1,2\n", SourceFormat::CSV, true, &options).unwrap_err();
        assert!(matches!(err, IngestError::FileTooLarge { size: 8, max_size: 4 }));
    }

    #[test]
    fn test_unsupported_suffix_fails_before_parsing() {
        let err = read_file_entry("data.json", b"[]", true, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_read_file_entry() {
        let entry =
            read_file_entry("people.csv", b"name,age\na,30\n", true, &IngestOptions::default())
                .unwrap();
        assert_eq!(entry.name, "people.csv");
        assert_eq!(entry.headers(), vec!["id", "name", "age"]);
    }
}
