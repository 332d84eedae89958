//! End-to-end parsing and normalization scenarios.

use mapper_ingest::{
    IngestError, IngestOptions, SourceFormat, normalize, parse, read_file_entry,
};
use mapper_model::{CellValue, RawRow};

fn to_json(records: &[mapper_model::NormalizedRecord]) -> serde_json::Value {
    serde_json::to_value(records).expect("serialize records")
}

#[test]
fn test_labeled_rows_normalize_with_sequential_ids() {
    let rows = vec![
        RawRow::Labeled(vec![
            ("name".to_string(), CellValue::text("a")),
            ("age".to_string(), CellValue::Number(30.0)),
        ]),
        RawRow::Labeled(vec![
            ("name".to_string(), CellValue::text("b")),
            ("age".to_string(), CellValue::Number(40.0)),
        ]),
    ];
    let records = normalize(&rows, true);
    assert_eq!(
        to_json(&records),
        serde_json::json!([
            {"id": 1, "name": "a", "age": 30},
            {"id": 2, "name": "b", "age": 40}
        ])
    );
}

#[test]
fn test_positional_rows_normalize_with_index_keys() {
    let rows = vec![
        RawRow::Values(vec![CellValue::text("a"), CellValue::Number(30.0)]),
        RawRow::Values(vec![CellValue::text("b"), CellValue::Number(40.0)]),
    ];
    let records = normalize(&rows, false);
    assert_eq!(
        to_json(&records),
        serde_json::json!([
            {"id": 1, "0": "a", "1": 30},
            {"id": 2, "0": "b", "1": 40}
        ])
    );
}

#[test]
fn test_empty_file_yields_no_records_under_either_policy() {
    for has_headers in [true, false] {
        let entry = read_file_entry("empty.csv", b"", has_headers, &IngestOptions::default())
            .expect("empty file is not an error");
        assert!(entry.records.is_empty());
    }
}

#[test]
fn test_csv_file_with_header_keeps_first_data_row() {
    let entry = read_file_entry(
        "people.csv",
        b"name,age\na,30\nb,40\n",
        true,
        &IngestOptions::default(),
    )
    .expect("read csv");
    assert_eq!(
        to_json(&entry.records),
        serde_json::json!([
            {"id": 1, "name": "a", "age": 30},
            {"id": 2, "name": "b", "age": 40}
        ])
    );
}

#[test]
fn test_tsv_file_without_header() {
    let entry = read_file_entry(
        "people.tsv",
        b"a\t30\nb\t40\n",
        false,
        &IngestOptions::default(),
    )
    .expect("read tsv");
    assert_eq!(
        to_json(&entry.records),
        serde_json::json!([
            {"id": 1, "0": "a", "1": 30},
            {"id": 2, "0": "b", "1": 40}
        ])
    );
}

#[test]
fn test_type_inference_can_be_disabled() {
    let options = IngestOptions::default().with_infer_types(false);
    let rows = parse(b"x\n007\n", SourceFormat::CSV, true, &options).expect("parse");
    assert_eq!(
        rows,
        vec![RawRow::Labeled(vec![("x".to_string(), CellValue::text("007"))])]
    );
}

#[test]
fn test_unsupported_suffix_is_reported() {
    let err = read_file_entry("notes.txt", b"a,b", true, &IngestOptions::default())
        .expect_err("txt is not supported");
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    assert!(!err.user_message().is_empty());
}

#[test]
fn test_corrupt_workbook_is_a_parse_error() {
    let err = read_file_entry("book.xlsx", b"PK\x03\x04garbage", true, &IngestOptions::default())
        .expect_err("corrupt workbook");
    assert!(err.is_parse_error());
}

const PEOPLE_XLSX: &[u8] = include_bytes!("data/people.xlsx");

#[test]
fn test_workbook_with_header_reads_first_sheet_only() {
    let entry = read_file_entry("people.xlsx", PEOPLE_XLSX, true, &IngestOptions::default())
        .expect("read workbook");

    assert_eq!(entry.name, "people.xlsx");
    assert_eq!(
        to_json(&entry.records),
        serde_json::json!([
            {"id": 1, "name": "a", "age": 30, "city": null},
            {"id": 2, "name": "b", "age": 40, "city": "Paris"}
        ])
    );
    assert_eq!(entry.records[0].get("city"), Some(&CellValue::Empty));
}

#[test]
fn test_workbook_without_header_keeps_header_row_as_data() {
    let entry = read_file_entry("people.xlsx", PEOPLE_XLSX, false, &IngestOptions::default())
        .expect("read workbook");

    // Row 3 of the sheet is blank and skipped; the second sheet is never read.
    assert_eq!(entry.records.len(), 3);
    for record in &entry.records {
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["0", "1", "2"]);
    }
    assert_eq!(entry.records[0].get("0"), Some(&CellValue::text("name")));
    assert_eq!(entry.records[2].get("2"), Some(&CellValue::text("Paris")));

    let values: Vec<&CellValue> = entry
        .records
        .iter()
        .flat_map(|record| ["0", "1", "2"].map(|key| record.get(key)))
        .flatten()
        .collect();
    assert!(!values.contains(&&CellValue::Number(999.0)));
    assert!(!values.contains(&&CellValue::text("x")));
}
