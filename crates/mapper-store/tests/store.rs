//! Integration tests for the local store.

use std::fs;

use mapper_model::{CellValue, ConceptDescriptor, FileEntry, NormalizedRecord};
use mapper_store::{CURRENT_SCHEMA_VERSION, Store, StoreError};
use tempfile::tempdir;

fn records(values: &[(&str, f64)]) -> Vec<NormalizedRecord> {
    values
        .iter()
        .enumerate()
        .map(|(idx, (name, age))| {
            NormalizedRecord::new(
                idx as u64 + 1,
                vec![
                    ("name".to_string(), CellValue::text(*name)),
                    ("age".to_string(), CellValue::Number(*age)),
                ],
            )
        })
        .collect()
}

#[tokio::test]
async fn test_open_creates_collections_and_reopens() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data");

    let store = Store::open(&root).await.expect("first open");
    assert!(root.join("store.json").exists());
    assert!(root.join("files").is_dir());
    assert!(root.join("ontology").is_dir());

    store
        .files()
        .upsert("a.csv", records(&[("a", 30.0)]))
        .await
        .unwrap();
    drop(store);

    let reopened = Store::open(&root).await.expect("second open");
    let names = reopened.files().names().await.unwrap();
    assert_eq!(names, vec!["a.csv"]);
}

#[tokio::test]
async fn test_newer_schema_version_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("store.json"),
        format!(
            r#"{{"schema_version":{},"created_at":"2024-01-01T00:00:00Z"}}"#,
            CURRENT_SCHEMA_VERSION + 1
        ),
    )
    .unwrap();

    let result = Store::open(dir.path()).await;
    assert!(matches!(result, Err(StoreError::UnsupportedVersion { .. })));
}

#[tokio::test]
async fn test_corrupt_manifest_is_invalid_format() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("store.json"), b"not json").unwrap();

    let err = Store::open(dir.path()).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidFormat { .. }));
    assert!(err.is_read_failure());
}

#[tokio::test]
async fn test_repeated_upsert_keeps_one_entry() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let files = store.files();
    let data = records(&[("a", 30.0), ("b", 40.0)]);

    files.upsert("people.csv", data.clone()).await.unwrap();
    files.upsert("people.csv", data.clone()).await.unwrap();

    let all = files.list_all().await.unwrap();
    assert_eq!(all, vec![FileEntry::new("people.csv", data)]);
}

#[tokio::test]
async fn test_upsert_replaces_whole_entry() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let files = store.files();

    files
        .upsert("people.csv", records(&[("a", 30.0), ("b", 40.0)]))
        .await
        .unwrap();
    files
        .upsert("people.csv", records(&[("c", 50.0)]))
        .await
        .unwrap();

    let entry = files.get("people.csv").await.unwrap().expect("entry");
    assert_eq!(entry.records, records(&[("c", 50.0)]));
}

#[tokio::test]
async fn test_list_all_is_ordered_by_name() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let files = store.files();

    for name in ["zeta.csv", "alpha.xlsx", "mid.tsv"] {
        files.upsert(name, Vec::new()).await.unwrap();
    }

    let names: Vec<String> = files
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["alpha.xlsx", "mid.tsv", "zeta.csv"]);
}

#[tokio::test]
async fn test_delete_is_silent_for_absent_names() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let files = store.files();

    assert!(!files.delete("missing.csv").await.unwrap());

    files.upsert("a.csv", Vec::new()).await.unwrap();
    assert!(files.delete("a.csv").await.unwrap());
    assert!(files.get("a.csv").await.unwrap().is_none());
    assert!(files.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_long_file_names_are_stored() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let files = store.files();

    let long = "quarterly_report_".repeat(8) + ".csv";
    assert!(long.len() > 128);
    files.upsert(&long, records(&[("a", 1.0)])).await.unwrap();

    let entry = files.get(&long).await.unwrap().expect("entry");
    assert_eq!(entry.name, long);
    assert_eq!(entry.records, records(&[("a", 1.0)]));
    assert_eq!(files.names().await.unwrap(), vec![long.clone()]);

    assert!(files.delete(&long).await.unwrap());
    assert!(files.names().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_ascii_names_round_trip_through_listing() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let files = store.files();

    let names = ["Données_2024_報告書.xlsx", "a/b\\c.csv", "plain.csv"];
    for name in names {
        files.upsert(name, records(&[(name, 1.0)])).await.unwrap();
    }

    let mut expected: Vec<String> = names.iter().map(ToString::to_string).collect();
    expected.sort();
    assert_eq!(files.names().await.unwrap(), expected);

    let listed: Vec<String> = files
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(listed, expected);

    let entry = files.get("Données_2024_報告書.xlsx").await.unwrap().expect("entry");
    assert_eq!(entry.records, records(&[("Données_2024_報告書.xlsx", 1.0)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_aborted_upsert_does_not_tear_the_next_write() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();

    let big: Vec<(&str, f64)> = (0..5000).map(|i| ("row", f64::from(i))).collect();
    let files = store.files().clone();
    let first = tokio::spawn(async move { files.upsert("shared.csv", records(&big)).await });
    tokio::task::yield_now().await;
    first.abort();
    let _ = first.await;

    let latest = records(&[("final", 1.0), ("final", 2.0)]);
    store
        .files()
        .upsert("shared.csv", latest.clone())
        .await
        .unwrap();

    let entry = store.files().get("shared.csv").await.unwrap().expect("entry");
    assert_eq!(entry.records, latest);
    assert_eq!(store.files().names().await.unwrap(), vec!["shared.csv"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_upserts_to_one_name_do_not_tear() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();

    let mut handles = Vec::new();
    for round in 0..8 {
        let files = store.files().clone();
        handles.push(tokio::spawn(async move {
            let data: Vec<(&str, f64)> = (0..200)
                .map(|i| ("row", f64::from(round * 1000 + i)))
                .collect();
            files.upsert("shared.csv", records(&data)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let entry = store.files().get("shared.csv").await.unwrap().expect("entry");
    assert_eq!(entry.records.len(), 200);
    let first = entry.records[0].get("age").and_then(CellValue::as_number).unwrap();
    let round = (first / 1000.0).floor();
    for (i, record) in entry.records.iter().enumerate() {
        let age = record.get("age").and_then(CellValue::as_number).unwrap();
        assert_eq!(age, round * 1000.0 + i as f64, "records come from one write");
    }
}

#[tokio::test]
async fn test_unreadable_documents_are_skipped() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    store.files().upsert("good.csv", Vec::new()).await.unwrap();

    fs::write(dir.path().join("files").join("corrupt.json"), b"{").unwrap();
    fs::write(dir.path().join("files").join("good.csv.json.tmp"), b"{").unwrap();
    fs::write(dir.path().join("files").join("README"), b"ignored").unwrap();

    let all = store.files().list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "good.csv");
}

#[tokio::test]
async fn test_catalog_replace_load_and_clear() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();
    let catalog = store.catalog();

    assert!(catalog.load_all().await.unwrap().is_empty());

    catalog
        .replace_all(vec![
            ConceptDescriptor::new("http://ex.org/b", "B"),
            ConceptDescriptor::new("http://ex.org/a", "A"),
            ConceptDescriptor::new("http://ex.org/b", "B2"),
        ])
        .await
        .unwrap();
    assert_eq!(
        catalog.load_all().await.unwrap(),
        vec![
            ConceptDescriptor::new("http://ex.org/a", "A"),
            ConceptDescriptor::new("http://ex.org/b", "B2"),
        ]
    );

    catalog
        .replace_all(vec![ConceptDescriptor::new("http://ex.org/c", "C")])
        .await
        .unwrap();
    assert_eq!(
        catalog.load_all().await.unwrap(),
        vec![ConceptDescriptor::new("http://ex.org/c", "C")]
    );

    catalog.clear().await.unwrap();
    assert!(catalog.load_all().await.unwrap().is_empty());
}
