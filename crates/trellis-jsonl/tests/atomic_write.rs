//! Integration tests for JSONL writing and atomic replacement.
//!
//! # Test Categories
//!
//! ## Write/Read Roundtrips
//! - Written files read back identically
//! - Empty slices produce empty files
//!
//! ## Atomic Replacement
//! - Target is fully replaced on success
//! - No `.tmp` file remains after a successful write
//! - Writing to a fresh path creates the file

use serde::{Deserialize, Serialize};
use tempfile::tempdir;
use trellis_jsonl::{read_jsonl, write_json_atomic, write_jsonl, write_jsonl_atomic};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TaskRecord {
    id: String,
    title: String,
    priority: i64,
}

fn sample_records() -> Vec<TaskRecord> {
    vec![
        TaskRecord {
            id: "t-1".to_string(),
            title: "First".to_string(),
            priority: 0,
        },
        TaskRecord {
            id: "t-2".to_string(),
            title: "Second".to_string(),
            priority: 2,
        },
    ]
}

// =============================================================================
// Write/Read Roundtrips
// =============================================================================

#[tokio::test]
async fn written_file_reads_back_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");
    let records = sample_records();

    write_jsonl(&path, &records).await.unwrap();
    let loaded = read_jsonl::<TaskRecord, _>(&path).await.unwrap();

    assert_eq!(loaded, records);
}

#[tokio::test]
async fn empty_slice_produces_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.jsonl");

    write_jsonl::<TaskRecord, _>(&path, &[]).await.unwrap();
    let loaded = read_jsonl::<TaskRecord, _>(&path).await.unwrap();

    assert!(loaded.is_empty());
}

// =============================================================================
// Atomic Replacement
// =============================================================================

#[tokio::test]
async fn atomic_write_replaces_existing_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");

    let original = sample_records();
    write_jsonl_atomic(&path, &original).await.unwrap();

    let replacement = vec![TaskRecord {
        id: "t-9".to_string(),
        title: "Only one left".to_string(),
        priority: 1,
    }];
    write_jsonl_atomic(&path, &replacement).await.unwrap();

    let loaded = read_jsonl::<TaskRecord, _>(&path).await.unwrap();
    assert_eq!(loaded, replacement);
}

#[tokio::test]
async fn atomic_write_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");

    write_jsonl_atomic(&path, &sample_records()).await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp file left behind: {leftovers:?}");
}

#[tokio::test]
async fn atomic_write_creates_fresh_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("brand_new.jsonl");
    assert!(!path.exists());

    write_jsonl_atomic(&path, &sample_records()).await.unwrap();

    assert!(path.exists());
    let loaded = read_jsonl::<TaskRecord, _>(&path).await.unwrap();
    assert_eq!(loaded.len(), 2);
}

#[tokio::test]
async fn json_document_write_is_pretty_and_atomic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("view.json");

    write_json_atomic(&path, &sample_records()).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.lines().count() > 1, "expected pretty-printed output");
    let parsed: Vec<TaskRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, sample_records());

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp file left behind: {leftovers:?}");
}
