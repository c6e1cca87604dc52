// Record files: layout, JSON format and discovery

use docindex::core::storage::{load_records, RecordStore};
use docindex::core::types::ResultSet;
use std::fs;
use tempfile::TempDir;

use crate::common::record;

#[test]
fn test_file_per_language() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("_search"));

    let mut results = ResultSet::new();
    results.merge(vec![record("a", "en"), record("b", "ru"), record("c", "kz")]);

    let files = store.write_result_set(&results).unwrap();

    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["en-algolia.json", "kz-algolia.json", "ru-algolia.json"]
    );
}

#[test]
fn test_file_is_json_array_of_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path());
    let path = store.write("en", &[record("a", "en"), record("b", "en")]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let array = value.as_array().unwrap();

    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["objectID"], "a");
    assert_eq!(array[1]["url"], "b.html");
    assert!(array[0].get("section").is_none());
}

#[test]
fn test_round_trip_through_discover() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path());
    store.write("en", &[record("a", "en")]).unwrap();
    store.write("ru", &[record("b", "ru")]).unwrap();

    let discovered = store.discover().unwrap();
    assert_eq!(discovered.len(), 2);

    let (lang, path) = &discovered[1];
    assert_eq!(lang, "ru");
    assert_eq!(load_records(path).unwrap(), vec![record("b", "ru")]);
}

#[test]
fn test_rewrite_replaces_previous_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path());

    store.write("en", &[record("old", "en")]).unwrap();
    store.write("en", &[record("new", "en")]).unwrap();

    let records = store.load("en").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].object_id, "new");
}
