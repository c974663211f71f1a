//! RecordStore over JsonFileBackend: state outlives the process-local accessor.

use std::sync::Arc;

use record_store::{is_tree_store, JsonFileBackend, Record, RecordStore, TreeRecordStore};
use serde_json::json;

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let backend = JsonFileBackend::open(&path).unwrap();
        let store = RecordStore::new(backend, "todo").unwrap();
        store.create_record(&Record::new().with("text", "buy milk")).unwrap();
        store.create_record(&Record::new().with("text", "walk dog")).unwrap();
        store.delete_record_by_id("1").unwrap();
    }

    let backend = JsonFileBackend::open(&path).unwrap();
    let store = RecordStore::new(backend, "todo").unwrap();
    assert_eq!(store.all_record_ids().unwrap(), vec!["2"]);
    assert_eq!(
        store.record_by_id("2").unwrap().unwrap().get("text"),
        Some(&json!("walk dog"))
    );

    let next = store.create_record(&Record::new()).unwrap();
    assert_eq!(next.id(), Some("3"));
}

#[test]
fn file_holds_the_raw_key_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let backend = JsonFileBackend::open(&path).unwrap();
    let store = TreeRecordStore::new(backend, "dirs").unwrap();
    store.create_record(&Record::new().with("name", "root")).unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        json!({
            "dirs-tree": "true",
            "dirs-counter": "1",
            "dirs-1": r#"{"name":"root","id":"1"}"#,
            "dirs": r#"["1"]"#
        })
    );
}

#[test]
fn shared_backend_between_stores() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(JsonFileBackend::open(dir.path().join("storage.json")).unwrap());

    let todos = RecordStore::new(backend.clone(), "todo").unwrap();
    let dirs = TreeRecordStore::new(backend.clone(), "dirs").unwrap();
    todos.create_record(&Record::new()).unwrap();
    dirs.create_record(&Record::new()).unwrap();

    assert!(is_tree_store(&backend, "dirs").unwrap());
    assert!(!is_tree_store(&backend, "todo").unwrap());
    assert!(todos.check_integrity().unwrap().is_clean());
    assert!(dirs.check_integrity().unwrap().is_clean());
}
