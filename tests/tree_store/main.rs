//! Integration tests for TreeRecordStore.

use std::collections::HashSet;

use record_store::{
    is_tree_store, Backend, InMemoryBackend, Record, RecordStore, RecordStoreConfig,
    TreeRecordStore,
};

fn keys(backend: &InMemoryBackend) -> HashSet<String> {
    backend.keys().unwrap().into_iter().collect()
}

#[test]
fn tree_adds_only_the_marker_key() {
    let flat_backend = InMemoryBackend::new();
    let tree_backend = InMemoryBackend::new();

    let flat = RecordStore::new(flat_backend.clone(), "nodes").unwrap();
    let tree = TreeRecordStore::new(tree_backend.clone(), "nodes").unwrap();

    for name in ["root", "leaf"] {
        flat.create_record(&Record::new().with("name", name)).unwrap();
        tree.create_record(&Record::new().with("name", name)).unwrap();
    }

    let mut expected = keys(&flat_backend);
    assert!(!expected.contains("nodes-tree"));
    expected.insert("nodes-tree".to_string());
    assert_eq!(keys(&tree_backend), expected);
}

#[test]
fn tree_behaves_like_flat_store() {
    let flat = RecordStore::new(InMemoryBackend::new(), "nodes").unwrap();
    let tree = TreeRecordStore::new(InMemoryBackend::new(), "nodes").unwrap();

    for store in [&flat, &*tree] {
        let root = store.create_record(&Record::new().with("name", "root")).unwrap();
        let child = store
            .create_record(&Record::new().with("name", "child").with("parent", root.id().unwrap()))
            .unwrap();
        let mut renamed = child.clone();
        renamed.insert("name", "renamed");
        store.update_record(&renamed).unwrap();
        store.create_record(&Record::new().with("name", "sibling")).unwrap();
        store.delete_record_by_id("3").unwrap();
    }

    assert_eq!(flat.all_records().unwrap(), tree.all_records().unwrap());
    assert_eq!(flat.find("parent", "1", 0).unwrap(), tree.find("parent", "1", 0).unwrap());
    assert_eq!(flat.grid_projection(None).unwrap(), tree.grid_projection(None).unwrap());
}

#[test]
fn reopening_tree_keeps_records() {
    let backend = InMemoryBackend::new();
    {
        let tree = TreeRecordStore::new(backend.clone(), "nodes").unwrap();
        tree.create_record(&Record::new().with("name", "root")).unwrap();
    }

    let tree = TreeRecordStore::new(backend.clone(), "nodes").unwrap();
    assert_eq!(tree.all_record_ids().unwrap(), vec!["1"]);
    assert!(is_tree_store(&backend, "nodes").unwrap());
}

#[test]
fn config_driven_tree_store() {
    let backend = InMemoryBackend::new();
    let config = RecordStoreConfig::from_json(r#"{"store_id": "nodes", "tree": true}"#).unwrap();
    let store = RecordStore::open(backend.clone(), config).unwrap();

    store.create_record(&Record::new()).unwrap();
    assert!(is_tree_store(&backend, "nodes").unwrap());
    assert!(!is_tree_store(&backend, "other").unwrap());
}

#[test]
fn into_inner_keeps_namespace() {
    let backend = InMemoryBackend::new();
    let tree = TreeRecordStore::new(backend, "nodes").unwrap();
    tree.create_record(&Record::new()).unwrap();

    let flat = tree.into_inner();
    assert_eq!(flat.store_id(), "nodes");
    assert_eq!(flat.len().unwrap(), 1);
}
