//! Change notifications: plain callbacks and the EventEmitter bridge.

#![cfg(feature = "emitter")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use record_store::{
    changed_event, emitter_notifier, Backend, EventEmitter, InMemoryBackend, Record, RecordStore,
    TreeRecordStore,
};

#[test]
fn callback_runs_after_each_mutation() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let backend = InMemoryBackend::new();

    let observed = log.clone();
    let probe = backend.clone();
    let store = RecordStore::new(backend, "todo")
        .unwrap()
        .with_on_change(move || {
            // The write is already visible when the callback runs.
            let index = probe.get_item("todo").unwrap();
            observed.lock().unwrap().push(index);
        });

    store.create_record(&Record::new()).unwrap();
    store.create_record(&Record::new()).unwrap();
    store.delete_record_by_id("1").unwrap();

    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec![
            Some(r#"["1"]"#.to_string()),
            Some(r#"["1","2"]"#.to_string()),
            Some(r#"["2"]"#.to_string()),
        ]
    );
}

#[test]
fn reads_do_not_notify() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let store = RecordStore::new(InMemoryBackend::new(), "todo")
        .unwrap()
        .with_on_change(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });
    store.create_record(&Record::new().with("text", "a")).unwrap();

    store.all_record_ids().unwrap();
    store.all_records().unwrap();
    store.record_by_index(0).unwrap();
    store.find("text", "a", 0).unwrap();
    store.grid_projection(None).unwrap();
    store.check_integrity().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn tree_store_notifies_too() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let tree = TreeRecordStore::new(InMemoryBackend::new(), "dirs")
        .unwrap()
        .with_on_change(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

    let node = tree.create_record(&Record::new()).unwrap();
    tree.update_record(&node).unwrap();
    tree.clear().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn emitter_receives_changes() {
    let mut emitter = EventEmitter::new();
    let (tx, rx) = mpsc::channel::<String>();
    emitter.on(&changed_event("todo"), move |store_id: String| {
        tx.send(store_id).unwrap();
    });

    let store = RecordStore::new(InMemoryBackend::new(), "todo")
        .unwrap()
        .with_notifier(emitter_notifier(emitter, "todo"));

    store.create_record(&Record::new()).unwrap();
    store.delete_record_by_id("1").unwrap();

    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), "todo");
    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), "todo");
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}
