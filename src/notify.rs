//! Change notification fired after every mutating store operation.

use std::sync::Arc;

/// Zero-argument callback run synchronously after create, update, delete,
/// clear, and repair. Its return is ignored and panics are not caught.
pub type OnChange = Arc<dyn Fn() + Send + Sync>;

/// Event name `emitter_notifier` emits for a store.
pub fn changed_event(store_id: &str) -> String {
    format!("{}:changed", store_id)
}

/// Bridge store changes into an in-process `EventEmitter`.
///
/// Each change emits `"<store_id>:changed"` with the store id as payload.
/// Listeners registered on the emitter run on the emitter's own threads.
///
/// # Example
///
/// ```ignore
/// let mut emitter = EventEmitter::new();
/// emitter.on("todo:changed", |store_id: String| println!("{} changed", store_id));
///
/// let store = RecordStore::new(backend, "todo")?
///     .with_on_change(emitter_notifier(emitter, "todo"));
/// ```
#[cfg(feature = "emitter")]
pub fn emitter_notifier(emitter: event_emitter_rs::EventEmitter, store_id: &str) -> OnChange {
    use std::sync::Mutex;

    let emitter = Mutex::new(emitter);
    let event = changed_event(store_id);
    let store_id = store_id.to_string();

    Arc::new(move || match emitter.lock() {
        Ok(mut emitter) => {
            emitter.emit(&event, store_id.clone());
        }
        Err(_) => tracing::warn!(event = %event, "change emitter lock poisoned, notification dropped"),
    })
}
