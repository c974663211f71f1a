//! RecordStore - CRUD over records persisted in a string key/value backend.
//!
//! A store owns three kinds of keys inside its `store_id` namespace:
//!
//! | key                  | value                                   |
//! |----------------------|-----------------------------------------|
//! | `{store_id}-counter` | last assigned id, as a JSON integer      |
//! | `{store_id}`         | ordered JSON array of record ids         |
//! | `{store_id}-{id}`    | the record, as a JSON object             |
//!
//! Tree stores add `{store_id}-tree` → `true`.
//!
//! ## Example
//!
//! ```ignore
//! use record_store::{InMemoryBackend, Record, RecordStore};
//!
//! let store = RecordStore::new(InMemoryBackend::new(), "todo")?;
//! let created = store.create_record(&Record::new().with("text", "buy milk"))?;
//! assert_eq!(created.id(), Some("1"));
//! assert_eq!(store.all_record_ids()?, vec!["1"]);
//! ```
//!
//! Nothing here is transactional. A create is three writes (counter, record,
//! index) and a delete is two; a backend failure between them leaves the
//! earlier writes in place. `check_integrity` and `repair` exist to find and
//! fix that drift.

mod grid;
mod integrity;
mod search;
mod tree;

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::backend::Backend;
use crate::codec;
use crate::config::RecordStoreConfig;
use crate::error::RecordStoreError;
use crate::notify::OnChange;
use crate::record::Record;

pub use grid::{GridProjection, GridRow};
pub use integrity::IntegrityReport;
pub use search::Pattern;
pub use tree::{is_tree_store, TreeRecordStore};

/// Accessor for one record namespace in a backend.
///
/// Holds no record state of its own; everything lives in the backend and
/// outlives the accessor. Constructing two stores with the same id over the
/// same backend gives two views of the same records.
#[derive(Clone)]
pub struct RecordStore<B> {
    backend: B,
    store_id: String,
    on_change: Option<OnChange>,
}

impl<B: Backend> RecordStore<B> {
    /// Bind a flat store to `backend`. Performs no backend I/O.
    pub fn new(backend: B, store_id: impl Into<String>) -> Result<Self, RecordStoreError> {
        let store_id = store_id.into();
        if store_id.is_empty() {
            return Err(RecordStoreError::InvalidStoreId);
        }
        Ok(Self {
            backend,
            store_id,
            on_change: None,
        })
    }

    /// Bind a store described by `config`. Tree configs write the tree marker.
    pub fn open(backend: B, config: RecordStoreConfig) -> Result<Self, RecordStoreError> {
        config.validate()?;
        let store = Self::new(backend, config.store_id)?;
        if config.tree {
            store.write_tree_marker()?;
        }
        Ok(store)
    }

    /// Run `on_change` after every mutating operation.
    pub fn with_on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Share an existing callback, e.g. one built by `emitter_notifier`.
    pub fn with_notifier(mut self, on_change: OnChange) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn counter_key(&self) -> String {
        format!("{}-counter", self.store_id)
    }

    pub fn index_key(&self) -> &str {
        &self.store_id
    }

    pub fn record_key(&self, id: &str) -> String {
        format!("{}-{}", self.store_id, id)
    }

    pub fn tree_key(&self) -> String {
        format!("{}-tree", self.store_id)
    }

    pub(crate) fn write_tree_marker(&self) -> Result<(), RecordStoreError> {
        let key = self.tree_key();
        codec::save(&self.backend, &key, &true)?;
        tracing::debug!(store = %self.store_id, "wrote tree marker");
        Ok(())
    }

    fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }

    /// Ids in index order. Empty if the index was never written.
    pub fn all_record_ids(&self) -> Result<Vec<String>, RecordStoreError> {
        let ids: Option<Vec<String>> = codec::load(&self.backend, self.index_key())?;
        Ok(ids.unwrap_or_default())
    }

    fn save_index(&self, ids: &[String]) -> Result<(), RecordStoreError> {
        codec::save(&self.backend, self.index_key(), ids)
    }

    /// Highest id handed out so far; 0 for a fresh namespace.
    pub fn last_id(&self) -> Result<u64, RecordStoreError> {
        let counter: Option<u64> = codec::load(&self.backend, &self.counter_key())?;
        Ok(counter.unwrap_or(0))
    }

    fn next_id(&self) -> Result<String, RecordStoreError> {
        let next = self.last_id()? + 1;
        codec::save(&self.backend, &self.counter_key(), &next)?;
        Ok(next.to_string())
    }

    /// Number of ids in the index.
    pub fn len(&self) -> Result<usize, RecordStoreError> {
        Ok(self.all_record_ids()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RecordStoreError> {
        Ok(self.len()? == 0)
    }

    /// Store a copy of `record` under a fresh id and append the id to the index.
    ///
    /// Any `id` already on `record` is replaced. Returns the stored record.
    pub fn create_record(&self, record: &Record) -> Result<Record, RecordStoreError> {
        let mut stored = record.clone();
        let id = self.next_id()?;
        stored.set_id(&id);

        codec::save(&self.backend, &self.record_key(&id), &stored)?;

        let mut ids = self.all_record_ids()?;
        ids.push(id.clone());
        self.save_index(&ids)?;

        tracing::debug!(store = %self.store_id, id = %id, "created record");
        self.notify();
        Ok(stored)
    }

    /// Overwrite the stored record with `record.id()`.
    ///
    /// There is no existence check: updating an unknown id writes the record
    /// without indexing it.
    pub fn update_record(&self, record: &Record) -> Result<(), RecordStoreError> {
        let id = record.id().ok_or(RecordStoreError::MissingId)?;
        codec::save(&self.backend, &self.record_key(id), record)?;

        tracing::debug!(store = %self.store_id, id = %id, "updated record");
        self.notify();
        Ok(())
    }

    pub fn record_by_id(&self, id: &str) -> Result<Option<Record>, RecordStoreError> {
        tracing::trace!(store = %self.store_id, id = %id, "get record");
        codec::load(&self.backend, &self.record_key(id))
    }

    /// The record at `position` in index order, None when out of range.
    pub fn record_by_index(&self, position: usize) -> Result<Option<Record>, RecordStoreError> {
        let ids = self.all_record_ids()?;
        match ids.get(position) {
            Some(id) => self.record_by_id(id),
            None => Ok(None),
        }
    }

    /// Visit records in index order starting at `start`.
    ///
    /// The callback gets each record and its index position; returning
    /// `ControlFlow::Break(())` stops the walk. Index entries with no stored
    /// record are skipped, but still count towards the positions.
    pub fn for_each_record<F>(&self, start: usize, mut f: F) -> Result<(), RecordStoreError>
    where
        F: FnMut(&Record, usize) -> ControlFlow<()>,
    {
        let ids = self.all_record_ids()?;
        for (position, id) in ids.iter().enumerate().skip(start) {
            let Some(record) = self.record_by_id(id)? else {
                tracing::warn!(store = %self.store_id, id = %id, position, "indexed record is missing");
                continue;
            };
            if f(&record, position).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Every record, in index order.
    pub fn all_records(&self) -> Result<Vec<Record>, RecordStoreError> {
        let mut records = Vec::new();
        self.for_each_record(0, |record, _| {
            records.push(record.clone());
            ControlFlow::Continue(())
        })?;
        Ok(records)
    }

    /// Remove the record and the first occurrence of `id` in the index.
    ///
    /// Unknown ids are not an error; the record key removal is attempted
    /// regardless.
    pub fn delete_record_by_id(&self, id: &str) -> Result<(), RecordStoreError> {
        self.backend.remove_item(&self.record_key(id))?;

        let mut ids = self.all_record_ids()?;
        if let Some(position) = ids.iter().position(|indexed| indexed == id) {
            ids.remove(position);
            self.save_index(&ids)?;
        }

        tracing::debug!(store = %self.store_id, id = %id, "deleted record");
        self.notify();
        Ok(())
    }

    /// Delete every indexed record and the index itself.
    ///
    /// The counter is left alone so ids are never reused.
    pub fn clear(&self) -> Result<(), RecordStoreError> {
        let ids = self.all_record_ids()?;
        for id in &ids {
            self.backend.remove_item(&self.record_key(id))?;
        }
        self.backend.remove_item(self.index_key())?;

        tracing::debug!(store = %self.store_id, removed = ids.len(), "cleared store");
        self.notify();
        Ok(())
    }
}
