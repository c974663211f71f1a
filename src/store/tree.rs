//! TreeRecordStore - A RecordStore that marks its namespace as tree-shaped.
//!
//! The marker is all that differs. Parent/child structure, if any, lives in
//! record fields chosen by the caller.

use std::ops::{Deref, DerefMut};

use super::RecordStore;
use crate::backend::Backend;
use crate::codec;
use crate::config::RecordStoreConfig;
use crate::error::RecordStoreError;

/// Flat store plus the `{store_id}-tree` marker, written on construction.
///
/// Every record operation is the inner store's, reached through `Deref`.
#[derive(Clone)]
pub struct TreeRecordStore<B> {
    inner: RecordStore<B>,
}

impl<B: Backend> TreeRecordStore<B> {
    pub fn new(backend: B, store_id: impl Into<String>) -> Result<Self, RecordStoreError> {
        let inner = RecordStore::new(backend, store_id)?;
        inner.write_tree_marker()?;
        Ok(Self { inner })
    }

    pub fn open(backend: B, config: RecordStoreConfig) -> Result<Self, RecordStoreError> {
        let inner = RecordStore::open(backend, config.tree())?;
        Ok(Self { inner })
    }

    /// Run `on_change` after every mutating operation.
    pub fn with_on_change<F>(self, on_change: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            inner: self.inner.with_on_change(on_change),
        }
    }

    pub fn into_inner(self) -> RecordStore<B> {
        self.inner
    }
}

impl<B> Deref for TreeRecordStore<B> {
    type Target = RecordStore<B>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<B> DerefMut for TreeRecordStore<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Whether `store_id` in `backend` carries the tree marker.
pub fn is_tree_store<B: Backend + ?Sized>(backend: &B, store_id: &str) -> Result<bool, RecordStoreError> {
    let key = format!("{}-tree", store_id);
    let marker: Option<bool> = codec::load(backend, &key)?;
    Ok(marker.unwrap_or(false))
}
