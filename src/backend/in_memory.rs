//! InMemoryBackend - HashMap-backed backend for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Backend, BackendError};

/// In-memory key/value backend.
///
/// Clone-friendly via Arc: clones share the same map, so several stores can
/// be bound to one backend the way several pages share one browser storage.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    storage: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl InMemoryBackend {
    /// Create a new, empty, unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that rejects writes once the stored keys and
    /// values together would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            quota: Some(bytes),
        }
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes in use, counted as key length plus value length per entry.
    pub fn used_bytes(&self) -> usize {
        self.storage
            .read()
            .map(|s| usage(&s))
            .unwrap_or(0)
    }
}

fn usage(storage: &HashMap<String, String>) -> usize {
    storage.iter().map(|(k, v)| k.len() + v.len()).sum()
}

impl Backend for InMemoryBackend {
    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| BackendError::LockPoisoned("set_item"))?;

        if let Some(limit) = self.quota {
            let replaced = storage.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = usage(&storage) - replaced + key.len() + value.len();
            if needed > limit {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| BackendError::LockPoisoned("get_item"))?;
        Ok(storage.get(key).cloned())
    }

    fn remove_item(&self, key: &str) -> Result<(), BackendError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| BackendError::LockPoisoned("remove_item"))?;
        storage.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| BackendError::LockPoisoned("keys"))?;
        Ok(storage.keys().cloned().collect())
    }
}
