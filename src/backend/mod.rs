//! Backend - The synchronous string key/value store records live in.
//!
//! A backend only knows about string keys and string values. It has no
//! transactions: every call stands alone, and a failure in the middle of a
//! multi-key operation leaves earlier writes in place.

mod file;
mod in_memory;

use std::fmt;
use std::sync::Arc;

/// String-only key/value storage.
pub trait Backend: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Read the value under `key`. Returns None if the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), BackendError>;

    /// Enumerate every key currently stored.
    fn keys(&self) -> Result<Vec<String>, BackendError>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<(), BackendError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        (**self).keys()
    }
}

impl<B: Backend + ?Sized> Backend for &B {
    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<(), BackendError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        (**self).keys()
    }
}

/// Error type for backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The write would push the backend past its storage quota.
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    /// The underlying lock was poisoned (a thread panicked while holding it).
    LockPoisoned(&'static str),
    /// Filesystem error from a persistent backend.
    Io(String),
    /// The persisted key/value map could not be read or written.
    Serde(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::QuotaExceeded { key, needed, limit } => write!(
                f,
                "quota exceeded writing {} ({} bytes needed, limit {})",
                key, needed, limit
            ),
            BackendError::LockPoisoned(operation) => {
                write!(f, "backend lock poisoned during {}", operation)
            }
            BackendError::Io(msg) => write!(f, "backend io error: {}", msg),
            BackendError::Serde(msg) => write!(f, "backend serialization error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

pub use file::JsonFileBackend;
pub use in_memory::InMemoryBackend;
