use std::fmt;

use crate::backend::BackendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStoreError {
    /// The backend rejected a read or write. Nothing is rolled back.
    Backend(BackendError),
    /// A stored value under `key` could not be encoded or decoded.
    Serde { key: String, message: String },
    /// `update_record` was handed a record without a string `id`.
    MissingId,
    /// Store IDs must be non-empty.
    InvalidStoreId,
    /// A regex pattern passed to `find` did not compile.
    InvalidPattern(String),
}

impl fmt::Display for RecordStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStoreError::Backend(err) => write!(f, "backend error: {}", err),
            RecordStoreError::Serde { key, message } => {
                write!(f, "serialization error for {}: {}", key, message)
            }
            RecordStoreError::MissingId => write!(f, "record has no string id field"),
            RecordStoreError::InvalidStoreId => write!(f, "store id must not be empty"),
            RecordStoreError::InvalidPattern(msg) => write!(f, "invalid search pattern: {}", msg),
        }
    }
}

impl std::error::Error for RecordStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordStoreError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for RecordStoreError {
    fn from(err: BackendError) -> Self {
        RecordStoreError::Backend(err)
    }
}
