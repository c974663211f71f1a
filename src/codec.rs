//! Conversion between typed values and the backend's string-only storage.

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::Backend;
use crate::error::RecordStoreError;

pub(crate) fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, RecordStoreError> {
    serde_json::to_string(value).map_err(|e| RecordStoreError::Serde {
        key: key.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, RecordStoreError> {
    serde_json::from_str(raw).map_err(|e| RecordStoreError::Serde {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Read and decode `key`. Absent keys are `Ok(None)`.
pub(crate) fn load<B, T>(backend: &B, key: &str) -> Result<Option<T>, RecordStoreError>
where
    B: Backend + ?Sized,
    T: DeserializeOwned,
{
    match backend.get_item(key)? {
        Some(raw) => decode(key, &raw).map(Some),
        None => Ok(None),
    }
}

/// Encode and write `value` under `key`.
pub(crate) fn save<B, T>(backend: &B, key: &str, value: &T) -> Result<(), RecordStoreError>
where
    B: Backend + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = encode(key, value)?;
    backend.set_item(key, &raw)?;
    Ok(())
}
