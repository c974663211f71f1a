//! JsonFileBackend - Backend persisted as a single JSON object on disk.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::{Backend, BackendError};

/// File-backed key/value backend.
///
/// The whole map is loaded on `open` and rewritten (temp file + rename) after
/// every mutation, so the file is always a complete JSON object.
pub struct JsonFileBackend {
    path: PathBuf,
    storage: RwLock<HashMap<String, String>>,
}

impl JsonFileBackend {
    /// Open the backend at `path`. A missing file is an empty backend.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();
        let storage = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| BackendError::Serde(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(BackendError::Io(format!("{}: {}", path.display(), e))),
        };

        tracing::debug!(path = %path.display(), keys = storage.len(), "opened json file backend");

        Ok(Self {
            path,
            storage: RwLock::new(storage),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, storage: &HashMap<String, String>) -> Result<(), BackendError> {
        let bytes = serde_json::to_vec(storage).map_err(|e| BackendError::Serde(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| BackendError::Io(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "rewrote json file backend");
        Ok(())
    }
}

impl Backend for JsonFileBackend {
    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| BackendError::LockPoisoned("set_item"))?;

        let previous = storage.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&storage) {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => storage.insert(key.to_string(), old),
                None => storage.remove(key),
            };
            return Err(e);
        }
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

        let Some(previous) = storage.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&storage) {
            storage.insert(key.to_string(), previous);
            return Err(e);
        }
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
