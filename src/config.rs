//! RecordStoreConfig - What a store is bound to besides its backend.

use serde::{Deserialize, Serialize};

use crate::error::RecordStoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    /// Namespace for every key the store writes.
    pub store_id: String,
    /// Write the tree marker on open.
    #[serde(default)]
    pub tree: bool,
}

impl RecordStoreConfig {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            tree: false,
        }
    }

    pub fn tree(mut self) -> Self {
        self.tree = true;
        self
    }

    /// Parse a config from JSON, e.g. `{"store_id": "todo", "tree": true}`.
    pub fn from_json(json: &str) -> Result<Self, RecordStoreError> {
        let config: Self = serde_json::from_str(json).map_err(|e| RecordStoreError::Serde {
            key: "config".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RecordStoreError> {
        if self.store_id.is_empty() {
            return Err(RecordStoreError::InvalidStoreId);
        }
        Ok(())
    }
}
