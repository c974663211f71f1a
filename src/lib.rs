mod backend;
mod codec;
mod config;
mod error;
mod notify;
mod record;
mod store;

pub use backend::{Backend, BackendError, InMemoryBackend, JsonFileBackend};
pub use config::RecordStoreConfig;
pub use error::RecordStoreError;
pub use notify::{changed_event, OnChange};
pub use record::{Record, ID_FIELD};
pub use store::{
    is_tree_store, GridProjection, GridRow, IntegrityReport, Pattern, RecordStore, TreeRecordStore,
};

#[cfg(feature = "emitter")]
pub use notify::emitter_notifier;

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;

pub use regex_lite::Regex;
