use record_store::{Backend, Record, RecordStore, RecordStoreError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    pub fn new(text: &str) -> Self {
        Todo {
            id: None,
            text: text.to_string(),
            done: false,
        }
    }

    pub fn to_record(&self) -> Record {
        Record::try_from(serde_json::to_value(self).unwrap()).unwrap()
    }

    pub fn from_record(record: &Record) -> Self {
        serde_json::from_value(record.clone().into()).unwrap()
    }
}

/// Typed view over a store of todos.
pub struct TodoList<B> {
    pub store: RecordStore<B>,
}

impl<B: Backend> TodoList<B> {
    pub fn new(backend: B) -> Self {
        TodoList {
            store: RecordStore::new(backend, "todo").unwrap(),
        }
    }

    pub fn add(&self, text: &str) -> Result<Todo, RecordStoreError> {
        let record = self.store.create_record(&Todo::new(text).to_record())?;
        Ok(Todo::from_record(&record))
    }

    pub fn complete(&self, id: &str) -> Result<bool, RecordStoreError> {
        let Some(record) = self.store.record_by_id(id)? else {
            return Ok(false);
        };
        let mut todo = Todo::from_record(&record);
        todo.done = true;
        self.store.update_record(&todo.to_record())?;
        Ok(true)
    }

    pub fn pending(&self) -> Result<Vec<Todo>, RecordStoreError> {
        Ok(self
            .store
            .all_records()?
            .iter()
            .map(Todo::from_record)
            .filter(|todo| !todo.done)
            .collect())
    }
}
