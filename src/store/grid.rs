//! Grid projection: records flattened into positional rows for tables.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordStore;
use crate::backend::Backend;
use crate::error::RecordStoreError;
use crate::record::Record;

/// One row per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub id: String,
    pub data: Vec<Value>,
}

/// Rows in index order plus their count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridProjection {
    pub rows: Vec<GridRow>,
    pub total_count: usize,
}

impl GridRow {
    /// Values of `columns` in column order, or every field in insertion order
    /// when `columns` is None. Columns missing from the record are left out,
    /// not padded, so rows from records with different fields can misalign.
    pub fn project(record: &Record, columns: Option<&[&str]>) -> Self {
        let data = match columns {
            Some(columns) => columns
                .iter()
                .filter_map(|column| record.get(column).cloned())
                .collect(),
            None => record.as_map().values().cloned().collect(),
        };

        GridRow {
            id: record.id().unwrap_or_default().to_string(),
            data,
        }
    }
}

impl<B: Backend> RecordStore<B> {
    pub fn grid_projection(&self, columns: Option<&[&str]>) -> Result<GridProjection, RecordStoreError> {
        let mut rows = Vec::new();
        self.for_each_record(0, |record, _| {
            rows.push(GridRow::project(record, columns));
            ControlFlow::Continue(())
        })?;

        Ok(GridProjection {
            total_count: rows.len(),
            rows,
        })
    }
}
