//! Drift detection and repair between the index, the records and the counter.

use std::collections::HashSet;

use super::RecordStore;
use crate::backend::Backend;
use crate::codec;
use crate::error::RecordStoreError;

/// What `check_integrity` found. Empty vectors and no `counter_behind` mean
/// the store is consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Indexed ids with no stored record.
    pub dangling: Vec<String>,
    /// Stored records whose id is not in the index, in numeric order.
    pub orphaned: Vec<String>,
    /// Ids indexed more than once.
    pub duplicates: Vec<String>,
    /// Highest id seen, when the counter is below it.
    pub counter_behind: Option<u64>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.orphaned.is_empty()
            && self.duplicates.is_empty()
            && self.counter_behind.is_none()
    }
}

fn numeric_id(id: &str) -> Option<u64> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

impl<B: Backend> RecordStore<B> {
    /// Ids of records stored under this namespace, indexed or not.
    ///
    /// Only numeric suffixes count, so the counter and tree marker keys are
    /// never mistaken for records.
    fn stored_ids(&self) -> Result<Vec<String>, RecordStoreError> {
        let prefix = format!("{}-", self.store_id);
        let ids = self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|key| {
                let id = key.strip_prefix(&prefix)?;
                numeric_id(id).map(|_| id.to_string())
            })
            .collect();
        Ok(ids)
    }

    /// Compare the index against the stored records and the counter.
    pub fn check_integrity(&self) -> Result<IntegrityReport, RecordStoreError> {
        let ids = self.all_record_ids()?;
        let stored: HashSet<String> = self.stored_ids()?.into_iter().collect();

        let mut report = IntegrityReport::default();
        let mut seen = HashSet::new();
        for id in &ids {
            if !seen.insert(id.as_str()) {
                if !report.duplicates.contains(id) {
                    report.duplicates.push(id.clone());
                }
                continue;
            }
            if !stored.contains(id) && self.backend.get_item(&self.record_key(id))?.is_none() {
                report.dangling.push(id.clone());
            }
        }

        report.orphaned = stored
            .iter()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        report
            .orphaned
            .sort_by_key(|id| numeric_id(id).unwrap_or(u64::MAX));

        let highest = ids
            .iter()
            .chain(report.orphaned.iter())
            .filter_map(|id| numeric_id(id))
            .max();
        if let Some(highest) = highest {
            if self.last_id()? < highest {
                report.counter_behind = Some(highest);
            }
        }

        if !report.is_clean() {
            tracing::warn!(
                store = %self.store_id,
                dangling = report.dangling.len(),
                orphaned = report.orphaned.len(),
                duplicates = report.duplicates.len(),
                counter_behind = ?report.counter_behind,
                "store index has drifted"
            );
        }
        Ok(report)
    }

    /// Bring the index and counter back in line with the stored records.
    ///
    /// Dangling and duplicate entries are dropped, orphaned records are
    /// appended in id order, and the counter is raised to the highest id.
    /// Returns what was found before repairing; writes nothing when clean.
    pub fn repair(&self) -> Result<IntegrityReport, RecordStoreError> {
        let report = self.check_integrity()?;
        if report.is_clean() {
            return Ok(report);
        }

        if !(report.dangling.is_empty() && report.duplicates.is_empty() && report.orphaned.is_empty()) {
            let dangling: HashSet<&str> = report.dangling.iter().map(String::as_str).collect();
            let mut seen = HashSet::new();
            let mut ids: Vec<String> = self
                .all_record_ids()?
                .into_iter()
                .filter(|id| !dangling.contains(id.as_str()) && seen.insert(id.clone()))
                .collect();
            ids.extend(report.orphaned.iter().cloned());
            self.save_index(&ids)?;
        }

        if let Some(highest) = report.counter_behind {
            codec::save(&self.backend, &self.counter_key(), &highest)?;
        }

        tracing::debug!(store = %self.store_id, "repaired store index");
        self.notify();
        Ok(report)
    }
}
