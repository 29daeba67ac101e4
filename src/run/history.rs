//! Ordered, deduplicated collection of run records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::record::RunRecord;

/// The persisted history blob could not be parsed or breaks record invariants.
#[derive(Debug, thiserror::Error)]
pub enum CorruptHistoryError {
    #[error("stored run history is corrupt: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored run history has more than one run with timestamp {0}")]
    DuplicateTimestamp(i64),
    #[error("stored run {run_timestamp} renders {field} although its value is unreadable")]
    InconsistentField {
        run_timestamp: i64,
        field: &'static str,
    },
}

/// Run records in insertion order, at most one per run timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunHistory {
    records: Vec<RunRecord>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted blob. Absent or blank input is an empty history.
    ///
    /// Duplicate timestamps and quantities rendered from an unreadable value
    /// are rejected rather than repaired.
    pub fn load(blob: Option<&str>) -> Result<Self, CorruptHistoryError> {
        let history: Self = match blob {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(text)?,
            _ => return Ok(Self::new()),
        };
        history.validate()?;
        Ok(history)
    }

    fn validate(&self) -> Result<(), CorruptHistoryError> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.run_timestamp) {
                return Err(CorruptHistoryError::DuplicateTimestamp(record.run_timestamp));
            }
            if let Some(field) = record.inconsistent_field() {
                return Err(CorruptHistoryError::InconsistentField {
                    run_timestamp: record.run_timestamp,
                    field,
                });
            }
        }
        Ok(())
    }

    /// Serialized form accepted by `load`.
    pub fn serialize(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Appends a record unless one with the same timestamp exists.
    ///
    /// Returns whether the record was inserted.
    pub fn append(&mut self, record: RunRecord) -> bool {
        if self.contains(record.run_timestamp) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, run_timestamp: i64) -> bool {
        self.get(run_timestamp).is_some()
    }

    pub fn get(&self, run_timestamp: i64) -> Option<&RunRecord> {
        self.records
            .iter()
            .find(|record| record.run_timestamp == run_timestamp)
    }

    /// Replaces the notes of one record. Returns false if no record matches.
    pub fn set_notes(&mut self, run_timestamp: i64, notes: &str) -> bool {
        match self
            .records
            .iter_mut()
            .find(|record| record.run_timestamp == run_timestamp)
        {
            Some(record) => {
                record.notes = notes.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes one record, keeping the order of the rest.
    pub fn remove(&mut self, run_timestamp: i64) -> bool {
        let before = self.records.len();
        self.records
            .retain(|record| record.run_timestamp != run_timestamp);
        self.records.len() != before
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
