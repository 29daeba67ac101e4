//! Sequential import of recognized screenshots into a history.

use std::path::PathBuf;

use crate::ocr::OcrCapture;

use super::builder::build;
use super::history::RunHistory;

/// What happened to one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    /// A run with the same timestamp was already stored
    Duplicate,
}

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub path: PathBuf,
    pub run_timestamp: i64,
    pub outcome: ImportOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub results: Vec<ImportResult>,
}

impl ImportSummary {
    pub fn inserted(&self) -> usize {
        self.count(ImportOutcome::Inserted)
    }

    pub fn duplicates(&self) -> usize {
        self.count(ImportOutcome::Duplicate)
    }

    fn count(&self, outcome: ImportOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Builds and appends one record per capture, strictly in input order, so
/// every duplicate check sees all earlier insertions of the batch.
pub fn import_batch(history: &mut RunHistory, captures: &[OcrCapture]) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for capture in captures {
        let record = build(&capture.text, capture.last_modified);
        let outcome = if history.append(record) {
            ImportOutcome::Inserted
        } else {
            ImportOutcome::Duplicate
        };

        crate::log(&format!(
            "Import {}: {:?} (run {})",
            capture.path.display(),
            outcome,
            capture.last_modified
        ));

        summary.results.push(ImportResult {
            path: capture.path.clone(),
            run_timestamp: capture.last_modified,
            outcome,
        });
    }

    summary
}
