//! Run records and their history.
//!
//! This module provides:
//! - The typed record built from one summary screen
//! - The record builder (OCR text + timestamp -> record)
//! - The deduplicated run history and its serialized form
//! - Key-value persistence of the history
//! - Sequential batch import

pub mod builder;
pub mod history;
pub mod import;
pub mod record;
pub mod store;

pub use history::{CorruptHistoryError, RunHistory};
pub use import::import_batch;
pub use record::{Quantity, RunRecord};
pub use store::{FileStore, HistoryStore, KeyValueStore};
