//! Key-value persistence for the run history.
//!
//! The history is kept as one opaque serialized blob under a fixed key.
//! `FileStore` backs the key-value interface with a JSON object on disk.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::history::RunHistory;

/// String-keyed storage for serialized blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps all entries in one JSON file (`{"key": "value", ...}`).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Store file is not valid JSON: {}", self.path.display()))
    }

    /// Writes through a temporary file in the same directory so a crash
    /// never leaves a half-written store behind.
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;

        let json = serde_json::to_string_pretty(entries).context("Failed to serialize store")?;
        let mut temp = NamedTempFile::new_in(dir).context("Failed to create temporary store file")?;
        temp.write_all(json.as_bytes())
            .context("Failed to write store data")?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// In-process store, used by tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the run history under a single key.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Loads the stored history.
    ///
    /// A corrupt blob is returned as an error carrying `CorruptHistoryError`;
    /// nothing is reset or overwritten.
    pub fn load(&self) -> Result<RunHistory> {
        let blob = self.store.get(&self.key)?;
        let history = RunHistory::load(blob.as_deref())?;
        Ok(history)
    }

    pub fn save(&mut self, history: &RunHistory) -> Result<()> {
        let blob = history
            .serialize()
            .context("Failed to serialize run history")?;
        self.store.set(&self.key, &blob)
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}
