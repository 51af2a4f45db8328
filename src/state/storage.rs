//! Persisted language slot
//!
//! This module handles the key-value slot that remembers the chosen language
//! between page loads. Reads and writes are synchronous; there is a single
//! writer.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::utils::errors::{I18nError, Result};

/// String-valued key-value slots that survive a reload
pub trait LanguageStorage: Debug + Send {
    /// Read a slot; `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a small JSON object file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl LanguageStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_slots() {
            Ok(slots) => slots.get(key).cloned(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read language storage");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.read_slots().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Discarding unreadable language storage");
            BTreeMap::new()
        });
        slots.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(&slots)?;
        fs::write(&self.path, serialized).map_err(|e| {
            I18nError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), key = key, value = value, "Language storage updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("lang"), None);
        storage.set("lang", "pl").unwrap();
        assert_eq!(storage.get("lang").as_deref(), Some("pl"));
    }

    #[test]
    fn test_file_storage_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.get("lang"), None);
        storage.set("lang", "de").unwrap();
        storage.set("theme", "dark").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("lang").as_deref(), Some("de"));
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_with_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.get("lang"), None);
        storage.set("lang", "lt").unwrap();
        assert_eq!(storage.get("lang").as_deref(), Some("lt"));
    }
}
