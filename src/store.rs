//! Local key-value storage for saved games
//!
//! The session never talks to the filesystem directly; it goes through a
//! `SnapshotStore`, so tests can run against an in-memory store and the CLI
//! against files. Store failures are recoverable and must leave the
//! in-memory session untouched.

use crate::{ArchenemyError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store for JSON snapshots
pub trait SnapshotStore {
    /// Write a value under a key, replacing any previous value
    fn write(&self, key: &str, value: &Value) -> Result<()>;

    /// Read the value under a key
    ///
    /// A present-but-unparsable value is `CorruptSnapshot`, not `None`.
    fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Delete the value under a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store: each key is one pretty-printed JSON file under a root
/// directory
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at the given directory, creating it if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(FileSnapshotStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn write(&self, key: &str, value: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| ArchenemyError::SerializationError(e.to_string()))?;
        fs::write(self.key_path(key), json)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            ArchenemyError::CorruptSnapshot(format!("{}: {e}", path.display()))
        })?;
        Ok(Some(value))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemorySnapshotStore {
    values: RefCell<HashMap<String, Value>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn write(&self, key: &str, value: &Value) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySnapshotStore::new();
        let value = json!({"gameStarted": true});

        assert!(store.read("k").unwrap().is_none());
        store.write("k", &value).unwrap();
        assert_eq!(store.read("k").unwrap(), Some(value));
        store.remove("k").unwrap();
        assert!(store.read("k").unwrap().is_none());
        // Removing again is fine.
        store.remove("k").unwrap();
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        let value = json!({"cards": {"cardPool": []}});

        store.write("archenemyGameState", &value).unwrap();
        assert_eq!(store.read("archenemyGameState").unwrap(), Some(value));

        store.remove("archenemyGameState").unwrap();
        assert!(store.read("archenemyGameState").unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        assert!(matches!(
            store.read("bad"),
            Err(ArchenemyError::CorruptSnapshot(_))
        ));
    }
}
