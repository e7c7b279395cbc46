//! File-backed key-value store

use super::{KeyValueStore, StoreError, StoreResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Store keeping one JSON file per key under a root directory
///
/// The durable backend for non-browser hosts. Writes are atomic: the value
/// lands in a temp file in the root directory and is renamed into place, so
/// a crash mid-write never leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to its file path, rejecting keys that would escape
    /// the root directory
    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.root)?;

        // Atomic write: temp file in the same directory, then rename
        let mut temp_file = NamedTempFile::new_in(&self.root)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&path).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("failed to persist {}: {e}", path.display()),
            ))
        })?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        assert_eq!(store.get("absent").unwrap(), None);
        assert!(!store.contains("absent").unwrap());
    }

    #[test]
    fn test_set_then_get() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set("consent", "{\"a\":1}").unwrap();
        assert_eq!(store.get("consent").unwrap(), Some("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_set_overwrites() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set("consent", "first").unwrap();
        store.set("consent", "second").unwrap();
        assert_eq!(store.get("consent").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_remove() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set("consent", "value").unwrap();
        store.remove("consent").unwrap();
        assert_eq!(store.get("consent").unwrap(), None);

        // Removing again is fine
        store.remove("consent").unwrap();
    }

    #[test]
    fn test_creates_root_on_first_write() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("store");
        let mut store = FileStore::new(&root);

        store.set("consent", "value").unwrap();
        assert!(root.join("consent.json").exists());
    }

    #[test]
    fn test_rejects_escaping_keys() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        assert!(matches!(
            store.set("../outside", "v"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get("a/b"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_value_survives_new_store_instance() {
        let temp = TempDir::new().unwrap();

        {
            let mut store = FileStore::new(temp.path());
            store.set("consent", "persisted").unwrap();
        }

        let store = FileStore::new(temp.path());
        assert_eq!(store.get("consent").unwrap(), Some("persisted".to_string()));
    }
}
