//! Client-local durable key/value storage.
//!
//! String keys to string values, same shape as a browser's local
//! storage. `FileStorage` keeps the whole map in one YAML file and
//! rewrites it on every `set_item`; the studio only stores a single
//! preference, so there is no write batching.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt storage file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable string key/value store.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Storage backed by a YAML map on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`. A missing or
    /// unparseable file is an empty store, overwritten by the next write;
    /// an unreadable one is an error.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding unparseable local storage");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = items.len(), "opened local storage");
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let yaml = serde_yaml::to_string(items).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&self.path, yaml).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }
}

/// Volatile storage. Used in tests and when the data directory is unusable.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?
            .remove(key);
        Ok(())
    }
}

/// File-backed storage at `path`, or volatile storage when the file or its
/// directory cannot be used. Never fails; the fallback is logged.
pub fn open_local_storage(path: &Path) -> Arc<dyn LocalStorage> {
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %e, "storage directory unavailable, preferences will not persist");
            return Arc::new(MemoryStorage::new());
        }
    }
    match FileStorage::open(path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "local storage unavailable, preferences will not persist");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::open(dir.path().join("local_storage.yaml")).unwrap();
        assert_eq!(store.get_item("darkMode").unwrap(), None);
    }

    #[test]
    fn set_item_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("local_storage.yaml");
        {
            let store = FileStorage::open(&path).unwrap();
            store.set_item("darkMode", "false").unwrap();
        }
        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn remove_item_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.yaml");
        let store = FileStorage::open(&path).unwrap();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.remove_item("a").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("a").unwrap(), None);
        assert_eq!(reopened.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_opens_empty_and_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.yaml");
        std::fs::write(&path, "- not\n- a map\n").unwrap();

        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get_item("darkMode").unwrap(), None);
        store.set_item("darkMode", "false").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn unusable_directory_falls_back_to_memory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("data").join("local_storage.yaml");

        let store = open_local_storage(&path);
        store.set_item("darkMode", "false").unwrap();
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("false"));
        assert!(!path.exists());
    }

    #[test]
    fn usable_directory_gets_file_storage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("local_storage.yaml");
        open_local_storage(&path).set_item("darkMode", "true").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn memory_storage_round_trip() {
        let store = MemoryStorage::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }
}
