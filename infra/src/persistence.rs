use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use err_derive::Error;
use log::*;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(display = "storage quota exceeded ({} of {} bytes)", needed, quota)]
    QuotaExceeded { needed: usize, quota: usize },
    #[error(display = "storage i/o on {:?}", _0)]
    Io(PathBuf, #[error(source)] io::Error),
    #[error(display = "corrupt storage file {:?}", _0)]
    Corrupt(PathBuf, #[error(source)] serde_json::Error),
    #[error(display = "cannot encode storage for {:?}", _0)]
    Encode(PathBuf, #[error(source)] serde_json::Error),
    #[error(display = "storage lock poisoned")]
    Poisoned,
}

/// Whether a write made it to the backing store.
///
/// Writes are best effort; a `Volatile` result means the in-memory state
/// moved on without the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Durability {
    Durable,
    Volatile,
}

/// String key/value store with browser local storage semantics.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl Durability {
    pub fn is_durable(&self) -> bool {
        *self == Durability::Durable
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses writes that would take the total of key and value bytes past
    /// `quota`.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStorage {
            quota: Some(quota),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn usage<'a, I: Iterator<Item = (&'a String, &'a String)>>(entries: I) -> usize {
    entries.map(|(k, v)| k.len() + v.len()).sum()
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        if let Some(quota) = self.quota {
            let others = usage(entries.iter().filter(|(k, _)| k.as_str() != key));
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

impl FileStorage {
    /// Nothing touches the file system until the first read or write.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        FileStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Corrupt(self.path.clone(), e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No storage file at {:?} yet", self.path);
                Ok(BTreeMap::new())
            }
            Err(e) => Err(StorageError::Io(self.path.clone(), e)),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Encode(self.path.clone(), e))?;
        let tmp = self.tmp_path();
        let res = fs::write(&tmp, &json)
            .map_err(|e| StorageError::Io(tmp.clone(), e))
            .and_then(|()| {
                fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(self.path.clone(), e))
            });
        if let Err(e) = res {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Error removing {:?}: {:?}", tmp, cleanup);
                }
            }
            return Err(e);
        }
        trace!("Wrote {} entries to {:?}", entries.len(), self.path);
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_all()?;
        Ok(entries.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

impl<'a, S: Storage + ?Sized> Storage for &'a S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
