//! File-backed key-value storage adapter.
//!
//! Persists all keys as a single JSON object, by default at
//! `~/.frest/storage.json`. Every write rewrites the whole file.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::traits::{KeyValueStorage, StorageError};

/// The storage directory name.
const STORAGE_DIR: &str = ".frest";

/// The storage file name.
const STORAGE_FILE: &str = "storage.json";

/// Default location of the storage file.
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(STORAGE_DIR).join(STORAGE_FILE))
}

/// File-based [`KeyValueStorage`].
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a storage backed by the file at `path`.
    ///
    /// The file and its parent directory are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| StorageError::ReadFailed(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            }
        }

        let file = File::create(&self.path)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", self.path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    fn modify<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut items = self.load()?;
        f(&mut items);
        self.persist(&items)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}
