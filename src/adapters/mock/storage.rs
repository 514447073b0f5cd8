//! In-memory key-value storage for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{KeyValueStorage, StorageError};

/// In-memory storage provider for testing.
///
/// Clones share the same underlying map, so a test can keep a handle while
/// the session manager owns another.
///
/// # Example
///
/// ```ignore
/// use frest::adapters::mock::InMemoryStorage;
/// use frest::traits::KeyValueStorage;
///
/// let storage = InMemoryStorage::new();
/// storage.set_item("access_token", "abc")?;
/// assert_eq!(storage.get_item("access_token")?, Some("abc".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    /// Number of `get_item` calls, for asserting read behavior
    reads: Arc<Mutex<usize>>,
}

impl InMemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage holding a single key.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Configure whether reads should fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Whether the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of reads performed so far.
    pub fn read_count(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        *self.reads.lock().unwrap() += 1;
        if *self.read_should_fail.lock().unwrap() {
            return Err(StorageError::ReadFailed("Mock read failure".to_string()));
        }
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.items.lock().unwrap().clear();
        Ok(())
    }
}
