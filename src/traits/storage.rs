//! Persistent client storage trait abstraction.
//!
//! Models a string-valued key-value store in the manner of browser local
//! storage. Reads are synchronous so that token validation stays a
//! synchronous check.

/// Storage operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// Failed to read the backing store
    #[error("Failed to read storage: {0}")]
    ReadFailed(String),
    /// Failed to write the backing store
    #[error("Failed to write storage: {0}")]
    WriteFailed(String),
    /// Backing store content could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Serialization(String),
}

/// Trait for key-value client storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if it does not
    /// - `Err(error)` if the store could not be read
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::ReadFailed("permission denied".to_string());
        assert_eq!(err.to_string(), "Failed to read storage: permission denied");

        let err = StorageError::WriteFailed("disk full".to_string());
        assert!(err.to_string().contains("disk full"));

        let err = StorageError::Serialization("trailing comma".to_string());
        assert!(err.to_string().contains("trailing comma"));
    }
}
