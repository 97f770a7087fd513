//! Durable key-value storage port

use thiserror::Error;

/// Errors from the preference store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage cannot be reached (no config dir, permission denied, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be parsed.
    #[error("storage corrupt: {0}")]
    Corrupt(String),
}

/// Port for durable, synchronous key-value storage.
///
/// Mirrors browser local storage: calls are synchronous and values are strings.
pub trait PreferenceStorage: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
