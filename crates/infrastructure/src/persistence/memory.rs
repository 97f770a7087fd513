//! Process-local preference storage.

use std::collections::HashMap;

use folio_application::ports::{PreferenceStorage, StorageError};
use parking_lot::Mutex;

/// Preference storage that lives for the process only.
///
/// Used when no preference file can be opened.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryPreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_removes() {
        let storage = MemoryPreferenceStorage::new();
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
        storage.remove("theme").unwrap();
        assert_eq!(storage.get("theme").unwrap(), None);
    }
}
