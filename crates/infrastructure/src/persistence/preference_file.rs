//! User preference persistence.
//!
//! Stores key/value preferences in the platform-specific config directory:
//! - Linux: ~/.config/folio/preferences.json
//! - macOS: ~/Library/Application Support/folio/preferences.json
//! - Windows: %APPDATA%/folio/preferences.json

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_application::ports::{PreferenceStorage, StorageError};
use parking_lot::Mutex;
use tracing::warn;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

type Preferences = BTreeMap<String, String>;

/// Preference storage backed by a JSON file.
#[derive(Debug)]
pub struct FilePreferenceStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStorage {
    /// Opens the storage at the default location.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the platform has no config directory.
    pub fn new() -> Result<Self, StorageError> {
        Self::default_path()
            .map(Self::at)
            .ok_or_else(|| StorageError::Unavailable("no config directory".to_string()))
    }

    /// Opens the storage at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The default preference file path, if the platform has one.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("preferences.json"))
    }

    /// The file backing this storage.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Preferences, StorageError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Preferences::new()),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };
        from_json_bytes(&content).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Loads the file for an update; a corrupt file is replaced.
    fn load_for_update(&self) -> Result<Preferences, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "replacing corrupt preference file");
                Ok(Preferences::new())
            }
            other => other,
        }
    }

    fn save(&self, preferences: &Preferences) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }
        let content =
            to_json_stable_bytes(preferences).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl PreferenceStorage for FilePreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut preferences = self.load_for_update()?;
        preferences.insert(key.to_string(), value.to_string());
        self.save(&preferences)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut preferences = self.load_for_update()?;
        if preferences.remove(key).is_some() {
            self.save(&preferences)?;
        }
        Ok(())
    }
}
