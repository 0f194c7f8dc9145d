use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ModeStore;
use crate::error::ColorModeError;

const STORE_APP_DIR: &str = "colormode";
const STORE_FILE: &str = "store.json";

/// Mode store backed by a JSON object file.
///
/// The file maps string keys to string values. A missing file reads as
/// empty. A corrupt file is logged and read as empty; the next write
/// replaces it.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at `<config_dir>/colormode/store.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorModeError::NoStoreLocation`] if the platform has no
    /// configuration directory.
    pub fn default_location() -> Result<Self, ColorModeError> {
        let config_dir = dirs::config_dir().ok_or(ColorModeError::NoStoreLocation)?;
        Ok(Self::new(config_dir.join(STORE_APP_DIR).join(STORE_FILE)))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, ColorModeError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(ColorModeError::StoreIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring corrupt mode store"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), ColorModeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ColorModeError::StoreIo {
                path: self.path.clone(),
                source,
            })?;
        }
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized).map_err(|source| ColorModeError::StoreIo {
            path: self.path.clone(),
            source,
        })
    }
}

impl ModeStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                tracing::warn!(error = %err, "mode store unreadable");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ColorModeError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), ColorModeError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
