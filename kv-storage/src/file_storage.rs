use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::base_storage::KeyValueStorage;
use state_error::{Result, StateError};

const STORAGE_VERSION: i32 = 1;

/// Durable key-value store persisting all entries as a single versioned
/// JSON document.
///
/// Every mutation rewrites the whole document; there is no partial
/// update, matching the whole-value-overwrite model of the state layer.
pub struct FileStorage {
    label: String,
    path: PathBuf,
    data: FileStorageData,
}

/// On-disk shape of a [`FileStorage`] document.
#[derive(Serialize, Deserialize)]
struct FileStorageData {
    version: i32,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Create an empty storage with a diagnostic label and file path.
    /// Nothing is written until the first `set`.
    pub fn new(label: String, path: &Path) -> Self {
        Self {
            label,
            path: PathBuf::from(path),
            data: FileStorageData {
                version: STORAGE_VERSION,
                entries: BTreeMap::new(),
            },
        }
    }

    /// Open the storage and read any persisted entries.
    ///
    /// A missing file is an empty store; a corrupt file or a version
    /// mismatch is an error.
    pub fn load(label: String, path: &Path) -> Result<Self> {
        let mut storage = Self::new(label, path);
        storage.read_fs()?;
        Ok(storage)
    }

    /// Open the storage, treating corruption as an empty store.
    ///
    /// This is the startup entry point: persisted state that fails to
    /// parse must never surface to the user, it reads as absent.
    pub fn load_or_default(label: String, path: &Path) -> Self {
        let mut storage = Self::new(label.clone(), path);
        if let Err(err) = storage.read_fs() {
            log::warn!(
                "{}: discarding unreadable persisted state: {}",
                label,
                err
            );
            storage.data.entries.clear();
        }
        storage
    }

    fn read_fs(&mut self) -> Result<()> {
        if !self.path.exists() {
            self.data.entries.clear();
            return Ok(());
        }

        let file = File::open(&self.path)?;
        let data: FileStorageData = serde_json::from_reader(file)
            .map_err(|err| {
                StateError::Storage(self.label.clone(), err.to_string())
            })?;
        if data.version != STORAGE_VERSION {
            return Err(StateError::Storage(
                self.label.clone(),
                format!(
                    "version mismatch: expected {}, got {}",
                    STORAGE_VERSION, data.version
                ),
            ));
        }
        self.data = data;
        Ok(())
    }

    fn write_fs(&mut self) -> Result<()> {
        let parent_dir = self.path.parent().ok_or_else(|| {
            StateError::Storage(
                self.label.clone(),
                "failed to get parent directory".to_owned(),
            )
        })?;
        fs::create_dir_all(parent_dir)?;
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.data)?;
        writer.flush()?;

        log::debug!(
            "{}: {} entries written",
            self.label,
            self.data.entries.len()
        );
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<&str> {
        self.data.entries.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data
            .entries
            .insert(key.to_owned(), value.to_owned());
        self.write_fs()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.entries.remove(key).is_some() {
            self.write_fs()?;
        }
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|err| {
            StateError::Storage(self.label.clone(), err.to_string())
        })
    }
}
