//! JSON key/value persistence with fail-soft reads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::{env, fs};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to persist key '{key}': {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// Raw string storage underneath the JSON layer.
///
/// A failed or missing read surfaces as `None`; the decode fallback lives in
/// `KeyValueStore::get`, not here.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile backend for tests and `--memory` demo runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One JSON document per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let wrap = |source: std::io::Error| StoreError::Write {
            key: key.to_owned(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(wrap)?;

        // Write-then-rename so a failed write never clobbers the prior value.
        let staging = self.root.join(format!("{key}.json.tmp"));
        fs::write(&staging, value).map_err(wrap)?;
        fs::rename(&staging, self.path_for(key)).map_err(wrap)?;
        Ok(())
    }
}

/// Resolve the default on-disk data directory.
///
/// `TICKDECK_DATA_DIR` wins, then `$HOME/.tickdeck`, then `./.tickdeck`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("TICKDECK_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home).join(".tickdeck");
        }
    }

    PathBuf::from(".tickdeck")
}

/// JSON-serializing key/value store shared by the registry and the schedule.
///
/// Constructed once at startup and passed by reference to every component
/// that needs it; there is no module-global instance.
#[derive(Clone)]
pub struct KeyValueStore {
    backend: Arc<dyn StorageBackend>,
}

impl KeyValueStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn file_backed(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(root)))
    }

    /// Decode the stored value for `key`, or return `fallback` when the key
    /// is absent or its stored form fails to decode. Never errors.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.backend.read(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or(fallback),
            None => fallback,
        }
    }

    /// Serialize and persist `value` under `key`, overwriting any prior value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.backend.write(key, &raw)
    }
}
