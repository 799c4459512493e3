//! File-backed state store: one JSON object mapping storage keys to the
//! last index used.
//!
//! The whole file is read on every query and rewritten on every update.
//! State files hold a handful of lineages, so simplicity wins over
//! incremental writes, and a fresh read means concurrent runs cannot
//! serve a stale in-process cache.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::state::{DerivationStateStore, StateKey};
use crate::StoreError;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// An absent file is an empty store; an unreadable one is not.
    fn load(&self) -> Result<HashMap<String, u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                StoreError::Corrupted(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn save(&self, records: &HashMap<String, u32>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl DerivationStateStore for JsonFileStore {
    fn last_index(&self, key: &StateKey) -> Result<Option<u32>, StoreError> {
        Ok(self.load()?.get(&key.storage_key()).copied())
    }

    fn record_last_index(&self, key: &StateKey, last_index: u32) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.insert(key.storage_key(), last_index);
        self.save(&records)
    }

    fn clear(&self, key: &StateKey) -> Result<(), StoreError> {
        let mut records = self.load()?;
        if records.remove(&key.storage_key()).is_some() {
            self.save(&records)?;
        }
        Ok(())
    }
}
