//! In-memory state store for tests and one-shot runs.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::state::{DerivationStateStore, StateKey};
use crate::StoreError;

/// Thread-safe map-backed store. Nothing survives the process.
pub struct MemoryStore {
    records: Mutex<HashMap<String, u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivationStateStore for MemoryStore {
    fn last_index(&self, key: &StateKey) -> Result<Option<u32>, StoreError> {
        Ok(self.records.lock().unwrap().get(&key.storage_key()).copied())
    }

    fn record_last_index(&self, key: &StateKey, last_index: u32) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(key.storage_key(), last_index);
        Ok(())
    }

    fn clear(&self, key: &StateKey) -> Result<(), StoreError> {
        self.records.lock().unwrap().remove(&key.storage_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.last_index(&StateKey::new(1, "0")).unwrap(), None);
    }

    #[test]
    fn test_record_overwrite_and_clear() {
        let store = MemoryStore::new();
        let key = StateKey::new(7, "0");

        store.record_last_index(&key, 3).unwrap();
        assert_eq!(store.last_index(&key).unwrap(), Some(3));

        store.record_last_index(&key, 8).unwrap();
        assert_eq!(store.last_index(&key).unwrap(), Some(8));

        store.clear(&key).unwrap();
        assert_eq!(store.last_index(&key).unwrap(), None);
    }

    #[test]
    fn test_works_through_trait_object() {
        let store: Box<dyn DerivationStateStore> = Box::new(MemoryStore::new());
        let key = StateKey::new(1, "0");
        store.record_last_index(&key, 11).unwrap();
        assert_eq!(store.last_index(&key).unwrap(), Some(11));
    }
}
