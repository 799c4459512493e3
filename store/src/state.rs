//! Derivation-state storage trait.

use crate::StoreError;

/// Identifies one derivation lineage: a key-source fingerprint plus the
/// base path addresses were derived under.
///
/// The same source used with two base paths advances independently.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Six-digit fingerprint of the key source.
    pub fingerprint: u32,
    pub base_path: String,
}

impl StateKey {
    pub fn new(fingerprint: u32, base_path: impl Into<String>) -> Self {
        Self {
            fingerprint,
            base_path: base_path.into(),
        }
    }

    /// Stable flat encoding used as the map key in persisted state.
    pub fn storage_key(&self) -> String {
        format!("{:06}/{}", self.fingerprint, self.base_path)
    }
}

/// Trait for recording the highest derivation index handed out per
/// lineage. Backends must not lose a recorded index once `record_last_index`
/// returns.
pub trait DerivationStateStore {
    /// The last index recorded for this lineage, if any run completed.
    fn last_index(&self, key: &StateKey) -> Result<Option<u32>, StoreError>;

    /// Record the highest index actually used by a completed run.
    fn record_last_index(&self, key: &StateKey, last_index: u32) -> Result<(), StoreError>;

    /// Forget the lineage entirely. Clearing an unknown key is not an error.
    fn clear(&self, key: &StateKey) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_pads_fingerprint() {
        let key = StateKey::new(7, "0");
        assert_eq!(key.storage_key(), "000007/0");

        let key = StateKey::new(242_155, "84/0/0");
        assert_eq!(key.storage_key(), "242155/84/0/0");
    }

    #[test]
    fn test_distinct_paths_make_distinct_keys() {
        let a = StateKey::new(1, "0");
        let b = StateKey::new(1, "1");
        assert_ne!(a.storage_key(), b.storage_key());
    }
}
