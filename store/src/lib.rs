//! Derivation-state persistence.
//!
//! Remembers the highest derivation index each key lineage has handed
//! out, so consecutive fan-out runs never reuse an address. The rest of
//! the toolkit depends only on the [`DerivationStateStore`] trait;
//! backends are injected by the caller.
//!
//! This crate handles:
//! - The state-store trait and its lineage key
//! - A JSON-file backend for real runs
//! - An in-memory backend for tests and one-shot use

pub mod error;
pub mod json_file;
pub mod memory;
pub mod state;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use state::{DerivationStateStore, StateKey};
