//! Recipient derivation: turns a key source and an index range into
//! concrete payment recipients.
//!
//! Cryptographic key handling stays external. The toolkit consumes
//! addresses through the [`AddressProvider`] seam; the shipped
//! implementation reads pre-derived addresses from a text file.
//!
//! This crate handles:
//! - The address-provider trait and the file-backed address book
//! - Index-range validation against the BIP32 non-hardened ceiling
//! - Building `Recipient` lists for the allocation pipeline
//! - Stable six-digit fingerprints for key sources

pub mod derive;
pub mod error;
pub mod provider;

pub use derive::{
    approaching_index_limit, derive_recipients, source_fingerprint, validate_index_range,
    MAX_DERIVATION_INDEX,
};
pub use error::DerivationError;
pub use provider::{AddressProvider, FileAddressBook};
