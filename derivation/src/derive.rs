//! Recipient derivation over an address provider, policed against the
//! BIP32 non-hardened index ceiling.

use sha2::{Digest, Sha256};

use crate::error::DerivationError;
use crate::provider::AddressProvider;
use fanout_types::Recipient;

/// Largest non-hardened BIP32 child index (2^31 - 1).
pub const MAX_DERIVATION_INDEX: u32 = 2_147_483_647;

/// Fraction of the index space past which callers get warned.
const INDEX_WARNING_RATIO: f64 = 0.95;

/// Checks that `count` indices starting at `start_index` stay within the
/// non-hardened range. A zero count is trivially in range.
pub fn validate_index_range(start_index: u32, count: usize) -> Result<(), DerivationError> {
    if count == 0 {
        return Ok(());
    }
    let end = start_index as u64 + count as u64 - 1;
    if end > MAX_DERIVATION_INDEX as u64 {
        return Err(DerivationError::IndexRangeExceeded {
            start: start_index,
            end,
            max: MAX_DERIVATION_INDEX,
        });
    }
    Ok(())
}

/// True when the requested range ends beyond 95% of the index space.
/// Still derivable, but the key path is close to exhaustion.
pub fn approaching_index_limit(start_index: u32, count: usize) -> bool {
    if count == 0 {
        return false;
    }
    let end = start_index as u64 + count as u64 - 1;
    end as f64 > MAX_DERIVATION_INDEX as f64 * INDEX_WARNING_RATIO
}

/// Builds one recipient per index from `provider`, starting at
/// `start_index`. The range is validated before the provider is asked
/// for anything.
pub fn derive_recipients(
    provider: &dyn AddressProvider,
    base_path: &str,
    start_index: u32,
    count: usize,
) -> Result<Vec<Recipient>, DerivationError> {
    validate_index_range(start_index, count)?;

    let mut recipients = Vec::with_capacity(count);
    for offset in 0..count {
        let index = start_index + offset as u32;
        let address = provider.address_at(index)?;
        recipients.push(Recipient::new(index, base_path, address));
    }
    Ok(recipients)
}

/// Six-digit stable fingerprint of an opaque key-source string.
///
/// SHA-256 of the raw bytes, taken as a big-endian integer mod 10^6.
/// Collisions are acceptable: the fingerprint only namespaces persisted
/// state and display output, it never authenticates anything.
pub fn source_fingerprint(source: &str) -> u32 {
    let digest = Sha256::digest(source.as_bytes());
    let mut acc: u64 = 0;
    for &byte in digest.iter() {
        acc = (acc * 256 + u64::from(byte)) % 1_000_000;
    }
    acc as u32
}
