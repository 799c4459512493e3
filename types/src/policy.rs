//! Unit policy for the target chain.
//!
//! The dust limit and the derived viability floor are fixed protocol-level
//! values; everything downstream (feasibility checks, random bounds, batch
//! ceilings) is expressed in terms of these.

use crate::amount::Amount;

/// Protocol dust limit in satoshis. Outputs at or below this are unrelayable.
pub const DUST_LIMIT_SATS: u128 = 546;

/// Application ceiling on a single fund total, in whole coins.
pub const MAX_TOTAL_COINS: u128 = 1_000_000;

/// The dust limit as an [`Amount`].
pub fn dust_limit() -> Amount {
    Amount::from_sats(DUST_LIMIT_SATS)
}

/// Smallest amount worth allocating: the dust limit plus a 10% safety margin,
/// truncated to satoshi precision (600 sats).
pub fn min_viable_amount() -> Amount {
    dust_limit().mul_ratio(11, 10)
}

/// Whether `amount` is strictly above the dust limit.
pub fn is_above_dust_limit(amount: Amount) -> bool {
    amount > dust_limit()
}
