//! Flag-level validation, applied before any engine call.
//!
//! The allocation engine enforces its own hard rules; checking here as
//! well turns bad flag combinations into immediate, flag-shaped errors
//! instead of engine errors mid-run.

use fanout_types::policy::{dust_limit, is_above_dust_limit, MAX_TOTAL_COINS};
use fanout_types::Amount;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("total must be positive")]
    TotalNotPositive,

    #[error("total {total} exceeds the {cap}-coin cap")]
    TotalExceedsCap { total: Amount, cap: u128 },

    #[error("total {total} must clear the dust limit ({dust})")]
    TotalBelowDust { total: Amount, dust: Amount },

    #[error("recipient count must be at least 1")]
    CountZero,

    #[error("random mode needs both --min and --max")]
    MissingBounds,

    #[error("minimum {min} must be strictly below maximum {max}")]
    BoundsNotIncreasing { min: Amount, max: Amount },

    #[error("maximum {max} must be strictly below the total {total}")]
    MaxNotBelowTotal { max: Amount, total: Amount },

    #[error("per-batch ceiling must be positive")]
    BatchCeilingZero,
}

/// Total must be positive, above dust, and within the application cap.
pub fn validate_total(total: Amount) -> Result<(), InputError> {
    if total.is_zero() {
        return Err(InputError::TotalNotPositive);
    }
    if total > Amount::from_coins(MAX_TOTAL_COINS) {
        return Err(InputError::TotalExceedsCap {
            total,
            cap: MAX_TOTAL_COINS,
        });
    }
    if !is_above_dust_limit(total) {
        return Err(InputError::TotalBelowDust {
            total,
            dust: dust_limit(),
        });
    }
    Ok(())
}

pub fn validate_count(count: usize) -> Result<(), InputError> {
    if count == 0 {
        return Err(InputError::CountZero);
    }
    Ok(())
}

/// The hard rules for caller-supplied bounds, on the raw values before
/// any engine-side clamping.
pub fn validate_manual_bounds(min: Amount, max: Amount, total: Amount) -> Result<(), InputError> {
    if max <= min {
        return Err(InputError::BoundsNotIncreasing { min, max });
    }
    if max >= total {
        return Err(InputError::MaxNotBelowTotal { max, total });
    }
    Ok(())
}

pub fn validate_batch_ceiling(ceiling: Amount) -> Result<(), InputError> {
    if ceiling.is_zero() {
        return Err(InputError::BatchCeilingZero);
    }
    Ok(())
}
