//! Allocation-specific errors.
//!
//! Only structurally invalid calls fail. Numerically awkward but well-formed
//! requests (infeasible counts, collapsing ranges, oversized remainders) are
//! recovered locally and surface as diagnostics, never as errors.

use fanout_types::Amount;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("maximum per-recipient amount {max} must exceed the minimum {min}")]
    BoundsNotIncreasing { min: Amount, max: Amount },

    #[error("maximum per-recipient amount {max} must be below the total {total}")]
    MaxBoundExceedsTotal { max: Amount, total: Amount },
}
