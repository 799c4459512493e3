//! CLI commands.

pub mod generate;
pub mod plan;
pub mod state;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fanout_allocation::{
    analyze_distribution, distribute_equal, distribute_random, distribute_random_optimal,
    AllocationPlan, BoundsInfo, DistributionQuality,
};
use fanout_types::Amount;

use crate::input::{self, InputError};
use crate::Mode;

/// Result of running one allocation, whatever the mode.
pub struct AllocationOutcome {
    pub plan: AllocationPlan,
    /// Diagnostics from self-derived bounds (smart mode only).
    pub bounds_info: Option<BoundsInfo>,
    pub quality: Option<DistributionQuality>,
}

/// Seeded rng for reproducible runs, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Validates the shared allocation flags and runs the requested mode.
pub fn run_allocation(
    mode: Mode,
    total: Amount,
    count: usize,
    min: Option<Amount>,
    max: Option<Amount>,
    rng: &mut StdRng,
) -> Result<AllocationOutcome> {
    input::validate_total(total)?;
    input::validate_count(count)?;

    match mode {
        Mode::Equal => {
            let plan = distribute_equal(total, count);
            Ok(AllocationOutcome {
                plan,
                bounds_info: None,
                quality: None,
            })
        }
        Mode::Random => {
            let (min, max) = match (min, max) {
                (Some(min), Some(max)) => (min, max),
                _ => return Err(InputError::MissingBounds.into()),
            };
            input::validate_manual_bounds(min, max, total)?;
            let plan = distribute_random(total, count, min, max, rng)?;
            let quality = plan
                .bounds
                .and_then(|b| analyze_distribution(&plan.amounts, b, total));
            Ok(AllocationOutcome {
                plan,
                bounds_info: None,
                quality,
            })
        }
        Mode::Smart => {
            let (plan, info) = distribute_random_optimal(total, count, rng);
            let quality = plan
                .bounds
                .and_then(|b| analyze_distribution(&plan.amounts, b, total));
            Ok(AllocationOutcome {
                plan,
                bounds_info: Some(info),
                quality,
            })
        }
    }
}
