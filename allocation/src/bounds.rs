//! Derivation of per-recipient random bounds.
//!
//! Given a total and a recipient count, derive a `[min, max]` range that
//! yields a reasonable spread around the average while keeping the final
//! residual recipient from absorbing an outsized remainder. The initial
//! anchors (25% and 175% of the average) are corrected by a short sequence
//! of passes, each independently triggerable; every pass that fires is
//! reported as a typed adjustment so callers can log what happened.

use crate::feasibility::resolve_recipient_count;
use fanout_types::policy::min_viable_amount;
use fanout_types::Amount;
use serde::{Deserialize, Serialize};

/// Per-recipient amount range for random draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomBounds {
    pub min: Amount,
    pub max: Amount,
}

/// A corrective pass that fired while deriving bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsAdjustment {
    /// Minimums alone exceeded the total; min re-derived as 80% of a share.
    MinLoweredToFitTotal,
    /// Worst-case residual exceeded twice the max; a ceiling near
    /// `total / (count + 1)` was applied to the max.
    MaxCappedToLimitRemainder,
    /// Minimums for all but the last recipient consumed the whole total;
    /// min re-derived as 60% of a share.
    MinLoweredToFreeLastRecipient,
    /// The range collapsed; both bounds recentered around the average.
    RangeRecentered,
}

/// Diagnostics accompanying a derived bound set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoundsInfo {
    pub average: Amount,
    pub variation_range: Amount,
    pub variation_percent: f64,
    pub min_percent_of_avg: f64,
    pub max_percent_of_avg: f64,
    /// Recipient count the bounds were derived for.
    pub feasible_count: usize,
    pub adjustments: Vec<BoundsAdjustment>,
    /// Achieved spread, filled in after a smart distribution run.
    pub actual_min: Option<Amount>,
    pub actual_max: Option<Amount>,
    pub actual_average: Option<Amount>,
}

impl BoundsInfo {
    fn empty() -> Self {
        Self {
            average: Amount::ZERO,
            variation_range: Amount::ZERO,
            variation_percent: 0.0,
            min_percent_of_avg: 0.0,
            max_percent_of_avg: 0.0,
            feasible_count: 0,
            adjustments: Vec::new(),
            actual_min: None,
            actual_max: None,
            actual_average: None,
        }
    }
}

/// Derive random bounds for splitting `total` across `requested_count`
/// recipients.
///
/// The count is resolved first, so an infeasible request degrades to the
/// largest viable count rather than failing; the count actually used is
/// reported in the info record.
pub fn optimal_random_bounds(total: Amount, requested_count: usize) -> (RandomBounds, BoundsInfo) {
    let count = resolve_recipient_count(total, requested_count, None);
    if count == 0 {
        let zero = RandomBounds {
            min: Amount::ZERO,
            max: Amount::ZERO,
        };
        return (zero, BoundsInfo::empty());
    }

    let average = total.div_count(count);
    let initial = RandomBounds {
        min: min_viable_amount().max(average.mul_ratio(1, 4)),
        max: average.mul_ratio(175, 100),
    };
    let (bounds, adjustments) = validate_and_adjust_bounds(total, count, initial, average);

    let avg_sats = average.sats() as f64;
    let variation_range = bounds.max.saturating_sub(bounds.min);
    let info = BoundsInfo {
        average,
        variation_range,
        variation_percent: variation_range.sats() as f64 / avg_sats * 100.0,
        min_percent_of_avg: bounds.min.sats() as f64 / avg_sats * 100.0,
        max_percent_of_avg: bounds.max.sats() as f64 / avg_sats * 100.0,
        feasible_count: count,
        adjustments,
        actual_min: None,
        actual_max: None,
        actual_average: None,
    };
    (bounds, info)
}

/// The corrective passes, in order. `count` must be at least 1 and `average`
/// the truncated per-recipient share of `total`.
pub(crate) fn validate_and_adjust_bounds(
    total: Amount,
    count: usize,
    mut bounds: RandomBounds,
    average: Amount,
) -> (RandomBounds, Vec<BoundsAdjustment>) {
    let mut adjustments = Vec::new();
    let n = count as u128;

    // Minimums alone must fit inside the total.
    if bounds.min.sats() * n > total.sats() {
        bounds.min = total.mul_ratio(4, 5).div_count(count);
        adjustments.push(BoundsAdjustment::MinLoweredToFitTotal);
    }

    // If all but the last recipient took the max, the residual left for the
    // last must not exceed twice the max; otherwise the greedy final step
    // would produce an outlier.
    let worst_case_rest = bounds.max.sats() * n.saturating_sub(1);
    let worst_case_last = total.sats().saturating_sub(worst_case_rest);
    if worst_case_last > bounds.max.sats() * 2 {
        let conservative = total.div_count(count + 1).mul_ratio(13, 10);
        bounds.max = bounds.max.min(conservative);
        adjustments.push(BoundsAdjustment::MaxCappedToLimitRemainder);
    }

    // The last recipient needs room to vary after the other minimums.
    if bounds.min.sats() * n.saturating_sub(1) >= total.sats() {
        bounds.min = total.mul_ratio(3, 5).div_count(count);
        adjustments.push(BoundsAdjustment::MinLoweredToFreeLastRecipient);
    }

    // Collapsed range: recenter around the average with a 30% spread.
    if bounds.max <= bounds.min.mul_ratio(11, 10) {
        let spread = average.mul_ratio(3, 10);
        bounds.min = average.saturating_sub(spread).max(min_viable_amount());
        bounds.max = average + spread;
        adjustments.push(BoundsAdjustment::RangeRecentered);
    }

    (bounds, adjustments)
}
