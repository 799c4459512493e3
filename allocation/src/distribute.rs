//! The three distribution policies.
//!
//! Every entry point resolves the recipient count first and then constructs
//! a plan whose amounts sum to the total exactly: equal shares carry the
//! truncation remainder on the first entry, and both random policies give
//! the final recipient the residual, which makes the exact sum structural
//! rather than something to verify after the fact.

use crate::bounds::{optimal_random_bounds, BoundsInfo, RandomBounds};
use crate::error::AllocationError;
use crate::feasibility::resolve_recipient_count;
use fanout_types::policy::min_viable_amount;
use fanout_types::Amount;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Resolution of the uniform fraction drawn per non-final recipient.
const FRACTION_SCALE: u128 = 1_000_000_000;

/// An ordered allocation, one amount per recipient.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub amounts: Vec<Amount>,
    /// Truncated per-recipient share the plan was built around.
    pub average: Amount,
    /// Bounds the random draws ran under, if any.
    pub bounds: Option<RandomBounds>,
}

impl AllocationPlan {
    fn empty() -> Self {
        Self {
            amounts: Vec::new(),
            average: Amount::ZERO,
            bounds: None,
        }
    }

    pub fn used_count(&self) -> usize {
        self.amounts.len()
    }

    pub fn total(&self) -> Amount {
        self.amounts
            .iter()
            .fold(Amount::ZERO, |acc, a| acc + *a)
    }
}

/// Split `total` into equal shares.
///
/// The count is resolved first; the truncation remainder goes to the first
/// entry, so all entries but possibly the first are identical.
pub fn distribute_equal(total: Amount, requested_count: usize) -> AllocationPlan {
    let count = resolve_recipient_count(total, requested_count, None);
    if count == 0 {
        return AllocationPlan::empty();
    }
    let share = total.div_count(count);
    let mut amounts = vec![share; count];
    let remainder = total.saturating_sub(Amount::from_sats(share.sats() * count as u128));
    if !remainder.is_zero() {
        amounts[0] = amounts[0] + remainder;
    }
    AllocationPlan {
        amounts,
        average: share,
        bounds: None,
    }
}

/// Split `total` randomly within caller-supplied `[min, max]` bounds.
///
/// The bounds themselves are the only hard errors in the engine: both are
/// explicit user inputs, so a non-increasing range or a max at or above the
/// total is surfaced for re-prompting instead of being auto-corrected.
/// Everything after that degrades softly: the min is raised to the viable
/// floor, the count is resolved against it, and a max left unreachably small
/// by count resolution is lifted to 1.8x the post-resolution average.
pub fn distribute_random<R: Rng>(
    total: Amount,
    requested_count: usize,
    min: Amount,
    max: Amount,
    rng: &mut R,
) -> Result<AllocationPlan, AllocationError> {
    if max <= min {
        return Err(AllocationError::BoundsNotIncreasing { min, max });
    }
    if max >= total {
        return Err(AllocationError::MaxBoundExceedsTotal { max, total });
    }

    let min = min.max(min_viable_amount());
    let count = resolve_recipient_count(total, requested_count, Some(min));
    if count == 0 {
        return Ok(AllocationPlan::empty());
    }
    let average = total.div_count(count);
    let max = if average > max.mul_ratio(2, 1) {
        average.mul_ratio(9, 5)
    } else {
        max
    };

    let bounds = RandomBounds { min, max };
    let amounts = fill_random(total, count, bounds, None, rng);
    Ok(AllocationPlan {
        amounts,
        average,
        bounds: Some(bounds),
    })
}

/// Split `total` randomly under self-derived bounds.
///
/// Bounds and count come from [`optimal_random_bounds`]; the fill loop runs
/// with the leave-for-last cap so the penultimate draw cannot starve the
/// final recipient. The returned info carries the achieved spread.
pub fn distribute_random_optimal<R: Rng>(
    total: Amount,
    requested_count: usize,
    rng: &mut R,
) -> (AllocationPlan, BoundsInfo) {
    let (bounds, mut info) = optimal_random_bounds(total, requested_count);
    let count = info.feasible_count;
    if count == 0 {
        return (AllocationPlan::empty(), info);
    }

    // Keep the residual near the max: allow the last entry 10% headroom.
    let reasonable_last = bounds.max.mul_ratio(11, 10);
    let amounts = fill_random(total, count, bounds, Some(reasonable_last), rng);

    info.actual_min = amounts.iter().copied().min();
    info.actual_max = amounts.iter().copied().max();
    let sum = amounts.iter().fold(Amount::ZERO, |acc, a| acc + *a);
    info.actual_average = Some(sum.div_count(count));

    let plan = AllocationPlan {
        amounts,
        average: info.average,
        bounds: Some(bounds),
    };
    (plan, info)
}

/// Sequential random fill shared by both random policies.
///
/// Each non-final slot draws once, capped so that every later slot can still
/// receive `bounds.min` (and, when `leave_for_last` is set and one slot
/// remains after this one, so the residual stays near the max). The final
/// slot takes whatever remains.
fn fill_random<R: Rng>(
    total: Amount,
    count: usize,
    bounds: RandomBounds,
    leave_for_last: Option<Amount>,
    rng: &mut R,
) -> Vec<Amount> {
    let mut amounts = Vec::with_capacity(count);
    let mut remaining = total;

    for i in 0..count - 1 {
        let still_to_fill = (count - i - 1) as u128;
        let reserve = Amount::from_sats(bounds.min.sats() * still_to_fill);
        let mut head_room = remaining.saturating_sub(reserve);
        if still_to_fill == 1 {
            if let Some(reasonable_last) = leave_for_last {
                head_room = head_room.min(remaining.saturating_sub(reasonable_last));
            }
        }

        let effective_max = bounds.max.min(head_room);
        let amount = if effective_max <= bounds.min {
            bounds.min
        } else {
            let span = effective_max - bounds.min;
            let fraction = rng.gen_range(0..FRACTION_SCALE);
            bounds.min + span.mul_ratio(fraction, FRACTION_SCALE)
        };

        amounts.push(amount);
        remaining = remaining.saturating_sub(amount);
    }
    amounts.push(remaining);

    reclaim_shortfall(&mut amounts, bounds.min);
    amounts
}

/// Top up a sub-viable final entry from the nearest prior entry with slack.
///
/// Scans backward and moves the whole shortfall from the first entry that can
/// give it up without dropping below `min`. Best effort: with every donor at
/// `min` the plan is left as produced. The sum is unchanged either way.
pub(crate) fn reclaim_shortfall(amounts: &mut [Amount], min: Amount) {
    let n = amounts.len();
    if n < 2 {
        return;
    }
    let floor = min_viable_amount();
    let last = amounts[n - 1];
    if last >= floor {
        return;
    }
    let shortfall = floor - last;
    for i in (0..n - 1).rev() {
        if amounts[i].saturating_sub(shortfall) >= min {
            amounts[i] = amounts[i] - shortfall;
            amounts[n - 1] = amounts[n - 1] + shortfall;
            return;
        }
    }
}
