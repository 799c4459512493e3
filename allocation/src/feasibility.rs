//! Feasibility checks: how many recipients a total can actually support.
//!
//! A request is infeasible when it would force some recipient below the
//! viable minimum. Infeasible requests never fail; they carry a suggested
//! count the caller is expected to substitute silently. The user-facing
//! contract is "give me as many usable recipients as possible", not "fail
//! if my requested count was imprecise".

use fanout_types::policy::min_viable_amount;
use fanout_types::Amount;

/// Outcome of a feasibility check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    /// The requested count cannot keep every recipient viable;
    /// `suggested_count` is the largest count that can.
    Infeasible { suggested_count: usize },
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Largest recipient count for which every equal share stays viable:
/// `floor(total / min_viable_amount)`, clamped to `max_recipients` if given.
pub fn optimal_recipient_count(total: Amount, max_recipients: Option<usize>) -> usize {
    let fit = (total.sats() / min_viable_amount().sats()) as usize;
    match max_recipients {
        Some(cap) => fit.min(cap),
        None => fit,
    }
}

/// Check whether `requested_count` recipients can each receive at least the
/// effective minimum out of `total`.
///
/// The effective minimum is the caller's `min_amount` raised to the viable
/// floor. The suggested count of an infeasible result depends only on the
/// total, never on the requested count.
pub fn validate_feasibility(
    total: Amount,
    requested_count: usize,
    min_amount: Option<Amount>,
) -> Feasibility {
    let needed = effective_min(min_amount)
        .sats()
        .saturating_mul(requested_count as u128);
    if needed > total.sats() {
        Feasibility::Infeasible {
            suggested_count: optimal_recipient_count(total, None),
        }
    } else {
        Feasibility::Feasible
    }
}

/// The recipient count the distribution policies actually use.
///
/// Infeasible requests degrade to the suggested count. The result is then
/// capped so `effective_min * count <= total` still holds (the suggestion is
/// computed against the viable floor, which a larger caller minimum can
/// undercut), and a positive total never resolves to zero recipients.
pub fn resolve_recipient_count(
    total: Amount,
    requested_count: usize,
    min_amount: Option<Amount>,
) -> usize {
    if total.is_zero() {
        return 0;
    }
    let count = match validate_feasibility(total, requested_count, min_amount) {
        Feasibility::Feasible => requested_count,
        Feasibility::Infeasible { suggested_count } => suggested_count,
    };
    let fit = (total.sats() / effective_min(min_amount).sats()) as usize;
    count.min(fit).max(1)
}

/// The caller minimum raised to the viable floor.
pub(crate) fn effective_min(min_amount: Option<Amount>) -> Amount {
    match min_amount {
        Some(m) => m.max(min_viable_amount()),
        None => min_viable_amount(),
    }
}
