//! Post-hoc quality metrics over a produced allocation.
//!
//! Read-only diagnostics for reports and tests; nothing here feeds back into
//! the allocation itself. Ratios are computed in f64 (they describe shape,
//! not money), while the exactness check stays pure integer comparison.

use crate::bounds::RandomBounds;
use fanout_types::Amount;
use serde::{Deserialize, Serialize};

/// Quality metrics for one allocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionQuality {
    pub actual_min: Amount,
    pub actual_max: Amount,
    pub actual_average: Amount,
    /// Population standard deviation over the mean.
    pub variation_coefficient: f64,
    /// Share of all entries but the last that landed inside the bounds.
    pub bound_compliance_percent: f64,
    /// Final entry exceeded the max bound by more than 20%.
    pub excessive_last: bool,
    pub total_distributed: Amount,
    /// Whether the amounts sum to the expected total, satoshi-exact.
    pub sum_exact: bool,
}

/// Analyze a produced allocation against the bounds it ran under.
///
/// Returns `None` for an empty plan.
pub fn analyze_distribution(
    amounts: &[Amount],
    bounds: RandomBounds,
    total: Amount,
) -> Option<DistributionQuality> {
    if amounts.is_empty() {
        return None;
    }
    let n = amounts.len();
    let sum = amounts.iter().fold(Amount::ZERO, |acc, a| acc + *a);

    let mean = sum.sats() as f64 / n as f64;
    let variance = amounts
        .iter()
        .map(|a| {
            let d = a.sats() as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;
    let variation_coefficient = if mean > 0.0 {
        variance.sqrt() / mean
    } else {
        0.0
    };

    let bound_compliance_percent = if n <= 1 {
        100.0
    } else {
        let within = amounts[..n - 1]
            .iter()
            .filter(|a| **a >= bounds.min && **a <= bounds.max)
            .count();
        within as f64 / (n - 1) as f64 * 100.0
    };

    Some(DistributionQuality {
        actual_min: amounts.iter().copied().min().unwrap_or(Amount::ZERO),
        actual_max: amounts.iter().copied().max().unwrap_or(Amount::ZERO),
        actual_average: sum.div_count(n),
        variation_coefficient,
        bound_compliance_percent,
        excessive_last: amounts[n - 1] > bounds.max.mul_ratio(6, 5),
        total_distributed: sum,
        sum_exact: sum == total,
    })
}
