//! Summary statistics over a constructed batch set.

use crate::batch::Batch;
use fanout_types::Amount;
use serde::{Deserialize, Serialize};

/// Aggregate view of a batch run, for reports and logs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchStats {
    pub batch_count: usize,
    pub address_count: usize,
    pub total_amount: Amount,
    pub min_batch_amount: Amount,
    pub max_batch_amount: Amount,
    pub average_batch_amount: Amount,
    pub min_addresses_per_batch: usize,
    pub max_addresses_per_batch: usize,
    pub average_addresses_per_batch: f64,
    /// True when the batch totals add back up to the expected fund total.
    pub sum_exact: bool,
}

/// Computes stats for a batch set. Returns `None` when there is nothing
/// to summarize.
pub fn analyze_batches(batches: &[Batch], expected_total: Amount) -> Option<BatchStats> {
    if batches.is_empty() {
        return None;
    }

    let batch_count = batches.len();
    let address_count: usize = batches.iter().map(Batch::address_count).sum();
    let total_amount = batches.iter().fold(Amount::ZERO, |acc, b| acc + b.total);

    let min_batch_amount = batches
        .iter()
        .map(|b| b.total)
        .min()
        .unwrap_or(Amount::ZERO);
    let max_batch_amount = batches
        .iter()
        .map(|b| b.total)
        .max()
        .unwrap_or(Amount::ZERO);

    let min_addresses_per_batch = batches
        .iter()
        .map(Batch::address_count)
        .min()
        .unwrap_or(0);
    let max_addresses_per_batch = batches
        .iter()
        .map(Batch::address_count)
        .max()
        .unwrap_or(0);

    Some(BatchStats {
        batch_count,
        address_count,
        total_amount,
        min_batch_amount,
        max_batch_amount,
        average_batch_amount: total_amount.div_count(batch_count),
        min_addresses_per_batch,
        max_addresses_per_batch,
        average_addresses_per_batch: address_count as f64 / batch_count as f64,
        sum_exact: total_amount == expected_total,
    })
}
