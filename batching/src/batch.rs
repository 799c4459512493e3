//! Batch construction.
//!
//! Allocated payments are grouped into batches so no single transaction
//! carries the whole fan-out. Each batch closes at a randomly drawn
//! fraction of the hard per-batch ceiling, so closed totals do not
//! cluster at one recognizable value.

use crate::error::BatchError;
use fanout_types::{Amount, Recipient};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Batch targets are drawn uniformly from this basis-point band of the
/// ceiling: 60.00% to 95.00%.
const TARGET_MIN_BPS: u128 = 6_000;
const TARGET_MAX_BPS: u128 = 9_500;
const BPS_SCALE: u128 = 10_000;

/// One payment inside a batch: a derived recipient and its allocated amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub recipient: Recipient,
    pub amount: Amount,
}

/// A group of payments intended to be sent together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Sequential batch number, starting at 1.
    pub number: u32,
    pub entries: Vec<BatchEntry>,
    /// Sum of the entry amounts.
    pub total: Amount,
}

impl Batch {
    pub fn address_count(&self) -> usize {
        self.entries.len()
    }
}

/// Groups recipient/amount pairs into batches.
///
/// A batch accepts entries until the next one would push its total past
/// either the target drawn for that batch or the hard `max_per_batch`
/// ceiling; the batch then closes and the entry opens a new one. An
/// entry whose own amount exceeds the ceiling therefore sits alone in
/// its batch. With `randomize` set the pairs are shuffled first so
/// batch membership does not mirror derivation order.
pub fn create_batches<R: Rng>(
    recipients: &[Recipient],
    amounts: &[Amount],
    max_per_batch: Amount,
    randomize: bool,
    rng: &mut R,
) -> Result<Vec<Batch>, BatchError> {
    if recipients.len() != amounts.len() {
        return Err(BatchError::LengthMismatch {
            recipients: recipients.len(),
            amounts: amounts.len(),
        });
    }

    let mut entries: Vec<BatchEntry> = recipients
        .iter()
        .cloned()
        .zip(amounts.iter().copied())
        .map(|(recipient, amount)| BatchEntry { recipient, amount })
        .collect();

    if randomize {
        entries.shuffle(rng);
    }

    let mut batches: Vec<Batch> = Vec::new();
    let mut current: Vec<BatchEntry> = Vec::new();
    let mut current_total = Amount::ZERO;
    let mut target = draw_target(max_per_batch, rng);

    for entry in entries {
        let would_be = current_total + entry.amount;
        if !current.is_empty() && (would_be > target || would_be > max_per_batch) {
            batches.push(Batch {
                number: batches.len() as u32 + 1,
                entries: std::mem::take(&mut current),
                total: current_total,
            });
            current_total = Amount::ZERO;
            target = draw_target(max_per_batch, rng);
        }
        current_total = current_total + entry.amount;
        current.push(entry);
    }

    if !current.is_empty() {
        batches.push(Batch {
            number: batches.len() as u32 + 1,
            entries: current,
            total: current_total,
        });
    }

    Ok(batches)
}

/// Close target for a fresh batch: a uniform fraction of the ceiling in
/// the 60%..95% band.
fn draw_target<R: Rng>(max_per_batch: Amount, rng: &mut R) -> Amount {
    let bps = rng.gen_range(TARGET_MIN_BPS..=TARGET_MAX_BPS);
    max_per_batch.mul_ratio(bps, BPS_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn recipients(n: usize) -> Vec<Recipient> {
        (0..n)
            .map(|i| Recipient::new(i as u32, "0", format!("addr{i}")))
            .collect()
    }

    fn coins(values: &[u128]) -> Vec<Amount> {
        values.iter().map(|&v| Amount::from_coins(v)).collect()
    }

    /// Flattens batches into sorted (address, amount) pairs for
    /// membership comparison.
    fn sorted_pairs(batches: &[Batch]) -> Vec<(String, Amount)> {
        let mut out: Vec<(String, Amount)> = batches
            .iter()
            .flat_map(|b| {
                b.entries
                    .iter()
                    .map(|e| (e.recipient.address.clone(), e.amount))
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = create_batches(
            &recipients(3),
            &coins(&[1, 2]),
            Amount::from_coins(10),
            false,
            &mut rng,
        );
        assert_eq!(
            result,
            Err(BatchError::LengthMismatch {
                recipients: 3,
                amounts: 2
            })
        );
    }

    #[test]
    fn test_empty_input_produces_no_batches() {
        let mut rng = StdRng::seed_from_u64(1);
        let batches =
            create_batches(&[], &[], Amount::from_coins(10), false, &mut rng).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_every_entry_lands_in_exactly_one_batch() {
        let mut rng = StdRng::seed_from_u64(7);
        let recips = recipients(20);
        let amounts = coins(&[1; 20]);
        let batches =
            create_batches(&recips, &amounts, Amount::from_coins(5), false, &mut rng).unwrap();

        let mut expected: Vec<(String, Amount)> = recips
            .iter()
            .zip(amounts.iter())
            .map(|(r, a)| (r.address.clone(), *a))
            .collect();
        expected.sort();
        assert_eq!(sorted_pairs(&batches), expected);
    }

    #[test]
    fn test_multi_entry_batches_respect_ceiling() {
        let max = Amount::from_coins(4);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let batches =
                create_batches(&recipients(50), &coins(&[1; 50]), max, false, &mut rng).unwrap();
            for batch in &batches {
                assert!(
                    batch.total <= max,
                    "seed {seed}: batch {} total {} above ceiling",
                    batch.number,
                    batch.total
                );
            }
        }
    }

    #[test]
    fn test_oversize_entry_sits_alone() {
        let max = Amount::from_coins(10);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let batches =
                create_batches(&recipients(3), &coins(&[2, 12, 3]), max, false, &mut rng).unwrap();
            for batch in &batches {
                if batch.total > max {
                    assert_eq!(batch.address_count(), 1, "seed {seed}");
                    assert_eq!(batch.total, Amount::from_coins(12), "seed {seed}");
                }
            }
            assert_eq!(sorted_pairs(&batches).len(), 3);
        }
    }

    #[test]
    fn test_target_splits_equal_entries_into_singletons() {
        // Ceiling 10, entries of 6: any target in the 60%..95% band
        // admits the first entry and rejects the second.
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let batches = create_batches(
                &recipients(3),
                &coins(&[6, 6, 6]),
                Amount::from_coins(10),
                false,
                &mut rng,
            )
            .unwrap();
            assert_eq!(batches.len(), 3, "seed {seed}");
            for batch in &batches {
                assert_eq!(batch.address_count(), 1, "seed {seed}");
                assert_eq!(batch.total, Amount::from_coins(6), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_batch_numbers_are_sequential_from_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let batches = create_batches(
            &recipients(30),
            &coins(&[1; 30]),
            Amount::from_coins(3),
            false,
            &mut rng,
        )
        .unwrap();
        for (i, batch) in batches.iter().enumerate() {
            assert_eq!(batch.number, i as u32 + 1);
        }
    }

    #[test]
    fn test_batch_total_matches_entry_sum() {
        let mut rng = StdRng::seed_from_u64(11);
        let amounts: Vec<Amount> = (1..=25).map(Amount::from_coins).collect();
        let batches = create_batches(
            &recipients(25),
            &amounts,
            Amount::from_coins(40),
            true,
            &mut rng,
        )
        .unwrap();
        for batch in &batches {
            let sum = batch
                .entries
                .iter()
                .fold(Amount::ZERO, |acc, e| acc + e.amount);
            assert_eq!(batch.total, sum);
        }
    }

    #[test]
    fn test_shuffle_changes_order_but_not_membership() {
        let recips = recipients(30);
        let amounts: Vec<Amount> = (1..=30).map(|i| Amount::from_sats(i * 1_000)).collect();

        let mut rng = StdRng::seed_from_u64(42);
        let batches = create_batches(
            &recips,
            &amounts,
            Amount::from_sats(2_000_000),
            true,
            &mut rng,
        )
        .unwrap();

        let mut expected: Vec<(String, Amount)> = recips
            .iter()
            .zip(amounts.iter())
            .map(|(r, a)| (r.address.clone(), *a))
            .collect();
        expected.sort();
        assert_eq!(sorted_pairs(&batches), expected);

        let flattened: Vec<u32> = batches
            .iter()
            .flat_map(|b| b.entries.iter().map(|e| e.recipient.index))
            .collect();
        let original: Vec<u32> = recips.iter().map(|r| r.index).collect();
        assert_ne!(flattened, original);
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let recips = recipients(40);
        let amounts = coins(&[2; 40]);
        let max = Amount::from_coins(9);

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = create_batches(&recips, &amounts, max, true, &mut rng_a).unwrap();
        let b = create_batches(&recips, &amounts, max, true, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}
