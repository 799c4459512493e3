//! Integration tests exercising the allocation → batching pipeline:
//! split a fund total across recipients, then group the results into
//! batches — verifying the two engines compose without losing a satoshi.

use rand::rngs::StdRng;
use rand::SeedableRng;

use fanout_allocation::{distribute_equal, distribute_random_optimal};
use fanout_batching::{analyze_batches, create_batches};
use fanout_types::policy::min_viable_amount;
use fanout_types::{Amount, Recipient};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Stands in for the derivation layer: one synthetic recipient per
/// allocated amount.
fn recipients_for(count: usize) -> Vec<Recipient> {
    (0..count)
        .map(|i| Recipient::new(i as u32, "0", format!("bc1q_test_{i:04}")))
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Smart allocation feeding batching
// ---------------------------------------------------------------------------

#[test]
fn smart_allocation_batches_without_loss() {
    let total = Amount::from_coins(10);
    let ceiling = Amount::from_coins(3);

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (plan, _info) = distribute_random_optimal(total, 8, &mut rng);
        assert_eq!(plan.total(), total, "seed {seed}");

        let recips = recipients_for(plan.used_count());
        let batches =
            create_batches(&recips, &plan.amounts, ceiling, true, &mut rng).unwrap();

        let grand = batches
            .iter()
            .fold(Amount::ZERO, |acc, b| acc + b.total);
        assert_eq!(grand, total, "seed {seed}");

        let entry_count: usize = batches.iter().map(|b| b.entries.len()).sum();
        assert_eq!(entry_count, plan.used_count(), "seed {seed}");

        for batch in &batches {
            assert!(
                batch.total <= ceiling || batch.entries.len() == 1,
                "seed {seed}: batch {} breaks the ceiling",
                batch.number
            );
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Degraded recipient count flows through
// ---------------------------------------------------------------------------

#[test]
fn degraded_count_carries_into_batches() {
    // 1800 sats cannot keep 100 recipients viable; allocation degrades
    // to 3 and batching must see exactly those 3.
    let total = Amount::from_sats(1_800);
    let mut rng = StdRng::seed_from_u64(5);

    let (plan, info) = distribute_random_optimal(total, 100, &mut rng);
    assert_eq!(plan.used_count(), 3);
    assert_eq!(info.feasible_count, 3);
    for amount in &plan.amounts {
        assert!(*amount >= min_viable_amount());
    }

    let recips = recipients_for(plan.used_count());
    let batches =
        create_batches(&recips, &plan.amounts, Amount::from_sats(1_800), false, &mut rng)
            .unwrap();

    let entry_count: usize = batches.iter().map(|b| b.entries.len()).sum();
    assert_eq!(entry_count, 3);
    let grand = batches.iter().fold(Amount::ZERO, |acc, b| acc + b.total);
    assert_eq!(grand, total);
}

// ---------------------------------------------------------------------------
// 3. Equal allocation with batch statistics
// ---------------------------------------------------------------------------

#[test]
fn equal_allocation_stats_confirm_exact_sum() {
    let total = Amount::from_coins(12);
    let plan = distribute_equal(total, 24);
    let recips = recipients_for(plan.used_count());

    let mut rng = StdRng::seed_from_u64(21);
    let batches =
        create_batches(&recips, &plan.amounts, Amount::from_coins(2), true, &mut rng).unwrap();

    let stats = analyze_batches(&batches, total).unwrap();
    assert!(stats.sum_exact);
    assert_eq!(stats.address_count, 24);
    assert_eq!(stats.total_amount, total);
    assert!(stats.max_batch_amount <= Amount::from_coins(2));
    assert!(stats.min_addresses_per_batch >= 1);
}
