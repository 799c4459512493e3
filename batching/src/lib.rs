//! Privacy batching: groups allocated payments into batches that stay
//! under a hard per-batch ceiling.
//!
//! Batches close early at a randomly drawn fraction of the ceiling so
//! their totals vary run to run, and entries can be shuffled so batch
//! membership does not follow derivation order. Every entry lands in
//! exactly one batch and batch totals always add back up to the input.
//!
//! This crate handles:
//! - Grouping recipient/amount pairs under a per-batch ceiling
//! - Randomized close targets and optional entry shuffling
//! - Summary statistics over a finished batch set

pub mod batch;
pub mod error;
pub mod stats;

pub use batch::{create_batches, Batch, BatchEntry};
pub use error::BatchError;
pub use stats::{analyze_batches, BatchStats};
