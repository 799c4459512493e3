//! Allocation engine: how many recipients a fund can support, and how much
//! each one receives.
//!
//! The engine guarantees that every produced plan sums to the requested
//! total exactly, at satoshi precision. Requests that cannot keep every
//! recipient viable degrade to the largest count that can; only structurally
//! invalid caller bounds are errors.
//!
//! This crate handles:
//! - Feasibility checks and recipient-count resolution
//! - Self-derived random bounds with corrective adjustment passes
//! - Equal, bounded-random, and smart-random distribution
//! - Post-hoc quality analysis of a produced plan

pub mod bounds;
pub mod distribute;
pub mod error;
pub mod feasibility;
pub mod quality;

pub use bounds::{optimal_random_bounds, BoundsAdjustment, BoundsInfo, RandomBounds};
pub use distribute::{
    distribute_equal, distribute_random, distribute_random_optimal, AllocationPlan,
};
pub use error::AllocationError;
pub use feasibility::{
    optimal_recipient_count, resolve_recipient_count, validate_feasibility, Feasibility,
};
pub use quality::{analyze_distribution, DistributionQuality};
