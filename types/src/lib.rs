//! Fundamental types for the fanout planner.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: fixed-point amounts, the chain's unit policy, and recipients.

pub mod amount;
pub mod policy;
pub mod recipient;

pub use amount::{Amount, AmountParseError, DECIMALS, SATS_PER_COIN};
pub use recipient::Recipient;
