//! Fixed-point payment amounts.
//!
//! Amounts are represented as satoshi counts (u128) to avoid floating-point errors.
//! One coin is 10^8 satoshis and every operation is exact integer arithmetic;
//! wherever a fractional factor must be applied, the result is truncated toward
//! zero so a plan can never allocate more than it was given.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Satoshis per whole coin.
pub const SATS_PER_COIN: u128 = 100_000_000;

/// Fractional digits carried by [`Amount`].
pub const DECIMALS: u32 = 8;

/// A payment amount.
///
/// Internally stored as satoshis (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn from_sats(sats: u128) -> Self {
        Self(sats)
    }

    pub const fn from_coins(coins: u128) -> Self {
        Self(coins * SATS_PER_COIN)
    }

    pub const fn sats(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by `num / den`, truncating toward zero.
    ///
    /// This is the single quantizing primitive: every fractional factor in the
    /// planner (1.1, 0.25, 1.75, ...) is expressed as an integer ratio and
    /// applied here. `den` must be non-zero.
    pub fn mul_ratio(self, num: u128, den: u128) -> Self {
        Self(self.0 * num / den)
    }

    /// Divide evenly across `n` parts, truncating. `n` must be non-zero.
    pub fn div_count(self, n: usize) -> Self {
        Self(self.0 / n as u128)
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08}", self.0 / SATS_PER_COIN, self.0 % SATS_PER_COIN)
    }
}

/// Errors from parsing a decimal amount string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("empty amount string")]
    Empty,

    #[error("malformed amount: {0:?}")]
    Malformed(String),

    #[error("too many decimal places: {got} (at most {DECIMALS} supported)")]
    TooManyDecimals { got: usize },

    #[error("amount out of range")]
    Overflow,
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parse a decimal coin amount such as `"1.5"` or `"0.00000546"`.
    ///
    /// At most eight fractional digits are accepted; there is no rounding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(AmountParseError::Malformed(s.to_string()));
        }
        if frac_part.len() > DECIMALS as usize {
            return Err(AmountParseError::TooManyDecimals {
                got: frac_part.len(),
            });
        }
        let coins: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| AmountParseError::Malformed(s.to_string()))?
        };
        let mut frac_sats: u128 = 0;
        if !frac_part.is_empty() {
            let parsed: u128 = frac_part
                .parse()
                .map_err(|_| AmountParseError::Malformed(s.to_string()))?;
            frac_sats = parsed * 10u128.pow(DECIMALS - frac_part.len() as u32);
        }
        coins
            .checked_mul(SATS_PER_COIN)
            .and_then(|sats| sats.checked_add(frac_sats))
            .map(Amount::from_sats)
            .ok_or(AmountParseError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_eight_digits() {
        assert_eq!(Amount::from_coins(1).to_string(), "1.00000000");
        assert_eq!(Amount::from_sats(546).to_string(), "0.00000546");
        assert_eq!(Amount::from_sats(150_000_000).to_string(), "1.50000000");
        assert_eq!(Amount::ZERO.to_string(), "0.00000000");
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!("1".parse::<Amount>().unwrap(), Amount::from_coins(1));
        assert_eq!("1.5".parse::<Amount>().unwrap(), Amount::from_sats(150_000_000));
        assert_eq!(
            "0.00000546".parse::<Amount>().unwrap(),
            Amount::from_sats(546)
        );
        assert_eq!(".5".parse::<Amount>().unwrap(), Amount::from_sats(50_000_000));
        assert_eq!("  2.25 ".parse::<Amount>().unwrap(), Amount::from_sats(225_000_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountParseError::Empty));
        assert_eq!(".".parse::<Amount>(), Err(AmountParseError::Malformed(".".into())));
        assert!(matches!(
            "1.123456789".parse::<Amount>(),
            Err(AmountParseError::TooManyDecimals { got: 9 })
        ));
        assert!(matches!(
            "abc".parse::<Amount>(),
            Err(AmountParseError::Malformed(_))
        ));
        assert!(matches!(
            "-1".parse::<Amount>(),
            Err(AmountParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_display_parse_round_trip() {
        for sats in [0u128, 1, 546, 600, 99_999_999, 100_000_000, 123_456_789_012] {
            let a = Amount::from_sats(sats);
            assert_eq!(a.to_string().parse::<Amount>().unwrap(), a);
        }
    }

    #[test]
    fn test_mul_ratio_truncates() {
        // 546 * 1.1 = 600.6 exact, truncated to 600 sats
        assert_eq!(Amount::from_sats(546).mul_ratio(11, 10).sats(), 600);
        assert_eq!(Amount::from_sats(100).mul_ratio(1, 4).sats(), 25);
        assert_eq!(Amount::from_sats(101).mul_ratio(1, 4).sats(), 25);
        assert_eq!(Amount::from_sats(100).mul_ratio(175, 100).sats(), 175);
    }

    #[test]
    fn test_div_count_truncates() {
        assert_eq!(Amount::from_sats(1000).div_count(3).sats(), 333);
        assert_eq!(Amount::from_sats(1000).div_count(1).sats(), 1000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Amount::from_sats(100);
        let b = Amount::from_sats(40);
        assert_eq!(a.checked_add(b), Some(Amount::from_sats(140)));
        assert_eq!(a.checked_sub(b), Some(Amount::from_sats(60)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(b.saturating_sub(a), Amount::ZERO);
    }
}
