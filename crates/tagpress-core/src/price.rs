//! # Price Module
//!
//! Provides the `Price` type for handling label prices safely.
//!
//! ## Why Integer Prices?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Amounts                                          │
//! │    Rupiah prices have no minor unit on a shelf tag, so the whole        │
//! │    amount is stored as an unsigned integer. Parsing, exports, and       │
//! │    layout all use the integer; only formatting adds separators.         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tagpress_core::price::Price;
//!
//! let price = Price::new(4_500_000);
//! assert_eq!(price.to_string(), "4.500.000");
//! assert_eq!(price.tag_format(), "RP 4.500.000,-");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Price Type
// =============================================================================

/// A non-negative label price in whole currency units.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: Prices are never negative; a missing price parses
///   to zero rather than failing
/// - **Single field tuple struct**: Zero-cost abstraction over u64
/// - **Transparent serde**: Serializes as a plain number in snapshot blobs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Creates a Price from a whole currency amount.
    ///
    /// ## Example
    /// ```rust
    /// use tagpress_core::price::Price;
    ///
    /// let price = Price::new(1_200_000);
    /// assert_eq!(price.amount(), 1_200_000);
    /// ```
    #[inline]
    pub const fn new(amount: u64) -> Self {
        Price(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Zero price (the fallback when a price line has no digits).
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }

    /// Checks if the price is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the price for a printed tag: fixed prefix, dot thousands
    /// separators, fixed suffix.
    ///
    /// ## Example
    /// ```rust
    /// use tagpress_core::price::Price;
    ///
    /// assert_eq!(Price::new(4_500_000).tag_format(), "RP 4.500.000,-");
    /// assert_eq!(Price::new(0).tag_format(), "RP 0,-");
    /// ```
    pub fn tag_format(&self) -> String {
        format!("RP {},-", self)
    }

    /// Groups the digits with `.` separators (id-ID convention).
    fn grouped(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - offset) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the grouped amount without prefix/suffix.
///
/// Use [`Price::tag_format`] for the printable tag band.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grouped())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Price(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_round_trip() {
        let price = Price::new(4_500_000);
        assert_eq!(price.amount(), 4_500_000);
        assert!(!price.is_zero());
        assert!(Price::zero().is_zero());
    }

    #[test]
    fn test_grouping() {
        assert_eq!(Price::new(0).to_string(), "0");
        assert_eq!(Price::new(5).to_string(), "5");
        assert_eq!(Price::new(999).to_string(), "999");
        assert_eq!(Price::new(1_000).to_string(), "1.000");
        assert_eq!(Price::new(12_345).to_string(), "12.345");
        assert_eq!(Price::new(123_456).to_string(), "123.456");
        assert_eq!(Price::new(1_200_000).to_string(), "1.200.000");
        assert_eq!(Price::new(1_234_567_890).to_string(), "1.234.567.890");
    }

    #[test]
    fn test_tag_format() {
        assert_eq!(Price::new(4_500_000).tag_format(), "RP 4.500.000,-");
        assert_eq!(Price::new(0).tag_format(), "RP 0,-");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(1_200_000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "1200000");

        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
