//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart summing 30 line totals and then taking 10% off would carry     │
//! │  that drift straight into totalAmount.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Hundredths                                       │
//! │    100.00 → 10000, 5% of it → 500 (exact)                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Command and snapshot files carry prices as plain JSON numbers in major
//! units (`100`, `12.5`). `Money` converts at the serde boundary only; every
//! calculation after that is integer arithmetic.
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_major(100);
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total, Money::from_major(300));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in hundredths of the major currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of a discount can never wrap
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Custom serde**: major units on the wire, minor units in memory
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.price ──► line total (price × qty) ──► Cart subtotal              │
/// │                                                   │                     │
/// │                                   Promotion discount                    │
/// │                                                   │                     │
/// │                                                   ▼                     │
/// │                      Cart.totalAmount = subtotal − totalDiscount        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from hundredths.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1250);
    /// assert_eq!(price, Money::from_major(12) + Money::from_cents(50));
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// All rule constants (cart value ceiling, promotion tiers) are
    /// declared this way.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in hundredths.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Addition that clamps at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Returns `rate` of this amount, rounded half-up to the nearest hundredth.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use checkout_core::types::DiscountRate;
    ///
    /// let price = Money::from_major(100);
    /// let discount = price.apply_rate(DiscountRate::from_bps(500)); // 5%
    /// assert_eq!(discount, Money::from_major(5));
    /// ```
    pub fn apply_rate(&self, rate: DiscountRate) -> Money {
        // i128 so that the 500000 ceiling times a 100% rate cannot overflow
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Converts from a major-unit number as found in JSON/TOML input.
    fn from_major_f64(value: f64) -> Self {
        Money((value * 100.0).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates at the i64 bounds. Snapshots are edited by hand and
// may hold amounts no command could have produced.

/// Two decimal places, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Whole amounts are written as JSON integers so snapshots read `100`
/// rather than `100.0`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money::from_major_f64(value))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(500).cents(), 50_000);
        assert_eq!(Money::from_major(0), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_major(5).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(a * 3, Money::from_major(30));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_major(20));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX);

        assert_eq!(huge + Money::from_cents(1), huge);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));
        assert_eq!(huge * 2, huge);

        let mut total = huge;
        total += huge;
        assert_eq!(total, huge);

        let total: Money = vec![huge, huge, Money::from_major(1)].into_iter().sum();
        assert_eq!(total, huge);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 10% of 200 = 20 exactly
        let discount = Money::from_major(200).apply_rate(DiscountRate::from_bps(1000));
        assert_eq!(discount, Money::from_major(20));

        // 5% of 0.09 = 0.0045 → 0.00
        let tiny = Money::from_cents(9).apply_rate(DiscountRate::from_bps(500));
        assert_eq!(tiny, Money::zero());

        // 5% of 0.10 = 0.005 → 0.01
        let half = Money::from_cents(10).apply_rate(DiscountRate::from_bps(500));
        assert_eq!(half.cents(), 1);
    }

    #[test]
    fn test_serialize_whole_amount_as_integer() {
        let json = serde_json::to_string(&Money::from_major(180)).unwrap();
        assert_eq!(json, "180");

        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn test_deserialize_integer_and_decimal() {
        let whole: Money = serde_json::from_str("498000").unwrap();
        assert_eq!(whole, Money::from_major(498_000));

        let fractional: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional.cents(), 1999);
    }

    #[test]
    fn test_negative_check() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
        assert!(Money::zero().is_zero());
    }
}
