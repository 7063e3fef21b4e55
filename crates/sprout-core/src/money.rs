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
//! │  Summing a day of sales in floats drifts by fractions of a cent,        │
//! │  and "Net Profit" stops matching revenue minus costs.                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer hundredths                                       │
//! │    4.00 is stored as 400, every total is exact                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## On-Disk Representation
//! The warehouse register file stores prices as plain JSON numbers in major
//! units (`"buy_price": 2.0`). `Money` serializes to that form and parses it
//! back, rounding to the nearest hundredth. Nothing else in the crate ever
//! touches a float.
//!
//! ## Usage
//! ```rust
//! use sprout_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price.multiply_quantity(3); // 32.97
//! assert_eq!(line.cents(), 3297);
//!
//! let parsed = Money::parse_decimal("4.5").unwrap();
//! assert_eq!(parsed.cents(), 450);
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in hundredths of the shop's single currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Custom serde**: JSON numbers in major units, see module docs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest unit).
    ///
    /// ## Example
    /// ```rust
    /// use sprout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal string such as `"4"`, `"4.5"` or `"12.99"`.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, optionally followed by `.` and one or two digits
    /// - No exponent, no thousands separators, no currency symbol
    ///
    /// The string is parsed digit by digit; floats are never involved.
    ///
    /// ## Example
    /// ```rust
    /// use sprout_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("2").unwrap().cents(), 200);
    /// assert_eq!(Money::parse_decimal("0.05").unwrap().cents(), 5);
    /// assert!(Money::parse_decimal("1.234").is_err());
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        const FIELD: &str = "price";

        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (digits, None),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

        if major_str.is_empty() && minor_str.map_or(true, str::is_empty) {
            return Err(ValidationError::invalid_format(FIELD, "expected a number"));
        }
        if !all_digits(major_str) || !minor_str.map_or(true, all_digits) {
            return Err(ValidationError::invalid_format(FIELD, "expected a number"));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| ValidationError::invalid_format(FIELD, "number is too large"))?
        };

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(m) if m.len() == 1 => i64::from(m.as_bytes()[0] - b'0') * 10,
            Some(m) if m.len() == 2 => {
                i64::from(m.as_bytes()[0] - b'0') * 10 + i64::from(m.as_bytes()[1] - b'0')
            }
            Some(_) => {
                return Err(ValidationError::invalid_format(
                    FIELD,
                    "at most two decimal places are allowed",
                ))
            }
        };

        let cents = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| ValidationError::invalid_format(FIELD, "number is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Tofu 4.00
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 12.00
    /// ```
    ///
    /// Saturates at the ends of the i64 range. Anything that stores the
    /// result uses [`Money::checked_multiply_quantity`] instead.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// `self × qty`, or `None` if the product does not fit.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// `self - other`, or `None` on overflow.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Major units as a float, for the JSON file only.
    fn to_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`12.00`, `-5.50`).
///
/// ## Note
/// No currency symbol here; the register config decides how amounts are
/// decorated for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, like every operator on `Money`.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Totals are accumulated in i128 and clamped back to the i64 range.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        let total: i128 = iter.map(|m| i128::from(m.0)).sum();
        Money(clamp_to_i64(total))
    }
}

fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Serde (major-unit JSON numbers)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number of major currency units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(MINOR_PER_MAJOR)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v).map_err(|_| E::custom("amount out of range"))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        let cents = (v * MINOR_PER_MAJOR as f64).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(E::custom("amount out of range"));
        }
        Ok(Money(cents as i64))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(2).cents(), 2000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(200);

        assert_eq!(
            price.checked_multiply_quantity(3),
            Some(Money::from_cents(600))
        );
        assert_eq!(price.checked_multiply_quantity(100_000_000_000_000_000), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(price.checked_sub(price), Some(Money::zero()));
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_panicking() {
        let price = Money::from_cents(200);
        let huge = price.multiply_quantity(100_000_000_000_000_000);
        assert_eq!(huge.cents(), i64::MAX);

        let big = Money::from_cents(i64::MAX);
        assert_eq!((big + big).cents(), i64::MAX);
        assert_eq!((Money::zero() - big - big).cents(), i64::MIN);

        let total: Money = vec![big, big, Money::from_cents(-5)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let back: Money = vec![big, big, Money::zero() - big].into_iter().sum();
        assert_eq!(back, big);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("4").unwrap().cents(), 400);
        assert_eq!(Money::parse_decimal("4.5").unwrap().cents(), 450);
        assert_eq!(Money::parse_decimal("4.05").unwrap().cents(), 405);
        assert_eq!(Money::parse_decimal(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("3.").unwrap().cents(), 300);
        assert_eq!(Money::parse_decimal(" 2.00 ").unwrap().cents(), 200);
        assert_eq!(Money::parse_decimal("-1.25").unwrap().cents(), -125);

        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("1,50").is_err());
        assert!(Money::parse_decimal("1e3").is_err());
        assert!(Money::parse_decimal("ten").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_json_representation() {
        let json = serde_json::to_string(&Money::from_cents(400)).unwrap();
        assert_eq!(json, "4.0");

        let back: Money = serde_json::from_str("4.0").unwrap();
        assert_eq!(back.cents(), 400);

        let from_int: Money = serde_json::from_str("3").unwrap();
        assert_eq!(from_int.cents(), 300);

        // 0.1 + 0.2 style inputs land on the nearest hundredth
        let rounded: Money = serde_json::from_str("0.30000000000000004").unwrap();
        assert_eq!(rounded.cents(), 30);

        assert!(serde_json::from_str::<Money>("\"4.0\"").is_err());
    }
}
