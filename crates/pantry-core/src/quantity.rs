//! # Quantity Module
//!
//! Stock quantities as fixed-point numbers with three fractional digits.
//!
//! Kitchens count some things in whole units (eggs, packs) and weigh or
//! measure others (1.25 kg of paneer, 0.5 liters of cream). `Quantity`
//! stores thousandths in an `i64`, so `0.1 + 0.2` is exactly `0.3` and a
//! transaction delta is always `after - before` to the last digit.
//!
//! ```rust
//! use pantry_core::quantity::Quantity;
//!
//! let stock: Quantity = "2.5".parse().unwrap();
//! let used = Quantity::from_units(3);
//!
//! // Outward movements never drive stock negative
//! assert!(stock.minus_clamped(used).is_zero());
//! assert_eq!((stock - used).to_string(), "-0.5");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::parse_fixed_point;

/// A quantity of stock (or a signed change in stock), in thousandths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Thousandths per whole unit.
    pub const SCALE: i64 = 1_000;

    /// Exactly one unit, the amount removed by a billing click.
    pub const ONE: Quantity = Quantity(Self::SCALE);

    /// Largest stock level accepted: one billion units.
    pub const MAX: Quantity = Quantity(1_000_000_000 * Self::SCALE);

    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Creates a quantity from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * Self::SCALE)
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Returns the raw value in thousandths.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// ```rust
    /// use pantry_core::quantity::Quantity;
    ///
    /// let five = Quantity::from_units(5);
    /// assert_eq!(five.minus_clamped(Quantity::ONE), Quantity::from_units(4));
    /// assert_eq!(five.minus_clamped(Quantity::from_units(9)), Quantity::zero());
    /// ```
    #[inline]
    pub fn minus_clamped(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_sub(other.0).max(0))
    }

    /// Sum of two quantities, or `None` past [`Quantity::MAX`].
    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .filter(|sum| *sum <= Quantity::MAX)
    }
}

impl fmt::Display for Quantity {
    /// Renders without trailing zeros: `20`, `0.5`, `1.25`, `-3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / Self::SCALE as u64;
        let frac = abs % Self::SCALE as u64;

        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }

        let digits = format!("{:03}", frac);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed_point(s, 3)
            .map(Quantity)
            .ok_or_else(|| ValidationError::InvalidNumber {
                field: "quantity".to_string(),
                value: s.trim().to_string(),
            })
    }
}

// Operators saturate at the i64 range; stock changes go through
// `checked_add` and stay within `Quantity::MAX`.

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0.saturating_sub(other.0))
    }
}

impl Neg for Quantity {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Quantity(self.0.saturating_neg())
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(Quantity::from_units(20).to_string(), "20");
        assert_eq!(Quantity::from_milli(500).to_string(), "0.5");
        assert_eq!(Quantity::from_milli(1_250).to_string(), "1.25");
        assert_eq!(Quantity::from_milli(1_005).to_string(), "1.005");
        assert_eq!(Quantity::from_units(-3).to_string(), "-3");
        assert_eq!(Quantity::from_milli(-250).to_string(), "-0.25");
        assert_eq!(Quantity::zero().to_string(), "0");
    }

    #[test]
    fn test_parse() {
        assert_eq!("50".parse::<Quantity>().unwrap(), Quantity::from_units(50));
        assert_eq!("0.5".parse::<Quantity>().unwrap().milli(), 500);
        assert_eq!("2.0005".parse::<Quantity>().unwrap().milli(), 2_001);
        assert!("ten".parse::<Quantity>().is_err());
        assert!("".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_minus_clamped_never_negative() {
        let q = Quantity::from_milli(1_500);
        assert_eq!(q.minus_clamped(Quantity::ONE).milli(), 500);
        assert_eq!(q.minus_clamped(Quantity::from_units(2)), Quantity::zero());
        assert_eq!(Quantity::zero().minus_clamped(Quantity::ONE), Quantity::zero());
    }

    #[test]
    fn test_checked_add_stops_at_max() {
        assert_eq!(
            Quantity::from_units(2).checked_add(Quantity::ONE),
            Some(Quantity::from_units(3))
        );
        assert_eq!(Quantity::MAX.checked_add(Quantity::zero()), Some(Quantity::MAX));
        assert_eq!(Quantity::MAX.checked_add(Quantity::from_milli(1)), None);

        let huge = Quantity::from_milli(i64::MAX - 1);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!((huge + huge).milli(), i64::MAX);
    }

    #[test]
    fn test_arithmetic() {
        let a = Quantity::from_units(10);
        let b = Quantity::from_milli(2_500);
        assert_eq!((a + b).milli(), 12_500);
        assert_eq!((b - a).milli(), -7_500);
        assert_eq!((-b).milli(), -2_500);
        let total: Quantity = vec![a, b].into_iter().sum();
        assert_eq!(total.milli(), 12_500);
    }
}
