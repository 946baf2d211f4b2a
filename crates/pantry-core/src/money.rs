//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Repricing stock with floats:                                           │
//! │    (10 × 100.10 + 3 × 99.99) / 13 = 100.07461538...                     │
//! │    toFixed(2) on a binary float can round the "wrong" way              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                     │
//! │    10010 × 10000 + 9999 × 3000 / 13000 = 10007 (rounded half away)      │
//! │    Every price in the system is an exact number of cents               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pantry_core::money::Money;
//!
//! let price: Money = "45.50".parse().unwrap();
//! assert_eq!(price.cents(), 4550);
//!
//! let total = price + Money::from_cents(50);
//! assert_eq!(total.to_string(), "46.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::quantity::Quantity;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, paise, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals and differences can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No currency symbol**: the symbol is configuration, not domain
///
/// ## Where Money is Used
/// ```text
/// InventoryItem.purchase_price ──┬──► stock value (× quantity)
///                                ├──► weighted average on receipt
///                                └──► PurchaseOrderLine default price
///
/// PurchaseOrder.total_value = Σ line price × line quantity
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pantry_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Largest unit price accepted: one billion in major units.
    pub const MAX: Money = Money(1_000_000_000 * 100);

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

    /// Value of `quantity` units at this unit price, rounded to the
    /// nearest cent (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use pantry_core::money::Money;
    /// use pantry_core::quantity::Quantity;
    ///
    /// let price = Money::from_cents(4550);        // 45.50 per kg
    /// let qty = Quantity::from_milli(1_500);      // 1.5 kg
    /// assert_eq!(price.times(qty).cents(), 6825); // 68.25
    /// ```
    pub fn times(&self, quantity: Quantity) -> Money {
        let raw = self.0 as i128 * quantity.milli() as i128;
        Money(clamp_to_i64(div_round_half_away(raw, Quantity::SCALE as i128)))
    }

    /// Quantity-weighted average of two batches, rounded to the cent.
    ///
    /// ```text
    /// new_price = (old_qty × old_price + added_qty × added_price)
    ///             ─────────────────────────────────────────────
    ///                       old_qty + added_qty
    /// ```
    ///
    /// When the combined quantity is zero the incoming price is returned
    /// unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use pantry_core::money::Money;
    /// use pantry_core::quantity::Quantity;
    ///
    /// let price = Money::weighted_average(
    ///     Quantity::from_units(10), Money::from_major(100),
    ///     Quantity::from_units(10), Money::from_major(200),
    /// );
    /// assert_eq!(price, Money::from_major(150));
    /// ```
    pub fn weighted_average(
        existing_qty: Quantity,
        existing_price: Money,
        added_qty: Quantity,
        added_price: Money,
    ) -> Money {
        let total = existing_qty.milli() as i128 + added_qty.milli() as i128;
        if total == 0 {
            return added_price;
        }

        let numerator = existing_qty.milli() as i128 * existing_price.0 as i128
            + added_qty.milli() as i128 * added_price.0 as i128;
        Money(clamp_to_i64(div_round_half_away(numerator, total)))
    }
}

// =============================================================================
// Fixed-Point Helpers
// =============================================================================

/// Narrows an intermediate product, saturating at the i64 range.
pub(crate) fn clamp_to_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Integer division rounding half away from zero.
pub(crate) fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        quotient + numerator.signum() * denominator.signum()
    } else {
        quotient
    }
}

/// Parses decimal text into a fixed-point integer with `scale` fractional
/// digits. Extra fractional digits round half away from zero.
///
/// Accepts an optional sign, digits, and an optional fractional part
/// (`"12"`, `"-0.5"`, `".75"`, `"3."`). Exponents and embedded garbage are
/// rejected.
pub(crate) fn parse_fixed_point(text: &str, scale: u32) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let factor = 10_i64.checked_pow(scale)?;
    let whole_value: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let kept = frac.len().min(scale as usize);
    let mut frac_value: i64 = if kept == 0 { 0 } else { frac[..kept].parse().ok()? };
    frac_value *= 10_i64.pow(scale - kept as u32);

    let round_up = frac.as_bytes().get(scale as usize).is_some_and(|b| *b >= b'5');

    let mut value = whole_value.checked_mul(factor)?.checked_add(frac_value)?;
    if round_up {
        value = value.checked_add(1)?;
    }

    Some(if negative { -value } else { value })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `major.minor` without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed_point(s, 2)
            .map(Money)
            .ok_or_else(|| ValidationError::InvalidNumber {
                field: "price".to_string(),
                value: s.trim().to_string(),
            })
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
        *self = *self + other;
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
        *self = *self - other;
    }
}

/// Multiplication by a fractional quantity (rounded to the cent).
impl Mul<Quantity> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Quantity) -> Self {
        self.times(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
