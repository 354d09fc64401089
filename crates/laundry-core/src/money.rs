//! # Money Module
//!
//! Provides the `Money` type used for snapshot prices and bill totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product.price is stored in whole currency units (i64).                 │
//! │                                                                         │
//! │  TransactionDetail.product_price ── snapshot copied at creation time    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  line total = product_price × qty                                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  totalBill  = Σ line totals      ← recomputed on every read             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use laundry_core::money::Money;
//!
//! let per_kg = Money::from_units(7000);
//! let line = per_kg.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line.amount(), 21000);
//! ```
//!
//! Every operation is checked. `qty` comes straight from the client, so a
//! product that cannot be represented in an `i64` is reported as a
//! [`ValidationError::OutOfRange`] instead of overflowing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit the shop prices in.
///
/// Serializes as a bare integer, so `totalBill` reads as `39000` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
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

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use laundry_core::money::Money;
    ///
    /// let unit_price = Money::from_units(12500);
    /// assert_eq!(unit_price.checked_multiply_quantity(2).unwrap().amount(), 25000);
    /// assert!(unit_price.checked_multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    /// Snapshot price × quantity of one line item.
    pub fn line_total(price: i64, qty: i64) -> ValidationResult<Money> {
        Money::from_units(price)
            .checked_multiply_quantity(qty)
            .ok_or_else(|| {
                ValidationError::out_of_range("qty", format!("{price} × {qty} does not fit in a bill"))
            })
    }

    /// Sums `price × qty` over a sequence of line items.
    ///
    /// ## Example
    /// ```rust
    /// use laundry_core::money::Money;
    ///
    /// assert_eq!(Money::total_of([(100, 2), (50, 3)]).unwrap().amount(), 350);
    /// assert!(Money::total_of(std::iter::empty()).unwrap().is_zero());
    /// assert!(Money::total_of([(i64::MAX, 1), (1, 1)]).is_err());
    /// ```
    pub fn total_of<I>(lines: I) -> ValidationResult<Money>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        lines.into_iter().try_fold(Money::zero(), |total, (price, qty)| {
            let line = Money::line_total(price, qty)?;
            total
                .checked_add(line)
                .ok_or_else(|| ValidationError::out_of_range("totalBill", "sum of line items does not fit in a bill"))
        })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(15000);
        assert_eq!(money.amount(), 15000);
        assert!(!money.is_zero());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!(a.checked_add(b).unwrap().amount(), 1500);
        assert_eq!(a.checked_multiply_quantity(3).unwrap().amount(), 3000);
        assert!(Money::from_units(i64::MAX).checked_add(b).is_none());
    }

    #[test]
    fn test_total_of_line_items() {
        let total = Money::total_of([(7000, 3), (25000, 1), (5000, 0)]).unwrap();
        assert_eq!(total.amount(), 46000);
    }

    #[test]
    fn test_huge_quantity_is_out_of_range() {
        let err = Money::line_total(5000, i64::MAX).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "qty"));

        let err = Money::total_of([(i64::MAX / 2, 1), (i64::MAX / 2, 1), (2, 1)]).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "totalBill"));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_units(39000)).unwrap();
        assert_eq!(json, "39000");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(12500).to_string(), "12500");
    }
}
