//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  0.1 + 0.2 = 0.30000000000000004                                        │
//! │                                                                         │
//! │  A market sells by weight: 0.5 kg × ₹35 = ₹17.50                        │
//! │  Summing dozens of such lines in f64 drifts by fractions of a paisa     │
//! │  and "subtotal + tax == total" stops holding exactly.                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹17.50 = 1750 paise, every sum is exact                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sabzi_core::money::Money;
//! use sabzi_core::quantity::Quantity;
//!
//! let price = Money::from_rupees(35);             // ₹35/kg
//! let amount = price.for_quantity(Quantity::from_grams(500));
//! assert_eq!(amount.paise(), 1750);               // ₹17.50
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::quantity::{Quantity, GRAMS_PER_KG};
use crate::types::TaxRate;

/// Paise in one rupee.
pub const PAISE_PER_RUPEE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// Prices in the ledger are per kilogram; line amounts come from
/// [`Money::for_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use sabzi_core::money::Money;
    /// assert_eq!(Money::from_rupees(30).paise(), 3000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * PAISE_PER_RUPEE)
    }

    /// Converts a decimal rupee amount from an external format
    /// (ledger file, cart export), rounding to the nearest paisa.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_decimal_rupees(rupees: f64) -> Option<Self> {
        if !rupees.is_finite() {
            return None;
        }
        Some(Money((rupees * PAISE_PER_RUPEE as f64).round() as i64))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the value as decimal rupees (external formats only).
    #[inline]
    pub fn as_decimal_rupees(&self) -> f64 {
        self.0 as f64 / PAISE_PER_RUPEE as f64
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

    /// Calculates tax at the given rate, rounding half away from zero.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    ///
    /// ```rust
    /// use sabzi_core::money::Money;
    /// use sabzi_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(220);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(500));
    /// assert_eq!(tax, Money::from_rupees(11));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(div_round_half_up(self.0 as i128 * rate.bps() as i128, 10_000))
    }

    /// Prices a weight at this per-kilogram rate.
    ///
    /// `price_per_kg × grams / 1000`, rounded to the nearest paisa.
    ///
    /// ```rust
    /// use sabzi_core::money::Money;
    /// use sabzi_core::quantity::Quantity;
    ///
    /// let rate = Money::from_rupees(40);
    /// assert_eq!(rate.for_quantity(Quantity::from_kg(3)), Money::from_rupees(120));
    /// ```
    pub fn for_quantity(&self, quantity: Quantity) -> Money {
        Money(div_round_half_up(
            self.0 as i128 * quantity.grams() as i128,
            GRAMS_PER_KG as i128,
        ))
    }

    /// Formats as a plain two-decimal number without symbol (`220.00`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        format!(
            "{}{}.{:02}",
            sign,
            abs / PAISE_PER_RUPEE,
            abs % PAISE_PER_RUPEE
        )
    }

    /// Formats rounded to whole rupees without symbol (`50`), ties to
    /// even like `%.0f`.
    ///
    /// Used for the RATE column on receipts.
    pub fn to_whole_rupees_string(&self) -> String {
        format!("{:.0}", self.as_decimal_rupees())
    }

    /// Formats with a currency symbol (`₹220.00`).
    pub fn format_with(&self, symbol: &str) -> String {
        if self.0 < 0 {
            format!("-{}{}", symbol, Money(-self.0).to_decimal_string())
        } else {
            format!("{}{}", symbol, self.to_decimal_string())
        }
    }
}

/// Integer division rounding half away from zero.
fn div_round_half_up(numerator: i128, denominator: i128) -> i64 {
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    };
    rounded as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays in rupees (`₹10.99`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(crate::DEFAULT_CURRENCY_SYMBOL))
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(30);
        assert_eq!(money.paise(), 3000);
        assert_eq!(money.to_decimal_string(), "30.00");
    }

    #[test]
    fn test_from_decimal_rupees_rounds_to_paisa() {
        assert_eq!(Money::from_decimal_rupees(17.5), Some(Money::from_paise(1750)));
        assert_eq!(Money::from_decimal_rupees(0.126), Some(Money::from_paise(13)));
        assert_eq!(Money::from_decimal_rupees(f64::NAN), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.paise(), 2000);
    }

    #[test]
    fn test_tax_five_percent() {
        let tax = Money::from_rupees(220).calculate_tax(TaxRate::from_bps(500));
        assert_eq!(tax.paise(), 1100);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // ₹0.09 at 5% = 0.45 paise → 0
        assert_eq!(Money::from_paise(9).calculate_tax(TaxRate::from_bps(500)).paise(), 0);
        // ₹0.10 at 5% = 0.5 paise → 1
        assert_eq!(Money::from_paise(10).calculate_tax(TaxRate::from_bps(500)).paise(), 1);
    }

    #[test]
    fn test_for_quantity() {
        let rate = Money::from_rupees(35);
        assert_eq!(rate.for_quantity(Quantity::from_grams(500)).paise(), 1750);
        assert_eq!(rate.for_quantity(Quantity::from_kg(2)).paise(), 7000);

        // ₹33.33/kg × 0.3 kg = 999.9 paise → 1000
        let odd = Money::from_paise(3333);
        assert_eq!(odd.for_quantity(Quantity::from_grams(300)).paise(), 1000);
    }

    #[test]
    fn test_whole_rupee_rounding() {
        assert_eq!(Money::from_rupees(50).to_whole_rupees_string(), "50");
        assert_eq!(Money::from_paise(4950).to_whole_rupees_string(), "50");
        assert_eq!(Money::from_paise(4949).to_whole_rupees_string(), "49");
        assert_eq!(Money::from_paise(4850).to_whole_rupees_string(), "48");
        assert_eq!(Money::from_paise(4851).to_whole_rupees_string(), "49");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
    }
}
