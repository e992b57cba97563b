//! # Quantity Module
//!
//! Vegetables are sold by weight. `Quantity` stores weights as integer
//! grams so that stock reservations and releases cancel out exactly:
//! selling 2.5 kg and returning 2.5 kg leaves the ledger where it was.
//!
//! External formats (ledger file, cart export) carry kilograms as
//! decimals; conversion rounds to the nearest gram.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Grams in one kilogram.
pub const GRAMS_PER_KG: i64 = 1000;

/// A weight in grams.
///
/// Signed so that invalid input (a negative quantity typed in the UI)
/// can be represented and rejected by validation instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from grams.
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Quantity(grams)
    }

    /// Creates a quantity from whole kilograms.
    #[inline]
    pub const fn from_kg(kg: i64) -> Self {
        Quantity(kg * GRAMS_PER_KG)
    }

    /// Converts a decimal kilogram value, rounding to the nearest gram.
    ///
    /// Returns `None` for NaN or infinite input.
    ///
    /// ```rust
    /// use sabzi_core::quantity::Quantity;
    /// assert_eq!(Quantity::from_decimal_kg(2.5), Some(Quantity::from_grams(2500)));
    /// ```
    pub fn from_decimal_kg(kg: f64) -> Option<Self> {
        if !kg.is_finite() {
            return None;
        }
        Some(Quantity((kg * GRAMS_PER_KG as f64).round() as i64))
    }

    /// Returns the weight in grams.
    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0
    }

    /// Returns the weight as decimal kilograms (external formats only).
    #[inline]
    pub fn as_decimal_kg(&self) -> f64 {
        self.0 as f64 / GRAMS_PER_KG as f64
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
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

    /// Formats in kilograms with one decimal (`2.5`), rounding like `%.1f`.
    pub fn to_kg_string(&self) -> String {
        format!("{:.1}", self.as_decimal_kg())
    }
}

/// Displays as kilograms (`2.5 kg`).
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.to_kg_string())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl SubAssign for Quantity {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), Add::add)
    }
}
