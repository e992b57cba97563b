//! # Domain Types
//!
//! Core domain types used throughout Sabzi POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  StockRecord    │   │    LineItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  id (item_N)    │   │  order_id       │       │
//! │  │  category       │──►│  name, category │──►│  items snapshot │       │
//! │  │  unit_price/kg  │   │  quantity       │   │  total_amount   │       │
//! │  │  stock          │   │  subtotal       │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  bps (u32)      │   │  Queued         │   │  CreditCard     │       │
//! │  │  500 = 5%       │   │  Processed      │   │  Upi            │       │
//! │  └─────────────────┘   │  Cancelled      │   │  Cash           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (0.05 for 5%), for export only.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Percentage label without trailing zeros: `5%`, `8.25%`.
    pub fn label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            format!("{}%", whole)
        } else if frac % 10 == 0 {
            format!("{}.{}%", whole, frac / 10)
        } else {
            format!("{}.{:02}%", whole, frac)
        }
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Vegetable category. Every stock record belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Ground,
    Leafy,
    #[serde(rename = "Fruity_Veges")]
    FruityVeges,
    Legumes,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Category; 4] = [
        Category::Ground,
        Category::Leafy,
        Category::FruityVeges,
        Category::Legumes,
    ];

    /// Name used in the ledger file and cart exports.
    pub const fn key(&self) -> &'static str {
        match self {
            Category::Ground => "Ground",
            Category::Leafy => "Leafy",
            Category::FruityVeges => "Fruity_Veges",
            Category::Legumes => "Legumes",
        }
    }

    /// Name shown to people.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Ground => "Ground",
            Category::Leafy => "Leafy",
            Category::FruityVeges => "Fruity Veges",
            Category::Legumes => "Legumes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Case-insensitive; underscores and spaces are ignored so that
/// `Fruity_Veges`, `fruity veges` and `FruityVeges` all parse.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "ground" => Ok(Category::Ground),
            "leafy" => Ok(Category::Leafy),
            "fruityveges" => Ok(Category::FruityVeges),
            "legumes" => Ok(Category::Legumes),
            _ => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!(
                    "unknown category '{}', expected one of Ground, Leafy, Fruity_Veges, Legumes",
                    s
                ),
            }),
        }
    }
}

/// Turns a stored name such as `Sweet_Potato` into `Sweet Potato`.
///
/// Underscores become spaces; every letter following a non-letter is
/// uppercased and the rest lowercased.
pub fn display_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

// =============================================================================
// Stock Record
// =============================================================================

/// One vegetable in the inventory ledger.
///
/// ## Invariants
/// - `name` is unique across all categories
/// - `stock` is never negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockRecord {
    pub name: String,
    pub category: Category,
    /// Price per kilogram.
    pub unit_price: Money,
    pub stock: Quantity,
}

impl StockRecord {
    /// Whether `quantity` can be taken from this record.
    #[inline]
    pub fn can_supply(&self, quantity: Quantity) -> bool {
        quantity <= self.stock
    }

    /// Current stock valued at the unit price.
    pub fn value(&self) -> Money {
        self.unit_price.for_quantity(self.stock)
    }

    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// A reporting row produced by the ledger summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockSummaryRow {
    pub name: String,
    pub category: Category,
    pub unit_price: Money,
    pub stock: Quantity,
    /// `unit_price × stock`.
    pub value: Money,
}

impl From<&StockRecord> for StockSummaryRow {
    fn from(record: &StockRecord) -> Self {
        StockSummaryRow {
            name: record.name.clone(),
            category: record.category,
            unit_price: record.unit_price,
            stock: record.stock,
            value: record.value(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// Opaque cart line identifier (`item_1`, `item_2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemId(String);

impl LineItemId {
    /// Builds the id for the n-th line added to a cart.
    pub fn from_sequence(seq: u64) -> Self {
        LineItemId(format!("item_{}", seq))
    }

    /// Wraps an id taken from an export.
    pub fn new(raw: impl Into<String>) -> Self {
        LineItemId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence number for ids of the form `item_N`.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("item_")?.parse().ok()
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One priced, weighed product entry within a cart or order.
///
/// Uses the snapshot pattern: name, category and price are frozen when the
/// line is created so later ledger price changes do not alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: LineItemId,
    pub name: String,
    pub quantity: Quantity,
    /// Price per kilogram, frozen at time of adding.
    pub unit_price: Money,
    pub category: Category,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
    /// `quantity × unit_price`.
    pub subtotal: Money,
}

impl LineItem {
    pub fn new(
        id: LineItemId,
        name: impl Into<String>,
        quantity: Quantity,
        unit_price: Money,
        category: Category,
    ) -> Self {
        LineItem {
            id,
            name: name.into(),
            quantity,
            unit_price,
            category,
            added_at: Utc::now(),
            subtotal: unit_price.for_quantity(quantity),
        }
    }

    /// Sets a new quantity and recomputes the subtotal.
    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
        self.subtotal = self.unit_price.for_quantity(quantity);
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Upi,
    /// Collected at the counter.
    Cash,
}

impl PaymentMethod {
    /// Online methods go through the gateway and can time out.
    pub const fn is_online(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "").as_str() {
            "creditcard" | "card" => Ok(PaymentMethod::CreditCard),
            "upi" => Ok(PaymentMethod::Upi),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("unsupported method '{}'", s),
            }),
        }
    }
}

/// Payment attached to a settled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRecord {
    pub method: PaymentMethod,
    pub transaction_id: String,
}

// =============================================================================
// Order
// =============================================================================

/// Pipeline state of an order.
///
/// `Queued → Processed` or `Queued → Cancelled`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Queued,
    Processed,
    Cancelled,
}

/// An immutable snapshot of a committed cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub order_id: String,
    pub items: Vec<LineItem>,
    /// Sum of line subtotals (before tax).
    pub total_amount: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub status: OrderStatus,
}

impl Order {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> Quantity {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Queue listing entry for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    pub order_id: String,
    pub total_amount: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub item_count: usize,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        OrderSummary {
            order_id: order.order_id.clone(),
            total_amount: order.total_amount,
            created_at: order.created_at,
            item_count: order.item_count(),
        }
    }
}
