//! # Cart
//!
//! The vendor's working cart: an ordered list of weighed line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Vendor Action            Cart Method            State Change           │
//! │  ─────────────            ───────────            ────────────           │
//! │                                                                         │
//! │  Add vegetable ──────────► add_item() ─────────► push item_N            │
//! │  Change weight ──────────► update_quantity() ──► qty, subtotal          │
//! │  Remove line ────────────► remove_item() ──────► drop item_N            │
//! │  Clear ──────────────────► clear() ────────────► empty, counter = 1     │
//! │  Save / load ────────────► export_json() / import_json()                │
//! │                                                                         │
//! │  NOTE: every add creates a new line; the same vegetable added twice     │
//! │        shows up twice. Ids are never reused until clear().              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart knows nothing about stock. Reserving inventory for a line is
//! the caller's job (see `sabzi-vendor`).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{Category, LineItem, LineItemId};
use crate::validation::{
    validate_cart_size, validate_price, validate_quantity, validate_vegetable_name,
};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Value of `export_type` in cart exports.
pub const CART_EXPORT_TYPE: &str = "cart_data";

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - `total() == Σ subtotal`
/// - every quantity is > 0
/// - ids are `item_N` with N strictly increasing since the last clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    next_seq: u64,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            next_seq: 1,
            created_at: Utc::now(),
        }
    }

    /// Adds a new line for `quantity` of `name` at `unit_price` per kg.
    ///
    /// ## Returns
    /// - `Ok(id)` of the new line
    /// - `Err(Validation)` for an empty name, non-positive quantity or negative price
    /// - `Err(CartTooLarge)` when the cart already holds [`MAX_CART_ITEMS`] lines
    pub fn add_item(
        &mut self,
        name: &str,
        quantity: Quantity,
        unit_price: Money,
        category: Category,
    ) -> CoreResult<LineItemId> {
        validate_vegetable_name(name)?;
        validate_quantity(quantity)?;
        validate_price(unit_price)?;

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })?;

        let id = LineItemId::from_sequence(self.next_seq);
        self.next_seq += 1;

        let item = LineItem::new(id.clone(), name, quantity, unit_price, category);
        debug!(id = %id, name = %name, quantity = %quantity, subtotal = %item.subtotal, "Cart line added");
        self.items.push(item);

        Ok(id)
    }

    /// Removes a line. Returns whether it existed.
    pub fn remove_item(&mut self, id: &LineItemId) -> bool {
        self.take_item(id).is_some()
    }

    /// Removes a line and hands it back, so the caller can release its stock.
    pub fn take_item(&mut self, id: &LineItemId) -> Option<LineItem> {
        let pos = self.items.iter().position(|i| &i.id == id)?;
        let item = self.items.remove(pos);
        debug!(id = %id, name = %item.name, "Cart line removed");
        Some(item)
    }

    /// Sets a line's quantity and recomputes its subtotal.
    ///
    /// Returns false (and changes nothing) if the quantity is not positive,
    /// exceeds [`MAX_ITEM_QUANTITY`], or the id is absent.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: Quantity) -> bool {
        if !quantity.is_positive() || quantity > MAX_ITEM_QUANTITY {
            return false;
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.set_quantity(quantity);
                debug!(id = %id, quantity = %quantity, "Cart line quantity updated");
                true
            }
            None => false,
        }
    }

    /// Snapshot of the lines in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.subtotal).sum()
    }

    /// Number of lines.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Combined weight of all lines.
    pub fn total_quantity(&self) -> Quantity {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the cart and restarts ids at `item_1`.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_seq = 1;
        self.created_at = Utc::now();
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// First line whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<LineItemId> {
        let wanted = name.trim().to_lowercase();
        self.items
            .iter()
            .find(|i| i.name.to_lowercase() == wanted)
            .map(|i| i.id.clone())
    }

    /// Lines in a category, named in any accepted spelling
    /// (`Fruity_Veges`, `fruity veges`, ...). Unknown names match nothing.
    pub fn items_by_category(&self, category: &str) -> Vec<LineItem> {
        match Category::from_str(category) {
            Ok(category) => self
                .items
                .iter()
                .filter(|i| i.category == category)
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items(),
            total_items: self.count(),
            total_quantity: self.total_quantity(),
            total_amount: self.total(),
            is_empty: self.is_empty(),
        }
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    /// Serializes the cart as a `cart_data` document.
    ///
    /// Quantities are written in kilograms and amounts in rupees.
    pub fn export_json(&self) -> String {
        let items: Vec<serde_json::Value> = self
            .items
            .iter()
            .map(|i| {
                json!({
                    "id": i.id.as_str(),
                    "name": i.name,
                    "category": i.category.key(),
                    "quantity": i.quantity.as_decimal_kg(),
                    "price": i.unit_price.as_decimal_rupees(),
                    "subtotal": i.subtotal.as_decimal_rupees(),
                })
            })
            .collect();

        let document = json!({
            "cart_summary": {
                "items": items,
                "total_items": self.count(),
                "total_quantity": self.total_quantity().as_decimal_kg(),
                "total_amount": self.total().as_decimal_rupees(),
                "is_empty": self.is_empty(),
            },
            "timestamp": Utc::now().to_rfc3339(),
            "export_type": CART_EXPORT_TYPE,
        });

        format!("{:#}", document)
    }

    /// Replaces the cart contents with those of an exported document.
    ///
    /// Nothing changes unless the whole document is usable. Exported ids
    /// are kept; subtotals are recomputed from quantity × price.
    pub fn import_json(&mut self, text: &str) -> CoreResult<()> {
        let document: ImportDocument =
            serde_json::from_str(text).map_err(|e| CoreError::Import(e.to_string()))?;

        let exported = document.cart_summary.items;
        if exported.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let mut items: Vec<LineItem> = Vec::with_capacity(exported.len());
        for entry in exported {
            let item = entry.into_line_item()?;
            if items.iter().any(|existing| existing.id == item.id) {
                return Err(CoreError::Import(format!("duplicate item id '{}'", item.id)));
            }
            items.push(item);
        }

        let highest = items
            .iter()
            .filter_map(|i| i.id.sequence())
            .max()
            .unwrap_or(0);

        debug!(lines = items.len(), next_seq = highest + 1, "Cart imported");
        self.items = items;
        self.next_seq = highest + 1;
        Ok(())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Cart overview for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub total_items: usize,
    pub total_quantity: Quantity,
    pub total_amount: Money,
    pub is_empty: bool,
}

// =============================================================================
// Import Document
// =============================================================================

#[derive(Debug, Deserialize)]
struct ImportDocument {
    cart_summary: ImportSummary,
}

#[derive(Debug, Deserialize)]
struct ImportSummary {
    items: Vec<ImportedItem>,
}

#[derive(Debug, Deserialize)]
struct ImportedItem {
    id: String,
    name: String,
    category: String,
    quantity: f64,
    price: f64,
    #[serde(default)]
    subtotal: Option<f64>,
}

impl ImportedItem {
    fn into_line_item(self) -> CoreResult<LineItem> {
        let bad = |reason: String| CoreError::Import(format!("item '{}': {}", self.id, reason));

        if self.id.trim().is_empty() {
            return Err(CoreError::Import("item id is empty".to_string()));
        }
        validate_vegetable_name(&self.name).map_err(|e| bad(e.to_string()))?;

        let category = Category::from_str(&self.category).map_err(|e| bad(e.to_string()))?;
        let quantity = Quantity::from_decimal_kg(self.quantity)
            .ok_or_else(|| bad("quantity is not a number".to_string()))?;
        validate_quantity(quantity).map_err(|e| bad(e.to_string()))?;
        let unit_price = Money::from_decimal_rupees(self.price)
            .ok_or_else(|| bad("price is not a number".to_string()))?;
        validate_price(unit_price).map_err(|e| bad(e.to_string()))?;

        let item = LineItem::new(
            LineItemId::new(self.id.clone()),
            self.name.clone(),
            quantity,
            unit_price,
            category,
        );

        if let Some(exported) = self.subtotal.and_then(Money::from_decimal_rupees) {
            if exported != item.subtotal {
                warn!(
                    id = %self.id,
                    exported = %exported,
                    recomputed = %item.subtotal,
                    "Imported subtotal disagrees with quantity × price, using recomputed value"
                );
            }
        }

        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
