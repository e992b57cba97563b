//! # Inventory Ledger
//!
//! The authoritative stock-by-name registry.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  decrement("Potato", 5 kg)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate → lookup → check stock                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply in memory ──► render document ──► store.save()                  │
//! │                                              │                          │
//! │                              ┌───────────────┴──────────────┐           │
//! │                              ▼                              ▼           │
//! │                           Ok: done                 Err: undo in memory, │
//! │                                                    return IoFailure     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Memory never holds a state that failed to reach the store.

use std::collections::BTreeMap;
use std::fmt;

use sabzi_core::validation::{validate_movement, validate_search_query};
use sabzi_core::{Category, Money, Quantity, StockRecord, StockSummaryRow, LOW_STOCK_THRESHOLD};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::catalog::default_catalog;
use crate::document;
use crate::error::{LedgerError, LedgerResult};
use crate::store::LedgerStore;

/// Where the ledger contents came from when it was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerSource {
    /// Loaded from the store.
    Store,
    /// Seeded from the default catalog.
    DefaultCatalog { reason: String },
}

impl LedgerSource {
    pub fn is_default(&self) -> bool {
        matches!(self, LedgerSource::DefaultCatalog { .. })
    }
}

impl fmt::Display for LedgerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSource::Store => f.write_str("store"),
            LedgerSource::DefaultCatalog { reason } => write!(f, "default catalog ({})", reason),
        }
    }
}

/// Stock ledger backed by a [`LedgerStore`].
///
/// ## Invariants
/// - names are unique across categories
/// - stock is never negative
#[derive(Debug)]
pub struct InventoryLedger<S: LedgerStore> {
    records: BTreeMap<String, StockRecord>,
    store: S,
    source: LedgerSource,
}

impl<S: LedgerStore> InventoryLedger<S> {
    /// Opens the ledger, falling back to the default catalog when the
    /// store is empty, unreadable or holds a corrupt document.
    ///
    /// Seeding does not write; the first mutation does.
    pub fn open(store: S) -> Self {
        let location = store.describe();

        let (records, source) = match store.load() {
            Ok(Some(text)) => match document::parse(&text) {
                Ok(records) => {
                    info!(location = %location, vegetables = records.len(), "Ledger loaded");
                    (records, LedgerSource::Store)
                }
                Err(e) => {
                    warn!(location = %location, error = %e, "Ledger document unusable, using default catalog");
                    (
                        default_catalog(),
                        LedgerSource::DefaultCatalog {
                            reason: e.to_string(),
                        },
                    )
                }
            },
            Ok(None) => {
                info!(location = %location, "No ledger found, seeding default catalog");
                (
                    default_catalog(),
                    LedgerSource::DefaultCatalog {
                        reason: "no ledger document".to_string(),
                    },
                )
            }
            Err(e) => {
                warn!(location = %location, error = %e, "Ledger unreadable, using default catalog");
                (
                    default_catalog(),
                    LedgerSource::DefaultCatalog {
                        reason: e.to_string(),
                    },
                )
            }
        };

        InventoryLedger {
            records: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
            store,
            source,
        }
    }

    pub fn source(&self) -> &LedgerSource {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get_by_name(&self, name: &str) -> LedgerResult<StockRecord> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(name))
    }

    /// Whether `quantity` of `name` is in stock. False for unknown names.
    pub fn check_availability(&self, name: &str, quantity: Quantity) -> bool {
        self.records
            .get(name)
            .map(|r| r.can_supply(quantity))
            .unwrap_or(false)
    }

    /// All records, grouped by category then name.
    pub fn records(&self) -> Vec<StockRecord> {
        let mut records: Vec<StockRecord> = self.records.values().cloned().collect();
        records.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        records
    }

    pub fn by_category(&self, category: Category) -> Vec<StockRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Case-insensitive substring match on the name, with `_` read as a
    /// space. An empty term matches everything.
    pub fn search(&self, term: &str) -> LedgerResult<Vec<StockRecord>> {
        let term = validate_search_query(term)?.to_lowercase().replace('_', " ");
        Ok(self
            .records()
            .into_iter()
            .filter(|r| r.name.to_lowercase().replace('_', " ").contains(&term))
            .collect())
    }

    /// Records with stock strictly below `threshold`.
    pub fn list_low_stock(&self, threshold: Quantity) -> Vec<StockRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.stock < threshold)
            .collect()
    }

    /// Low stock at the standard 5 kg threshold.
    pub fn low_stock(&self) -> Vec<StockRecord> {
        self.list_low_stock(LOW_STOCK_THRESHOLD)
    }

    pub fn summary(&self) -> Vec<StockSummaryRow> {
        self.records().iter().map(StockSummaryRow::from).collect()
    }

    /// Value of all stock at current prices.
    pub fn total_value(&self) -> Money {
        self.records.values().map(StockRecord::value).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Takes `quantity` out of stock and persists.
    ///
    /// ## Returns
    /// The updated record.
    pub fn decrement(&mut self, name: &str, quantity: Quantity) -> LedgerResult<StockRecord> {
        validate_movement(quantity)?;

        let record = self
            .records
            .get(name)
            .ok_or_else(|| LedgerError::not_found(name))?;

        if !record.can_supply(quantity) {
            debug!(name = %name, available = %record.stock, requested = %quantity, "Insufficient stock");
            return Err(LedgerError::InsufficientStock {
                name: name.to_string(),
                available: record.stock,
                requested: quantity,
            });
        }

        let before = record.stock;
        self.apply(name, before - quantity, before)
    }

    /// Returns `quantity` to stock and persists.
    pub fn increment(&mut self, name: &str, quantity: Quantity) -> LedgerResult<StockRecord> {
        validate_movement(quantity)?;

        let before = self
            .records
            .get(name)
            .map(|r| r.stock)
            .ok_or_else(|| LedgerError::not_found(name))?;

        self.apply(name, before + quantity, before)
    }

    /// Sets `name` to `after`, persists, and restores `before` if the write fails.
    fn apply(&mut self, name: &str, after: Quantity, before: Quantity) -> LedgerResult<StockRecord> {
        self.set_stock(name, after);

        if let Err(e) = self.persist() {
            self.set_stock(name, before);
            error!(name = %name, error = %e, "Ledger write failed, change rolled back");
            return Err(e);
        }

        debug!(name = %name, before = %before, after = %after, "Stock updated");
        self.get_by_name(name)
    }

    fn set_stock(&mut self, name: &str, stock: Quantity) {
        if let Some(record) = self.records.get_mut(name) {
            record.stock = stock;
        }
    }

    /// Writes the whole ledger to the store.
    pub fn persist(&mut self) -> LedgerResult<()> {
        let text = document::render(self.records.values())?;
        self.store.save(&text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
