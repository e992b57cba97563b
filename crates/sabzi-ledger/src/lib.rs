//! # sabzi-ledger: Inventory Ledger for Sabzi POS
//!
//! Holds the market's stock, keyed by vegetable name, and keeps it in a
//! JSON file that is rewritten on every change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sabzi POS Data Flow                              │
//! │                                                                         │
//! │  VendorSession::add_to_cart("Potato", 2 kg)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sabzi-ledger (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ SharedLedger  │    │InventoryLedger│    │  LedgerStore │   │   │
//! │  │   │ (shared.rs)   │───►│ (ledger.rs)   │───►│  (store.rs)  │   │   │
//! │  │   │ Arc<Mutex<_>> │    │ name → record │    │ JsonFile /   │   │   │
//! │  │   └───────────────┘    └───────┬───────┘    │ Memory       │   │   │
//! │  │                                │            └──────────────┘   │   │
//! │  │                        catalog.rs (defaults)                    │   │
//! │  │                        document.rs (file shape)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  inventory_data.json                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sabzi_core::Quantity;
//! use sabzi_ledger::{InventoryLedger, MemoryStore};
//!
//! let mut ledger = InventoryLedger::open(MemoryStore::new());
//! let potato = ledger.decrement("Potato", Quantity::from_kg(5)).unwrap();
//! assert_eq!(potato.stock, Quantity::from_kg(45));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod document;
pub mod error;
pub mod ledger;
pub mod shared;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::default_catalog;
pub use error::{LedgerError, LedgerResult};
pub use ledger::{InventoryLedger, LedgerSource};
pub use shared::SharedLedger;
pub use store::{JsonFileStore, LedgerStore, MemoryStore, DEFAULT_LEDGER_FILE};
