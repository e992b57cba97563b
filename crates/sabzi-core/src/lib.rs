//! # sabzi-core: Pure Business Logic for Sabzi POS
//!
//! This crate is the **heart** of the vegetable market POS. It holds the
//! cart, the order queue, receipt rendering and the payment stub as plain
//! in-memory types with zero file I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sabzi POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (external collaborator)         │   │
//! │  │    Inventory page ──► Cart page ──► Queue page ──► Receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 sabzi-vendor (VendorSession)                    │   │
//! │  │    add_to_cart, queue_order, cancel_order, checkout, ...        │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼───────────────┐  ┌───────────▼───────────────────┐   │
//! │  │  ★ sabzi-core (THIS CRATE) ★ │  │  sabzi-ledger                 │   │
//! │  │                              │  │  InventoryLedger + JSON file  │   │
//! │  │  Cart ─► OrderPipeline ─►    │  └───────────────────────────────┘   │
//! │  │         ReceiptFormatter     │                                       │
//! │  │  PaymentGateway              │                                       │
//! │  └──────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in integer paise
//! - [`quantity`] - Weights in integer grams
//! - [`types`] - Domain types (StockRecord, LineItem, Order, ...)
//! - [`cart`] - Shopping cart with export/import
//! - [`pipeline`] - FIFO order queue (commit, process, cancel)
//! - [`receipt`] - Fixed-width receipt text and summaries
//! - [`payment`] - Simulated payment gateway
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sabzi_core::{Cart, Category, Money, OrderPipeline, Quantity, ReceiptFormatter};
//!
//! let mut cart = Cart::new();
//! cart.add_item("Tomato", Quantity::from_kg(2), Money::from_rupees(50), Category::FruityVeges)
//!     .unwrap();
//! cart.add_item("Onion", Quantity::from_kg(3), Money::from_rupees(40), Category::Ground)
//!     .unwrap();
//! assert_eq!(cart.total(), Money::from_rupees(220));
//!
//! let mut pipeline = OrderPipeline::new(ReceiptFormatter::default());
//! let order = pipeline.commit(&cart).unwrap();
//! cart.clear();
//!
//! let summary = ReceiptFormatter::default().summarize(&order);
//! assert_eq!(summary.tax, Money::from_rupees(11));
//! assert_eq!(summary.total, Money::from_rupees(231));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod payment;
pub mod pipeline;
pub mod quantity;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::{
    FixedRandom, GatewaySettings, PaymentDetails, PaymentGateway, PaymentOutcome, RandomSource,
    SimulatedGateway, ThreadRandom,
};
pub use pipeline::OrderPipeline;
pub use quantity::Quantity;
pub use receipt::{Receipt, ReceiptFormatter, ReceiptSummary, ReceiptTotals, StoreInfo};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied on receipts, in basis points (500 = 5%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Stock below this level is reported as low (5 kg).
pub const LOW_STOCK_THRESHOLD: Quantity = Quantity::from_grams(5_000);

/// Maximum line items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum weight of a single line item (999 kg).
///
/// Guards against typing 1000 instead of 1.0.
pub const MAX_ITEM_QUANTITY: Quantity = Quantity::from_grams(999_000);

/// Currency symbol printed on receipts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
