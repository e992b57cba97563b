//! # Error Types
//!
//! Domain-specific error types for sabzi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sabzi-core errors (this file)                                         │
//! │  ├── CoreError        - Cart / queue / stock rule violations           │
//! │  └── ValidationError  - Input validation failures (InvalidInput)       │
//! │                                                                         │
//! │  sabzi-ledger errors (separate crate)                                  │
//! │  └── LedgerError      - Ledger lookups and file persistence            │
//! │                                                                         │
//! │  sabzi-vendor errors                                                   │
//! │  └── VendorError      - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError/LedgerError → VendorError → UI      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core only classifies outcomes; user-facing wording belongs to the
//! presentation layer.

use thiserror::Error;

use crate::quantity::Quantity;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A vegetable or cart line does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Requested weight exceeds what is in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (Potato, 1000 kg)
    ///      │
    ///      ▼
    /// Check stock: available = 45 kg
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Potato", available: 45 kg, requested: 1000 kg }
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: Quantity,
        requested: Quantity,
    },

    /// Attempted to commit or check out a cart with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Queue position does not exist.
    #[error("Order index {index} out of range (queue length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// No queued order carries this id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Cart has exceeded maximum allowed line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Cart import text was unusable.
    #[error("Cart import failed: {0}")]
    Import(String),

    /// JSON export could not be produced.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (card number, CVV, UPI id, category name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
