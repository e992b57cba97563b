//! # Ledger Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerError (this module) ← Adds path and categorization              │
//! │       │                                                                 │
//! │       ├── on load: logged, ledger falls back to the default catalog    │
//! │       │                                                                 │
//! │       └── on save: returned to caller                                  │
//! │              │                                                          │
//! │              ▼                                                          │
//! │         VendorError (sabzi-vendor) ← Serialized for the UI             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use sabzi_core::{Category, Quantity, ValidationError};
use thiserror::Error;

/// Inventory ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No vegetable with this name.
    #[error("Vegetable not found: {name}")]
    NotFound { name: String },

    /// Decrement larger than the current stock.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: Quantity,
        requested: Quantity,
    },

    /// The same name appears under two categories.
    #[error("Duplicate vegetable '{name}' in {first} and {second}")]
    DuplicateName {
        name: String,
        first: Category,
        second: Category,
    },

    /// The document parsed but its contents break a ledger rule.
    #[error("Corrupt ledger document: {0}")]
    CorruptDocument(String),

    /// Invalid quantity or name passed to a ledger operation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing the ledger file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn not_found(name: impl Into<String>) -> Self {
        LedgerError::NotFound { name: name.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the backing store rather than of the request.
    pub fn is_io(&self) -> bool {
        matches!(self, LedgerError::Io { .. })
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
