//! # Vendor Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Sabzi POS                              │
//! │                                                                         │
//! │  VendorSession::add_to_cart("Potato", 1000 kg)                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Ledger error? ─── LedgerError::InsufficientStock ──┐                  │
//! │         │                                           │                  │
//! │  Cart error? ───── CoreError::Validation ───────────┼──► VendorError   │
//! │         │                                           │    {code,message}│
//! │  Config error? ─── ConfigError::Invalid ────────────┘        │         │
//! │                                                              ▼         │
//! │                                                 UI switches on `code`  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::Path;

use sabzi_core::CoreError;
use sabzi_ledger::LedgerError;
use serde::Serialize;
use ts_rs::TS;

use crate::config::ConfigError;

/// Error returned from session operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for Potato: available 45.0 kg, requested 1000.0 kg"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct VendorError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes the presentation layer can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Vegetable, cart line or order does not exist
    NotFound,

    InsufficientStock,

    /// Commit or checkout with nothing in the cart
    EmptyCart,

    /// Bad quantity, price, name or import document
    InvalidInput,

    /// Ledger or receipt file could not be written
    IoFailure,

    PaymentDeclined,

    ConfigError,

    Internal,
}

impl VendorError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        VendorError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        VendorError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        VendorError::new(ErrorCode::InvalidInput, message)
    }

    pub fn declined(message: impl Into<String>) -> Self {
        VendorError::new(ErrorCode::PaymentDeclined, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        VendorError::new(ErrorCode::Internal, message)
    }

    /// A file write outside the ledger failed (receipts).
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        tracing::error!(path = %path.display(), error = %err, "File write failed");
        VendorError::new(
            ErrorCode::IoFailure,
            format!("Could not write {}: {}", path.display(), err),
        )
    }
}

/// Converts core errors to vendor errors.
impl From<CoreError> for VendorError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => VendorError::not_found(&entity, &id),
            CoreError::InsufficientStock { .. } => {
                VendorError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::EmptyCart => VendorError::new(ErrorCode::EmptyCart, "Cart is empty"),
            CoreError::IndexOutOfRange { .. } => VendorError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::OrderNotFound(id) => VendorError::not_found("Order", &id),
            CoreError::CartTooLarge { .. } => VendorError::invalid_input(err.to_string()),
            CoreError::Import(_) => VendorError::invalid_input(err.to_string()),
            CoreError::Validation(e) => VendorError::invalid_input(e.to_string()),
            CoreError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                VendorError::internal("Could not serialize data")
            }
        }
    }
}

/// Converts ledger errors to vendor errors.
impl From<LedgerError> for VendorError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { name } => VendorError::not_found("Vegetable", &name),
            LedgerError::InsufficientStock { .. } => {
                VendorError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            LedgerError::Validation(e) => VendorError::invalid_input(e.to_string()),
            LedgerError::Io { ref path, ref source } => {
                tracing::error!(path = %path.display(), error = %source, "Ledger write failed");
                VendorError::new(ErrorCode::IoFailure, "Could not save inventory")
            }
            LedgerError::DuplicateName { .. }
            | LedgerError::CorruptDocument(_)
            | LedgerError::Serialization(_) => {
                tracing::error!("Ledger error: {}", err);
                VendorError::internal("Inventory data is inconsistent")
            }
        }
    }
}

impl From<ConfigError> for VendorError {
    fn from(err: ConfigError) -> Self {
        VendorError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for VendorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for VendorError {}

/// Result type for session operations.
pub type VendorResult<T> = Result<T, VendorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sabzi_core::{Quantity, ValidationError};

    #[test]
    fn test_serializes_screaming_code() {
        let err = VendorError::new(ErrorCode::InsufficientStock, "no potatoes");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"INSUFFICIENT_STOCK","message":"no potatoes"}"#);
    }

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(VendorError::from(CoreError::EmptyCart).code, ErrorCode::EmptyCart);
        assert_eq!(
            VendorError::from(CoreError::IndexOutOfRange { index: 2, len: 1 }).code,
            ErrorCode::NotFound
        );
        let err: VendorError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_ledger_error_mapping() {
        let err: VendorError = LedgerError::InsufficientStock {
            name: "Potato".to_string(),
            available: Quantity::from_kg(45),
            requested: Quantity::from_kg(1000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Potato"));

        let err: VendorError = LedgerError::io(
            "/x/inventory_data.json",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        )
        .into();
        assert_eq!(err.code, ErrorCode::IoFailure);

        assert_eq!(VendorError::from(LedgerError::not_found("Kale")).code, ErrorCode::NotFound);
    }

    #[test]
    fn test_config_error_mapping() {
        let err: VendorError = ConfigError::Invalid("bad".to_string()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
