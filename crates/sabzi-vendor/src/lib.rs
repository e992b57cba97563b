//! # sabzi-vendor: Vendor Session for Sabzi POS
//!
//! The layer a presentation front end talks to. It owns nothing the
//! lower crates already model; it wires them together and turns their
//! errors into codes a UI can switch on.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sabzi POS Architecture                            │
//! │                                                                         │
//! │   Presentation (pages, dialogs) ── not part of this workspace           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌─────────────────────────────────────────────────────────────────┐   │
//! │   │                 sabzi-vendor (THIS CRATE)                       │   │
//! │   │                                                                 │   │
//! │   │   config.rs ──► VendorConfig (TOML + SABZI_* env)               │   │
//! │   │   session.rs ─► VendorSession (reserve / release / checkout)    │   │
//! │   │   error.rs ───► VendorError { code, message }                   │   │
//! │   └─────────────────────────────────────────────────────────────────┘   │
//! │        │                                   │                            │
//! │        ▼                                   ▼                            │
//! │   sabzi-ledger                        sabzi-core                        │
//! │   (stock + JSON file)                 (cart, orders, receipts, payment) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use sabzi_core::Quantity;
//! use sabzi_vendor::{init_tracing, VendorConfig, VendorSession};
//!
//! init_tracing();
//! let config = VendorConfig::load_or_default(None);
//! let mut session = VendorSession::from_config(&config);
//!
//! session.add_to_cart("Tomato", Quantity::from_kg(2)).unwrap();
//! let order = session.queue_order().unwrap();
//! println!("queued {}", order.order_id);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, ConfigResult, VendorConfig};
pub use error::{ErrorCode, VendorError, VendorResult};
pub use session::{CheckoutResult, VendorSession};

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,sabzi=debug";

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `error`: Ledger or receipt writes that failed
/// - `warn`: Fallback to the default catalog, payment declines
/// - `info`: Session start, cart and order lifecycle
/// - `debug`: Every stock movement and quantity change
///
/// ## Configuration
/// Set `RUST_LOG` to control log levels:
/// ```bash
/// RUST_LOG=debug          # All debug logs
/// RUST_LOG=sabzi_ledger=trace  # Ledger internals only
/// ```
///
/// Calling it more than once is harmless; only the first call installs.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();

    if installed.is_ok() {
        tracing::debug!("Tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
