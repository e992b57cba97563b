//! # Payment Gateway
//!
//! A stand-in for a real card/UPI processor. No money moves; the gateway
//! validates details, waits to mimic network latency and occasionally
//! fails online payments so that decline handling gets exercised.
//!
//! ## Flow
//! ```text
//! process_payment(amount, method, details)
//!      │
//!      ├── amount ≤ 0 ───────────────► declined "Invalid payment amount"
//!      ├── bad card / CVV / UPI id ──► declined "Invalid ..."
//!      │
//!      ▼
//! sleep(delay)
//!      │
//!      ├── online && random < failure_rate ─► declined "Payment Gateway Timeout"
//!      │
//!      ▼
//! approved, TXN_<unix secs>_<uuid>
//! ```

use std::thread;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::PaymentMethod;
use crate::validation::{validate_card_number, validate_cvv, validate_payment_amount, validate_upi_id};

/// Default simulated network latency.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// Default share of online payments that time out.
pub const DEFAULT_ONLINE_FAILURE_RATE: f64 = 0.05;

// =============================================================================
// Random Source
// =============================================================================

/// Supplies uniform values in `[0, 1)` for simulated failures.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Backed by rand's thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

// =============================================================================
// Request / Outcome
// =============================================================================

/// Method-specific details. Only the fields for the chosen method are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentDetails {
    pub card_number: Option<String>,
    pub cvv: Option<String>,
    pub upi_id: Option<String>,
}

impl PaymentDetails {
    pub fn card(number: impl Into<String>, cvv: impl Into<String>) -> Self {
        PaymentDetails {
            card_number: Some(number.into()),
            cvv: Some(cvv.into()),
            upi_id: None,
        }
    }

    pub fn upi(id: impl Into<String>) -> Self {
        PaymentDetails {
            upi_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// For cash.
    pub fn none() -> Self {
        PaymentDetails::default()
    }
}

/// Result of a payment attempt. A decline is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,
    pub transaction_id: Option<String>,
}

impl PaymentOutcome {
    fn approved(message: &str, transaction_id: String) -> Self {
        PaymentOutcome {
            success: true,
            message: message.to_string(),
            transaction_id: Some(transaction_id),
        }
    }

    fn declined(message: &str) -> Self {
        PaymentOutcome {
            success: false,
            message: message.to_string(),
            transaction_id: None,
        }
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// Anything that can take a payment.
pub trait PaymentGateway {
    fn process_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        details: &PaymentDetails,
    ) -> PaymentOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatewaySettings {
    pub delay: Duration,
    /// Probability in `[0, 1]` that an online payment times out.
    pub online_failure_rate: f64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        GatewaySettings {
            delay: DEFAULT_PAYMENT_DELAY,
            online_failure_rate: DEFAULT_ONLINE_FAILURE_RATE,
        }
    }
}

/// Simulated processor with a pluggable random source.
#[derive(Debug, Clone)]
pub struct SimulatedGateway<R: RandomSource = ThreadRandom> {
    settings: GatewaySettings,
    random: R,
}

impl SimulatedGateway<ThreadRandom> {
    pub fn new(settings: GatewaySettings) -> Self {
        SimulatedGateway {
            settings,
            random: ThreadRandom,
        }
    }
}

impl<R: RandomSource> SimulatedGateway<R> {
    pub fn with_random(settings: GatewaySettings, random: R) -> Self {
        SimulatedGateway { settings, random }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn check_details(method: PaymentMethod, details: &PaymentDetails) -> Result<(), &'static str> {
        match method {
            PaymentMethod::CreditCard => {
                validate_card_number(details.card_number.as_deref().unwrap_or_default())
                    .map_err(|_| "Invalid Card Number")?;
                validate_cvv(details.cvv.as_deref().unwrap_or_default())
                    .map_err(|_| "Invalid CVV")?;
            }
            PaymentMethod::Upi => {
                validate_upi_id(details.upi_id.as_deref().unwrap_or_default())
                    .map_err(|_| "Invalid UPI ID")?;
            }
            PaymentMethod::Cash => {}
        }
        Ok(())
    }
}

impl<R: RandomSource> PaymentGateway for SimulatedGateway<R> {
    fn process_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        details: &PaymentDetails,
    ) -> PaymentOutcome {
        debug!(amount = %amount, method = %method, "Processing payment");

        if validate_payment_amount(amount).is_err() {
            warn!(amount = %amount, "Payment declined: invalid amount");
            return PaymentOutcome::declined("Invalid payment amount");
        }

        if let Err(message) = Self::check_details(method, details) {
            warn!(method = %method, reason = message, "Payment declined: invalid details");
            return PaymentOutcome::declined(message);
        }

        if !self.settings.delay.is_zero() {
            thread::sleep(self.settings.delay);
        }

        if method.is_online() && self.random.next_unit() < self.settings.online_failure_rate {
            warn!(method = %method, "Payment declined: gateway timeout");
            return PaymentOutcome::declined("Payment Gateway Timeout");
        }

        let transaction_id = new_transaction_id();
        info!(amount = %amount, method = %method, transaction_id = %transaction_id, "Payment approved");

        match method {
            PaymentMethod::Cash => PaymentOutcome::approved(
                "Cash payment recorded. Please collect cash from customer.",
                transaction_id,
            ),
            _ => PaymentOutcome::approved("Payment Successful", transaction_id),
        }
    }
}

/// `TXN_<unix secs>_<uuid simple>`
pub fn new_transaction_id() -> String {
    format!("TXN_{}_{}", Utc::now().timestamp(), Uuid::new_v4().simple())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn gateway(random: f64) -> SimulatedGateway<FixedRandom> {
        SimulatedGateway::with_random(
            GatewaySettings {
                delay: Duration::ZERO,
                online_failure_rate: DEFAULT_ONLINE_FAILURE_RATE,
            },
            FixedRandom(random),
        )
    }

    #[test]
    fn test_card_payment_succeeds() {
        let outcome = gateway(0.5).process_payment(
            Money::from_rupees(231),
            PaymentMethod::CreditCard,
            &PaymentDetails::card("4111111111111111", "123"),
        );

        assert!(outcome.success);
        assert_eq!(outcome.message, "Payment Successful");
        assert!(outcome.transaction_id.unwrap().starts_with("TXN_"));
    }

    #[test]
    fn test_invalid_card_details() {
        let mut gw = gateway(0.5);
        let amount = Money::from_rupees(10);

        let outcome = gw.process_payment(amount, PaymentMethod::CreditCard, &PaymentDetails::card("4111", "123"));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Invalid Card Number");

        let outcome = gw.process_payment(
            amount,
            PaymentMethod::CreditCard,
            &PaymentDetails::card("4111111111111111", "12"),
        );
        assert_eq!(outcome.message, "Invalid CVV");
        assert!(outcome.transaction_id.is_none());

        let outcome = gw.process_payment(amount, PaymentMethod::CreditCard, &PaymentDetails::none());
        assert_eq!(outcome.message, "Invalid Card Number");
    }

    #[test]
    fn test_upi_requires_at_sign() {
        let mut gw = gateway(0.5);
        let amount = Money::from_rupees(10);

        let outcome = gw.process_payment(amount, PaymentMethod::Upi, &PaymentDetails::upi("vendor"));
        assert_eq!(outcome.message, "Invalid UPI ID");

        let outcome = gw.process_payment(amount, PaymentMethod::Upi, &PaymentDetails::upi("vendor@bank"));
        assert!(outcome.success);
    }

    #[test]
    fn test_non_positive_amount_declined() {
        let outcome = gateway(0.5).process_payment(Money::zero(), PaymentMethod::Cash, &PaymentDetails::none());
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Invalid payment amount");
    }

    #[test]
    fn test_online_timeout_below_failure_rate() {
        let outcome = gateway(0.01).process_payment(
            Money::from_rupees(10),
            PaymentMethod::Upi,
            &PaymentDetails::upi("vendor@bank"),
        );
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Payment Gateway Timeout");
        assert!(outcome.transaction_id.is_none());
    }

    #[test]
    fn test_cash_never_times_out() {
        let outcome = gateway(0.0).process_payment(Money::from_rupees(10), PaymentMethod::Cash, &PaymentDetails::none());
        assert!(outcome.success);
        assert_eq!(
            outcome.message,
            "Cash payment recorded. Please collect cash from customer."
        );
        assert!(outcome.transaction_id.is_some());
    }

    #[test]
    fn test_delay_is_applied() {
        let mut gw = SimulatedGateway::with_random(
            GatewaySettings {
                delay: Duration::from_millis(20),
                online_failure_rate: 0.0,
            },
            FixedRandom(0.5),
        );
        let start = Instant::now();
        gw.process_payment(Money::from_rupees(1), PaymentMethod::Cash, &PaymentDetails::none());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_transaction_ids_are_unique() {
        assert_ne!(new_transaction_id(), new_transaction_id());
    }
}
