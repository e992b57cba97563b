//! # Vendor Session
//!
//! The context object a presentation layer drives. It keeps the ledger,
//! the cart and the order queue consistent with each other.
//!
//! ## Stock Reservation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger ↔ Cart ↔ Queue                                │
//! │                                                                         │
//! │  Vendor Action            Ledger                  Cart / Queue          │
//! │  ─────────────            ──────                  ────────────          │
//! │                                                                         │
//! │  add_to_cart ───────────► decrement (reserve) ──► add line              │
//! │  update_cart_quantity ──► reserve / release Δ ──► set quantity          │
//! │  remove_from_cart ──────► increment (release) ──► drop line             │
//! │  clear_cart ────────────► release every line ───► empty                 │
//! │  queue_order ───────────► (stays reserved) ─────► commit, clear cart    │
//! │  process_order ─────────► (stays sold) ─────────► receipt               │
//! │  cancel_order ──────────► release every line ───► drop order            │
//! │  checkout ──────────────► (stays sold) ─────────► pay, settle, clear    │
//! │                                                                         │
//! │  A failed step leaves ledger and cart as they were before the call.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use sabzi_core::validation::{validate_cart_size, validate_quantity};
use sabzi_core::{
    Cart, CoreError, LineItem, LineItemId, Order, OrderPipeline, OrderSummary, PaymentDetails,
    PaymentGateway, PaymentMethod, PaymentOutcome, PaymentRecord, Quantity, Receipt,
    SimulatedGateway, StockRecord, StockSummaryRow, MAX_CART_ITEMS,
};
use sabzi_ledger::{JsonFileStore, LedgerStore, SharedLedger};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::VendorConfig;
use crate::error::{VendorError, VendorResult};

/// What a successful checkout hands back.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResult {
    pub order: Order,
    pub receipt: Receipt,
    pub payment: PaymentOutcome,
}

/// One vendor's working state: shared ledger, cart, order queue, gateway.
pub struct VendorSession<S: LedgerStore, G: PaymentGateway> {
    ledger: SharedLedger<S>,
    cart: Cart,
    pipeline: OrderPipeline,
    gateway: G,
    low_stock_threshold: Quantity,
}

impl VendorSession<JsonFileStore, SimulatedGateway> {
    /// Opens the configured ledger file and builds a session around it.
    pub fn from_config(config: &VendorConfig) -> Self {
        let path = config.ledger_path();
        info!(ledger = %path.display(), store = %config.store.name, "Starting vendor session");

        VendorSession::new(
            SharedLedger::open(JsonFileStore::new(path)),
            OrderPipeline::new(config.receipt_formatter()),
            SimulatedGateway::new(config.gateway_settings()),
            config.low_stock_threshold(),
        )
    }
}

impl<S: LedgerStore, G: PaymentGateway> VendorSession<S, G> {
    pub fn new(
        ledger: SharedLedger<S>,
        pipeline: OrderPipeline,
        gateway: G,
        low_stock_threshold: Quantity,
    ) -> Self {
        VendorSession {
            ledger,
            cart: Cart::new(),
            pipeline,
            gateway,
            low_stock_threshold,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Handle to the ledger, for views that need it directly.
    pub fn ledger(&self) -> &SharedLedger<S> {
        &self.ledger
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn pipeline(&self) -> &OrderPipeline {
        &self.pipeline
    }

    /// All stock records.
    pub fn inventory(&self) -> Vec<StockRecord> {
        self.ledger.with_ledger(|l| l.records())
    }

    pub fn inventory_summary(&self) -> Vec<StockSummaryRow> {
        self.ledger.with_ledger(|l| l.summary())
    }

    pub fn queued_orders(&self) -> Vec<OrderSummary> {
        self.pipeline.peek_all()
    }

    /// Records below the configured low-stock threshold.
    pub fn low_stock(&self) -> Vec<StockRecord> {
        let threshold = self.low_stock_threshold;
        self.ledger.with_ledger(|l| l.list_low_stock(threshold))
    }

    // =========================================================================
    // Reservation Helpers
    // =========================================================================

    /// Decrements stock for every line. On failure, lines already reserved
    /// are released again and the error is returned.
    fn reserve_lines(&self, lines: &[LineItem]) -> VendorResult<()> {
        self.ledger.with_ledger_mut(|ledger| -> VendorResult<()> {
            for (done, line) in lines.iter().enumerate() {
                if let Err(e) = ledger.decrement(&line.name, line.quantity) {
                    for undo in &lines[..done] {
                        if let Err(undo_err) = ledger.increment(&undo.name, undo.quantity) {
                            error!(name = %undo.name, error = %undo_err, "Could not undo reservation");
                        }
                    }
                    return Err(e.into());
                }
            }
            Ok(())
        })
    }

    /// Increments stock for every line. On failure, lines already released
    /// are reserved again and the error is returned.
    fn release_lines(&self, lines: &[LineItem]) -> VendorResult<()> {
        self.ledger.with_ledger_mut(|ledger| -> VendorResult<()> {
            for (done, line) in lines.iter().enumerate() {
                if let Err(e) = ledger.increment(&line.name, line.quantity) {
                    for undo in &lines[..done] {
                        if let Err(undo_err) = ledger.decrement(&undo.name, undo.quantity) {
                            error!(name = %undo.name, error = %undo_err, "Could not undo release");
                        }
                    }
                    return Err(e.into());
                }
            }
            Ok(())
        })
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Reserves stock and adds a cart line at the ledger's current price.
    pub fn add_to_cart(&mut self, name: &str, quantity: Quantity) -> VendorResult<LineItemId> {
        validate_quantity(quantity).map_err(CoreError::from)?;
        validate_cart_size(self.cart.count())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        let record = self
            .ledger
            .with_ledger_mut(|l| l.decrement(name, quantity))?;

        match self
            .cart
            .add_item(&record.name, quantity, record.unit_price, record.category)
        {
            Ok(id) => {
                info!(name = %record.name, quantity = %quantity, id = %id, "Added to cart");
                Ok(id)
            }
            Err(e) => {
                warn!(name = %record.name, error = %e, "Cart rejected item, releasing stock");
                if let Err(release_err) = self.ledger.with_ledger_mut(|l| l.increment(&record.name, quantity)) {
                    error!(name = %record.name, error = %release_err, "Could not release stock");
                }
                Err(e.into())
            }
        }
    }

    /// Releases a line's stock and removes it. Returns false for unknown ids.
    pub fn remove_from_cart(&mut self, id: &LineItemId) -> VendorResult<bool> {
        let Some(line) = self.cart.get(id).cloned() else {
            return Ok(false);
        };

        self.release_lines(std::slice::from_ref(&line))?;
        self.cart.remove_item(id);
        info!(id = %id, name = %line.name, "Removed from cart");
        Ok(true)
    }

    /// Changes a line's weight, reserving or releasing the difference.
    ///
    /// Returns false (nothing changed) for unknown ids or weights the cart
    /// would refuse.
    pub fn update_cart_quantity(&mut self, id: &LineItemId, quantity: Quantity) -> VendorResult<bool> {
        if validate_quantity(quantity).is_err() {
            return Ok(false);
        }
        let Some(line) = self.cart.get(id).cloned() else {
            return Ok(false);
        };

        let current = line.quantity;
        if quantity > current {
            let extra = quantity - current;
            self.ledger.with_ledger_mut(|l| l.decrement(&line.name, extra))?;
        } else if quantity < current {
            let freed = current - quantity;
            self.ledger.with_ledger_mut(|l| l.increment(&line.name, freed))?;
        }

        let updated = self.cart.update_quantity(id, quantity);
        debug!(id = %id, from = %current, to = %quantity, "Cart quantity changed");
        Ok(updated)
    }

    /// Releases every line and empties the cart.
    pub fn clear_cart(&mut self) -> VendorResult<()> {
        self.release_lines(&self.cart.items())?;
        self.cart.clear();
        info!("Cart cleared");
        Ok(())
    }

    /// Cart as a `cart_data` JSON document.
    pub fn export_cart(&self) -> String {
        self.cart.export_json()
    }

    /// Replaces the cart with an exported one.
    ///
    /// The current lines are released and the imported ones reserved. If
    /// any step fails the ledger and cart are left as they were.
    pub fn import_cart(&mut self, text: &str) -> VendorResult<()> {
        let mut incoming = Cart::new();
        incoming.import_json(text)?;

        let previous = self.cart.items();
        self.release_lines(&previous)?;

        if let Err(e) = self.reserve_lines(&incoming.items()) {
            warn!(error = %e, "Import could not reserve stock, restoring previous cart");
            if let Err(restore_err) = self.reserve_lines(&previous) {
                error!(error = %restore_err, "Could not restore previous cart reservations");
            }
            return Err(e);
        }

        info!(lines = incoming.count(), "Cart imported");
        self.cart = incoming;
        Ok(())
    }

    // =========================================================================
    // Order Operations
    // =========================================================================

    /// Commits the cart to the queue and clears it. Stock stays reserved.
    pub fn queue_order(&mut self) -> VendorResult<Order> {
        let order = self.pipeline.commit(&self.cart)?;
        self.cart.clear();
        Ok(order)
    }

    pub fn process_order(&mut self, index: usize) -> VendorResult<(Order, Receipt)> {
        Ok(self.pipeline.process(index)?)
    }

    pub fn process_next_order(&mut self) -> VendorResult<(Order, Receipt)> {
        Ok(self.pipeline.process_next()?)
    }

    /// Cancels the order at `index` and returns its stock to the ledger.
    pub fn cancel_order(&mut self, index: usize) -> VendorResult<Order> {
        let order_id = self
            .pipeline
            .peek_all()
            .get(index)
            .map(|o| o.order_id.clone())
            .ok_or(CoreError::IndexOutOfRange {
                index,
                len: self.pipeline.len(),
            })?;
        self.cancel_order_by_id(&order_id)
    }

    pub fn cancel_order_by_id(&mut self, order_id: &str) -> VendorResult<Order> {
        let lines = self
            .pipeline
            .get(order_id)
            .map(|o| o.items.clone())
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        self.release_lines(&lines)?;
        Ok(self.pipeline.cancel_by_id(order_id)?)
    }

    /// Charges the cart total plus tax and settles it as a processed order.
    ///
    /// On a decline the cart and its reservations are kept so the vendor
    /// can retry or pick another method.
    pub fn checkout(
        &mut self,
        method: PaymentMethod,
        details: &PaymentDetails,
    ) -> VendorResult<CheckoutResult> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let totals = self.pipeline.formatter().totals(&self.cart.items());
        let payment = self.gateway.process_payment(totals.total, method, details);

        if !payment.success {
            warn!(method = %method, reason = %payment.message, "Checkout declined");
            return Err(VendorError::declined(payment.message));
        }

        let transaction_id = payment
            .transaction_id
            .clone()
            .ok_or_else(|| VendorError::internal("Approved payment has no transaction id"))?;

        let (order, receipt) = self.pipeline.settle(
            &self.cart,
            PaymentRecord {
                method,
                transaction_id,
            },
        )?;
        self.cart.clear();

        info!(order_id = %order.order_id, total = %totals.total, method = %method, "Checkout complete");
        Ok(CheckoutResult {
            order,
            receipt,
            payment,
        })
    }

    // =========================================================================
    // Receipt Output
    // =========================================================================

    /// Writes `receipt_<orderId>.txt` into `dir`, creating it if needed.
    pub fn write_receipt(&self, dir: &Path, receipt: &Receipt) -> VendorResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| VendorError::io(dir, e))?;

        let path = dir.join(receipt.file_name());
        fs::write(&path, &receipt.text).map_err(|e| VendorError::io(&path, e))?;

        info!(path = %path.display(), "Receipt saved");
        Ok(path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use sabzi_core::{FixedRandom, GatewaySettings, Money, OrderStatus, ReceiptFormatter};
    use sabzi_ledger::{LedgerError, LedgerResult, MemoryStore};
    use std::time::Duration;
    use tempfile::TempDir;

    type TestSession = VendorSession<MemoryStore, SimulatedGateway<FixedRandom>>;

    fn session_with(random: f64) -> TestSession {
        VendorSession::new(
            SharedLedger::open(MemoryStore::new()),
            OrderPipeline::new(ReceiptFormatter::default()),
            SimulatedGateway::with_random(
                GatewaySettings {
                    delay: Duration::ZERO,
                    online_failure_rate: 0.05,
                },
                FixedRandom(random),
            ),
            Quantity::from_kg(5),
        )
    }

    fn session() -> TestSession {
        session_with(0.5)
    }

    fn stock(session: &TestSession, name: &str) -> Quantity {
        session
            .ledger()
            .with_ledger(|l| l.get_by_name(name).unwrap().stock)
    }

    #[test]
    fn test_tomato_onion_scenario() {
        let mut session = session();

        session.add_to_cart("Tomato", Quantity::from_kg(2)).unwrap();
        session.add_to_cart("Onion", Quantity::from_kg(3)).unwrap();
        assert_eq!(session.cart().total(), Money::from_rupees(220));
        assert_eq!(stock(&session, "Tomato"), Quantity::from_kg(28));
        assert_eq!(stock(&session, "Onion"), Quantity::from_kg(27));

        let order = session.queue_order().unwrap();
        assert_eq!(order.total_amount, Money::from_rupees(220));
        assert!(session.cart().is_empty());
        assert_eq!(session.queued_orders().len(), 1);

        let (processed, receipt) = session.process_next_order().unwrap();
        assert_eq!(processed.status, OrderStatus::Processed);
        assert!(receipt.text.contains("₹   220.00"));
        assert!(receipt.text.contains("₹    11.00"));
        assert!(receipt.text.contains("₹   231.00"));

        // Processing does not touch stock
        assert_eq!(stock(&session, "Tomato"), Quantity::from_kg(28));
    }

    #[test]
    fn test_add_to_cart_insufficient_stock() {
        let mut session = session();

        let err = session.add_to_cart("Potato", Quantity::from_kg(60)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(session.cart().is_empty());
        assert_eq!(stock(&session, "Potato"), Quantity::from_kg(50));

        let err = session.add_to_cart("Kale", Quantity::from_kg(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = session.add_to_cart("Potato", Quantity::zero()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_full_cart_rejects_without_reserving() {
        let mut session = session();
        for _ in 0..MAX_CART_ITEMS {
            session.add_to_cart("Potato", Quantity::from_grams(10)).unwrap();
        }
        assert_eq!(stock(&session, "Potato"), Quantity::from_kg(49));

        let err = session.add_to_cart("Potato", Quantity::from_grams(10)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(session.cart().count(), MAX_CART_ITEMS);
        assert_eq!(stock(&session, "Potato"), Quantity::from_kg(49));
    }

    #[test]
    fn test_cancel_restocks() {
        let mut session = session();
        session.add_to_cart("Carrot", Quantity::from_grams(2_500)).unwrap();
        session.queue_order().unwrap();
        session.add_to_cart("Peas", Quantity::from_kg(1)).unwrap();
        let keep = session.queue_order().unwrap();
        assert_eq!(stock(&session, "Carrot"), Quantity::from_grams(22_500));

        let cancelled = session.cancel_order(0).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(stock(&session, "Carrot"), Quantity::from_kg(25));

        let remaining = session.queued_orders();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].order_id, keep.order_id);

        let cancelled = session.cancel_order_by_id(&keep.order_id).unwrap();
        assert_eq!(cancelled.order_id, keep.order_id);
        assert_eq!(stock(&session, "Peas"), Quantity::from_kg(15));

        let err = session.cancel_order(0).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_and_clear_release_stock() {
        let mut session = session();
        let id = session.add_to_cart("Okra", Quantity::from_kg(3)).unwrap();
        session.add_to_cart("Mint", Quantity::from_kg(1)).unwrap();

        assert!(session.remove_from_cart(&id).unwrap());
        assert!(!session.remove_from_cart(&id).unwrap());
        assert_eq!(stock(&session, "Okra"), Quantity::from_kg(18));

        session.clear_cart().unwrap();
        assert!(session.cart().is_empty());
        assert_eq!(stock(&session, "Mint"), Quantity::from_kg(5));
    }

    #[test]
    fn test_update_quantity_adjusts_reservation() {
        let mut session = session();
        let id = session.add_to_cart("Tomato", Quantity::from_kg(2)).unwrap();

        assert!(session.update_cart_quantity(&id, Quantity::from_kg(5)).unwrap());
        assert_eq!(stock(&session, "Tomato"), Quantity::from_kg(25));

        assert!(session.update_cart_quantity(&id, Quantity::from_grams(500)).unwrap());
        assert_eq!(stock(&session, "Tomato"), Quantity::from_grams(29_500));
        assert_eq!(session.cart().total(), Money::from_rupees(25));

        assert!(!session.update_cart_quantity(&id, Quantity::zero()).unwrap());

        let err = session
            .update_cart_quantity(&id, Quantity::from_kg(40))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(session.cart().get(&id).unwrap().quantity, Quantity::from_grams(500));
        assert_eq!(stock(&session, "Tomato"), Quantity::from_grams(29_500));
    }

    #[test]
    fn test_checkout_success() {
        let mut session = session();
        session.add_to_cart("Tomato", Quantity::from_kg(2)).unwrap();
        session.add_to_cart("Onion", Quantity::from_kg(3)).unwrap();

        let result = session
            .checkout(PaymentMethod::Upi, &PaymentDetails::upi("vendor@bank"))
            .unwrap();

        assert!(result.payment.success);
        assert_eq!(result.order.status, OrderStatus::Processed);
        assert_eq!(result.order.payment_method, Some(PaymentMethod::Upi));
        assert!(result.receipt.text.contains("UPI"));
        assert!(session.cart().is_empty());
        assert!(session.queued_orders().is_empty());
        assert_eq!(stock(&session, "Tomato"), Quantity::from_kg(28));
    }

    #[test]
    fn test_checkout_declined_keeps_cart() {
        let mut session = session_with(0.01);
        session.add_to_cart("Tomato", Quantity::from_kg(2)).unwrap();

        let err = session
            .checkout(PaymentMethod::CreditCard, &PaymentDetails::card("4111111111111111", "123"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentDeclined);
        assert_eq!(err.message, "Payment Gateway Timeout");
        assert_eq!(session.cart().count(), 1);

        // Cash is never subject to gateway timeouts
        let result = session.checkout(PaymentMethod::Cash, &PaymentDetails::none()).unwrap();
        assert!(result.payment.success);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let err = session()
            .checkout(PaymentMethod::Cash, &PaymentDetails::none())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn test_export_import_moves_reservations() {
        let mut source = session();
        source.add_to_cart("Peas", Quantity::from_kg(2)).unwrap();
        let text = source.export_cart();

        let mut target = session();
        target.add_to_cart("Mint", Quantity::from_kg(1)).unwrap();
        target.import_cart(&text).unwrap();

        assert_eq!(target.cart().count(), 1);
        assert_eq!(target.cart().items()[0].name, "Peas");
        assert_eq!(stock(&target, "Mint"), Quantity::from_kg(5));
        assert_eq!(stock(&target, "Peas"), Quantity::from_kg(13));
    }

    #[test]
    fn test_import_rolls_back_on_unknown_vegetable() {
        let mut session = session();
        session.add_to_cart("Mint", Quantity::from_kg(1)).unwrap();

        let text = r#"{"cart_summary": {"items": [
            {"id": "item_1", "name": "Peas", "category": "Legumes", "quantity": 1.0, "price": 90.0},
            {"id": "item_2", "name": "Kale", "category": "Leafy", "quantity": 1.0, "price": 70.0}
        ]}}"#;

        let err = session.import_cart(text).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(session.cart().count(), 1);
        assert_eq!(session.cart().items()[0].name, "Mint");
        assert_eq!(stock(&session, "Mint"), Quantity::from_kg(4));
        assert_eq!(stock(&session, "Peas"), Quantity::from_kg(15));
    }

    #[test]
    fn test_low_stock_uses_threshold() {
        let mut session = session();
        assert!(session.low_stock().is_empty());

        session.add_to_cart("Lettuce", Quantity::from_kg(6)).unwrap();
        let low: Vec<String> = session.low_stock().into_iter().map(|r| r.name).collect();
        assert_eq!(low, vec!["Lettuce".to_string()]);
    }

    #[test]
    fn test_write_receipt() {
        let dir = TempDir::new().unwrap();
        let mut session = session();
        session.add_to_cart("Tomato", Quantity::from_kg(1)).unwrap();
        session.queue_order().unwrap();
        let (order, receipt) = session.process_next_order().unwrap();

        let path = session.write_receipt(&dir.path().join("receipts"), &receipt).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("receipt_{}.txt", order.order_id)
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), receipt.text);
    }

    /// Loads the default catalog, then fails every save after the first `ok`.
    struct FlakyStore {
        ok: usize,
        saves: usize,
    }

    impl LedgerStore for FlakyStore {
        fn load(&self) -> LedgerResult<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, _contents: &str) -> LedgerResult<()> {
            if self.saves >= self.ok {
                return Err(LedgerError::io(
                    "/flaky/inventory_data.json",
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            self.saves += 1;
            Ok(())
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[test]
    fn test_ledger_write_failure_surfaces_io_failure() {
        let mut session = VendorSession::new(
            SharedLedger::open(FlakyStore { ok: 1, saves: 0 }),
            OrderPipeline::default(),
            SimulatedGateway::with_random(
                GatewaySettings {
                    delay: Duration::ZERO,
                    online_failure_rate: 0.0,
                },
                FixedRandom(0.5),
            ),
            Quantity::from_kg(5),
        );

        let id = session.add_to_cart("Potato", Quantity::from_kg(2)).unwrap();

        let err = session.add_to_cart("Onion", Quantity::from_kg(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoFailure);
        assert_eq!(session.cart().count(), 1);

        let err = session.remove_from_cart(&id).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoFailure);
        assert_eq!(session.cart().count(), 1);

        let potato = session.ledger().with_ledger(|l| l.get_by_name("Potato").unwrap().stock);
        assert_eq!(potato, Quantity::from_kg(48));
    }

    #[test]
    fn test_from_config() {
        let dir = TempDir::new().unwrap();
        let mut config = VendorConfig::default();
        config.ledger_path = Some(dir.path().join("inventory_data.json"));
        config.payment.delay_ms = 0;

        let mut session = VendorSession::from_config(&config);
        assert_eq!(session.inventory().len(), 25);

        session.add_to_cart("Potato", Quantity::from_kg(5)).unwrap();
        assert!(dir.path().join("inventory_data.json").exists());

        let reopened = VendorSession::from_config(&config);
        let potato = reopened.ledger().with_ledger(|l| l.get_by_name("Potato").unwrap().stock);
        assert_eq!(potato, Quantity::from_kg(45));
    }
}
