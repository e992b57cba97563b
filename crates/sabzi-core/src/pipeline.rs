//! # Order Pipeline
//!
//! Moves carts through the order lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Cart ──commit()──► [ Queued ] ──process()──► [ Processed ] ─► Receipt │
//! │     │                    │                                              │
//! │     │                    └──────cancel()─────► [ Cancelled ]            │
//! │     │                                          (caller restocks)        │
//! │     │                                                                   │
//! │     └──settle(payment)──────────────────────► [ Processed ] ─► Receipt  │
//! │                                                                         │
//! │   Queue is FIFO. Removal is by order id; positional calls resolve       │
//! │   the id first.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline never touches inventory. Stock reserved for a queued
//! order stays reserved until the caller restocks a cancelled one.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Local, Utc};
use tracing::{debug, info};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::receipt::{Receipt, ReceiptFormatter};
use crate::types::{Order, OrderStatus, OrderSummary, PaymentRecord};

/// Order sequence shared by every pipeline in the process.
static NEXT_ORDER_SEQ: AtomicU32 = AtomicU32::new(1);

/// FIFO queue of committed orders plus the receipt formatter used when
/// they are processed.
#[derive(Debug, Clone)]
pub struct OrderPipeline {
    queue: Vec<Order>,
    formatter: ReceiptFormatter,
}

impl OrderPipeline {
    pub fn new(formatter: ReceiptFormatter) -> Self {
        OrderPipeline {
            queue: Vec::new(),
            formatter,
        }
    }

    pub fn formatter(&self) -> &ReceiptFormatter {
        &self.formatter
    }

    /// `ORD_<YYYYMMDD>_<HHMMSS>_<seq:04>`, unique for the process lifetime.
    fn next_order_id() -> String {
        let seq = NEXT_ORDER_SEQ.fetch_add(1, Ordering::Relaxed);
        format!("ORD_{}_{:04}", Local::now().format("%Y%m%d_%H%M%S"), seq)
    }

    fn snapshot(&self, cart: &Cart) -> CoreResult<Order> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(Order {
            order_id: Self::next_order_id(),
            items: cart.items(),
            total_amount: cart.total(),
            created_at: Utc::now(),
            payment_method: None,
            transaction_id: None,
            status: OrderStatus::Queued,
        })
    }

    /// Snapshots the cart into a queued order at the tail of the queue.
    ///
    /// The cart is left as-is; the caller clears it.
    pub fn commit(&mut self, cart: &Cart) -> CoreResult<Order> {
        let order = self.snapshot(cart)?;
        info!(
            order_id = %order.order_id,
            items = order.item_count(),
            total = %order.total_amount,
            "Order queued"
        );
        self.queue.push(order.clone());
        Ok(order)
    }

    /// Builds a processed order for a cart that has already been paid for,
    /// bypassing the queue.
    pub fn settle(&mut self, cart: &Cart, payment: PaymentRecord) -> CoreResult<(Order, Receipt)> {
        let mut order = self.snapshot(cart)?;
        order.payment_method = Some(payment.method);
        order.transaction_id = Some(payment.transaction_id);
        order.status = OrderStatus::Processed;

        info!(order_id = %order.order_id, total = %order.total_amount, "Order settled");
        let receipt = self.formatter.receipt(&order);
        Ok((order, receipt))
    }

    fn id_at(&self, index: usize) -> CoreResult<String> {
        self.queue
            .get(index)
            .map(|o| o.order_id.clone())
            .ok_or(CoreError::IndexOutOfRange {
                index,
                len: self.queue.len(),
            })
    }

    fn take(&mut self, order_id: &str) -> CoreResult<Order> {
        let pos = self
            .queue
            .iter()
            .position(|o| o.order_id == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
        Ok(self.queue.remove(pos))
    }

    /// Removes the order at `index`, marks it processed and renders its receipt.
    pub fn process(&mut self, index: usize) -> CoreResult<(Order, Receipt)> {
        let id = self.id_at(index)?;
        self.process_by_id(&id)
    }

    /// Processes the head of the queue.
    pub fn process_next(&mut self) -> CoreResult<(Order, Receipt)> {
        self.process(0)
    }

    pub fn process_by_id(&mut self, order_id: &str) -> CoreResult<(Order, Receipt)> {
        let mut order = self.take(order_id)?;
        order.status = OrderStatus::Processed;

        info!(order_id = %order.order_id, remaining = self.queue.len(), "Order processed");
        let receipt = self.formatter.receipt(&order);
        Ok((order, receipt))
    }

    /// Removes the order at `index` and marks it cancelled.
    ///
    /// The returned order lists the quantities to restock.
    pub fn cancel(&mut self, index: usize) -> CoreResult<Order> {
        let id = self.id_at(index)?;
        self.cancel_by_id(&id)
    }

    pub fn cancel_by_id(&mut self, order_id: &str) -> CoreResult<Order> {
        let mut order = self.take(order_id)?;
        order.status = OrderStatus::Cancelled;

        info!(order_id = %order.order_id, remaining = self.queue.len(), "Order cancelled");
        Ok(order)
    }

    /// Queue listing, head first.
    pub fn peek_all(&self) -> Vec<OrderSummary> {
        debug!(queued = self.queue.len(), "Listing queued orders");
        self.queue.iter().map(OrderSummary::from).collect()
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.queue.iter().find(|o| o.order_id == order_id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for OrderPipeline {
    fn default() -> Self {
        OrderPipeline::new(ReceiptFormatter::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
