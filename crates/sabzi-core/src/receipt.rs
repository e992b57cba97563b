//! # Receipts
//!
//! Renders orders as fixed-width (50 column) receipt text, plus summary
//! and JSON projections. Receipts are derived data: nothing here is
//! persisted, and any order can be re-rendered at any time.
//!
//! ## Layout
//! ```text
//! ==================================================
//!           Green Valley Vegetable Market
//!           123 Market Street, Fresh City
//! Phone:                +91-9876543210
//! ==================================================
//!
//! Order ID: ORD_20260101_120000_0001
//! Date & Time: 2026-01-01 12:00:00
//! Cashier: Vendor System
//!
//! --------------------------------------------------
//! ITEM                 QTY      RATE     AMOUNT
//! --------------------------------------------------
//! Tomato               2.0      50       100.00
//! Onion                3.0      40       120.00
//! --------------------------------------------------
//! Subtotal:                              ₹   220.00
//! Tax (5%):                              ₹    11.00
//! ==================================================
//! TOTAL AMOUNT:                          ₹   231.00
//! ==================================================
//! ...
//! ```

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{display_name, LineItem, Order, TaxRate};

/// Receipt width in columns.
pub const RECEIPT_WIDTH: usize = 50;

/// Longest item name printed as-is; longer names are cut.
const MAX_NAME_CHARS: usize = 18;
const TRUNCATED_NAME_CHARS: usize = 15;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Store Info
// =============================================================================

/// Header details printed on every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        StoreInfo {
            name: "Green Valley Vegetable Market".to_string(),
            address: "123 Market Street, Fresh City".to_string(),
            phone: "+91-9876543210".to_string(),
        }
    }
}

// =============================================================================
// Receipt Types
// =============================================================================

/// A rendered receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    pub order_id: String,
    pub text: String,
}

impl Receipt {
    /// `receipt_<orderId>.txt`
    pub fn file_name(&self) -> String {
        receipt_file_name(&self.order_id)
    }
}

fn receipt_file_name(order_id: &str) -> String {
    format!("receipt_{}.txt", order_id)
}

/// Money totals for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptTotals {
    pub subtotal: Money,
    pub tax: Money,
    /// `subtotal + tax`
    pub total: Money,
}

/// Headline figures for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptSummary {
    pub order_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub item_count: usize,
    pub total_quantity: Quantity,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    /// Total with currency symbol (`₹231.00`).
    pub formatted_total: String,
}

#[derive(Serialize)]
struct ReceiptExport<'a> {
    store_info: &'a StoreInfo,
    order_info: &'a Order,
    receipt_generated_at: String,
    tax_rate: f64,
}

// =============================================================================
// Formatter
// =============================================================================

/// Turns orders into receipt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFormatter {
    store: StoreInfo,
    tax_rate: TaxRate,
    currency_symbol: String,
}

impl ReceiptFormatter {
    pub fn new(store: StoreInfo, tax_rate: TaxRate, currency_symbol: impl Into<String>) -> Self {
        ReceiptFormatter {
            store,
            tax_rate,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn store(&self) -> &StoreInfo {
        &self.store
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Subtotal, tax and total for a set of lines.
    pub fn totals(&self, items: &[LineItem]) -> ReceiptTotals {
        let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
        let tax = subtotal.calculate_tax(self.tax_rate);
        ReceiptTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn summarize(&self, order: &Order) -> ReceiptSummary {
        let totals = self.totals(&order.items);
        ReceiptSummary {
            order_id: order.order_id.clone(),
            created_at: order.created_at,
            item_count: order.item_count(),
            total_quantity: order.total_quantity(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            formatted_total: totals.total.format_with(&self.currency_symbol),
        }
    }

    /// Renders the full receipt for an order.
    pub fn receipt(&self, order: &Order) -> Receipt {
        Receipt {
            order_id: order.order_id.clone(),
            text: self.render(order),
        }
    }

    /// Renders the full receipt text, stamped with the current time.
    pub fn render(&self, order: &Order) -> String {
        self.render_at(order, Local::now())
    }

    /// Renders the full receipt text with an explicit generation time.
    ///
    /// Never fails: a formatting error yields a one-line error receipt.
    pub fn render_at(&self, order: &Order, generated_at: DateTime<Local>) -> String {
        self.write_receipt(order, generated_at)
            .unwrap_or_else(|e| format!("Error generating receipt: {}", e))
    }

    fn write_receipt(&self, order: &Order, generated_at: DateTime<Local>) -> Result<String, fmt::Error> {
        let sym = &self.currency_symbol;
        let heavy = "=".repeat(RECEIPT_WIDTH);
        let light = "-".repeat(RECEIPT_WIDTH);
        let totals = self.totals(&order.items);
        let mut out = String::new();

        // Header
        writeln!(out, "{}", heavy)?;
        writeln!(out, "{:^50}", self.store.name)?;
        writeln!(out, "{:^50}", self.store.address)?;
        writeln!(out, "Phone: {:^44}", self.store.phone)?;
        writeln!(out, "{}", heavy)?;
        writeln!(out)?;

        writeln!(out, "Order ID: {}", order.order_id)?;
        writeln!(
            out,
            "Date & Time: {}",
            order.created_at.with_timezone(&Local).format(TIME_FORMAT)
        )?;
        writeln!(out, "Cashier: Vendor System")?;
        writeln!(out)?;

        // Items
        writeln!(out, "{}", light)?;
        writeln!(out, "{:<20} {:<8} {:<8} {:<12}", "ITEM", "QTY", "RATE", "AMOUNT")?;
        writeln!(out, "{}", light)?;
        for item in &order.items {
            writeln!(
                out,
                "{:<20} {:<8} {:<8} {:<12}",
                receipt_name(&item.name),
                item.quantity.to_kg_string(),
                item.unit_price.to_whole_rupees_string(),
                item.subtotal.to_decimal_string()
            )?;
        }
        writeln!(out, "{}", light)?;

        // Totals
        let tax_label = format!("Tax ({}):", self.tax_rate.label());
        writeln!(out, "{:<38} {}{:>9}", "Subtotal:", sym, totals.subtotal.to_decimal_string())?;
        writeln!(out, "{:<38} {}{:>9}", tax_label, sym, totals.tax.to_decimal_string())?;
        writeln!(out, "{}", heavy)?;
        writeln!(out, "{:<38} {}{:>9}", "TOTAL AMOUNT:", sym, totals.total.to_decimal_string())?;
        writeln!(out, "{}", heavy)?;
        writeln!(out)?;

        // Payment
        let method = order.payment_method.map(|m| m.label()).unwrap_or("Cash");
        writeln!(out, "{:<20} {}", "Payment Method:", method)?;
        if let Some(txn) = &order.transaction_id {
            writeln!(out, "{:<20} {}", "Transaction ID:", txn)?;
        }
        writeln!(out, "{:<20} {}", "Amount Paid:", totals.total.format_with(sym))?;
        writeln!(out, "{:<20} {}", "Change:", Money::zero().format_with(sym))?;
        writeln!(out)?;

        // Footer
        writeln!(out, "{}", light)?;
        writeln!(out, "Thank you for shopping with us!")?;
        writeln!(out, "Fresh vegetables, fresh prices!")?;
        writeln!(out)?;
        writeln!(out, "* Please check your items before leaving")?;
        writeln!(out, "* No returns on perishable items")?;
        writeln!(out, "* Have a great day!")?;
        writeln!(out)?;
        writeln!(out, "Receipt generated on: {}", generated_at.format(TIME_FORMAT))?;
        write!(out, "{}", heavy)?;

        Ok(out)
    }

    /// Short "Items purchased" receipt.
    pub fn render_simple(&self, order: &Order) -> String {
        self.render_simple_at(order, Local::now())
    }

    pub fn render_simple_at(&self, order: &Order, generated_at: DateTime<Local>) -> String {
        let sym = &self.currency_symbol;
        let mut lines = vec![
            format!("Order ID: {}", order.order_id),
            format!("Date: {}", generated_at.format(TIME_FORMAT)),
            String::new(),
            "Items purchased:".to_string(),
        ];
        for item in &order.items {
            lines.push(format!(
                "- {}: {} × {} = {}",
                display_name(&item.name),
                item.quantity,
                item.unit_price.format_with(sym),
                item.subtotal.format_with(sym)
            ));
        }
        let total: Money = order.items.iter().map(|i| i.subtotal).sum();
        lines.push(String::new());
        lines.push(format!("Total Amount: {}", total.format_with(sym)));
        lines.push(String::new());
        lines.push("Thank you for your purchase!".to_string());
        lines.join("\n")
    }

    /// JSON document with store details, the order and the tax rate.
    pub fn export_json(&self, order: &Order) -> CoreResult<String> {
        let export = ReceiptExport {
            store_info: &self.store,
            order_info: order,
            receipt_generated_at: Local::now().to_rfc3339(),
            tax_rate: self.tax_rate.fraction(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// File name a receipt is saved under.
    pub fn file_name(order: &Order) -> String {
        receipt_file_name(&order.order_id)
    }
}

impl Default for ReceiptFormatter {
    fn default() -> Self {
        ReceiptFormatter::new(
            StoreInfo::default(),
            TaxRate::default(),
            crate::DEFAULT_CURRENCY_SYMBOL,
        )
    }
}

/// Title-cased name cut to fit the ITEM column.
fn receipt_name(raw: &str) -> String {
    let name = display_name(raw);
    if name.chars().count() > MAX_NAME_CHARS {
        let mut cut: String = name.chars().take(TRUNCATED_NAME_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        name
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, LineItemId, OrderStatus, PaymentMethod};
    use chrono::TimeZone;

    fn line(seq: u64, name: &str, kg: i64, rupees: i64, category: Category) -> LineItem {
        LineItem::new(
            LineItemId::from_sequence(seq),
            name,
            Quantity::from_kg(kg),
            Money::from_rupees(rupees),
            category,
        )
    }

    fn sample_order() -> Order {
        let items = vec![
            line(1, "Tomato", 2, 50, Category::FruityVeges),
            line(2, "Onion", 3, 40, Category::Ground),
        ];
        Order {
            order_id: "ORD_20260101_120000_0001".to_string(),
            total_amount: items.iter().map(|i| i.subtotal).sum(),
            items,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
            payment_method: None,
            transaction_id: None,
            status: OrderStatus::Queued,
        }
    }

    fn generated() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 1, 12, 5, 0).unwrap()
    }

    #[test]
    fn test_totals() {
        let order = sample_order();
        let totals = ReceiptFormatter::default().totals(&order.items);

        assert_eq!(totals.subtotal, Money::from_rupees(220));
        assert_eq!(totals.tax, Money::from_rupees(11));
        assert_eq!(totals.total, Money::from_rupees(231));
    }

    #[test]
    fn test_render_layout() {
        let text = ReceiptFormatter::default().render_at(&sample_order(), generated());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], format!("{:^50}", "Green Valley Vegetable Market"));
        assert_eq!(lines[3], format!("Phone: {:^44}", "+91-9876543210"));
        assert_eq!(lines[6], "Order ID: ORD_20260101_120000_0001");
        assert_eq!(lines[8], "Cashier: Vendor System");
        assert_eq!(lines[11], "ITEM                 QTY      RATE     AMOUNT      ");
        assert_eq!(lines[13], "Tomato               2.0      50       100.00      ");
        assert_eq!(lines[14], "Onion                3.0      40       120.00      ");

        assert!(text.contains("Subtotal:                              ₹   220.00"));
        assert!(text.contains("Tax (5%):                              ₹    11.00"));
        assert!(text.contains("TOTAL AMOUNT:                          ₹   231.00"));
        assert!(text.contains(&format!("{:<20} Cash", "Payment Method:")));
        assert!(text.contains(&format!("{:<20} ₹231.00", "Amount Paid:")));
        assert!(text.contains(&format!("{:<20} ₹0.00", "Change:")));
        assert!(!text.contains("Transaction ID:"));
        assert!(text.contains("Receipt generated on: 2026-01-01 12:05:00"));
        assert_eq!(*lines.last().unwrap(), "=".repeat(50));
    }

    #[test]
    fn test_item_row_rounds_ties_to_even() {
        let mut order = sample_order();
        order.items = vec![LineItem::new(
            LineItemId::from_sequence(1),
            "Okra",
            Quantity::from_grams(1250),
            Money::from_paise(4850),
            Category::FruityVeges,
        )];

        let text = ReceiptFormatter::default().render_at(&order, generated());
        let lines: Vec<&str> = text.lines().collect();

        // 1.25 kg × ₹48.50 = ₹60.625
        assert_eq!(lines[13], "Okra                 1.2      48       60.63       ");
    }

    #[test]
    fn test_totals_for_order_without_items() {
        let mut order = sample_order();
        order.items.clear();
        order.total_amount = Money::zero();

        let formatter = ReceiptFormatter::default();
        let totals = formatter.totals(&order.items);
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.subtotal + totals.tax, totals.total);

        let summary = formatter.summarize(&order);
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.total_quantity, Quantity::zero());
        assert_eq!(summary.subtotal + summary.tax, summary.total);
        assert_eq!(summary.formatted_total, "₹0.00");
    }

    #[test]
    fn test_render_shows_payment_details() {
        let mut order = sample_order();
        order.payment_method = Some(PaymentMethod::Upi);
        order.transaction_id = Some("TXN_1_abc".to_string());

        let text = ReceiptFormatter::default().render_at(&order, generated());
        assert!(text.contains(&format!("{:<20} UPI", "Payment Method:")));
        assert!(text.contains(&format!("{:<20} TXN_1_abc", "Transaction ID:")));
    }

    #[test]
    fn test_long_names_are_cut() {
        assert_eq!(receipt_name("sweet_potato"), "Sweet Potato");
        assert_eq!(receipt_name("Extra_Long_Vegetable_Name"), "Extra Long Vege...");
        assert_eq!(receipt_name("Eighteen_Chars_Abc"), "Eighteen Chars Abc");
    }

    #[test]
    fn test_custom_tax_rate_label() {
        let formatter = ReceiptFormatter::new(StoreInfo::default(), TaxRate::from_bps(1250), "Rs.");
        let text = formatter.render_at(&sample_order(), generated());

        assert!(text.contains("Tax (12.5%):"));
        assert!(text.contains("Rs.    27.50"));
    }

    #[test]
    fn test_summarize() {
        let summary = ReceiptFormatter::default().summarize(&sample_order());

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, Quantity::from_kg(5));
        assert_eq!(summary.subtotal + summary.tax, summary.total);
        assert_eq!(summary.formatted_total, "₹231.00");
    }

    #[test]
    fn test_render_simple() {
        let text = ReceiptFormatter::default().render_simple_at(&sample_order(), generated());

        assert!(text.starts_with("Order ID: ORD_20260101_120000_0001\nDate: 2026-01-01 12:05:00"));
        assert!(text.contains("- Tomato: 2.0 kg × ₹50.00 = ₹100.00"));
        assert!(text.contains("Total Amount: ₹220.00"));
        assert!(text.ends_with("Thank you for your purchase!"));
    }

    #[test]
    fn test_export_json() {
        let json = ReceiptFormatter::default().export_json(&sample_order()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["store_info"]["name"], "Green Valley Vegetable Market");
        assert_eq!(value["order_info"]["order_id"], "ORD_20260101_120000_0001");
        assert_eq!(value["tax_rate"], 0.05);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            ReceiptFormatter::file_name(&sample_order()),
            "receipt_ORD_20260101_120000_0001.txt"
        );

        let receipt = ReceiptFormatter::default().receipt(&sample_order());
        assert_eq!(receipt.file_name(), "receipt_ORD_20260101_120000_0001.txt");
    }
}
