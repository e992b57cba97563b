//! # Ledger Document
//!
//! The on-disk JSON shape of the ledger, grouped by category:
//!
//! ```json
//! {
//!   "Ground": {
//!     "Potato": { "price": 30.0, "stock": 45.0 }
//!   },
//!   "Fruity_Veges": {
//!     "Tomato": { "price": 50.0, "stock": 30.0 }
//!   }
//! }
//! ```
//!
//! Prices are rupees per kg, stock is kg. In memory the ledger is a flat
//! name-keyed registry; this module converts between the two and checks
//! the registry rules on the way in.

use std::collections::BTreeMap;
use std::str::FromStr;

use sabzi_core::validation::{validate_price, validate_stock_level, validate_vegetable_name};
use sabzi_core::{Category, Money, Quantity, StockRecord};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// One vegetable as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub price: f64,
    pub stock: f64,
}

/// Category key → vegetable name → entry.
pub type LedgerDocument = BTreeMap<String, BTreeMap<String, StockEntry>>;

/// Parses document text into stock records.
///
/// ## Errors
/// - `Serialization` if the text is not a document of the right shape
/// - `CorruptDocument` for unknown categories, or negative or oversized values
/// - `DuplicateName` if a name appears under two categories
pub fn parse(text: &str) -> LedgerResult<Vec<StockRecord>> {
    let document: LedgerDocument = serde_json::from_str(text)?;
    let mut records: Vec<StockRecord> = Vec::new();

    for (category_key, entries) in document {
        let category = Category::from_str(&category_key)
            .map_err(|e| LedgerError::CorruptDocument(e.to_string()))?;

        for (name, entry) in entries {
            let record = to_record(category, name, entry)?;
            if let Some(existing) = records.iter().find(|r| r.name == record.name) {
                return Err(LedgerError::DuplicateName {
                    name: record.name,
                    first: existing.category,
                    second: category,
                });
            }
            records.push(record);
        }
    }

    Ok(records)
}

fn to_record(category: Category, name: String, entry: StockEntry) -> LedgerResult<StockRecord> {
    let corrupt = |what: String| LedgerError::CorruptDocument(format!("{}: {}", name, what));

    validate_vegetable_name(&name).map_err(|e| corrupt(e.to_string()))?;

    let unit_price = Money::from_decimal_rupees(entry.price)
        .ok_or_else(|| corrupt("price is not a number".to_string()))?;
    validate_price(unit_price).map_err(|e| corrupt(e.to_string()))?;

    let stock = Quantity::from_decimal_kg(entry.stock)
        .ok_or_else(|| corrupt("stock is not a number".to_string()))?;
    validate_stock_level(stock).map_err(|e| corrupt(e.to_string()))?;

    Ok(StockRecord {
        name,
        category,
        unit_price,
        stock,
    })
}

/// Groups records back into the file shape.
pub fn from_records<'a>(records: impl IntoIterator<Item = &'a StockRecord>) -> LedgerDocument {
    let mut document = LedgerDocument::new();
    for record in records {
        document
            .entry(record.category.key().to_string())
            .or_default()
            .insert(
                record.name.clone(),
                StockEntry {
                    price: record.unit_price.as_decimal_rupees(),
                    stock: record.stock.as_decimal_kg(),
                },
            );
    }
    document
}

/// Renders records as pretty-printed document text.
pub fn render<'a>(records: impl IntoIterator<Item = &'a StockRecord>) -> LedgerResult<String> {
    Ok(serde_json::to_string_pretty(&from_records(records))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let text = r#"{
            "Ground": { "Potato": { "price": 30, "stock": 45.5 } },
            "Fruity_Veges": { "Tomato": { "price": 50.0, "stock": 30.0 } }
        }"#;

        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);

        let potato = records.iter().find(|r| r.name == "Potato").unwrap();
        assert_eq!(potato.category, Category::Ground);
        assert_eq!(potato.stock, Quantity::from_grams(45_500));

        let tomato = records.iter().find(|r| r.name == "Tomato").unwrap();
        assert_eq!(tomato.category, Category::FruityVeges);
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let text = r#"{ "Fruits": { "Apple": { "price": 100, "stock": 5 } } }"#;
        assert!(matches!(parse(text), Err(LedgerError::CorruptDocument(_))));
    }

    #[test]
    fn test_parse_rejects_negative_values() {
        let text = r#"{ "Ground": { "Potato": { "price": 30, "stock": -1 } } }"#;
        assert!(matches!(parse(text), Err(LedgerError::CorruptDocument(_))));

        let text = r#"{ "Ground": { "Potato": { "price": -30, "stock": 1 } } }"#;
        assert!(matches!(parse(text), Err(LedgerError::CorruptDocument(_))));
    }

    #[test]
    fn test_parse_rejects_oversized_values() {
        let text = r#"{ "Ground": { "Potato": { "price": 30, "stock": 1e300 } } }"#;
        assert!(matches!(parse(text), Err(LedgerError::CorruptDocument(_))));

        let text = r#"{ "Ground": { "Potato": { "price": 1e300, "stock": 1 } } }"#;
        assert!(matches!(parse(text), Err(LedgerError::CorruptDocument(_))));

        let text = r#"{ "Ground": { "Potato": { "price": 1000000, "stock": 1000000 } } }"#;
        assert_eq!(parse(text).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        let text = r#"{
            "Legumes": { "Peas": { "price": 90, "stock": 15 } },
            "Leafy": { "Peas": { "price": 90, "stock": 15 } }
        }"#;
        assert!(matches!(parse(text), Err(LedgerError::DuplicateName { .. })));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(parse("[1, 2, 3]"), Err(LedgerError::Serialization(_))));
        assert!(matches!(
            parse(r#"{ "Ground": { "Potato": { "price": 30 } } }"#),
            Err(LedgerError::Serialization(_))
        ));
    }

    #[test]
    fn test_render_groups_by_category() {
        let records = vec![StockRecord {
            name: "Bell_Pepper".to_string(),
            category: Category::FruityVeges,
            unit_price: Money::from_rupees(80),
            stock: Quantity::from_grams(14_500),
        }];

        let text = render(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["Fruity_Veges"]["Bell_Pepper"]["price"], 80.0);
        assert_eq!(value["Fruity_Veges"]["Bell_Pepper"]["stock"], 14.5);

        assert_eq!(parse(&text).unwrap(), records);
    }
}
