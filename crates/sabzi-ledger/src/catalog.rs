//! Default catalog used when no usable ledger file exists.

use sabzi_core::{Category, Money, Quantity, StockRecord};

/// `(category, name, price ₹/kg, stock kg)`
const DEFAULT_STOCK: &[(Category, &str, i64, i64)] = &[
    (Category::Ground, "Potato", 30, 50),
    (Category::Ground, "Onion", 40, 30),
    (Category::Ground, "Carrot", 60, 25),
    (Category::Ground, "Radish", 35, 20),
    (Category::Ground, "Beetroot", 50, 15),
    (Category::Ground, "Sweet_Potato", 45, 20),
    (Category::Ground, "Turnip", 25, 18),
    (Category::Leafy, "Spinach", 40, 15),
    (Category::Leafy, "Lettuce", 80, 10),
    (Category::Leafy, "Cabbage", 35, 25),
    (Category::Leafy, "Cauliflower", 50, 20),
    (Category::Leafy, "Broccoli", 120, 12),
    (Category::Leafy, "Mint", 60, 5),
    (Category::FruityVeges, "Tomato", 50, 30),
    (Category::FruityVeges, "Cucumber", 35, 25),
    (Category::FruityVeges, "Bell_Pepper", 80, 15),
    (Category::FruityVeges, "Eggplant", 45, 20),
    (Category::FruityVeges, "Okra", 60, 18),
    (Category::FruityVeges, "Zucchini", 70, 12),
    (Category::FruityVeges, "Pumpkin", 25, 40),
    (Category::Legumes, "Green_Beans", 70, 20),
    (Category::Legumes, "Peas", 90, 15),
    (Category::Legumes, "Green_Chili", 100, 10),
    (Category::Legumes, "Drumstick", 80, 12),
    (Category::Legumes, "Cluster_Beans", 60, 15),
];

/// The stock a fresh market opens with.
pub fn default_catalog() -> Vec<StockRecord> {
    DEFAULT_STOCK
        .iter()
        .map(|&(category, name, price, stock)| StockRecord {
            name: name.to_string(),
            category,
            unit_price: Money::from_rupees(price),
            stock: Quantity::from_kg(stock),
        })
        .collect()
}
