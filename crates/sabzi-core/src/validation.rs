//! # Validation Module
//!
//! Input validation for Sabzi POS. Every failure here surfaces to callers
//! as an InvalidInput outcome.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │  └── Parses the weight / price the vendor typed                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: business rules                                           │
//! │  ├── weights > 0 and ≤ 999 kg                                          │
//! │  ├── prices ≥ 0                                                        │
//! │  └── card / CVV / UPI formats                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  InventoryLedger: stock never negative, names unique                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sabzi_core::quantity::Quantity;
//! use sabzi_core::validation::{validate_quantity, validate_vegetable_name};
//!
//! validate_vegetable_name("Sweet_Potato").unwrap();
//! validate_quantity(Quantity::from_grams(2500)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum card number length accepted by the simulated gateway.
pub const MIN_CARD_NUMBER_LEN: usize = 12;

/// Exact CVV length.
pub const CVV_LEN: usize = 3;

/// Highest per-kilogram price accepted (₹10 lakh).
pub const MAX_UNIT_PRICE: Money = Money::from_rupees(1_000_000);

/// Highest stock level a ledger record may hold.
pub const MAX_STOCK_LEVEL: Quantity = Quantity::from_kg(1_000_000);

// =============================================================================
// String Validators
// =============================================================================

/// Validates a vegetable name.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
pub fn validate_vegetable_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a search query. Empty is allowed and matches everything.
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item or stock movement weight.
///
/// ## Rules
/// - Must be positive (> 0 g)
/// - Must not exceed [`MAX_ITEM_QUANTITY`] (999 kg)
pub fn validate_quantity(quantity: Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity (grams)".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY.grams(),
        });
    }

    Ok(())
}

/// Validates a stock movement weight (positive, no upper bound).
///
/// Restocking a cancelled order may exceed the per-line limit when the
/// order held the same vegetable on several lines.
pub fn validate_movement(quantity: Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a per-kilogram price in paise. Zero is allowed.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.paise(),
        });
    }

    Ok(())
}

/// Validates a stored stock level in grams. Zero is allowed.
pub fn validate_stock_level(stock: Quantity) -> ValidationResult<()> {
    if stock.is_negative() || stock > MAX_STOCK_LEVEL {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK_LEVEL.grams(),
        });
    }

    Ok(())
}

/// Validates a payment amount.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in the cart.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Payment Detail Validators
// =============================================================================

/// Card numbers need at least [`MIN_CARD_NUMBER_LEN`] characters.
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    if card_number.chars().count() < MIN_CARD_NUMBER_LEN {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: format!("must be at least {} characters", MIN_CARD_NUMBER_LEN),
        });
    }
    Ok(())
}

pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    if cvv.chars().count() != CVV_LEN {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: format!("must be exactly {} characters", CVV_LEN),
        });
    }
    Ok(())
}

/// UPI ids look like `name@bank`.
pub fn validate_upi_id(upi_id: &str) -> ValidationResult<()> {
    if !upi_id.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "upi id".to_string(),
            reason: "must contain '@'".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vegetable_name() {
        assert!(validate_vegetable_name("Potato").is_ok());
        assert!(validate_vegetable_name("Sweet_Potato").is_ok());
        assert!(validate_vegetable_name("").is_err());
        assert!(validate_vegetable_name("   ").is_err());
        assert!(validate_vegetable_name(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_grams(1)).is_ok());
        assert!(validate_quantity(Quantity::from_kg(999)).is_ok());

        assert!(validate_quantity(Quantity::zero()).is_err());
        assert!(validate_quantity(Quantity::from_grams(-500)).is_err());
        assert!(validate_quantity(Quantity::from_kg(1000)).is_err());
    }

    #[test]
    fn test_validate_movement_has_no_upper_bound() {
        assert!(validate_movement(Quantity::from_kg(5000)).is_ok());
        assert!(validate_movement(Quantity::zero()).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_rupees(50)).is_ok());
        assert!(validate_price(Money::from_paise(-1)).is_err());
        assert!(validate_price(MAX_UNIT_PRICE).is_ok());
        assert!(validate_price(MAX_UNIT_PRICE + Money::from_paise(1)).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(Quantity::zero()).is_ok());
        assert!(validate_stock_level(MAX_STOCK_LEVEL).is_ok());
        assert!(validate_stock_level(MAX_STOCK_LEVEL + Quantity::from_grams(1)).is_err());
        assert!(validate_stock_level(Quantity::from_grams(-1)).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(500).is_ok());
        assert!(validate_tax_rate_bps(10_000).is_ok());
        assert!(validate_tax_rate_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }

    #[test]
    fn test_payment_details() {
        assert!(validate_card_number("4111111111111111").is_ok());
        assert!(validate_card_number("41111").is_err());
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("1234").is_err());
        assert!(validate_upi_id("vendor@okbank").is_ok());
        assert!(validate_upi_id("vendor").is_err());
    }
}
