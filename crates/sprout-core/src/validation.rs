//! # Validation Module
//!
//! Parsing and validation of raw menu input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu prompt loop (apps/register)                             │
//! │  ├── Reads a line                                                      │
//! │  └── THIS MODULE: parse + validate, re-prompt on Err                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Inventory / Ledger (sprout-core)                             │
//! │  ├── Stock never negative                                              │
//! │  └── Ledger quantities always positive                                 │
//! │                                                                         │
//! │  A ValidationError never reaches layer 2: the prompt loop retries.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sprout_core::validation::{parse_price, parse_quantity, parse_yes_no};
//!
//! assert_eq!(parse_quantity("5").unwrap(), 5);
//! assert_eq!(parse_price("4.50").unwrap().cents(), 450);
//! assert_eq!(parse_yes_no("Y"), Some(true));
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductName;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates and normalizes a product name.
///
/// ## Example
/// ```rust
/// use sprout_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("oat milk").unwrap().as_str(), "Oat Milk");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<ProductName> {
    ProductName::parse(name)
}

/// Parses a yes/no answer.
///
/// Accepts `y`, `yes`, `n`, `no` in any case; anything else is `None` so the
/// caller can ask again.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Parses a positive whole quantity.
///
/// ## User Workflow
/// ```text
/// Quantity: "abc"  → InvalidFormat, ask again
/// Quantity: "0"    → MustBePositive, ask again
/// Quantity: "2.5"  → InvalidFormat, ask again
/// Quantity: "5"    → Ok(5)
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let qty: i64 = input.trim().parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "expected a whole number".to_string(),
    })?;

    validate_quantity(qty)?;
    Ok(qty)
}

/// Validates a price.
///
/// ## Rules
/// - Must be positive (> 0); the shop does not stock free items
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Parses a positive decimal price.
///
/// ## Example
/// ```rust
/// use sprout_core::validation::parse_price;
///
/// assert_eq!(parse_price("2").unwrap().cents(), 200);
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let price = Money::parse_decimal(input)?;
    validate_price(price)?;
    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================
