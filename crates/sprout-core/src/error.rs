//! # Error Types
//!
//! Domain-specific error types for sprout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sprout-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rejections (oversell, overflow)         │
//! │  └── ValidationError  - Raw input failures (empty name, bad number)    │
//! │                                                                         │
//! │  sprout-store errors (separate crate)                                  │
//! │  └── StoreError       - File, config and serialization failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → menu message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. None of these errors is fatal to the process

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// A `CoreError` always means the requested mutation was refused and nothing
/// was changed. The presentation layer decides whether to retry or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product is not present in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to complete a sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Sell Tofu (qty: 100)
    ///      │
    ///      ▼
    /// Check stock: available=7
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Tofu", available: 7, requested: 100 }
    ///      │
    ///      ▼
    /// Menu shows: "You are selling a quantity of Tofu not available"
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// A quantity that must be positive (or non-negative) was not.
    #[error("Invalid quantity for {product}: {quantity}")]
    InvalidQuantity { product: String, quantity: i64 },

    /// The product has no recorded sell price, so it cannot be sold.
    #[error("{product} has no {field} recorded")]
    PriceNotSet { product: String, field: &'static str },

    /// A stock level or amount would not fit in 64 bits.
    #[error("Amount too large for {product}")]
    Overflow { product: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are produced while parsing raw text from the menu and never reach the
/// inventory or ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., "abc" for a quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "Tofu".to_string(),
            available: 7,
            requested: 100,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Tofu: available 7, requested 100"
        );

        let err = CoreError::PriceNotSet {
            product: "Tempeh".to_string(),
            field: "sell price",
        };
        assert_eq!(err.to_string(), "Tempeh has no sell price recorded");

        let err = CoreError::Overflow {
            product: "Tofu".to_string(),
        };
        assert_eq!(err.to_string(), "Amount too large for Tofu");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
