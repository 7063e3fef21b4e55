//! # Domain Types
//!
//! Product identity and the per-operation product record.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────┐                   │
//! │  │   ProductName   │        │    ProductRecord     │                   │
//! │  │  ─────────────  │        │  ──────────────────  │                   │
//! │  │  "Tofu Burger"  │◄───────│  name                │                   │
//! │  │  title-cased    │        │  quantity            │                   │
//! │  │  never empty    │        │  buy_price (Money)   │                   │
//! │  └─────────────────┘        │  sell_price (Money)  │                   │
//! │                             └──────────────────────┘                   │
//! │                                                                         │
//! │  The name is the only identity a product has: the inventory file is    │
//! │  keyed by it, and every ledger event carries a copy of it.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Name
// =============================================================================

/// A normalized product name.
///
/// ## Normalization
/// Input is trimmed and title-cased: the first letter of every run of letters
/// is upper-cased and the rest of the run lower-cased.
///
/// ```text
/// "tofu"          → "Tofu"
/// "  SOY milk "   → "Soy Milk"
/// "o'neil oats"   → "O'Neil Oats"
/// "3d printed"    → "3D Printed"
/// ```
///
/// Because every constructor goes through [`ProductName::parse`], two names
/// that differ only in case or surrounding whitespace always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Parses and normalizes a product name.
    ///
    /// ## Example
    /// ```rust
    /// use sprout_core::ProductName;
    ///
    /// let name = ProductName::parse("  tofu burger ").unwrap();
    /// assert_eq!(name.as_str(), "Tofu Burger");
    /// assert!(ProductName::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }
        Ok(ProductName(title_case(trimmed)))
    }

    /// Returns the normalized name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProductName::parse(&value)
    }
}

impl From<ProductName> for String {
    fn from(name: ProductName) -> Self {
        name.0
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// A product as described by one user operation.
///
/// The menu builds one of these per `add` (and at the end of a `sale`) and
/// hands it straight to the register; it is never stored as-is.
///
/// ## Quantity Semantics
/// For `add_product` the quantity is the *incoming total*, not the number of
/// units just bought. For `sell_product` it is the post-sale stock level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: ProductName,
    pub quantity: i64,
    pub buy_price: Money,
    pub sell_price: Money,
}

impl ProductRecord {
    /// Creates a new record.
    pub fn new(name: ProductName, quantity: i64, buy_price: Money, sell_price: Money) -> Self {
        ProductRecord {
            name,
            quantity,
            buy_price,
            sell_price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
