//! # Inventory Module
//!
//! Stock levels and prices per product.
//!
//! ## Mutation Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Mutations                                  │
//! │                                                                         │
//! │  upsert_on_purchase(name, incoming, buy, sell)                         │
//! │  ├── absent  → insert { incoming, buy, sell }, delta = incoming        │
//! │  ├── present → delta    = incoming - existing                          │
//! │  │             quantity = existing + incoming                          │
//! │  │             prices   filled only where unset                        │
//! │  └── sum > i64 → Overflow             (no change)                      │
//! │                                                                         │
//! │  apply_sale(name, qty)                                                 │
//! │  ├── absent        → ProductNotFound      (no change)                  │
//! │  ├── qty > stock   → InsufficientStock    (no change)                  │
//! │  ├── no sell price → PriceNotSet          (no change)                  │
//! │  ├── total > i64   → Overflow             (no change)                  │
//! │  └── otherwise     → stock -= qty, SaleLine returned                   │
//! │                                                                         │
//! │  set_quantity(name, qty)   authoritative overwrite (qty >= 0)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `quantity >= 0` for every entry, at all times. Every path that could break
//! it checks before touching the entry, and a file that breaks it does not
//! load. Neither does a file with two keys that normalize to the same name
//! (`"tofu"` and `"Tofu"`).

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::transaction::SaleLine;
use crate::types::ProductName;

// =============================================================================
// Inventory Entry
// =============================================================================

/// Durable per-product state.
///
/// Prices are optional because an older or hand-edited register file may lack
/// them; the menu asks for them the next time the product is restocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryFile")]
pub struct InventoryEntry {
    pub quantity: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Money>,
}

impl InventoryEntry {
    /// True when both prices are recorded.
    pub fn has_prices(&self) -> bool {
        self.buy_price.is_some() && self.sell_price.is_some()
    }
}

/// An entry as written in the file, before its values are checked.
#[derive(Deserialize)]
struct EntryFile {
    quantity: i64,
    #[serde(default)]
    buy_price: Option<Money>,
    #[serde(default)]
    sell_price: Option<Money>,
}

impl TryFrom<EntryFile> for InventoryEntry {
    type Error = ValidationError;

    fn try_from(raw: EntryFile) -> Result<Self, Self::Error> {
        if raw.quantity < 0 {
            return Err(ValidationError::invalid_format(
                "quantity",
                format!("negative stock level {}", raw.quantity),
            ));
        }
        for (field, price) in [("buy price", raw.buy_price), ("sell price", raw.sell_price)] {
            if price.is_some_and(|p| p.is_negative()) {
                return Err(ValidationError::invalid_format(field, "negative price"));
            }
        }

        Ok(InventoryEntry {
            quantity: raw.quantity,
            buy_price: raw.buy_price,
            sell_price: raw.sell_price,
        })
    }
}

// =============================================================================
// Purchase Outcome
// =============================================================================

/// Result of [`Inventory::upsert_on_purchase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseOutcome {
    /// Stock level after the call.
    pub quantity: i64,
    /// `incoming - existing` (or `incoming` for a new product). May be zero
    /// or negative.
    pub delta: i64,
    /// Whether the product was created by this call.
    pub created: bool,
}

impl PurchaseOutcome {
    /// The number of units to charge as a cost event, if any.
    pub fn purchased_quantity(&self) -> Option<i64> {
        (self.delta > 0).then_some(self.delta)
    }
}

// =============================================================================
// Listing
// =============================================================================

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub name: ProductName,
    pub quantity: i64,
    pub sell_price: Option<Money>,
}

/// Read-only view of the inventory for the `list` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryListing {
    /// No products at all; reported as a message rather than an empty table.
    Empty,
    /// Rows ordered by product name.
    Rows(Vec<InventoryRow>),
}

// =============================================================================
// Inventory
// =============================================================================

/// Mapping from product name to stock state.
///
/// Serializes as a plain JSON object keyed by product name, which is exactly
/// the warehouse register file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: BTreeMap<ProductName, InventoryEntry>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a product.
    pub fn get(&self, name: &ProductName) -> Option<&InventoryEntry> {
        self.entries.get(name)
    }

    /// True if the product is known.
    pub fn contains(&self, name: &ProductName) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no products are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a purchase.
    ///
    /// ## Quantity Arithmetic
    /// `incoming_quantity` is read as the caller's *new total* when computing
    /// the delta, but it is *added* to the existing stock when storing:
    ///
    /// ```text
    /// existing = 10, incoming = 15
    ///   delta    = 15 - 10 = 5    → 5 units charged as cost
    ///   quantity = 10 + 15 = 25   → stored
    /// ```
    ///
    /// The register has always behaved this way and existing files depend on
    /// it, so it is kept as is.
    ///
    /// ## Prices
    /// A stored price is never replaced; only a missing one is filled in.
    ///
    /// ## Errors
    /// `InvalidQuantity` for a negative `incoming_quantity`, `Overflow` when
    /// the stored total would not fit. Either way nothing changes.
    pub fn upsert_on_purchase(
        &mut self,
        name: &ProductName,
        incoming_quantity: i64,
        buy_price: Money,
        sell_price: Money,
    ) -> CoreResult<PurchaseOutcome> {
        let outcome = self.plan_purchase(name, incoming_quantity)?;

        let entry = self.entries.entry(name.clone()).or_default();
        entry.quantity = outcome.quantity;
        entry.buy_price.get_or_insert(buy_price);
        entry.sell_price.get_or_insert(sell_price);

        Ok(outcome)
    }

    /// What [`Inventory::upsert_on_purchase`] would do, without doing it.
    pub fn plan_purchase(
        &self,
        name: &ProductName,
        incoming_quantity: i64,
    ) -> CoreResult<PurchaseOutcome> {
        if incoming_quantity < 0 {
            return Err(CoreError::InvalidQuantity {
                product: name.to_string(),
                quantity: incoming_quantity,
            });
        }

        let Some(entry) = self.entries.get(name) else {
            return Ok(PurchaseOutcome {
                quantity: incoming_quantity,
                delta: incoming_quantity,
                created: true,
            });
        };

        let overflow = || CoreError::Overflow {
            product: name.to_string(),
        };
        let delta = incoming_quantity
            .checked_sub(entry.quantity)
            .ok_or_else(overflow)?;
        let quantity = entry
            .quantity
            .checked_add(incoming_quantity)
            .ok_or_else(overflow)?;

        Ok(PurchaseOutcome {
            quantity,
            delta,
            created: false,
        })
    }

    /// Sells `quantity` units of a product.
    ///
    /// Every rejection leaves the inventory untouched.
    pub fn apply_sale(&mut self, name: &ProductName, quantity: i64) -> CoreResult<SaleLine> {
        let line = self.quote_sale(name, quantity)?;

        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
        entry.quantity -= line.quantity;

        Ok(line)
    }

    /// Checks a sale and prices it without touching stock.
    pub fn quote_sale(&self, name: &ProductName, quantity: i64) -> CoreResult<SaleLine> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                product: name.to_string(),
                quantity,
            });
        }

        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;

        if quantity > entry.quantity {
            return Err(CoreError::InsufficientStock {
                product: name.to_string(),
                available: entry.quantity,
                requested: quantity,
            });
        }

        let unit_price = entry.sell_price.ok_or_else(|| CoreError::PriceNotSet {
            product: name.to_string(),
            field: "sell price",
        })?;

        if unit_price.checked_multiply_quantity(quantity).is_none() {
            return Err(CoreError::Overflow {
                product: name.to_string(),
            });
        }

        Ok(SaleLine::new(name.clone(), quantity, unit_price))
    }

    /// Overwrites a product's stock level.
    pub fn set_quantity(&mut self, name: &ProductName, quantity: i64) -> CoreResult<()> {
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity {
                product: name.to_string(),
                quantity,
            });
        }

        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
        entry.quantity = quantity;
        Ok(())
    }

    /// Builds the listing shown by the `list` command.
    pub fn snapshot(&self) -> InventoryListing {
        if self.entries.is_empty() {
            return InventoryListing::Empty;
        }

        InventoryListing::Rows(
            self.entries
                .iter()
                .map(|(name, entry)| InventoryRow {
                    name: name.clone(),
                    quantity: entry.quantity,
                    sell_price: entry.sell_price,
                })
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(InventoryVisitor)
    }
}

struct InventoryVisitor;

impl<'de> Visitor<'de> for InventoryVisitor {
    type Value = Inventory;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from product name to stock entry")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Inventory, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((name, entry)) = map.next_entry::<ProductName, InventoryEntry>()? {
            if entries.contains_key(&name) {
                return Err(de::Error::custom(format_args!(
                    "product {name} appears more than once"
                )));
            }
            entries.insert(name, entry);
        }
        Ok(Inventory { entries })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
