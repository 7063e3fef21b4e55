//! # sprout-core: Pure Business Logic for the Sprout Register
//!
//! This crate is the **heart** of the shop register. It holds the stock
//! arithmetic, the cost/revenue ledger and the input rules as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sprout Register Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/register (interactive menu)                │   │
//! │  │        add ──► list ──► sale ──► profits ──► exit               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductRecord / SaleLine               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            sprout-store (Register facade, JSON files)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sprout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │  ledger   │  │transaction│  │ validation│  │   │
//! │  │   │ Inventory │  │  Ledger   │  │SaleSession│  │  parsing  │  │   │
//! │  │   │  Entry    │  │LedgerEvent│  │ Summary   │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO STDIN • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product names and product records
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`inventory`] - Stock levels and prices per product
//! - [`ledger`] - Append-only cost and revenue history
//! - [`transaction`] - Per-session sale summaries
//! - [`report`] - Read-only report values
//! - [`validation`] - Parsing and validation of raw input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sprout_core::{Inventory, Ledger, Money, ProductName};
//!
//! let mut inventory = Inventory::new();
//! let mut ledger = Ledger::new();
//! let tofu = ProductName::parse("tofu").unwrap();
//!
//! let outcome = inventory
//!     .upsert_on_purchase(&tofu, 10, Money::from_cents(200), Money::from_cents(400))
//!     .unwrap();
//! if let Some(bought) = outcome.purchased_quantity() {
//!     ledger.record_cost(&tofu, bought, Money::from_cents(200)).unwrap();
//! }
//!
//! assert_eq!(inventory.get(&tofu).unwrap().quantity, 10);
//! assert_eq!(ledger.total_costs(), Money::from_cents(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod report;
pub mod transaction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{Inventory, InventoryEntry, InventoryListing, InventoryRow, PurchaseOutcome};
pub use ledger::{EventKind, Ledger, LedgerEvent};
pub use money::Money;
pub use report::{CostReport, ProfitReport};
pub use transaction::{SaleLine, SaleSession, TransactionSummary};
pub use types::{ProductName, ProductRecord};
