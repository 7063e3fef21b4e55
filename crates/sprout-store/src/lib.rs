//! # sprout-store: Durable State for the Sprout Register
//!
//! This crate owns every file the register reads or writes, and the
//! [`Register`] facade that ties the pure inventory and ledger from
//! `sprout-core` to those files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sprout Register Data Flow                        │
//! │                                                                         │
//! │  Menu command (add / sale / list / profits)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sprout-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Register    │    │ JsonDocument  │    │RegisterConfig│  │   │
//! │  │   │ (register.rs) │───►│ (document.rs) │    │ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Inventory     │    │ load / save   │    │ TOML + env   │  │   │
//! │  │   │ Ledger        │    │ recovery      │    │ paths        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  warehouse_register.json   (+ optional ledger.json)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`register`] - The facade consumed by the menu
//! - [`document`] - Pretty JSON files with corrupt-file recovery
//! - [`config`] - File paths and display settings
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sprout_core::{Money, ProductName, ProductRecord};
//! use sprout_store::{Register, RegisterConfig};
//!
//! # fn main() -> Result<(), sprout_store::StoreError> {
//! let config = RegisterConfig::load(None)?;
//! let (mut register, _outcome) = Register::open(config)?;
//!
//! let record = ProductRecord::new(
//!     ProductName::parse("tofu").unwrap(),
//!     10,
//!     Money::from_cents(200),
//!     Money::from_cents(400),
//! );
//! register.add_product(&record)?;
//!
//! let line = register.sell(&record.name, 3)?;
//! println!("{}", register.report_transaction(&[line]));
//! register.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod document;
pub mod error;
pub mod register;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DisplaySettings, RegisterConfig, StorageSettings};
pub use document::{JsonDocument, LoadOutcome, Loaded};
pub use error::{StoreError, StoreResult};
pub use register::Register;
