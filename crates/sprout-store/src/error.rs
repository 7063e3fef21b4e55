//! # Store Error Types
//!
//! Error types for file, config and register operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / toml::de::Error                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path and categorization           │
//! │       │                                                                 │
//! │       ├── is_rejection()  → menu says why, user retries or aborts      │
//! │       │                                                                 │
//! │       └── otherwise       → logged, reported, process keeps running    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupt state file is *not* an error: [`crate::document`] recovers from it
//! and reports [`crate::LoadOutcome::Recovered`].

use std::path::PathBuf;

use sprout_core::CoreError;
use thiserror::Error;

/// Store and register errors.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // File Errors
    // =========================================================================
    /// Reading, writing or renaming a file failed.
    ///
    /// ## When This Occurs
    /// - Directory doesn't exist or isn't writable
    /// - Disk full
    /// - Path points at a directory
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing state to JSON failed.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The TOML config file could not be parsed.
    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config parsed but holds values the register cannot use.
    #[error("Invalid register configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// The inventory or ledger refused the operation. Nothing was changed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this is a domain rejection rather than a failure.
    ///
    /// ## Rejections
    /// - Unknown product
    /// - Selling more than is in stock
    /// - Product without a sell price
    ///
    /// The menu treats these as a normal "try again?" case.
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Core(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::ConfigParse { .. } | StoreError::InvalidConfig(_)
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
