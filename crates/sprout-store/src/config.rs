//! # Register Configuration
//!
//! Where the register keeps its files and how money is shown.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority, applied by the binary)             │
//! │     --file stock.json  --ledger ledger.json                            │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SPROUT_INVENTORY_PATH=stock.json                                   │
//! │     SPROUT_LEDGER_PATH=ledger.json                                     │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/sprout/register.toml (Linux)                             │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     warehouse_register.json, no ledger file, "€"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # register.toml
//! [storage]
//! inventory_path = "warehouse_register.json"
//! ledger_path = "ledger.json"   # optional
//!
//! [display]
//! currency_symbol = "€"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use sprout_core::Money;

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding [`StorageSettings::inventory_path`].
pub const ENV_INVENTORY_PATH: &str = "SPROUT_INVENTORY_PATH";

/// Environment variable overriding [`StorageSettings::ledger_path`].
pub const ENV_LEDGER_PATH: &str = "SPROUT_LEDGER_PATH";

// =============================================================================
// Storage Settings
// =============================================================================

/// File locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// The warehouse register file.
    #[serde(default = "default_inventory_path")]
    pub inventory_path: PathBuf,

    /// Cost/revenue history file. When unset the ledger only lives for the
    /// current run.
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

fn default_inventory_path() -> PathBuf {
    PathBuf::from("warehouse_register.json")
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            inventory_path: default_inventory_path(),
            ledger_path: None,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete register configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`register.toml`); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(path = %path.display(), "Loading register config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
                config = toml::from_str(&contents)
                    .map_err(|source| StoreError::ConfigParse { path, source })?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(env);
        config.validate()?;

        Ok(config)
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> StoreResult<()> {
        if self.storage.inventory_path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "inventory_path must not be empty".into(),
            ));
        }

        if let Some(ref ledger) = self.storage.ledger_path {
            if ledger.as_os_str().is_empty() {
                return Err(StoreError::InvalidConfig(
                    "ledger_path must not be empty when set".into(),
                ));
            }
            if *ledger == self.storage.inventory_path {
                return Err(StoreError::InvalidConfig(format!(
                    "ledger_path and inventory_path both point at {}",
                    ledger.display()
                )));
            }
        }

        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env(ENV_INVENTORY_PATH) {
            debug!(path = %path, "Overriding inventory path from environment");
            self.storage.inventory_path = PathBuf::from(path);
        }

        if let Some(path) = env(ENV_LEDGER_PATH) {
            debug!(path = %path, "Overriding ledger path from environment");
            self.storage.ledger_path = (!path.is_empty()).then(|| PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sprout")
            .map(|dirs| dirs.config_dir().join("register.toml"))
    }

    /// Renders an amount with the configured currency symbol, e.g. `€4.00`.
    pub fn format_money(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.display.currency_symbol, Money::zero() - amount)
        } else {
            format!("{}{}", self.display.currency_symbol, amount)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RegisterConfig::default();
        assert_eq!(
            config.storage.inventory_path,
            PathBuf::from("warehouse_register.json")
        );
        assert_eq!(config.storage.ledger_path, None);
        assert_eq!(config.display.currency_symbol, "€");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config =
            RegisterConfig::load_with_env(Some(dir.path().join("register.toml")), env_from(&[]))
                .unwrap();
        assert_eq!(config, RegisterConfig::default());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("register.toml");
        std::fs::write(
            &path,
            "[storage]\ninventory_path = \"stock.json\"\nledger_path = \"ledger.json\"\n",
        )
        .unwrap();

        let config = RegisterConfig::load_with_env(Some(path), env_from(&[])).unwrap();

        assert_eq!(config.storage.inventory_path, PathBuf::from("stock.json"));
        assert_eq!(
            config.storage.ledger_path,
            Some(PathBuf::from("ledger.json"))
        );
        // Untouched section keeps its default
        assert_eq!(config.display.currency_symbol, "€");
    }

    #[test]
    fn test_env_overrides_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("register.toml");
        std::fs::write(&path, "[storage]\ninventory_path = \"stock.json\"\n").unwrap();

        let config = RegisterConfig::load_with_env(
            Some(path),
            env_from(&[
                (ENV_INVENTORY_PATH, "/srv/shop/stock.json"),
                (ENV_LEDGER_PATH, "/srv/shop/ledger.json"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.storage.inventory_path,
            PathBuf::from("/srv/shop/stock.json")
        );
        assert_eq!(
            config.storage.ledger_path,
            Some(PathBuf::from("/srv/shop/ledger.json"))
        );
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("register.toml");
        std::fs::write(&path, "[storage\ninventory_path = ").unwrap();

        let err = RegisterConfig::load_with_env(Some(path), env_from(&[])).unwrap_err();
        assert!(matches!(err, StoreError::ConfigParse { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RegisterConfig::default();

        config.storage.inventory_path = PathBuf::new();
        assert!(config.validate().is_err());

        config.storage.inventory_path = PathBuf::from("stock.json");
        config.storage.ledger_path = Some(PathBuf::from("stock.json"));
        assert!(config.validate().is_err());

        config.storage.ledger_path = Some(PathBuf::from("ledger.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_money() {
        let mut config = RegisterConfig::default();
        assert_eq!(config.format_money(Money::from_cents(400)), "€4.00");
        assert_eq!(config.format_money(Money::from_cents(-800)), "-€8.00");

        config.display.currency_symbol = "$".into();
        assert_eq!(config.format_money(Money::from_cents(1250)), "$12.50");
    }

    #[test]
    fn test_toml_serialization() {
        let config = RegisterConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[display]"));
    }
}
