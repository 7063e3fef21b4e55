//! # Register Facade
//!
//! The single entry point the menu talks to.
//!
//! ## Write-Through
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Register Operation                                │
//! │                                                                         │
//! │  add_product / sell / sell_product                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Check against Inventory (rejections return here)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Append Ledger event, if any (rejections return here)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Mutate Inventory                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Save inventory file (+ ledger file when configured)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reports and listings only read.

use tracing::{debug, info, warn};

use sprout_core::{
    CostReport, Inventory, InventoryListing, Ledger, ProductName, ProductRecord,
    ProfitReport, PurchaseOutcome, SaleLine, TransactionSummary,
};

use crate::config::RegisterConfig;
use crate::document::{JsonDocument, LoadOutcome};
use crate::error::StoreResult;

/// Inventory, ledger and the files behind them.
#[derive(Debug)]
pub struct Register {
    config: RegisterConfig,
    inventory: Inventory,
    ledger: Ledger,
    inventory_doc: JsonDocument<Inventory>,
    ledger_doc: Option<JsonDocument<Ledger>>,
}

impl Register {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Loads state from the configured files.
    ///
    /// The returned [`LoadOutcome`] describes the inventory file so the menu
    /// can greet the user accordingly.
    pub fn open(config: RegisterConfig) -> StoreResult<(Self, LoadOutcome)> {
        config.validate()?;

        let inventory_doc: JsonDocument<Inventory> =
            JsonDocument::new(&config.storage.inventory_path);
        let loaded = inventory_doc.load()?;
        match loaded.outcome {
            LoadOutcome::Existing => info!(
                path = %inventory_doc.path().display(),
                products = loaded.value.len(),
                "Opened warehouse register"
            ),
            LoadOutcome::Created => info!(
                path = %inventory_doc.path().display(),
                "Created new warehouse register"
            ),
            LoadOutcome::Recovered => warn!(
                path = %inventory_doc.path().display(),
                "Warehouse register was unreadable and has been reset"
            ),
        }

        let (ledger, ledger_doc) = match config.storage.ledger_path {
            Some(ref path) => {
                let doc: JsonDocument<Ledger> = JsonDocument::new(path);
                let ledger = doc.load()?;
                debug!(
                    path = %doc.path().display(),
                    costs = ledger.value.costs().len(),
                    revenues = ledger.value.revenues().len(),
                    outcome = ?ledger.outcome,
                    "Opened ledger"
                );
                (ledger.value, Some(doc))
            }
            None => (Ledger::new(), None),
        };

        let register = Register {
            config,
            inventory: loaded.value,
            ledger,
            inventory_doc,
            ledger_doc,
        };

        Ok((register, loaded.outcome))
    }

    /// Final flush before the process exits.
    pub fn close(self) -> StoreResult<()> {
        self.persist()?;
        info!("Register closed");
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a purchase.
    ///
    /// `record.quantity` follows [`Inventory::upsert_on_purchase`]: for a known
    /// product it is the incoming total, and only a positive difference from
    /// the current stock is charged as a cost at `record.buy_price`.
    pub fn add_product(&mut self, record: &ProductRecord) -> StoreResult<PurchaseOutcome> {
        let planned = self.inventory.plan_purchase(&record.name, record.quantity)?;
        if let Some(bought) = planned.purchased_quantity() {
            self.ledger
                .record_cost(&record.name, bought, record.buy_price)?;
        }

        let outcome = self.inventory.upsert_on_purchase(
            &record.name,
            record.quantity,
            record.buy_price,
            record.sell_price,
        )?;

        info!(
            product = %record.name,
            quantity = outcome.quantity,
            delta = outcome.delta,
            created = outcome.created,
            "Purchase recorded"
        );

        self.persist()?;
        Ok(outcome)
    }

    /// Sells units of one product as a single sale line.
    ///
    /// A rejection (unknown product, not enough stock, no sell price, an
    /// amount out of range) leaves the inventory, the ledger and the files
    /// untouched.
    pub fn sell(&mut self, name: &ProductName, quantity: i64) -> StoreResult<SaleLine> {
        let quoted = self
            .inventory
            .quote_sale(name, quantity)
            .and_then(|line| {
                self.ledger
                    .record_revenue(&line.product, line.quantity, line.unit_price)?;
                Ok(line)
            });
        let line = match quoted {
            Ok(line) => line,
            Err(e) => {
                debug!(product = %name, quantity, error = %e, "Sale rejected");
                return Err(e.into());
            }
        };

        self.inventory.apply_sale(name, quantity)?;

        info!(
            product = %line.product,
            quantity = line.quantity,
            total = %line.total(),
            "Sale recorded"
        );

        self.persist()?;
        Ok(line)
    }

    /// Overwrites a product's stock with `record.quantity`.
    ///
    /// `None` means the sale flow was cancelled and is a no-op.
    pub fn sell_product(&mut self, record: Option<&ProductRecord>) -> StoreResult<()> {
        let Some(record) = record else {
            return Ok(());
        };

        self.inventory.set_quantity(&record.name, record.quantity)?;
        debug!(product = %record.name, quantity = record.quantity, "Stock level set");

        self.persist()
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Gross profit over every recorded sale.
    pub fn report_profits(&self) -> ProfitReport {
        ProfitReport::from_ledger(&self.ledger)
    }

    /// Total costs, with net profit once something was sold.
    pub fn report_costs(&self) -> CostReport {
        CostReport::from_ledger(&self.ledger)
    }

    /// Summary of one sale session's lines.
    pub fn report_transaction(&self, lines: &[SaleLine]) -> TransactionSummary {
        TransactionSummary::from_lines(lines)
    }

    pub fn list_inventory(&self) -> InventoryListing {
        self.inventory.snapshot()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    fn persist(&self) -> StoreResult<()> {
        self.inventory_doc.save(&self.inventory)?;
        if let Some(ref doc) = self.ledger_doc {
            doc.save(&self.ledger)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::Money;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> Register {
        let mut config = RegisterConfig::default();
        config.storage.inventory_path = dir.path().join("warehouse_register.json");
        Register::open(config).unwrap().0
    }

    fn record(raw: &str, quantity: i64, buy: i64, sell: i64) -> ProductRecord {
        ProductRecord::new(
            ProductName::parse(raw).unwrap(),
            quantity,
            Money::from_cents(buy),
            Money::from_cents(sell),
        )
    }

    #[test]
    fn test_open_fresh_directory() {
        let dir = TempDir::new().unwrap();
        let mut config = RegisterConfig::default();
        config.storage.inventory_path = dir.path().join("warehouse_register.json");

        let (register, outcome) = Register::open(config).unwrap();

        assert_eq!(outcome, LoadOutcome::Created);
        assert_eq!(register.list_inventory(), InventoryListing::Empty);
        assert!(dir.path().join("warehouse_register.json").exists());
    }

    #[test]
    fn test_add_product_charges_cost_once() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);

        let outcome = register.add_product(&record("tofu", 10, 200, 400)).unwrap();

        assert!(outcome.created);
        assert_eq!(register.ledger().costs().len(), 1);
        assert_eq!(register.report_costs().total_costs, Money::from_cents(2000));
    }

    #[test]
    fn test_add_product_without_positive_delta_charges_nothing() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);
        register.add_product(&record("tofu", 10, 200, 400)).unwrap();

        let outcome = register.add_product(&record("tofu", 4, 200, 400)).unwrap();

        assert_eq!(outcome.delta, -6);
        assert_eq!(outcome.quantity, 14);
        assert_eq!(register.ledger().costs().len(), 1);
    }

    #[test]
    fn test_add_product_rejects_negative_quantity() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);

        let err = register.add_product(&record("tofu", -1, 200, 400)).unwrap_err();

        assert!(err.is_rejection());
        assert!(register.inventory().is_empty());
    }

    #[test]
    fn test_rejected_sale_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);
        register.add_product(&record("tofu", 10, 200, 400)).unwrap();
        let before = std::fs::read_to_string(dir.path().join("warehouse_register.json")).unwrap();

        let tofu = ProductName::parse("tofu").unwrap();
        let err = register.sell(&tofu, 11).unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(register.inventory().get(&tofu).unwrap().quantity, 10);
        assert!(register.ledger().revenues().is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("warehouse_register.json")).unwrap(),
            before
        );
    }

    #[test]
    fn test_sell_product_none_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);
        register.add_product(&record("tofu", 10, 200, 400)).unwrap();

        register.sell_product(None).unwrap();

        let tofu = ProductName::parse("tofu").unwrap();
        assert_eq!(register.inventory().get(&tofu).unwrap().quantity, 10);
    }

    #[test]
    fn test_sell_product_overwrites_quantity() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);
        register.add_product(&record("tofu", 10, 200, 400)).unwrap();

        register
            .sell_product(Some(&record("tofu", 6, 200, 400)))
            .unwrap();

        let tofu = ProductName::parse("tofu").unwrap();
        assert_eq!(register.inventory().get(&tofu).unwrap().quantity, 6);
        // Overwrite is not a sale
        assert!(register.ledger().revenues().is_empty());
    }

    #[test]
    fn test_sell_product_unknown_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);

        let err = register
            .sell_product(Some(&record("kale", 3, 100, 200)))
            .unwrap_err();

        assert!(err.is_rejection());
    }

    #[test]
    fn test_huge_restock_is_rejected_without_side_effects() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);
        register.add_product(&record("tofu", 10, 200, 400)).unwrap();
        let before = std::fs::read_to_string(dir.path().join("warehouse_register.json")).unwrap();

        let err = register
            .add_product(&record("tofu", 9_223_372_036_854_775_800, 200, 400))
            .unwrap_err();

        assert!(err.is_rejection());
        let tofu = ProductName::parse("tofu").unwrap();
        assert_eq!(register.inventory().get(&tofu).unwrap().quantity, 10);
        assert_eq!(register.ledger().costs().len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("warehouse_register.json")).unwrap(),
            before
        );
    }

    #[test]
    fn test_purchase_whose_cost_overflows_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);

        let err = register
            .add_product(&record("tofu", 100_000_000_000_000_000, 200, 400))
            .unwrap_err();

        assert!(err.is_rejection());
        assert!(register.inventory().is_empty());
        assert!(register.ledger().costs().is_empty());
        assert!(register.report_costs().total_costs.is_zero());
    }

    #[test]
    fn test_sale_whose_revenue_overflows_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut register = open_in(&dir);
        let tofu = ProductName::parse("tofu").unwrap();
        register
            .add_product(&record("tofu", i64::MAX / 2, 1, 400))
            .unwrap();

        let err = register.sell(&tofu, i64::MAX / 4).unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(register.inventory().get(&tofu).unwrap().quantity, i64::MAX / 2);
        assert!(register.ledger().revenues().is_empty());
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let mut config = RegisterConfig::default();
        config.storage.ledger_path = Some(config.storage.inventory_path.clone());

        let err = Register::open(config).unwrap_err();
        assert!(err.is_config_error());
    }
}
