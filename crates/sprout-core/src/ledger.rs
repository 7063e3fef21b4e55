//! # Ledger Module
//!
//! Append-only cost and revenue history.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ledger                                          │
//! │                                                                         │
//! │  add_product ──(delta > 0)──► record_cost(name, delta, buy_price)      │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                               costs: Vec<LedgerEvent>                   │
//! │                                                                         │
//! │  sell ───────(each line)────► record_revenue(name, qty, sell_price)    │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                               revenues: Vec<LedgerEvent>                │
//! │                                                                         │
//! │  total_costs()   = Σ qty × price over costs                            │
//! │  total_revenue() = Σ qty × price over revenues                         │
//! │  net_profit()    = revenue - costs, only once something was sold       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events are never edited or removed. Whether they outlive the process is up
//! to the register (see `sprout-store`).
//!
//! ## Invariant
//! Every event has `quantity > 0`, and both totals fit in a `Money`. Recording
//! an event that would break this is refused with `Overflow`, and a ledger
//! file that breaks it does not load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ProductName;

// =============================================================================
// Ledger Event
// =============================================================================

/// Which side of the ledger an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Cost,
    Revenue,
}

/// One purchase or sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub kind: EventKind,
    pub product: ProductName,
    /// Always > 0.
    pub quantity: i64,
    /// Buy price for costs, sell price for revenue.
    pub unit_price: Money,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEvent {
    /// `quantity × unit_price`.
    pub fn amount(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    fn checked_amount(&self) -> CoreResult<Money> {
        if self.quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                product: self.product.to_string(),
                quantity: self.quantity,
            });
        }
        self.unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> CoreError {
        CoreError::Overflow {
            product: self.product.to_string(),
        }
    }
}

/// Sum of `events`, or the first event that pushes it out of range.
fn checked_total(events: &[LedgerEvent]) -> CoreResult<Money> {
    events.iter().try_fold(Money::zero(), |total, event| {
        total
            .checked_add(event.checked_amount()?)
            .ok_or_else(|| event.overflow())
    })
}

// =============================================================================
// Ledger
// =============================================================================

/// Cost and revenue history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerFile")]
pub struct Ledger {
    costs: Vec<LedgerEvent>,
    revenues: Vec<LedgerEvent>,
}

/// A ledger as written in the file, before its events are checked.
#[derive(Deserialize)]
struct LedgerFile {
    #[serde(default)]
    costs: Vec<LedgerEvent>,
    #[serde(default)]
    revenues: Vec<LedgerEvent>,
}

impl TryFrom<LedgerFile> for Ledger {
    type Error = CoreError;

    fn try_from(file: LedgerFile) -> CoreResult<Self> {
        checked_total(&file.costs)?;
        checked_total(&file.revenues)?;
        Ok(Ledger {
            costs: file.costs,
            revenues: file.revenues,
        })
    }
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cost event.
    ///
    /// ## Errors
    /// `InvalidQuantity` if `quantity <= 0`; callers filter non-positive
    /// purchase deltas before getting here. `Overflow` if the event amount or
    /// the new total does not fit. The ledger is unchanged on error.
    pub fn record_cost(
        &mut self,
        product: &ProductName,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<&LedgerEvent> {
        let event = Self::event(EventKind::Cost, product, quantity, unit_price);
        Self::append(&mut self.costs, event)
    }

    /// Appends a revenue event.
    pub fn record_revenue(
        &mut self,
        product: &ProductName,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<&LedgerEvent> {
        let event = Self::event(EventKind::Revenue, product, quantity, unit_price);
        Self::append(&mut self.revenues, event)
    }

    fn event(
        kind: EventKind,
        product: &ProductName,
        quantity: i64,
        unit_price: Money,
    ) -> LedgerEvent {
        LedgerEvent {
            id: Uuid::new_v4().to_string(),
            kind,
            product: product.clone(),
            quantity,
            unit_price,
            recorded_at: Utc::now(),
        }
    }

    fn append(events: &mut Vec<LedgerEvent>, event: LedgerEvent) -> CoreResult<&LedgerEvent> {
        let amount = event.checked_amount()?;
        let total: Money = events.iter().map(LedgerEvent::amount).sum();
        if total.checked_add(amount).is_none() {
            return Err(event.overflow());
        }

        events.push(event);
        Ok(&events[events.len() - 1])
    }

    /// Cost events in recording order.
    pub fn costs(&self) -> &[LedgerEvent] {
        &self.costs
    }

    /// Revenue events in recording order.
    pub fn revenues(&self) -> &[LedgerEvent] {
        &self.revenues
    }

    /// True once at least one sale was recorded.
    pub fn has_revenue(&self) -> bool {
        !self.revenues.is_empty()
    }

    /// Sum of all cost events.
    pub fn total_costs(&self) -> Money {
        self.costs.iter().map(LedgerEvent::amount).sum()
    }

    /// Sum of all revenue events (gross profit).
    pub fn total_revenue(&self) -> Money {
        self.revenues.iter().map(LedgerEvent::amount).sum()
    }

    /// Revenue minus costs, or `None` before the first sale.
    pub fn net_profit(&self) -> Option<Money> {
        self.has_revenue()
            .then(|| self.total_revenue() - self.total_costs())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tofu() -> ProductName {
        ProductName::parse("tofu").unwrap()
    }

    #[test]
    fn test_totals_sum_events() {
        let mut ledger = Ledger::new();
        ledger.record_cost(&tofu(), 10, Money::from_cents(200)).unwrap();
        ledger.record_cost(&tofu(), 5, Money::from_cents(200)).unwrap();
        ledger.record_revenue(&tofu(), 3, Money::from_cents(400)).unwrap();

        assert_eq!(ledger.total_costs(), Money::from_cents(3000));
        assert_eq!(ledger.total_revenue(), Money::from_cents(1200));
        assert_eq!(ledger.costs().len(), 2);
        assert_eq!(ledger.revenues().len(), 1);
    }

    #[test]
    fn test_net_profit_requires_revenue() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.net_profit(), None);

        ledger.record_cost(&tofu(), 10, Money::from_cents(200)).unwrap();
        assert_eq!(ledger.net_profit(), None);

        ledger.record_revenue(&tofu(), 3, Money::from_cents(400)).unwrap();
        assert_eq!(ledger.net_profit(), Some(Money::from_cents(-800)));
    }

    #[test]
    fn test_non_positive_quantities_rejected() {
        let mut ledger = Ledger::new();
        assert!(ledger.record_cost(&tofu(), 0, Money::from_cents(200)).is_err());
        assert!(ledger.record_revenue(&tofu(), -1, Money::from_cents(400)).is_err());
        assert!(ledger.costs().is_empty());
        assert!(ledger.revenues().is_empty());
    }

    #[test]
    fn test_events_carry_kind_and_unique_ids() {
        let mut ledger = Ledger::new();
        let first = ledger.record_cost(&tofu(), 1, Money::from_cents(200)).unwrap().clone();
        let second = ledger.record_revenue(&tofu(), 1, Money::from_cents(400)).unwrap().clone();

        assert_eq!(first.kind, EventKind::Cost);
        assert_eq!(second.kind, EventKind::Revenue);
        assert_ne!(first.id, second.id);
        assert_eq!(second.amount(), Money::from_cents(400));
    }

    #[test]
    fn test_cost_beyond_range_is_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger
            .record_cost(&tofu(), 100_000_000_000_000_000, Money::from_cents(200))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::Overflow {
                product: "Tofu".to_string()
            }
        );
        assert!(ledger.costs().is_empty());
    }

    #[test]
    fn test_total_beyond_range_is_rejected() {
        let mut ledger = Ledger::new();
        let half = i64::MAX / 2 + 1;
        ledger.record_cost(&tofu(), half, Money::from_cents(1)).unwrap();

        let err = ledger
            .record_cost(&tofu(), half, Money::from_cents(1))
            .unwrap_err();

        assert!(matches!(err, CoreError::Overflow { .. }));
        assert_eq!(ledger.costs().len(), 1);
        assert_eq!(ledger.total_costs(), Money::from_cents(half));
    }

    #[test]
    fn test_huge_totals_report_without_panicking() {
        let mut ledger = Ledger::new();
        ledger.record_cost(&tofu(), i64::MAX, Money::from_cents(1)).unwrap();
        ledger.record_revenue(&tofu(), i64::MAX, Money::from_cents(1)).unwrap();

        assert_eq!(ledger.total_costs().cents(), i64::MAX);
        assert_eq!(ledger.net_profit(), Some(Money::zero()));
    }

    #[test]
    fn test_file_with_non_positive_quantity_is_rejected() {
        let json = r#"{"costs": [{
            "id": "a", "kind": "cost", "product": "Tofu", "quantity": 0,
            "unit_price": 2.0, "recorded_at": "2024-01-01T00:00:00Z"
        }]}"#;
        assert!(serde_json::from_str::<Ledger>(json).is_err());

        let json = r#"{"revenues": [{
            "id": "b", "kind": "revenue", "product": "Tofu", "quantity": -3,
            "unit_price": 4.0, "recorded_at": "2024-01-01T00:00:00Z"
        }]}"#;
        assert!(serde_json::from_str::<Ledger>(json).is_err());
    }

    #[test]
    fn test_file_with_total_beyond_range_is_rejected() {
        let event = |id: &str| {
            format!(
                r#"{{"id": "{id}", "kind": "cost", "product": "Tofu",
                "quantity": 5000000000000000000, "unit_price": 0.01,
                "recorded_at": "2024-01-01T00:00:00Z"}}"#
            )
        };
        let json = format!(r#"{{"costs": [{}, {}]}}"#, event("a"), event("b"));

        assert!(serde_json::from_str::<Ledger>(&json).is_err());
    }

    #[test]
    fn test_ledger_serde_round_trip() {
        let mut ledger = Ledger::new();
        ledger.record_cost(&tofu(), 10, Money::from_cents(200)).unwrap();
        ledger.record_revenue(&tofu(), 3, Money::from_cents(400)).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);

        let empty: Ledger = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Ledger::new());
    }
}
