//! # Report Module
//!
//! Read-only financial figures derived from the [`Ledger`].
//!
//! Both reports render to the same lines the `profits` command has always
//! printed. Net profit is left out until the first sale is recorded.

use std::fmt;

use crate::ledger::Ledger;
use crate::money::Money;

/// Gross profit: total revenue from every recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitReport {
    pub gross_profit: Money,
}

impl ProfitReport {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        ProfitReport {
            gross_profit: ledger.total_revenue(),
        }
    }
}

impl fmt::Display for ProfitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gross Profit: {}", self.gross_profit)
    }
}

/// Total costs, plus net profit once there is revenue to net against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostReport {
    pub total_costs: Money,
    pub net_profit: Option<Money>,
}

impl CostReport {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        CostReport {
            total_costs: ledger.total_costs(),
            net_profit: ledger.net_profit(),
        }
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total Costs: {}", self.total_costs)?;
        if let Some(net) = self.net_profit {
            write!(f, "\nNet Profit: {}", net)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductName;

    #[test]
    fn test_reports_before_any_sale() {
        let mut ledger = Ledger::new();
        let tofu = ProductName::parse("tofu").unwrap();
        ledger.record_cost(&tofu, 10, Money::from_cents(200)).unwrap();

        assert_eq!(ProfitReport::from_ledger(&ledger).to_string(), "Gross Profit: 0.00");
        assert_eq!(CostReport::from_ledger(&ledger).to_string(), "Total Costs: 20.00");
    }

    #[test]
    fn test_reports_after_sale() {
        let mut ledger = Ledger::new();
        let tofu = ProductName::parse("tofu").unwrap();
        ledger.record_cost(&tofu, 10, Money::from_cents(200)).unwrap();
        ledger.record_revenue(&tofu, 3, Money::from_cents(400)).unwrap();

        let profits = ProfitReport::from_ledger(&ledger);
        let costs = CostReport::from_ledger(&ledger);

        assert_eq!(profits.gross_profit, Money::from_cents(1200));
        assert_eq!(costs.net_profit, Some(Money::from_cents(-800)));
        assert_eq!(costs.to_string(), "Total Costs: 20.00\nNet Profit: -8.00");
    }
}
