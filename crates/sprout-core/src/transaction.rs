//! # Transaction Module
//!
//! Sale lines and the end-of-sale summary.
//!
//! ## Sale Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One `sale` Command                                   │
//! │                                                                         │
//! │  SaleSession::new()                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  register.sell("Tofu", 3) ──► SaleLine ──► session.push(line)          │
//! │  register.sell("Kale", 1) ──► SaleLine ──► session.push(line)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionSummary::from_lines(session.lines())                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  session dropped, nothing carried over to the next sale               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::money::Money;
use crate::types::ProductName;

// =============================================================================
// Sale Line
// =============================================================================

/// One confirmed sale of a single product.
///
/// The unit price is frozen from the inventory's sell price at the moment of
/// the sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub product: ProductName,
    pub quantity: i64,
    pub unit_price: Money,
}

impl SaleLine {
    /// Creates a new sale line.
    pub fn new(product: ProductName, quantity: i64, unit_price: Money) -> Self {
        SaleLine {
            product,
            quantity,
            unit_price,
        }
    }

    /// Line total (unit price × quantity).
    pub fn total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale Session
// =============================================================================

/// Lines sold during one `sale` command.
#[derive(Debug, Clone, Default)]
pub struct SaleSession {
    lines: Vec<SaleLine>,
}

impl SaleSession {
    /// Starts an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a confirmed line.
    pub fn push(&mut self, line: SaleLine) {
        self.lines.push(line);
    }

    /// Lines in the order they were sold.
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// True if nothing was sold.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Transaction Summary
// =============================================================================

/// Receipt-style summary of one session.
///
/// Built only from the lines passed in, so two sessions can never bleed into
/// each other's totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    pub lines: Vec<SaleLine>,
    pub total_sold: Money,
}

impl TransactionSummary {
    /// Summarizes the given lines.
    pub fn from_lines(lines: &[SaleLine]) -> Self {
        TransactionSummary {
            lines: lines.to_vec(),
            total_sold: lines.iter().map(SaleLine::total).sum(),
        }
    }
}

impl fmt::Display for TransactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "Product: {}, Quantity: {}, Unit price: {}, Total price: {}",
                line.product,
                line.quantity,
                line.unit_price,
                line.total()
            )?;
        }
        write!(f, "Total sold: {}", self.total_sold)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: i64, cents: i64) -> SaleLine {
        SaleLine::new(
            ProductName::parse(name).unwrap(),
            quantity,
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_summary_totals() {
        let mut session = SaleSession::new();
        session.push(line("tofu", 3, 400));
        session.push(line("kale", 2, 150));

        let summary = TransactionSummary::from_lines(session.lines());
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total_sold, Money::from_cents(1500));
    }

    #[test]
    fn test_summaries_do_not_accumulate() {
        let first = TransactionSummary::from_lines(&[line("tofu", 3, 400)]);
        let second = TransactionSummary::from_lines(&[line("kale", 1, 150)]);

        assert_eq!(first.total_sold, Money::from_cents(1200));
        assert_eq!(second.total_sold, Money::from_cents(150));
        assert_eq!(second.lines.len(), 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = TransactionSummary::from_lines(&[]);
        assert!(summary.lines.is_empty());
        assert!(summary.total_sold.is_zero());
        assert_eq!(summary.to_string(), "Total sold: 0.00");
    }

    #[test]
    fn test_summary_display() {
        let summary = TransactionSummary::from_lines(&[line("tofu", 3, 400)]);
        assert_eq!(
            summary.to_string(),
            "Product: Tofu, Quantity: 3, Unit price: 4.00, Total price: 12.00\nTotal sold: 12.00"
        );
    }
}
