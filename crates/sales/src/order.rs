use serde::{Deserialize, Serialize};

use clothier_core::{DomainResult, ItemId, Money};

/// Order lifecycle as carried on the `orders` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// Order line: item, size, quantity, unit price and its persisted subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub size: String,
    pub quantity: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: Money,
    pub subtotal: Money,
}

impl OrderLine {
    pub fn new(item_id: ItemId, size: impl Into<String>, quantity: i64, unit_price: Money) -> DomainResult<Self> {
        let subtotal = unit_price.times(quantity)?;
        Ok(Self {
            item_id,
            size: size.into(),
            quantity,
            unit_price,
            subtotal,
        })
    }
}

/// The persisted order total: the sum of all line subtotals.
///
/// Recomputed and written on every line insert, never derived lazily at read
/// time, so concurrent readers see a consistent total without a join.
pub fn order_total<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> DomainResult<Money> {
    Money::sum(lines.into_iter().map(|l| l.subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, unit_cents: i64) -> OrderLine {
        OrderLine::new(ItemId::new(), "M", quantity, Money::from_cents(unit_cents)).unwrap()
    }

    #[test]
    fn line_subtotal_is_quantity_times_unit_price() {
        let l = line(4, 2500);
        assert_eq!(l.subtotal.cents(), 10_000);
    }

    #[test]
    fn total_is_sum_of_line_subtotals() {
        let lines = vec![line(1, 1999), line(2, 500), line(3, 10_000)];
        assert_eq!(order_total(&lines).unwrap().cents(), 1999 + 1000 + 30_000);
    }

    #[test]
    fn empty_order_totals_zero() {
        let lines: Vec<OrderLine> = Vec::new();
        assert_eq!(order_total(&lines).unwrap(), Money::ZERO);
    }

    #[test]
    fn status_strings_match_persisted_values() {
        assert_eq!(OrderStatus::Processing.as_str(), "Processing");
        assert_eq!(OrderStatus::Completed.as_str(), "Completed");
        assert_eq!(OrderStatus::Cancelled.as_str(), "Cancelled");
    }
}
