use serde::{Deserialize, Serialize};

/// Three-tier restock recommendation, derived from projected days of cover.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestockStatus {
    UrgentReorder,
    ReorderSoon,
    StockSufficient,
}

impl RestockStatus {
    /// Classify the raw (unrounded) days of cover: ≤7 urgent, ≤14 soon.
    ///
    /// Takes the exact quotient, not the rounded display value: 7.33 days of
    /// cover is already past the urgent boundary even though it displays as 7.
    pub fn classify(days_of_cover: f64) -> Self {
        if days_of_cover <= 7.0 {
            RestockStatus::UrgentReorder
        } else if days_of_cover <= 14.0 {
            RestockStatus::ReorderSoon
        } else {
            RestockStatus::StockSufficient
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RestockStatus::UrgentReorder => "Urgent Reorder",
            RestockStatus::ReorderSoon => "Reorder Soon",
            RestockStatus::StockSufficient => "Stock Sufficient",
        }
    }
}

impl core::fmt::Display for RestockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw days of cover: current stock over average daily sales.
///
/// When the average is zero, undefined or negative, the divisor is replaced
/// by 1 so items with no sales history still get a finite projection.
pub fn days_of_cover(current_stock: i64, avg_daily_sales: f64) -> f64 {
    let divisor = if avg_daily_sales > 0.0 { avg_daily_sales } else { 1.0 };
    current_stock as f64 / divisor
}

/// Days of cover rounded for display; classification uses the raw value.
pub fn days_until_stockout(current_stock: i64, avg_daily_sales: f64) -> i64 {
    days_of_cover(current_stock, avg_daily_sales).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_average_substitutes_one() {
        assert_eq!(days_until_stockout(25, 0.0), 25);
        assert_eq!(days_until_stockout(25, -3.0), 25);
        assert_eq!(days_until_stockout(0, 0.0), 0);
    }

    #[test]
    fn positive_average_divides() {
        assert_eq!(days_until_stockout(30, 2.0), 15);
        // 2.5 rounds half away from zero.
        assert_eq!(days_until_stockout(10, 4.0), 3);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(RestockStatus::classify(7.0), RestockStatus::UrgentReorder);
        assert_eq!(RestockStatus::classify(8.0), RestockStatus::ReorderSoon);
        assert_eq!(RestockStatus::classify(14.0), RestockStatus::ReorderSoon);
        assert_eq!(RestockStatus::classify(15.0), RestockStatus::StockSufficient);
        assert_eq!(RestockStatus::classify(0.0), RestockStatus::UrgentReorder);
    }

    #[test]
    fn classification_uses_the_raw_quotient_not_the_rounded_display() {
        // 22 / 3 = 7.33: displays as 7 days but is past the urgent boundary.
        let cover = days_of_cover(22, 3.0);
        assert_eq!(days_until_stockout(22, 3.0), 7);
        assert_eq!(RestockStatus::classify(cover), RestockStatus::ReorderSoon);

        // 43 / 3 = 14.33: displays as 14 but is past the soon boundary.
        let cover = days_of_cover(43, 3.0);
        assert_eq!(days_until_stockout(43, 3.0), 14);
        assert_eq!(RestockStatus::classify(cover), RestockStatus::StockSufficient);
    }

    #[test]
    fn labels_match_reporting_strings() {
        assert_eq!(RestockStatus::UrgentReorder.to_string(), "Urgent Reorder");
        assert_eq!(RestockStatus::ReorderSoon.to_string(), "Reorder Soon");
        assert_eq!(RestockStatus::StockSufficient.to_string(), "Stock Sufficient");
    }
}
