use serde::{Deserialize, Serialize};

use clothier_core::{DomainError, DomainResult, ItemId};

/// Total stock at or below this value raises a low-stock alert.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Quantity on hand for one item/size pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeStock {
    pub item_id: ItemId,
    pub size: String,
    pub quantity: i64,
}

/// A validated stock level for a single size row. Never negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLevel(i64);

impl StockLevel {
    /// Accepts the write or rejects it outright; never clamps.
    pub fn new(quantity: i64) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::invariant("quantity cannot be negative"));
        }
        Ok(Self(quantity))
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Apply a signed adjustment, rejecting any result below zero.
    pub fn adjusted(&self, delta: i64) -> DomainResult<StockLevel> {
        let next = self
            .0
            .checked_add(delta)
            .ok_or_else(|| DomainError::invariant("quantity overflow"))?;
        StockLevel::new(next)
    }
}

/// Total stock for an item across all of its size rows.
///
/// Low-stock checks must re-aggregate over every row, not just the one that
/// changed, so items with multiple sizes are counted correctly.
pub fn total_quantity<'a>(sizes: impl IntoIterator<Item = &'a SizeStock>) -> i64 {
    sizes.into_iter().map(|s| s.quantity).sum()
}

/// Derived, recomputed-each-time predicate; there is no stored flag.
pub fn is_low_stock(total: i64) -> bool {
    total <= LOW_STOCK_THRESHOLD
}
