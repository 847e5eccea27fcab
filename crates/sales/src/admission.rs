use serde::{Deserialize, Serialize};

use clothier_core::{DomainError, DomainResult, ItemId, Money};

/// A sale attempt against one item/size pair.
///
/// The size is an explicit input: admission is evaluated against the size the
/// customer actually asked for, never inferred from whichever row happens to
/// hold the most stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub item_id: ItemId,
    pub size: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl SaleRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.size.trim().is_empty() {
            return Err(DomainError::validation("size label cannot be empty"));
        }
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.unit_price.cents() <= 0 {
            return Err(DomainError::validation("unit_price must be positive"));
        }
        Ok(())
    }

    /// Denormalized total for the sale record.
    pub fn total_price(&self) -> DomainResult<Money> {
        self.unit_price.times(self.quantity)
    }
}

/// Outcome of evaluating a sale attempt against available stock.
///
/// Insufficient stock is a first-class, recorded outcome rather than an
/// error: the rejection itself is written to the failed-sale ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    Admitted,
    Rejected { available: i64 },
}

impl Admission {
    /// Admit when the available quantity covers the request.
    pub fn decide(requested: i64, available: i64) -> Self {
        if requested <= available {
            Admission::Admitted
        } else {
            Admission::Rejected { available }
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}
