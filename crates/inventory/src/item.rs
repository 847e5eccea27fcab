use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clothier_core::{DomainError, DomainResult, ItemId, Money};

/// A catalog item as persisted: master data, mutable via the catalog workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a catalog item, optionally with initial size rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub description: String,
    /// Initial (size label, quantity) rows. Quantities must be non-negative.
    pub sizes: Vec<(String, i64)>,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            unit_price,
            description: description.into(),
            sizes: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>, quantity: i64) -> Self {
        self.sizes.push((size.into(), quantity));
        self
    }

    /// Validate before any write: checked inside the same transaction that
    /// performs the insert so that constraint and write stay atomic.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.unit_price.cents() <= 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        for (size, quantity) in &self.sizes {
            if size.trim().is_empty() {
                return Err(DomainError::validation("size label cannot be empty"));
            }
            if *quantity < 0 {
                return Err(DomainError::validation("quantity cannot be negative"));
            }
        }
        Ok(())
    }
}
