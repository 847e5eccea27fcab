use serde::{Deserialize, Serialize};

use clothier_core::{DomainError, DomainResult};

/// Parameters for one reorder pass: items whose total stock is strictly
/// below `threshold` are topped up by `quantity`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPolicy {
    threshold: i64,
    quantity: i64,
}

impl ReorderPolicy {
    pub fn new(threshold: i64, quantity: i64) -> DomainResult<Self> {
        if threshold <= 0 {
            return Err(DomainError::validation("reorder threshold must be positive"));
        }
        if quantity <= 0 {
            return Err(DomainError::validation("reorder quantity must be positive"));
        }
        Ok(Self { threshold, quantity })
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Strictly below the threshold; items brought to or above it by a
    /// previous pass are not selected again.
    pub fn selects(&self, total_stock: i64) -> bool {
        total_stock < self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_strictly_below_threshold() {
        let policy = ReorderPolicy::new(20, 50).unwrap();
        assert!(policy.selects(19));
        assert!(!policy.selects(20));
        assert!(!policy.selects(21));
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(ReorderPolicy::new(0, 50).is_err());
        assert!(ReorderPolicy::new(20, 0).is_err());
        assert!(ReorderPolicy::new(-5, -1).is_err());
    }

    #[test]
    fn replenished_items_fall_out_of_selection() {
        let policy = ReorderPolicy::new(20, 50).unwrap();
        let before = 10;
        assert!(policy.selects(before));
        let after = before + policy.quantity();
        assert!(!policy.selects(after));
    }
}
