//! Money as integer cents.
//!
//! The store keeps all prices and totals in the smallest currency unit to
//! avoid floating-point drift in persisted totals.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An amount of money in cents. May be zero but never negative once validated
/// through [`Money::price`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// A unit price: must be strictly positive.
    pub fn price(cents: i64) -> DomainResult<Self> {
        if cents <= 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Line subtotal: unit price times quantity.
    pub fn times(&self, quantity: i64) -> DomainResult<Money> {
        let cents = self
            .0
            .checked_mul(quantity)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))?;
        Ok(Money(cents))
    }

    pub fn checked_add(&self, other: Money) -> DomainResult<Money> {
        let cents = self
            .0
            .checked_add(other.0)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))?;
        Ok(Money(cents))
    }

    /// Sum a sequence of amounts, failing on overflow.
    pub fn sum(amounts: impl IntoIterator<Item = Money>) -> DomainResult<Money> {
        let mut total = Money::ZERO;
        for amount in amounts {
            total = total.checked_add(amount)?;
        }
        Ok(total)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rejects_zero_and_negative() {
        assert!(Money::price(0).is_err());
        assert!(Money::price(-100).is_err());
        assert_eq!(Money::price(2499).unwrap().cents(), 2499);
    }

    #[test]
    fn subtotal_is_unit_price_times_quantity() {
        let unit = Money::from_cents(1999);
        assert_eq!(unit.times(3).unwrap().cents(), 5997);
    }

    #[test]
    fn sum_of_amounts() {
        let total = Money::sum([Money::from_cents(100), Money::from_cents(250)]).unwrap();
        assert_eq!(total.cents(), 350);
        assert_eq!(Money::sum([]).unwrap(), Money::ZERO);
    }

    #[test]
    fn display_formats_cents() {
        assert_eq!(Money::from_cents(2499).to_string(), "24.99");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(2000).to_string(), "20.00");
    }
}
