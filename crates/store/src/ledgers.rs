//! Read-only access to the append-only ledgers.
//!
//! Ledger rows are write-once and never compacted; retention is an operator
//! concern outside this core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

use clothier_core::{ItemId, Money};

use crate::error::StoreResult;
use crate::store::Store;

/// One stock mutation, as recorded by the change-log cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryChange {
    pub size: String,
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub changed_at: DateTime<Utc>,
}

/// One price mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub old_price: Money,
    pub new_price: Money,
    pub changed_at: DateTime<Utc>,
}

/// One low-stock alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub current_quantity: i64,
    pub alert_date: DateTime<Utc>,
}

/// One rejected sale/order attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSale {
    pub attempted_quantity: i64,
    pub available_quantity: i64,
    pub sale_date: DateTime<Utc>,
}

impl Store {
    /// Stock change-log rows for one item, oldest first.
    pub async fn inventory_changes(&self, item_id: ItemId) -> StoreResult<Vec<InventoryChange>> {
        let rows = sqlx::query(
            r#"
            SELECT size, old_quantity, new_quantity, changed_at
            FROM inventory_change_log
            WHERE item_id = ?1
            ORDER BY id
            "#,
        )
        .bind(*item_id.as_uuid())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(InventoryChange {
                    size: row.try_get("size")?,
                    old_quantity: row.try_get("old_quantity")?,
                    new_quantity: row.try_get("new_quantity")?,
                    changed_at: row.try_get("changed_at")?,
                })
            })
            .collect()
    }

    /// Price change-log rows for one item, oldest first.
    pub async fn price_changes(&self, item_id: ItemId) -> StoreResult<Vec<PriceChange>> {
        let rows = sqlx::query(
            r#"
            SELECT old_price_cents, new_price_cents, changed_at
            FROM price_change_log
            WHERE item_id = ?1
            ORDER BY id
            "#,
        )
        .bind(*item_id.as_uuid())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(PriceChange {
                    old_price: Money::from_cents(row.try_get("old_price_cents")?),
                    new_price: Money::from_cents(row.try_get("new_price_cents")?),
                    changed_at: row.try_get("changed_at")?,
                })
            })
            .collect()
    }

    /// Low-stock alerts for one item, oldest first.
    pub async fn low_stock_alerts(&self, item_id: ItemId) -> StoreResult<Vec<LowStockAlert>> {
        let rows = sqlx::query(
            r#"
            SELECT current_quantity, alert_date
            FROM low_stock_alerts
            WHERE item_id = ?1
            ORDER BY id
            "#,
        )
        .bind(*item_id.as_uuid())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(LowStockAlert {
                    current_quantity: row.try_get("current_quantity")?,
                    alert_date: row.try_get("alert_date")?,
                })
            })
            .collect()
    }

    /// Failed-sale ledger rows for one item, oldest first.
    pub async fn failed_sales(&self, item_id: ItemId) -> StoreResult<Vec<FailedSale>> {
        let rows = sqlx::query(
            r#"
            SELECT attempted_quantity, available_quantity, sale_date
            FROM failed_sales
            WHERE item_id = ?1
            ORDER BY id
            "#,
        )
        .bind(*item_id.as_uuid())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(FailedSale {
                    attempted_quantity: row.try_get("attempted_quantity")?,
                    available_quantity: row.try_get("available_quantity")?,
                    sale_date: row.try_get("sale_date")?,
                })
            })
            .collect()
    }
}
