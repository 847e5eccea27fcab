//! The reorder service: scan for items below a threshold and replenish each
//! in its own transaction.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use clothier_core::ItemId;
use clothier_inventory::{ReorderPolicy, StockLevel};

use crate::cascade;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// One replenished item from a reorder pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderedItem {
    pub item_id: ItemId,
    pub name: String,
    pub previous_quantity: i64,
}

/// One row of the reorder ledger, joined with the item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderLogEntry {
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity_before: i64,
    pub quantity_ordered: i64,
    pub reorder_date: DateTime<Utc>,
    pub status: String,
}

/// Reorder-pattern aggregate for one item, suggesting threshold/quantity
/// parameters from its ledger history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderPattern {
    pub item_id: ItemId,
    pub item_name: String,
    /// Average total stock at the moment the item was selected for reorder.
    pub avg_reorder_point: f64,
    pub avg_reorder_quantity: f64,
    pub reorder_frequency: i64,
}

impl Store {
    /// Replenish every item whose total stock is strictly below the policy
    /// threshold.
    ///
    /// The scan phase is fatal on storage errors. Each selected item is then
    /// replenished in its own transaction; a failure there is rolled back for
    /// that item alone, logged, and skipped, so one item cannot abort the
    /// batch. Returns the items actually replenished.
    pub async fn reorder(&self, policy: ReorderPolicy) -> StoreResult<Vec<ReorderedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.name, SUM(ss.quantity) AS total
            FROM items i
            JOIN size_stock ss ON ss.item_id = i.id
            GROUP BY i.id
            HAVING total < ?1
            "#,
        )
        .bind(policy.threshold())
        .fetch_all(self.pool())
        .await?;

        let mut reordered = Vec::new();
        for row in rows {
            let item_id = ItemId::from_uuid(row.try_get::<Uuid, _>("id")?);
            let name: String = row.try_get("name")?;
            let previous_quantity: i64 = row.try_get("total")?;

            match self.replenish(item_id, previous_quantity, policy).await {
                Ok(()) => {
                    tracing::info!(
                        %item_id,
                        name = %name,
                        previous_quantity,
                        ordered = policy.quantity(),
                        "item reordered"
                    );
                    reordered.push(ReorderedItem {
                        item_id,
                        name,
                        previous_quantity,
                    });
                }
                Err(err) => {
                    tracing::warn!(%item_id, name = %name, error = %err, "reorder failed for item, skipping");
                }
            }
        }

        Ok(reordered)
    }

    /// Reorder ledger for the last `days` days, newest first.
    pub async fn reorder_history(&self, days: i64) -> StoreResult<Vec<ReorderLogEntry>> {
        let cutoff = Utc::now() - Duration::days(days);
        let rows = sqlx::query(
            r#"
            SELECT r.item_id, i.name, r.quantity_before, r.quantity_ordered,
                   r.reorder_date, r.status
            FROM reorder_log r
            JOIN items i ON i.id = r.item_id
            WHERE r.reorder_date >= ?1
            ORDER BY r.reorder_date DESC
            "#,
        )
        .bind(cutoff)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ReorderLogEntry {
                    item_id: ItemId::from_uuid(row.try_get::<Uuid, _>("item_id")?),
                    item_name: row.try_get("name")?,
                    quantity_before: row.try_get("quantity_before")?,
                    quantity_ordered: row.try_get("quantity_ordered")?,
                    reorder_date: row.try_get("reorder_date")?,
                    status: row.try_get("status")?,
                })
            })
            .collect()
    }

    /// Aggregate the reorder ledger per item, most frequently reordered
    /// first. Items reordered only once carry no pattern and are skipped.
    pub async fn reorder_patterns(&self) -> StoreResult<Vec<ReorderPattern>> {
        let rows = sqlx::query(
            r#"
            SELECT r.item_id, i.name,
                   AVG(r.quantity_before) AS avg_reorder_point,
                   AVG(r.quantity_ordered) AS avg_reorder_quantity,
                   COUNT(*) AS reorder_frequency
            FROM reorder_log r
            JOIN items i ON i.id = r.item_id
            GROUP BY r.item_id
            HAVING reorder_frequency > 1
            ORDER BY reorder_frequency DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ReorderPattern {
                    item_id: ItemId::from_uuid(row.try_get::<Uuid, _>("item_id")?),
                    item_name: row.try_get("name")?,
                    avg_reorder_point: row.try_get("avg_reorder_point")?,
                    avg_reorder_quantity: row.try_get("avg_reorder_quantity")?,
                    reorder_frequency: row.try_get("reorder_frequency")?,
                })
            })
            .collect()
    }

    /// Replenish one item inside its own transaction: bump every size row,
    /// log each change, re-check the alert level, and append the reorder
    /// ledger row.
    async fn replenish(
        &self,
        item_id: ItemId,
        quantity_before: i64,
        policy: ReorderPolicy,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await?;

        let sizes = sqlx::query("SELECT size, quantity FROM size_stock WHERE item_id = ?1")
            .bind(*item_id.as_uuid())
            .fetch_all(&mut *tx)
            .await?;

        for row in sizes {
            let size: String = row.try_get("size")?;
            let old: i64 = row.try_get("quantity")?;
            let new = StockLevel::new(old)?.adjusted(policy.quantity())?;
            cascade::upsert_size(&mut tx, item_id, &size, new.get()).await?;
            cascade::log_stock_change(&mut tx, item_id, &size, old, new.get()).await?;
        }
        cascade::check_low_stock(&mut tx, item_id).await?;

        sqlx::query(
            r#"
            INSERT INTO reorder_log (item_id, quantity_before, quantity_ordered, reorder_date, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(*item_id.as_uuid())
        .bind(quantity_before)
        .bind(policy.quantity())
        .bind(Utc::now())
        .bind("Completed")
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
