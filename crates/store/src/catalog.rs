//! Catalog and stock mutations: `add_item`, `set_stock`, `update_price`,
//! plus the reads the presentation layer needs for single items.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use clothier_core::{ItemId, Money};
use clothier_inventory::{Item, NewItem, SizeStock, StockLevel};

use crate::cascade;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Insert a catalog item and its initial size rows.
    ///
    /// Initial rows go through the same cascade as any other stock write:
    /// one change-log row each (old quantity 0) and a low-stock check.
    pub async fn add_item(&self, new_item: NewItem) -> StoreResult<ItemId> {
        new_item.validate()?;

        let item_id = ItemId::new();
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO items (id, name, category, unit_price_cents, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(*item_id.as_uuid())
        .bind(&new_item.name)
        .bind(&new_item.category)
        .bind(new_item.unit_price.cents())
        .bind(&new_item.description)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        for (size, quantity) in &new_item.sizes {
            cascade::upsert_size(&mut tx, item_id, size, *quantity).await?;
            cascade::log_stock_change(&mut tx, item_id, size, 0, *quantity).await?;
        }
        if !new_item.sizes.is_empty() {
            cascade::check_low_stock(&mut tx, item_id).await?;
        }

        tx.commit().await?;
        tracing::debug!(%item_id, name = %new_item.name, "item added");
        Ok(item_id)
    }

    /// Set the quantity on hand for one item/size pair.
    ///
    /// Cascade: constraint check, upsert, change log, low-stock check — all
    /// in one transaction. A negative quantity fails the whole write with
    /// `Constraint` and leaves the row unchanged.
    pub async fn set_stock(&self, item_id: ItemId, size: &str, quantity: i64) -> StoreResult<()> {
        let level = StockLevel::new(quantity)?;

        let mut tx = self.pool().begin().await?;
        if !cascade::item_exists(&mut tx, item_id).await? {
            return Err(StoreError::NotFound);
        }

        let old = cascade::size_quantity(&mut tx, item_id, size)
            .await?
            .unwrap_or(0);
        cascade::upsert_size(&mut tx, item_id, size, level.get()).await?;
        cascade::log_stock_change(&mut tx, item_id, size, old, level.get()).await?;
        cascade::check_low_stock(&mut tx, item_id).await?;

        tx.commit().await?;
        tracing::debug!(%item_id, size, old, new = level.get(), "stock set");
        Ok(())
    }

    /// Update an item's unit price, appending exactly one price-change row in
    /// the same transaction.
    pub async fn update_price(&self, item_id: ItemId, new_price: Money) -> StoreResult<()> {
        let new_price = Money::price(new_price.cents())?;

        let mut tx = self.pool().begin().await?;
        let row = sqlx::query("SELECT unit_price_cents FROM items WHERE id = ?1")
            .bind(*item_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        let old_cents: i64 = match row {
            Some(row) => row.try_get("unit_price_cents")?,
            None => return Err(StoreError::NotFound),
        };

        sqlx::query("UPDATE items SET unit_price_cents = ?1 WHERE id = ?2")
            .bind(new_price.cents())
            .bind(*item_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO price_change_log (item_id, old_price_cents, new_price_cents, changed_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(*item_id.as_uuid())
        .bind(old_cents)
        .bind(new_price.cents())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(%item_id, old = old_cents, new = new_price.cents(), "price updated");
        Ok(())
    }

    /// Fetch one catalog item.
    pub async fn item(&self, item_id: ItemId) -> StoreResult<Item> {
        let row = sqlx::query(
            r#"
            SELECT id, name, category, unit_price_cents, description, created_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(*item_id.as_uuid())
        .fetch_optional(self.pool())
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(Item {
            id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            unit_price: Money::from_cents(row.try_get("unit_price_cents")?),
            description: row.try_get("description")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }

    /// All size rows for an item, ordered by size label.
    pub async fn size_stock(&self, item_id: ItemId) -> StoreResult<Vec<SizeStock>> {
        let rows = sqlx::query(
            "SELECT size, quantity FROM size_stock WHERE item_id = ?1 ORDER BY size",
        )
        .bind(*item_id.as_uuid())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(SizeStock {
                    item_id,
                    size: row.try_get("size")?,
                    quantity: row.try_get("quantity")?,
                })
            })
            .collect()
    }

    /// Total stock for an item across all sizes.
    pub async fn total_stock(&self, item_id: ItemId) -> StoreResult<i64> {
        let mut conn = self.pool().acquire().await?;
        Ok(cascade::total_stock(&mut conn, item_id).await?)
    }
}
