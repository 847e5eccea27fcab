//! Shared steps of the write cascades.
//!
//! Each helper runs against the connection of an already-open transaction,
//! so every cascade (mutation, change log, alert check) commits or rolls
//! back as one unit.

use chrono::Utc;
use sqlx::{Row, SqliteConnection};

use clothier_core::ItemId;
use clothier_inventory::{is_low_stock, LOW_STOCK_THRESHOLD};

pub(crate) async fn item_exists(
    conn: &mut SqliteConnection,
    item_id: ItemId,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM items WHERE id = ?1")
        .bind(*item_id.as_uuid())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

/// Quantity on hand for one item/size pair, if the row exists.
pub(crate) async fn size_quantity(
    conn: &mut SqliteConnection,
    item_id: ItemId,
    size: &str,
) -> Result<Option<i64>, sqlx::Error> {
    let row = sqlx::query("SELECT quantity FROM size_stock WHERE item_id = ?1 AND size = ?2")
        .bind(*item_id.as_uuid())
        .bind(size)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|r| r.try_get("quantity")).transpose()
}

/// Total stock for an item across all of its size rows.
pub(crate) async fn total_stock(
    conn: &mut SqliteConnection,
    item_id: ItemId,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COALESCE(SUM(quantity), 0) AS total FROM size_stock WHERE item_id = ?1",
    )
    .bind(*item_id.as_uuid())
    .fetch_one(&mut *conn)
    .await?;
    row.try_get("total")
}

pub(crate) async fn upsert_size(
    conn: &mut SqliteConnection,
    item_id: ItemId,
    size: &str,
    quantity: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO size_stock (item_id, size, quantity)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(item_id, size)
        DO UPDATE SET quantity = excluded.quantity
        "#,
    )
    .bind(*item_id.as_uuid())
    .bind(size)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Append one change-log row for a committed stock mutation.
///
/// Runs for every code path that touches `size_stock` (manual edit, sale
/// fulfillment, reorder); if this insert fails the whole cascade rolls back,
/// since the log is the only audit record of the change.
pub(crate) async fn log_stock_change(
    conn: &mut SqliteConnection,
    item_id: ItemId,
    size: &str,
    old_quantity: i64,
    new_quantity: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO inventory_change_log (item_id, size, old_quantity, new_quantity, changed_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(*item_id.as_uuid())
    .bind(size)
    .bind(old_quantity)
    .bind(new_quantity)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Re-aggregate the item's total across all size rows and append an alert
/// when it is at or below the threshold.
///
/// Recomputed each time rather than stored as a flag; summing only the row
/// that changed would under/over-count multi-size items.
pub(crate) async fn check_low_stock(
    conn: &mut SqliteConnection,
    item_id: ItemId,
) -> Result<(), sqlx::Error> {
    let total = total_stock(&mut *conn, item_id).await?;
    if !is_low_stock(total) {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO low_stock_alerts (item_id, current_quantity, alert_date)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(*item_id.as_uuid())
    .bind(total)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    tracing::info!(%item_id, total, threshold = LOW_STOCK_THRESHOLD, "low stock alert raised");
    Ok(())
}

/// Record a rejected sale/order attempt in the failed-sale ledger.
pub(crate) async fn log_failed_sale(
    conn: &mut SqliteConnection,
    item_id: ItemId,
    attempted: i64,
    available: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO failed_sales (item_id, attempted_quantity, available_quantity, sale_date)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(*item_id.as_uuid())
    .bind(attempted)
    .bind(available)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    Ok(())
}
