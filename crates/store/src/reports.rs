//! Reporting views: pure, side-effect-free aggregations recomputed on read.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use clothier_core::{ItemId, Money, OrderId, SaleId};
use clothier_inventory::{days_of_cover, days_until_stockout, RestockStatus};

use crate::error::StoreResult;
use crate::store::Store;

/// One recorded sale with its item name, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummaryRow {
    pub sale_id: SaleId,
    pub item_name: String,
    pub size: String,
    pub quantity: i64,
    pub total_price: Money,
    pub sale_date: DateTime<Utc>,
}

/// One order with customer/employee context and a concatenation of its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummaryRow {
    pub order_id: OrderId,
    pub customer_name: String,
    pub employee_name: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: Money,
    /// Human-readable line concatenation, e.g. `2 x Denim Jacket (M), 1 x Tee (S)`.
    pub items: String,
}

/// Per-item stock position with a size breakdown string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStatusRow {
    pub item_id: ItemId,
    pub name: String,
    pub total_quantity: i64,
    /// e.g. `M: 10, S: 4` (ordered by size label).
    pub size_breakdown: String,
}

/// Restock recommendation for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockRow {
    pub item_id: ItemId,
    pub name: String,
    pub current_stock: i64,
    pub avg_daily_sales: f64,
    pub days_until_stockout: i64,
    pub status: RestockStatus,
}

impl Store {
    /// Sales summary: each sale joined with its item name, newest first.
    pub async fn sales_summary(&self) -> StoreResult<Vec<SalesSummaryRow>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, i.name, s.size, s.quantity, s.total_price_cents, s.sale_date
            FROM sales s
            JOIN items i ON i.id = s.item_id
            ORDER BY s.sale_date DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(SalesSummaryRow {
                    sale_id: SaleId::from_uuid(row.try_get::<Uuid, _>("id")?),
                    item_name: row.try_get("name")?,
                    size: row.try_get("size")?,
                    quantity: row.try_get("quantity")?,
                    total_price: Money::from_cents(row.try_get("total_price_cents")?),
                    sale_date: row.try_get("sale_date")?,
                })
            })
            .collect()
    }

    /// Order summary: per order, its customer/employee/date/status and a
    /// concatenation of line items, newest first.
    pub async fn order_summaries(&self) -> StoreResult<Vec<OrderSummaryRow>> {
        let line_rows = sqlx::query(
            r#"
            SELECT oi.order_id, oi.quantity, oi.size, i.name
            FROM order_items oi
            JOIN items i ON i.id = oi.item_id
            ORDER BY oi.id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut lines_by_order: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in line_rows {
            let order_id: Uuid = row.try_get("order_id")?;
            let quantity: i64 = row.try_get("quantity")?;
            let name: String = row.try_get("name")?;
            let size: String = row.try_get("size")?;
            lines_by_order
                .entry(order_id)
                .or_default()
                .push(format!("{quantity} x {name} ({size})"));
        }

        let rows = sqlx::query(
            r#"
            SELECT o.id, c.name AS customer_name, e.name AS employee_name,
                   o.order_date, o.status, o.total_amount_cents
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            JOIN employees e ON e.id = o.employee_id
            ORDER BY o.order_date DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                Ok(OrderSummaryRow {
                    order_id: OrderId::from_uuid(id),
                    customer_name: row.try_get("customer_name")?,
                    employee_name: row.try_get("employee_name")?,
                    order_date: row.try_get("order_date")?,
                    status: row.try_get("status")?,
                    total_amount: Money::from_cents(row.try_get("total_amount_cents")?),
                    items: lines_by_order.remove(&id).unwrap_or_default().join(", "),
                })
            })
            .collect()
    }

    /// Inventory status: per item, total quantity and a size breakdown
    /// string, ordered by item name.
    pub async fn inventory_status(&self) -> StoreResult<Vec<InventoryStatusRow>> {
        let size_rows = sqlx::query(
            "SELECT item_id, size, quantity FROM size_stock ORDER BY size",
        )
        .fetch_all(self.pool())
        .await?;

        let mut sizes_by_item: HashMap<Uuid, Vec<(String, i64)>> = HashMap::new();
        for row in size_rows {
            let item_id: Uuid = row.try_get("item_id")?;
            let size: String = row.try_get("size")?;
            let quantity: i64 = row.try_get("quantity")?;
            sizes_by_item.entry(item_id).or_default().push((size, quantity));
        }

        let rows = sqlx::query("SELECT id, name FROM items ORDER BY name")
            .fetch_all(self.pool())
            .await?;

        rows.into_iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                let sizes = sizes_by_item.remove(&id).unwrap_or_default();
                let total_quantity = sizes.iter().map(|(_, q)| q).sum();
                let size_breakdown = sizes
                    .iter()
                    .map(|(size, quantity)| format!("{size}: {quantity}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(InventoryStatusRow {
                    item_id: ItemId::from_uuid(id),
                    name: row.try_get("name")?,
                    total_quantity,
                    size_breakdown,
                })
            })
            .collect()
    }

    /// Restock recommendations: items with sales activity or low stock,
    /// classified by projected days of cover, most urgent first.
    pub async fn restock_recommendations(&self) -> StoreResult<Vec<RestockRow>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.name,
                   COALESCE(ss.total, 0) AS current_stock,
                   COALESCE(sa.avg_qty, 0.0) AS avg_daily_sales
            FROM items i
            LEFT JOIN (
                SELECT item_id, SUM(quantity) AS total
                FROM size_stock
                GROUP BY item_id
            ) ss ON ss.item_id = i.id
            LEFT JOIN (
                SELECT item_id, AVG(quantity) AS avg_qty
                FROM sales
                GROUP BY item_id
            ) sa ON sa.item_id = i.id
            WHERE COALESCE(sa.avg_qty, 0) > 0 OR COALESCE(ss.total, 0) < 10
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut recommendations = rows
            .into_iter()
            .map(|row| {
                let current_stock: i64 = row.try_get("current_stock")?;
                let avg_daily_sales: f64 = row.try_get("avg_daily_sales")?;
                // Tier is decided on the raw quotient; only the displayed
                // day count is rounded.
                let cover = days_of_cover(current_stock, avg_daily_sales);
                Ok(RestockRow {
                    item_id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
                    name: row.try_get("name")?,
                    current_stock,
                    avg_daily_sales,
                    days_until_stockout: days_until_stockout(current_stock, avg_daily_sales),
                    status: RestockStatus::classify(cover),
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        recommendations.sort_by_key(|r| r.days_until_stockout);
        Ok(recommendations)
    }
}
