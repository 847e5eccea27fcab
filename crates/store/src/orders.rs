//! Sale and order admission: `record_sale`, `create_order`,
//! `add_order_item`, plus customer/employee master data.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use clothier_core::{CustomerId, EmployeeId, ItemId, Money, OrderId, SaleId};
use clothier_sales::{Admission, OrderLine, OrderStatus, SaleRequest};

use crate::cascade;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Result of a sale attempt. Rejection is a committed, first-class outcome:
/// the failed-sale ledger row survives while the stock rows stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleOutcome {
    Admitted { sale_id: SaleId },
    Rejected { available: i64 },
}

/// Result of adding a line item to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderItemOutcome {
    Admitted { order_total: Money },
    Rejected { available: i64 },
}

impl Store {
    pub async fn add_customer(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> StoreResult<CustomerId> {
        let customer_id = CustomerId::new();
        sqlx::query("INSERT INTO customers (id, name, email, phone) VALUES (?1, ?2, ?3, ?4)")
            .bind(*customer_id.as_uuid())
            .bind(name)
            .bind(email)
            .bind(phone)
            .execute(self.pool())
            .await?;
        Ok(customer_id)
    }

    pub async fn add_employee(&self, name: &str) -> StoreResult<EmployeeId> {
        let employee_id = EmployeeId::new();
        sqlx::query("INSERT INTO employees (id, name) VALUES (?1, ?2)")
            .bind(*employee_id.as_uuid())
            .bind(name)
            .execute(self.pool())
            .await?;
        Ok(employee_id)
    }

    /// Record a sale attempt against one item/size pair.
    ///
    /// Cascade on admit: insert sale, decrement stock, change log, low-stock
    /// check. On reject: one failed-sale ledger row, zero stock mutation.
    pub async fn record_sale(&self, request: SaleRequest) -> StoreResult<SaleOutcome> {
        request.validate()?;

        let mut tx = self.pool().begin().await?;
        if !cascade::item_exists(&mut tx, request.item_id).await? {
            return Err(StoreError::NotFound);
        }

        let available = cascade::size_quantity(&mut tx, request.item_id, &request.size)
            .await?
            .unwrap_or(0);

        match Admission::decide(request.quantity, available) {
            Admission::Rejected { available } => {
                cascade::log_failed_sale(&mut tx, request.item_id, request.quantity, available)
                    .await?;
                tx.commit().await?;
                tracing::info!(
                    item_id = %request.item_id,
                    size = %request.size,
                    attempted = request.quantity,
                    available,
                    "sale rejected: insufficient stock"
                );
                Ok(SaleOutcome::Rejected { available })
            }
            Admission::Admitted => {
                let new_quantity = available - request.quantity;
                cascade::upsert_size(&mut tx, request.item_id, &request.size, new_quantity)
                    .await?;
                cascade::log_stock_change(
                    &mut tx,
                    request.item_id,
                    &request.size,
                    available,
                    new_quantity,
                )
                .await?;
                cascade::check_low_stock(&mut tx, request.item_id).await?;

                let sale_id = SaleId::new();
                let total_price = request.total_price()?;
                sqlx::query(
                    r#"
                    INSERT INTO sales (id, item_id, size, quantity, total_price_cents, sale_date)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                )
                .bind(*sale_id.as_uuid())
                .bind(*request.item_id.as_uuid())
                .bind(&request.size)
                .bind(request.quantity)
                .bind(total_price.cents())
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;

                tx.commit().await?;
                tracing::debug!(%sale_id, item_id = %request.item_id, quantity = request.quantity, "sale recorded");
                Ok(SaleOutcome::Admitted { sale_id })
            }
        }
    }

    /// Open a new order in `Processing` state with a zero total.
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        employee_id: EmployeeId,
    ) -> StoreResult<OrderId> {
        let order_id = OrderId::new();
        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, employee_id, order_date, total_amount_cents, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(*order_id.as_uuid())
        .bind(*customer_id.as_uuid())
        .bind(*employee_id.as_uuid())
        .bind(Utc::now())
        .bind(0i64)
        .bind(OrderStatus::Processing.as_str())
        .execute(self.pool())
        .await?;
        Ok(order_id)
    }

    /// Add a line item to an order.
    ///
    /// Admission control mirrors `record_sale`; on admit the line's subtotal
    /// is persisted and the order total is recomputed as the sum of all line
    /// subtotals and written immediately, never derived lazily at read time.
    pub async fn add_order_item(
        &self,
        order_id: OrderId,
        item_id: ItemId,
        size: &str,
        quantity: i64,
        unit_price: Money,
    ) -> StoreResult<OrderItemOutcome> {
        let line = OrderLine::new(item_id, size, quantity, unit_price)?;
        let request = SaleRequest {
            item_id,
            size: size.to_string(),
            quantity,
            unit_price,
        };
        request.validate()?;

        let mut tx = self.pool().begin().await?;
        let order_exists = sqlx::query("SELECT 1 FROM orders WHERE id = ?1")
            .bind(*order_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !order_exists || !cascade::item_exists(&mut tx, item_id).await? {
            return Err(StoreError::NotFound);
        }

        let available = cascade::size_quantity(&mut tx, item_id, size)
            .await?
            .unwrap_or(0);

        match Admission::decide(quantity, available) {
            Admission::Rejected { available } => {
                cascade::log_failed_sale(&mut tx, item_id, quantity, available).await?;
                tx.commit().await?;
                tracing::info!(
                    %order_id,
                    %item_id,
                    size,
                    attempted = quantity,
                    available,
                    "order item rejected: insufficient stock"
                );
                Ok(OrderItemOutcome::Rejected { available })
            }
            Admission::Admitted => {
                sqlx::query(
                    r#"
                    INSERT INTO order_items
                        (id, order_id, item_id, size, quantity, unit_price_cents, subtotal_cents)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(Uuid::now_v7())
                .bind(*order_id.as_uuid())
                .bind(*item_id.as_uuid())
                .bind(size)
                .bind(quantity)
                .bind(unit_price.cents())
                .bind(line.subtotal.cents())
                .execute(&mut *tx)
                .await?;

                let new_quantity = available - quantity;
                cascade::upsert_size(&mut tx, item_id, size, new_quantity).await?;
                cascade::log_stock_change(&mut tx, item_id, size, available, new_quantity)
                    .await?;
                cascade::check_low_stock(&mut tx, item_id).await?;

                sqlx::query(
                    r#"
                    UPDATE orders
                    SET total_amount_cents = (
                        SELECT COALESCE(SUM(subtotal_cents), 0)
                        FROM order_items
                        WHERE order_id = ?1
                    )
                    WHERE id = ?1
                    "#,
                )
                .bind(*order_id.as_uuid())
                .execute(&mut *tx)
                .await?;

                let row = sqlx::query("SELECT total_amount_cents FROM orders WHERE id = ?1")
                    .bind(*order_id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await?;
                let order_total = Money::from_cents(row.try_get("total_amount_cents")?);

                tx.commit().await?;
                Ok(OrderItemOutcome::Admitted { order_total })
            }
        }
    }

    /// The persisted order total.
    pub async fn order_total(&self, order_id: OrderId) -> StoreResult<Money> {
        let row = sqlx::query("SELECT total_amount_cents FROM orders WHERE id = ?1")
            .bind(*order_id.as_uuid())
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(Money::from_cents(row.try_get("total_amount_cents")?))
    }
}
