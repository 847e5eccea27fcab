//! Table definitions.
//!
//! Ids are UUIDs stored as 16-byte blobs; timestamps are UTC text; money is
//! integer cents. The `*_log`, `*_alerts` and `failed_sales` tables are
//! append-only ledgers with rowid keys.

use sqlx::SqlitePool;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id               BLOB PRIMARY KEY,
        name             TEXT NOT NULL,
        category         TEXT NOT NULL,
        unit_price_cents INTEGER NOT NULL,
        description      TEXT NOT NULL,
        created_at       TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS size_stock (
        item_id  BLOB NOT NULL REFERENCES items (id),
        size     TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        PRIMARY KEY (item_id, size)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id    BLOB PRIMARY KEY,
        name  TEXT NOT NULL,
        email TEXT UNIQUE,
        phone TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id   BLOB PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id                 BLOB PRIMARY KEY,
        customer_id        BLOB NOT NULL REFERENCES customers (id),
        employee_id        BLOB NOT NULL REFERENCES employees (id),
        order_date         TEXT NOT NULL,
        total_amount_cents INTEGER NOT NULL,
        status             TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id               BLOB PRIMARY KEY,
        order_id         BLOB NOT NULL REFERENCES orders (id),
        item_id          BLOB NOT NULL REFERENCES items (id),
        size             TEXT NOT NULL,
        quantity         INTEGER NOT NULL,
        unit_price_cents INTEGER NOT NULL,
        subtotal_cents   INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id                BLOB PRIMARY KEY,
        item_id           BLOB NOT NULL REFERENCES items (id),
        size              TEXT NOT NULL,
        quantity          INTEGER NOT NULL,
        total_price_cents INTEGER NOT NULL,
        sale_date         TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS failed_sales (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id            BLOB NOT NULL REFERENCES items (id),
        attempted_quantity INTEGER NOT NULL,
        available_quantity INTEGER NOT NULL,
        sale_date          TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventory_change_log (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id      BLOB NOT NULL REFERENCES items (id),
        size         TEXT NOT NULL,
        old_quantity INTEGER NOT NULL,
        new_quantity INTEGER NOT NULL,
        changed_at   TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS price_change_log (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id         BLOB NOT NULL REFERENCES items (id),
        old_price_cents INTEGER NOT NULL,
        new_price_cents INTEGER NOT NULL,
        changed_at      TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS low_stock_alerts (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id          BLOB NOT NULL REFERENCES items (id),
        current_quantity INTEGER NOT NULL,
        alert_date       TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reorder_log (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id          BLOB NOT NULL REFERENCES items (id),
        quantity_before  INTEGER NOT NULL,
        quantity_ordered INTEGER NOT NULL,
        reorder_date     TEXT NOT NULL,
        status           TEXT NOT NULL
    )
    "#,
];

pub(crate) async fn init(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in TABLES {
        sqlx::query(table).execute(pool).await?;
    }
    Ok(())
}
