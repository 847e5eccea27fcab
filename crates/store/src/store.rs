//! The storage handle.
//!
//! A `Store` wraps a SQLite connection pool with an explicit open/close
//! lifecycle and is passed to callers rather than held in module-level state.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreResult;
use crate::schema;

/// SQLite-backed store. Cheap to clone; all clones share one pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) a store at `path` and ensure the schema.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        schema::init(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory store for tests.
    ///
    /// A single connection keeps every operation on the same in-memory
    /// database and serializes writers, matching the single-writer model.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        schema::init(&pool).await?;
        Ok(Self { pool })
    }

    /// Close the pool, releasing the underlying file handles.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
