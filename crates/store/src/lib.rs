//! `clothier-store` — SQLite persistence for the stock consistency core.
//!
//! Consistency rules that could live in database triggers are expressed here
//! as explicit service-layer cascades: every mutating operation runs inside
//! one transaction whose steps (constraint check, mutation, ledger append,
//! alert check) are visible in code, in that order.

mod cascade;
mod catalog;
mod error;
mod ledgers;
mod orders;
mod reorder;
mod reports;
mod schema;
mod store;

pub use error::{StoreError, StoreResult};
pub use ledgers::{FailedSale, InventoryChange, LowStockAlert, PriceChange};
pub use orders::{OrderItemOutcome, SaleOutcome};
pub use reorder::{ReorderLogEntry, ReorderPattern, ReorderedItem};
pub use reports::{InventoryStatusRow, OrderSummaryRow, RestockRow, SalesSummaryRow};
pub use store::Store;
