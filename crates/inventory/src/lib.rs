//! `clothier-inventory` — inventory domain: catalog items, per-size stock,
//! low-stock policy, restock classification and reorder planning.

pub mod item;
pub mod reorder;
pub mod restock;
pub mod stock;

pub use item::{Item, NewItem};
pub use reorder::ReorderPolicy;
pub use restock::{days_of_cover, days_until_stockout, RestockStatus};
pub use stock::{is_low_stock, total_quantity, SizeStock, StockLevel, LOW_STOCK_THRESHOLD};
