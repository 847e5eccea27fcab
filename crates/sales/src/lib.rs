//! `clothier-sales` — sale admission control and order line arithmetic.

pub mod admission;
pub mod order;

pub use admission::{Admission, SaleRequest};
pub use order::{order_total, OrderLine, OrderStatus};
