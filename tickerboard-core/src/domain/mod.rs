//! Domain types for the watchlist board.

pub mod field;
pub mod record;

pub use field::{EditField, FieldKind, FieldValue, SortField, SortKey};
pub use record::{Sector, SectorParseError, Security, StockRecord, PRICE_FLOOR};
