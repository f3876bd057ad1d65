//! Tickerboard Core: records, generator, grid controller, tick driver, export.
//!
//! This crate holds everything the watchlist views share:
//! - Domain types (records, sectors, sortable and editable fields)
//! - Synthetic record generation from a security catalog
//! - Display formatting for currency, percentages, volume and market cap
//! - Search and sector filtering over the collection
//! - Selection / sort / inline-edit state machine
//! - Periodic price perturbation and its cancellable timer thread
//! - CSV export of a selection
//! - TOML configuration

pub mod board;
pub mod config;
pub mod controller;
pub mod domain;
pub mod edit;
pub mod export;
pub mod filter;
pub mod format;
pub mod generator;
pub mod selection;
pub mod sort;
pub mod tick;

pub use board::{Board, BoardError, Summary};
pub use config::{BoardConfig, ConfigError};
pub use controller::{GridController, SelectAllState};
pub use domain::{EditField, FieldKind, FieldValue, Sector, Security, SortField, StockRecord};
pub use edit::{EditError, EditSession};
pub use filter::SectorFilter;
pub use sort::{SortDirection, SortSpec};
pub use tick::{TickDriver, TickEvent, TickParams};
