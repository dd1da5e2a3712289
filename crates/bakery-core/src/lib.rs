//! bakery-core
//!
//! Ledger model for the bakery books: record stores, totals, and the profit calculator.
//! Depends on bakery-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod books;
pub mod error;
pub mod profit;
pub mod record_service;
pub mod record_store;
pub mod storage;
pub mod totals;

pub use books::BakeryBooks;
pub use error::CoreError;
pub use profit::*;
pub use record_service::*;
pub use record_store::*;
pub use storage::{KeyValueStore, MemoryStore};
pub use totals::LedgerTotals;

#[cfg(test)]
mod tests;
