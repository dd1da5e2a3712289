//! bakery-domain
//!
//! Pure domain models for the bakery books (records, ledger kinds, ledgers).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod error;
pub mod kind;
pub mod ledger;
pub mod record;
pub mod seed;

pub use common::*;
pub use error::DomainError;
pub use kind::*;
pub use ledger::*;
pub use record::*;
