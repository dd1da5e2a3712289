#![doc(test(attr(deny(warnings))))]

//! Bakery Ledger keeps the bakery's income and expense sources, persists them
//! locally, and reports the running profit/loss percentage through a small
//! command shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bakery Ledger tracing initialized.");
    });
}
