#![doc(test(attr(deny(warnings))))]

//! Expense Ledger records income and expense entries, persists them, and
//! derives the totals and chart-ready aggregates a finance dashboard shows.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{Committed, LedgerView, Session};
pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with(&config::Config::default());
}

/// Like [`init`], taking the log filter from `config`.
pub fn init_with(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(&config.log_filter);
        utils::build_info::log_startup();
    });
}
