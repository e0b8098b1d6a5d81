#![doc(test(attr(deny(warnings))))]

//! Money Manager keeps a personal income and expense ledger in a local JSON
//! store and serves it through an interactive CLI: balance summaries,
//! month and kind filtering, a category breakdown chart and CSV export
//! compatible with the data the original browser app produced.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use errors::{StoreError, StoreResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Money Manager tracing initialized.");
    });
}
