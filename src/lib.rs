#![doc(test(attr(deny(warnings))))]

//! Tally turns a personal ledger of income and expense records into totals,
//! per-category spend, budget health and CSV exports.
//!
//! The engines live in the workspace crates re-exported here; this crate adds the
//! ledger file loader, the download sink, logging setup and the `tally` CLI.

pub mod cli;
pub mod errors;
pub mod storage;
pub mod utils;

pub use errors::{Result, TallyError};
pub use tally_config;
pub use tally_core;
pub use tally_domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("tally tracing initialized");
    });
}
