//! tally-core
//!
//! Filtering, aggregation, budget evaluation and export over ledger snapshots.
//! Depends on tally-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod aggregation_service;
pub mod budget_service;
pub mod error;
pub mod export_service;
pub mod filter;
pub mod store;
pub mod summary_service;
pub mod time;

pub use aggregation_service::*;
pub use budget_service::*;
pub use error::CoreError;
pub use export_service::*;
pub use filter::*;
pub use store::*;
pub use summary_service::*;
pub use time::*;

#[cfg(test)]
mod tests;
