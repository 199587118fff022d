//! tally-domain
//!
//! Pure record model (Transaction, Category, Kind, Amount, windows, snapshots).
//! No I/O, no CLI, no storage. Only data types, invariants and core enums.

pub mod category;
pub mod common;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use error::DomainError;
pub use ledger::*;
pub use transaction::*;
