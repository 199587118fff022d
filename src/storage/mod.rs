//! File-backed collaborators for the engines: the JSON ledger file and the
//! directory that receives exports.

pub mod download;
pub mod ledger_file;

pub use download::FileDownloadSink;
pub use ledger_file::{load_ledger, parse_ledger};
