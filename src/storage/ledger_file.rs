use std::{fs, io, path::Path};

use tally_core::{AggregationService, InMemoryLedgerStore};

use crate::errors::Result;

/// Reads a ledger file shaped as `{"transactions": [...], "categories": [...]}`.
///
/// A missing file yields an empty ledger so a fresh install can still report.
pub fn load_ledger(path: &Path) -> Result<InMemoryLedgerStore> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "ledger file not found, starting empty");
            return Ok(InMemoryLedgerStore::new());
        }
        Err(err) => return Err(err.into()),
    };
    let store = parse_ledger(&data)?;
    tracing::debug!(
        path = %path.display(),
        transactions = store.transactions().len(),
        categories = store.categories().len(),
        "ledger file loaded"
    );
    Ok(store)
}

/// Parses ledger JSON and reports dangling category references without rejecting them.
pub fn parse_ledger(data: &str) -> Result<InMemoryLedgerStore> {
    let store: InMemoryLedgerStore = serde_json::from_str(data)?;
    let dangling =
        AggregationService::unresolved_references(store.transactions(), store.categories());
    for unresolved in &dangling {
        tracing::warn!(%unresolved, "ledger file holds an unresolved reference");
    }
    Ok(store)
}
