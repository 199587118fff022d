use tally_domain::{DomainError, Kind};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No signed-in user")]
    NotAuthenticated,
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Category {category_id} holds {category_kind} entries, not {transaction_kind}")]
    KindMismatch {
        category_id: Uuid,
        category_kind: Kind,
        transaction_kind: Kind,
    },
    #[error("Record {0} belongs to another user")]
    Forbidden(Uuid),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Download failed: {0}")]
    Sink(String),
}
