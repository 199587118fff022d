use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Invariant violations detected while building ledger records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(Decimal),
    #[error("amount exceeds the supported maximum (got {0})")]
    AmountTooLarge(Decimal),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("unknown kind: {0}")]
    UnknownKind(String),
    #[error("transaction description must not be empty")]
    EmptyDescription,
    #[error("category name must not be empty")]
    EmptyName,
    #[error("default category {0} cannot be deleted")]
    DefaultCategoryImmutable(Uuid),
    #[error("date range end must not precede start")]
    InvalidDateRange,
}
