//! Domain model for income and expense transactions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, error::DomainError};

/// One financial event recorded by a user.
///
/// Transactions are never edited in place; a correction is a delete followed by a new
/// record. Deserialization applies the same checks as [`Transaction::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "StoredTransaction")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: Kind,
    pub amount: Amount,
    pub category_id: Uuid,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of a transaction before validation.
#[derive(Deserialize)]
struct StoredTransaction {
    id: Uuid,
    user_id: Uuid,
    kind: Kind,
    amount: Amount,
    category_id: Uuid,
    description: String,
    date: NaiveDate,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = DomainError;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored.id,
            user_id: stored.user_id,
            kind: stored.kind,
            amount: stored.amount,
            category_id: stored.category_id,
            description: validated_description(stored.description)?,
            date: stored.date,
            created_at: stored.created_at,
        })
    }
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        kind: Kind,
        amount: Amount,
        category_id: Uuid,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount,
            category_id,
            description: validated_description(description.into())?,
            date,
            created_at: Utc::now(),
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

fn validated_description(description: String) -> Result<String, DomainError> {
    if description.trim().is_empty() {
        return Err(DomainError::EmptyDescription);
    }
    Ok(description)
}
