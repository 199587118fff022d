//! Collaborator seams around the engines: ledger access, session and download delivery.

use serde::{Deserialize, Serialize};
use tally_domain::{Amount, Category, LedgerSnapshot, Transaction};
use uuid::Uuid;

use crate::CoreError;

/// Read access to persisted ledger records, scoped per user.
///
/// Transactions come back ordered by date, newest first.
pub trait LedgerStore: Send + Sync {
    fn list_transactions(&self, user_id: Uuid) -> Result<Vec<Transaction>, CoreError>;
    /// Returns the user's own categories plus the shared defaults.
    fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>, CoreError>;
}

/// Identity of the signed-in user, if any.
pub trait SessionContext {
    fn current_user(&self) -> Option<Uuid>;
}

/// Session with a fixed (or absent) user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticSession {
    user: Option<Uuid>,
}

impl StaticSession {
    pub fn signed_in(user_id: Uuid) -> Self {
        Self {
            user: Some(user_id),
        }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl SessionContext for StaticSession {
    fn current_user(&self) -> Option<Uuid> {
        self.user
    }
}

/// Destination for rendered exports.
pub trait DownloadSink {
    fn deliver(&self, file_name: &str, contents: &str) -> Result<(), CoreError>;
}

/// Pulls the signed-in user's records into one snapshot.
///
/// Records owned by other users are dropped even if the store returns them.
pub fn load_snapshot(
    store: &dyn LedgerStore,
    session: &dyn SessionContext,
) -> Result<LedgerSnapshot, CoreError> {
    let user_id = session.current_user().ok_or(CoreError::NotAuthenticated)?;
    let mut transactions = store.list_transactions(user_id)?;
    let mut categories = store.list_categories(user_id)?;

    let fetched = transactions.len() + categories.len();
    transactions.retain(|txn| txn.belongs_to(user_id));
    categories.retain(|category| category.is_visible_to(user_id));
    let dropped = fetched - transactions.len() - categories.len();
    if dropped > 0 {
        tracing::warn!(%user_id, dropped, "ignoring records owned by other users");
    }

    tracing::debug!(
        %user_id,
        transactions = transactions.len(),
        categories = categories.len(),
        "ledger snapshot loaded"
    );
    Ok(LedgerSnapshot::new(transactions, categories))
}

/// Ledger store held entirely in memory, serializable as the ledger file layout.
///
/// Mutations enforce ownership, category existence and kind agreement, so a store
/// built only through these methods never holds unresolved references.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InMemoryLedgerStore {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    categories: Vec<Category>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps records loaded from elsewhere without re-validating them.
    pub fn from_records(transactions: Vec<Transaction>, categories: Vec<Category>) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }

    /// Records a transaction after checking its category is visible and of the same kind.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Uuid, CoreError> {
        let category = self
            .categories
            .iter()
            .find(|category| category.id == transaction.category_id)
            .ok_or(CoreError::CategoryNotFound(transaction.category_id))?;
        if !category.is_visible_to(transaction.user_id) {
            return Err(CoreError::Forbidden(category.id));
        }
        if !category.accepts_kind(transaction.kind) {
            return Err(CoreError::KindMismatch {
                category_id: category.id,
                category_kind: category.kind,
                transaction_kind: transaction.kind,
            });
        }
        let id = transaction.id;
        tracing::debug!(transaction_id = %id, category_id = %category.id, "transaction recorded");
        self.transactions.push(transaction);
        Ok(id)
    }

    pub fn delete_transaction(
        &mut self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Transaction, CoreError> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        if !self.transactions[index].belongs_to(user_id) {
            return Err(CoreError::Forbidden(id));
        }
        Ok(self.transactions.remove(index))
    }

    /// Sets or clears the monthly ceiling of a category the user owns.
    pub fn set_budget(
        &mut self,
        user_id: Uuid,
        category_id: Uuid,
        budget: Option<Amount>,
    ) -> Result<(), CoreError> {
        let category = self
            .categories
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or(CoreError::CategoryNotFound(category_id))?;
        if category.user_id != Some(user_id) {
            return Err(CoreError::Forbidden(category_id));
        }
        category.set_budget(budget);
        Ok(())
    }

    /// Removes a category the user owns. Shared defaults are rejected.
    pub fn delete_category(
        &mut self,
        user_id: Uuid,
        category_id: Uuid,
    ) -> Result<Category, CoreError> {
        let index = self
            .categories
            .iter()
            .position(|category| category.id == category_id)
            .ok_or(CoreError::CategoryNotFound(category_id))?;
        let category = &self.categories[index];
        category.ensure_deletable()?;
        if category.user_id != Some(user_id) {
            return Err(CoreError::Forbidden(category_id));
        }
        Ok(self.categories.remove(index))
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn list_transactions(&self, user_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let mut owned: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|txn| txn.belongs_to(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(owned)
    }

    fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>, CoreError> {
        Ok(self
            .categories
            .iter()
            .filter(|category| category.is_visible_to(user_id))
            .cloned()
            .collect())
    }
}
