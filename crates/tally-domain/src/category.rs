//! Domain types representing transaction categories and their monthly budgets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Amount, Kind},
    error::DomainError,
};

/// Named bucket for transactions of a single [`Kind`].
///
/// A category is either owned by one user or is a shared system default
/// (`user_id == None`, `is_default == true`) that nobody may delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "StoredCategory")]
pub struct Category {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub kind: Kind,
    pub is_default: bool,
    /// Monthly ceiling. `None` means the category is untracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Amount>,
}

#[derive(Deserialize)]
struct StoredCategory {
    id: Uuid,
    #[serde(default)]
    user_id: Option<Uuid>,
    name: String,
    kind: Kind,
    #[serde(default)]
    is_default: bool,
    #[serde(default)]
    budget: Option<Amount>,
}

impl TryFrom<StoredCategory> for Category {
    type Error = DomainError;

    fn try_from(stored: StoredCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored.id,
            user_id: stored.user_id,
            name: validated_name(stored.name)?,
            kind: stored.kind,
            is_default: stored.is_default,
            budget: stored.budget,
        })
    }
}

impl Category {
    pub fn new(user_id: Uuid, name: impl Into<String>, kind: Kind) -> Result<Self, DomainError> {
        let name = validated_name(name.into())?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: Some(user_id),
            name,
            kind,
            is_default: false,
            budget: None,
        })
    }

    /// Builds a system-provided category shared read-only across users.
    pub fn default_category(name: impl Into<String>, kind: Kind) -> Result<Self, DomainError> {
        let name = validated_name(name.into())?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: None,
            name,
            kind,
            is_default: true,
            budget: None,
        })
    }

    pub fn with_budget(mut self, budget: Amount) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Returns the monthly ceiling, if one is set.
    pub fn budget(&self) -> Option<Amount> {
        self.budget
    }

    /// Replaces the monthly ceiling without touching any other field.
    pub fn set_budget(&mut self, budget: Option<Amount>) {
        self.budget = budget;
    }

    /// Returns the budget only when it can be used as a divisor.
    pub fn trackable_budget(&self) -> Option<Amount> {
        self.budget.filter(|budget| !budget.is_zero())
    }

    pub fn accepts_kind(&self, kind: Kind) -> bool {
        self.kind == kind
    }

    /// Shared defaults are visible to everyone; owned categories only to their owner.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        self.is_default || self.user_id == Some(user_id)
    }

    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        if self.is_default {
            return Err(DomainError::DefaultCategoryImmutable(self.id));
        }
        Ok(())
    }
}

fn validated_name(name: String) -> Result<String, DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName);
    }
    Ok(name)
}
