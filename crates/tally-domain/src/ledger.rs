//! Ledger snapshots and reporting windows.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::WeekStart, error::DomainError, transaction::Transaction};

/// Inclusive range of calendar days used for time-windowed reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// First day of the reference month through the reference day itself.
    pub fn month_to_date(reference: NaiveDate) -> Self {
        let start =
            NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1).unwrap_or(reference);
        Self {
            start,
            end: reference,
        }
    }

    /// The seven-day week that contains `reference`, starting on `week_start`.
    pub fn week_containing(reference: NaiveDate, week_start: WeekStart) -> Self {
        let current = reference.weekday().num_days_from_monday() as i64;
        let first = week_start.weekday().num_days_from_monday() as i64;
        let offset = (current - first).rem_euclid(7);
        let start = reference - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }
}

/// Consistent view of one user's ledger as supplied by the ledger store.
///
/// Transactions keep the store's ordering (descending by date).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl LedgerSnapshot {
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Lookup from category id to display name, as consumed by the export formatter.
    pub fn category_names(&self) -> HashMap<Uuid, String> {
        self.categories
            .iter()
            .map(|category| (category.id, category.name.clone()))
            .collect()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
