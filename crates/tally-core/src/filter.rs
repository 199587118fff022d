//! Composable transaction predicates.
//!
//! Every dimension has a neutral value that matches all records, so a default
//! [`TransactionFilter`] returns its input unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_domain::{DomainError, Kind, Transaction};
use uuid::Uuid;

/// Restricts results to one transaction kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    Any,
    Only(Kind),
}

impl KindFilter {
    pub fn matches(self, kind: Kind) -> bool {
        match self {
            KindFilter::Any => true,
            KindFilter::Only(expected) => expected == kind,
        }
    }
}

impl From<Option<Kind>> for KindFilter {
    fn from(kind: Option<Kind>) -> Self {
        kind.map(KindFilter::Only).unwrap_or_default()
    }
}

/// Restricts results to one category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    Any,
    Only(Uuid),
}

impl CategoryFilter {
    pub fn matches(self, category_id: Uuid) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(expected) => expected == category_id,
        }
    }
}

impl From<Option<Uuid>> for CategoryFilter {
    fn from(category_id: Option<Uuid>) -> Self {
        category_id.map(CategoryFilter::Only).unwrap_or_default()
    }
}

/// Inclusive date bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, DomainError> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(DomainError::InvalidDateRange);
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Transaction predicate combining every dimension with logical AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionFilter {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub date_range: DateRange,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = KindFilter::Only(kind);
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category = CategoryFilter::Only(category_id);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Returns `true` when no dimension narrows the result.
    pub fn is_neutral(&self) -> bool {
        self.search_text.is_empty()
            && self.kind == KindFilter::Any
            && self.category == CategoryFilter::Any
            && self.date_range.is_open()
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_with_needle(transaction, &self.search_text.to_lowercase())
    }

    /// Returns the matching transactions in input order.
    pub fn apply<'a, I>(&self, transactions: I) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let needle = self.search_text.to_lowercase();
        transactions
            .into_iter()
            .filter(|txn| self.matches_with_needle(txn, &needle))
            .collect()
    }

    /// `folded_needle` must already be lowercase.
    fn matches_with_needle(&self, transaction: &Transaction, folded_needle: &str) -> bool {
        contains_folded(&transaction.description, folded_needle)
            && self.kind.matches(transaction.kind)
            && self.category.matches(transaction.category_id)
            && self.date_range.contains(transaction.date)
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || haystack.to_lowercase().contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_domain::Amount;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: Kind, category_id: Uuid, description: &str, on: NaiveDate) -> Transaction {
        Transaction::new(
            Uuid::nil(),
            kind,
            Amount::new(dec!(10)).unwrap(),
            category_id,
            description,
            on,
        )
        .unwrap()
    }

    fn sample() -> (Vec<Transaction>, Uuid, Uuid) {
        let food = Uuid::new_v4();
        let salary = Uuid::new_v4();
        let txns = vec![
            txn(Kind::Expense, food, "Coffee beans", date(2024, 2, 20)),
            txn(Kind::Income, salary, "February salary", date(2024, 2, 15)),
            txn(Kind::Expense, food, "Groceries", date(2024, 2, 3)),
            txn(Kind::Expense, food, "COFFEE shop", date(2024, 1, 28)),
        ];
        (txns, food, salary)
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (txns, _, _) = sample();
        let result = TransactionFilter::new().with_search("coffee").apply(&txns);
        let descriptions: Vec<_> = result.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Coffee beans", "COFFEE shop"]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let (txns, food, _) = sample();
        let filter = TransactionFilter::new()
            .with_kind(Kind::Expense)
            .with_category(food)
            .with_date_range(DateRange::new(Some(date(2024, 2, 1)), None).unwrap());
        let result = filter.apply(&txns);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.date >= date(2024, 2, 1)));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let (txns, _, _) = sample();
        let range = DateRange::new(Some(date(2024, 2, 3)), Some(date(2024, 2, 15))).unwrap();
        let result = TransactionFilter::new().with_date_range(range).apply(&txns);
        let dates: Vec<_> = result.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 15), date(2024, 2, 3)]);
    }

    #[test]
    fn end_only_range_keeps_older_records() {
        let (txns, _, _) = sample();
        let range = DateRange::new(None, Some(date(2024, 1, 31))).unwrap();
        let result = TransactionFilter::new().with_date_range(range).apply(&txns);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "COFFEE shop");
    }

    #[test]
    fn neutral_filter_returns_input_unchanged() {
        let (txns, _, _) = sample();
        let filter = TransactionFilter::default();
        assert!(filter.is_neutral());
        let result: Vec<Transaction> = filter.apply(&txns).into_iter().cloned().collect();
        assert_eq!(result, txns);
    }

    #[test]
    fn filtering_is_idempotent() {
        let (txns, food, _) = sample();
        let filter = TransactionFilter::new().with_search("co").with_category(food);
        let once = filter.apply(&txns);
        let twice = filter.apply(once.iter().copied());
        assert_eq!(once, twice);
    }

    #[test]
    fn apply_agrees_with_matches() {
        let (txns, food, salary) = sample();
        let filters = [
            TransactionFilter::new().with_search("COFFEE"),
            TransactionFilter::new().with_kind(Kind::Income),
            TransactionFilter::new().with_category(salary),
            TransactionFilter::new()
                .with_search("s")
                .with_category(food)
                .with_date_range(DateRange::new(None, Some(date(2024, 2, 10))).unwrap()),
        ];
        for filter in filters {
            let expected: Vec<_> = txns.iter().filter(|txn| filter.matches(txn)).collect();
            assert_eq!(filter.apply(&txns), expected);
        }
    }

    #[test]
    fn no_match_yields_empty_result() {
        let (txns, _, _) = sample();
        let result = TransactionFilter::new().with_search("rent").apply(&txns);
        assert!(result.is_empty());
    }

    #[test]
    fn optional_inputs_map_to_neutral_values() {
        assert_eq!(KindFilter::from(None), KindFilter::Any);
        assert_eq!(CategoryFilter::from(None), CategoryFilter::Any);
        assert!(DateRange::new(Some(date(2024, 2, 2)), Some(date(2024, 2, 1))).is_err());
    }
}
