//! Provides totals, groupings and time-windowed counts over ledger transactions.

use std::{collections::HashMap, fmt};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_domain::{Category, DateWindow, Kind, Transaction, WeekStart};
use uuid::Uuid;

/// Sign of the net balance, kept apart from the stored amounts.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BalanceDirection {
    Surplus,
    Deficit,
}

impl fmt::Display for BalanceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BalanceDirection::Surplus => "Surplus",
            BalanceDirection::Deficit => "Deficit",
        };
        f.write_str(label)
    }
}

/// Signed difference between income and expenses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NetBalance(Decimal);

impl NetBalance {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    /// Absolute value for display next to [`NetBalance::direction`].
    pub fn magnitude(self) -> Decimal {
        self.0.abs()
    }

    /// A zero balance counts as a surplus.
    pub fn direction(self) -> BalanceDirection {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            BalanceDirection::Deficit
        } else {
            BalanceDirection::Surplus
        }
    }
}

/// A transaction that cannot be attributed to a category of its own kind.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum UnresolvedReference {
    MissingCategory {
        transaction_id: Uuid,
        category_id: Uuid,
    },
    KindMismatch {
        transaction_id: Uuid,
        category_id: Uuid,
        transaction_kind: Kind,
        category_kind: Kind,
    },
}

impl UnresolvedReference {
    pub fn transaction_id(&self) -> Uuid {
        match self {
            UnresolvedReference::MissingCategory { transaction_id, .. }
            | UnresolvedReference::KindMismatch { transaction_id, .. } => *transaction_id,
        }
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReference::MissingCategory {
                transaction_id,
                category_id,
            } => write!(
                f,
                "transaction {transaction_id} references missing category {category_id}"
            ),
            UnresolvedReference::KindMismatch {
                transaction_id,
                category_id,
                transaction_kind,
                category_kind,
            } => write!(
                f,
                "transaction {transaction_id} ({transaction_kind}) references {category_kind} category {category_id}"
            ),
        }
    }
}

/// Reporting windows derived from a reference day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Window used for per-category spend.
    pub month: DateWindow,
    /// Window used for the weekly transaction count.
    pub week: DateWindow,
}

impl ReportPeriod {
    pub fn containing(reference: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            month: DateWindow::month_to_date(reference),
            week: DateWindow::week_containing(reference, week_start),
        }
    }
}

/// Derived financial state for one snapshot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LedgerTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: NetBalance,
    pub spend_by_category: HashMap<Uuid, Decimal>,
    pub weekly_transaction_count: usize,
    pub period: ReportPeriod,
    pub unresolved: Vec<UnresolvedReference>,
}

impl LedgerTotals {
    pub fn spent_in(&self, category_id: Uuid) -> Decimal {
        self.spend_by_category
            .get(&category_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Default)]
struct Accumulator {
    income: Decimal,
    expenses: Decimal,
    weekly: usize,
    by_category: HashMap<Uuid, Decimal>,
    unresolved: Vec<UnresolvedReference>,
}

/// Stateless aggregation utilities that operate over transaction snapshots.
pub struct AggregationService;

impl AggregationService {
    /// Sum of every income amount.
    pub fn total_income<'a, I>(transactions: I) -> Decimal
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        sum_kind(transactions, Kind::Income)
    }

    /// Sum of every expense amount.
    pub fn total_expenses<'a, I>(transactions: I) -> Decimal
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        sum_kind(transactions, Kind::Expense)
    }

    /// Income minus expenses, computed in a single pass.
    pub fn net_balance<'a, I>(transactions: I) -> NetBalance
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let net = transactions
            .into_iter()
            .fold(Decimal::ZERO, |acc, txn| match txn.kind {
                Kind::Income => acc.saturating_add(txn.amount.value()),
                Kind::Expense => acc.saturating_sub(txn.amount.value()),
            });
        NetBalance::new(net)
    }

    /// Expense totals per category for transactions dated inside `window`.
    ///
    /// Transactions whose category is unknown or of the other kind are left out.
    /// Categories without matching transactions are absent from the map.
    pub fn spend_by_category<'a, I>(
        transactions: I,
        categories: &[Category],
        window: DateWindow,
    ) -> HashMap<Uuid, Decimal>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let lookup = category_lookup(categories);
        let mut spend = HashMap::new();
        for txn in transactions {
            if txn.is_expense() && window.contains(txn.date) && resolve(txn, &lookup).is_ok() {
                add_spend(&mut spend, txn);
            }
        }
        spend
    }

    /// Number of transactions of any kind dated inside the week containing `reference`.
    pub fn weekly_transaction_count<'a, I>(
        transactions: I,
        reference: NaiveDate,
        week_start: WeekStart,
    ) -> usize
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let week = DateWindow::week_containing(reference, week_start);
        transactions
            .into_iter()
            .filter(|txn| week.contains(txn.date))
            .count()
    }

    /// Lists transactions that cannot be grouped under their category.
    pub fn unresolved_references<'a, I>(
        transactions: I,
        categories: &[Category],
    ) -> Vec<UnresolvedReference>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let lookup = category_lookup(categories);
        transactions
            .into_iter()
            .filter_map(|txn| resolve(txn, &lookup).err())
            .collect()
    }

    /// Computes every aggregate for the period containing `reference` in one pass.
    pub fn summarize<'a, I>(
        transactions: I,
        categories: &[Category],
        reference: NaiveDate,
        week_start: WeekStart,
    ) -> LedgerTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let period = ReportPeriod::containing(reference, week_start);
        let lookup = category_lookup(categories);
        let mut acc = Accumulator::default();
        let mut seen = 0usize;

        for txn in transactions {
            seen += 1;
            let resolved = match resolve(txn, &lookup) {
                Ok(()) => true,
                Err(unresolved) => {
                    tracing::warn!(%unresolved, "excluding transaction from category totals");
                    acc.unresolved.push(unresolved);
                    false
                }
            };
            match txn.kind {
                Kind::Income => acc.income = acc.income.saturating_add(txn.amount.value()),
                Kind::Expense => {
                    acc.expenses = acc.expenses.saturating_add(txn.amount.value());
                    if resolved && period.month.contains(txn.date) {
                        add_spend(&mut acc.by_category, txn);
                    }
                }
            }
            if period.week.contains(txn.date) {
                acc.weekly += 1;
            }
        }

        tracing::debug!(
            transactions = seen,
            categories = acc.by_category.len(),
            unresolved = acc.unresolved.len(),
            "ledger totals computed"
        );

        LedgerTotals {
            total_income: acc.income,
            total_expenses: acc.expenses,
            net_balance: NetBalance::new(acc.income.saturating_sub(acc.expenses)),
            spend_by_category: acc.by_category,
            weekly_transaction_count: acc.weekly,
            period,
            unresolved: acc.unresolved,
        }
    }
}

fn sum_kind<'a, I>(transactions: I, kind: Kind) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.amount.value())
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn add_spend(spend: &mut HashMap<Uuid, Decimal>, txn: &Transaction) {
    let total = spend.entry(txn.category_id).or_insert(Decimal::ZERO);
    *total = total.saturating_add(txn.amount.value());
}

fn category_lookup(categories: &[Category]) -> HashMap<Uuid, &Category> {
    categories.iter().map(|c| (c.id, c)).collect()
}

fn resolve(
    txn: &Transaction,
    lookup: &HashMap<Uuid, &Category>,
) -> Result<(), UnresolvedReference> {
    match lookup.get(&txn.category_id) {
        None => Err(UnresolvedReference::MissingCategory {
            transaction_id: txn.id,
            category_id: txn.category_id,
        }),
        Some(category) if !category.accepts_kind(txn.kind) => {
            Err(UnresolvedReference::KindMismatch {
                transaction_id: txn.id,
                category_id: category.id,
                transaction_kind: txn.kind,
                category_kind: category.kind,
            })
        }
        Some(_) => Ok(()),
    }
}
