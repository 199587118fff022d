//! Combines per-category spend with monthly ceilings to derive utilization and status.

use std::{collections::HashMap, fmt};

use rust_decimal::Decimal;
use serde::Serialize;
use tally_domain::{Amount, Category};
use uuid::Uuid;

const WARNING_PERCENT: u32 = 80;
const LIMIT_PERCENT: u32 = 100;

/// Threshold state of a tracked category.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum BudgetStatus {
    /// Spent less than 80% of the ceiling.
    Normal,
    /// Spent between 80% and 100% of the ceiling, both inclusive.
    Warning,
    /// Spent more than the ceiling.
    Exceeded,
}

impl BudgetStatus {
    /// Classifies `spent` against `budget`; a zero budget has no status.
    pub fn classify(spent: Decimal, budget: Amount) -> Option<Self> {
        if budget.is_zero() {
            return None;
        }
        let budget = budget.value();
        let status = if spent > budget {
            BudgetStatus::Exceeded
        } else if reaches_warning(spent, budget) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Normal
        };
        Some(status)
    }
}

/// `spent * 100 >= budget * 80`, for `spent <= budget`.
fn reaches_warning(spent: Decimal, budget: Decimal) -> bool {
    let scaled_spent = spent.checked_mul(Decimal::from(LIMIT_PERCENT));
    let warning_floor = budget.checked_mul(Decimal::from(WARNING_PERCENT));
    match (scaled_spent, warning_floor) {
        (Some(scaled_spent), Some(warning_floor)) => scaled_spent >= warning_floor,
        _ => utilization(spent, budget) * Decimal::from(LIMIT_PERCENT)
            >= Decimal::from(WARNING_PERCENT),
    }
}

/// `spent / budget`, saturating at `Decimal::MAX` when the quotient does not fit.
fn utilization(spent: Decimal, budget: Decimal) -> Decimal {
    spent.checked_div(budget).unwrap_or(Decimal::MAX)
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Normal => "Normal",
            BudgetStatus::Warning => "Approaching budget limit",
            BudgetStatus::Exceeded => "Budget exceeded",
        };
        f.write_str(label)
    }
}

/// Utilization of one category with a positive budget.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetEvaluation {
    pub category_id: Uuid,
    pub name: String,
    pub budget: Amount,
    pub spent: Decimal,
    /// `spent / budget`, unrounded.
    pub utilization_ratio: Decimal,
    pub status: BudgetStatus,
}

impl BudgetEvaluation {
    pub fn utilization_percent(&self) -> Decimal {
        self.utilization_ratio.saturating_mul(Decimal::ONE_HUNDRED)
    }

    /// Signed headroom left in the budget; negative once exceeded.
    pub fn remaining(&self) -> Decimal {
        self.budget.value().saturating_sub(self.spent)
    }
}

/// Budget-versus-spend pair for every expense category, zero-filled for charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetChartRow {
    pub category_id: Uuid,
    pub name: String,
    pub budget: Decimal,
    pub spent: Decimal,
}

/// Stateless budget evaluation over aggregated spend.
pub struct BudgetService;

impl BudgetService {
    /// Evaluates every expense category whose budget is present and greater than zero.
    ///
    /// Results follow the order of `categories`.
    pub fn evaluate(
        spend_by_category: &HashMap<Uuid, Decimal>,
        categories: &[Category],
    ) -> Vec<BudgetEvaluation> {
        categories
            .iter()
            .filter_map(|category| Self::evaluate_category(spend_by_category, category))
            .collect()
    }

    /// Evaluates a single category; `None` when it is untracked or not an expense bucket.
    pub fn evaluate_category(
        spend_by_category: &HashMap<Uuid, Decimal>,
        category: &Category,
    ) -> Option<BudgetEvaluation> {
        if !category.kind.is_expense() {
            return None;
        }
        let budget = category.trackable_budget()?;
        let spent = spend_by_category
            .get(&category.id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let status = BudgetStatus::classify(spent, budget)?;
        Some(BudgetEvaluation {
            category_id: category.id,
            name: category.name.clone(),
            budget,
            spent,
            utilization_ratio: utilization(spent, budget.value()),
            status,
        })
    }

    /// Lists every expense category with its budget and spend, using zero for gaps.
    pub fn chart_rows(
        spend_by_category: &HashMap<Uuid, Decimal>,
        categories: &[Category],
    ) -> Vec<BudgetChartRow> {
        categories
            .iter()
            .filter(|category| category.kind.is_expense())
            .map(|category| BudgetChartRow {
                category_id: category.id,
                name: category.name.clone(),
                budget: category.budget().map(Amount::value).unwrap_or(Decimal::ZERO),
                spent: spend_by_category
                    .get(&category.id)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
            })
            .collect()
    }
}
