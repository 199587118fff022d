//! Dashboard view assembled from a ledger snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_domain::{LedgerSnapshot, Transaction, WeekStart};

use crate::{
    aggregation_service::{AggregationService, LedgerTotals, NetBalance},
    budget_service::{BudgetEvaluation, BudgetService},
    time::Clock,
};

pub const DEFAULT_WEEKLY_GOAL: u32 = 20;
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Knobs that shape the dashboard without affecting the aggregates themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    pub week_start: WeekStart,
    /// Transactions per week that count as 100% progress.
    pub weekly_goal: u32,
    pub recent_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub reference: NaiveDate,
    pub totals: LedgerTotals,
    pub net: NetBalance,
    /// Weekly transaction count relative to the goal, capped at 100.
    pub weekly_progress_percent: Decimal,
    pub recent: Vec<Transaction>,
    pub budgets: Vec<BudgetEvaluation>,
}

pub struct SummaryService;

impl SummaryService {
    /// Builds the dashboard for the period containing `reference`.
    pub fn dashboard(
        snapshot: &LedgerSnapshot,
        reference: NaiveDate,
        settings: &DashboardSettings,
    ) -> DashboardSummary {
        let totals = AggregationService::summarize(
            &snapshot.transactions,
            &snapshot.categories,
            reference,
            settings.week_start,
        );
        let budgets = BudgetService::evaluate(&totals.spend_by_category, &snapshot.categories);
        let weekly_progress_percent =
            Self::weekly_progress(totals.weekly_transaction_count, settings.weekly_goal);
        let recent = snapshot
            .transactions
            .iter()
            .take(settings.recent_limit)
            .cloned()
            .collect();

        tracing::info!(
            %reference,
            transactions = snapshot.transaction_count(),
            tracked_budgets = budgets.len(),
            "dashboard summary built"
        );

        DashboardSummary {
            reference,
            net: totals.net_balance,
            totals,
            weekly_progress_percent,
            recent,
            budgets,
        }
    }

    /// Same as [`SummaryService::dashboard`], taking the reference day from `clock`.
    pub fn dashboard_now(
        snapshot: &LedgerSnapshot,
        clock: &dyn Clock,
        settings: &DashboardSettings,
    ) -> DashboardSummary {
        Self::dashboard(snapshot, clock.today(), settings)
    }

    /// `count / goal * 100`, capped at 100. A zero goal yields zero.
    pub fn weekly_progress(count: usize, goal: u32) -> Decimal {
        if goal == 0 {
            return Decimal::ZERO;
        }
        let percent = Decimal::from(count as u64) * Decimal::ONE_HUNDRED / Decimal::from(goal);
        percent.min(Decimal::ONE_HUNDRED)
    }
}
