//! Implementations behind each `tally` subcommand.

use std::{collections::HashMap, path::PathBuf};

use chrono::NaiveDate;
use tally_config::Config;
use tally_core::{
    AggregationService, BudgetEvaluation, BudgetService, DashboardSettings, DateRange,
    ExportService, SummaryService, TransactionFilter,
};
use tally_domain::{LedgerSnapshot, Transaction};
use uuid::Uuid;

use super::{args::FilterArgs, output};
use crate::{
    errors::{Result, TallyError},
    storage::FileDownloadSink,
    utils::build_info,
};

/// Everything a reporting command needs: preferences, the user's records and "today".
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub snapshot: LedgerSnapshot,
    pub today: NaiveDate,
}

impl CommandContext {
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            week_start: self.config.week_start,
            weekly_goal: self.config.weekly_goal,
            recent_limit: self.config.recent_limit,
        }
    }

    fn currency(&self) -> &str {
        &self.config.currency
    }
}

pub fn summary(ctx: &CommandContext) -> Result<()> {
    let dashboard = SummaryService::dashboard(&ctx.snapshot, ctx.today, &ctx.settings());
    let currency = ctx.currency();
    let totals = &dashboard.totals;

    output::section(format!("Summary for {}", dashboard.reference));
    output::info(format!("Income:    {}", output::money(currency, totals.total_income)));
    output::info(format!("Expenses:  {}", output::money(currency, totals.total_expenses)));
    output::info(format!(
        "Net:       {} ({})",
        output::money(currency, dashboard.net.magnitude()),
        output::direction_label(dashboard.net.direction())
    ));
    output::info(format!(
        "This week: {} transactions ({} of goal {})",
        totals.weekly_transaction_count,
        output::percent(dashboard.weekly_progress_percent),
        ctx.config.weekly_goal
    ));

    output::section("Budgets");
    if dashboard.budgets.is_empty() {
        output::info("No budgets set.");
    }
    for evaluation in &dashboard.budgets {
        output::info(budget_line(evaluation, currency));
    }

    output::section("Recent transactions");
    if dashboard.recent.is_empty() {
        output::info("No transactions yet.");
    }
    let names = ctx.snapshot.category_names();
    for txn in &dashboard.recent {
        output::info(output::transaction_row(txn, &names, currency));
    }

    for unresolved in &totals.unresolved {
        output::warning(unresolved);
    }
    Ok(())
}

pub fn budgets(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.settings();
    let totals = AggregationService::summarize(
        &ctx.snapshot.transactions,
        &ctx.snapshot.categories,
        ctx.today,
        settings.week_start,
    );
    let evaluations: HashMap<Uuid, BudgetEvaluation> =
        BudgetService::evaluate(&totals.spend_by_category, &ctx.snapshot.categories)
            .into_iter()
            .map(|evaluation| (evaluation.category_id, evaluation))
            .collect();
    let currency = ctx.currency();

    output::section(format!(
        "Budgets {} to {}",
        totals.period.month.start, totals.period.month.end
    ));
    let rows = BudgetService::chart_rows(&totals.spend_by_category, &ctx.snapshot.categories);
    if rows.is_empty() {
        output::info("No expense categories.");
    }
    for row in rows {
        match evaluations.get(&row.category_id) {
            Some(evaluation) => output::info(budget_line(evaluation, currency)),
            None => output::info(format!(
                "{:<16}  {} spent, no budget",
                row.name,
                output::money(currency, row.spent)
            )),
        }
    }
    Ok(())
}

pub fn list(ctx: &CommandContext, args: &FilterArgs) -> Result<()> {
    let filter = build_filter(args, &ctx.snapshot)?;
    let matches = filter.apply(&ctx.snapshot.transactions);
    let names = ctx.snapshot.category_names();

    if matches.is_empty() {
        output::info("No transactions match.");
        return Ok(());
    }
    for txn in &matches {
        output::info(output::transaction_row(txn, &names, ctx.currency()));
    }
    let (income, expenses) = kind_totals(&matches);
    output::info(format!(
        "{} transactions, income {}, expenses {}",
        matches.len(),
        output::money(ctx.currency(), income),
        output::money(ctx.currency(), expenses)
    ));
    Ok(())
}

/// Writes the filtered transactions as CSV and returns the file's path.
pub fn export(
    ctx: &CommandContext,
    out: PathBuf,
    file_name: Option<String>,
    args: &FilterArgs,
) -> Result<PathBuf> {
    let filter = build_filter(args, &ctx.snapshot)?;
    let matches = filter.apply(&ctx.snapshot.transactions);
    let file_name = file_name.unwrap_or_else(|| ctx.config.export_file_name.clone());
    let sink = FileDownloadSink::new(out);

    ExportService::export_to(
        &sink,
        &file_name,
        matches.iter().copied(),
        &ctx.snapshot.category_names(),
    )?;
    let path = sink.path_for(&file_name);
    output::success(format!(
        "Exported {} transactions to {}",
        matches.len(),
        path.display()
    ));
    Ok(path)
}

pub fn version() {
    output::info(build_info::current());
}

/// Translates command line flags into a filter; omitted flags stay neutral.
pub fn build_filter(args: &FilterArgs, snapshot: &LedgerSnapshot) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::new()
        .with_date_range(DateRange::new(args.from, args.to)?);
    if let Some(text) = &args.search {
        filter = filter.with_search(text.clone());
    }
    if let Some(kind) = args.kind {
        filter = filter.with_kind(kind);
    }
    if let Some(raw) = &args.category {
        filter = filter.with_category(resolve_category(snapshot, raw)?);
    }
    Ok(filter)
}

/// Finds a category by id or by case-insensitive name.
pub fn resolve_category(snapshot: &LedgerSnapshot, raw: &str) -> Result<Uuid> {
    if let Ok(id) = raw.parse::<Uuid>() {
        return Ok(id);
    }
    let wanted = raw.trim().to_lowercase();
    let mut found = snapshot
        .categories
        .iter()
        .filter(|category| category.name.to_lowercase() == wanted);
    match (found.next(), found.next()) {
        (Some(category), None) => Ok(category.id),
        (Some(_), Some(_)) => Err(TallyError::InvalidInput(format!(
            "category name `{raw}` is ambiguous, use its id"
        ))),
        (None, _) => Err(TallyError::InvalidInput(format!("unknown category `{raw}`"))),
    }
}

fn kind_totals(transactions: &[&Transaction]) -> (rust_decimal::Decimal, rust_decimal::Decimal) {
    (
        AggregationService::total_income(transactions.iter().copied()),
        AggregationService::total_expenses(transactions.iter().copied()),
    )
}

fn budget_line(evaluation: &BudgetEvaluation, currency: &str) -> String {
    format!(
        "{:<16}  {} / {}  {:>7}  {}",
        evaluation.name,
        output::money(currency, evaluation.spent),
        output::money(currency, evaluation.budget.value()),
        output::percent(evaluation.utilization_percent()),
        output::status_label(evaluation.status)
    )
}
