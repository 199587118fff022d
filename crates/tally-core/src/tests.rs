use std::{cell::RefCell, collections::HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{
    aggregation_service::{AggregationService, BalanceDirection},
    budget_service::{BudgetService, BudgetStatus},
    export_service::{ExportService, DEFAULT_EXPORT_FILE_NAME},
    filter::{DateRange, TransactionFilter},
    store::{load_snapshot, DownloadSink, InMemoryLedgerStore, StaticSession},
    CoreError,
};
use tally_domain::{Amount, Category, DateWindow, Kind, LedgerSnapshot, Transaction, WeekStart};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(
    user: Uuid,
    kind: Kind,
    amount: Decimal,
    category: Uuid,
    description: &str,
    on: NaiveDate,
) -> Transaction {
    Transaction::new(user, kind, Amount::new(amount).unwrap(), category, description, on).unwrap()
}

#[derive(Default)]
struct CapturingSink {
    delivered: RefCell<Vec<(String, String)>>,
}

impl DownloadSink for CapturingSink {
    fn deliver(&self, file_name: &str, contents: &str) -> Result<(), CoreError> {
        self.delivered
            .borrow_mut()
            .push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}

#[test]
fn january_groceries_overspend_scenario() {
    let user = Uuid::new_v4();
    let groceries = Category::new(user, "Groceries", Kind::Expense)
        .unwrap()
        .with_budget(Amount::new(dec!(300)).unwrap());
    let salary = Category::new(user, "Salary", Kind::Income).unwrap();
    let txns = vec![
        record(user, Kind::Income, dec!(1000), salary.id, "Paycheck", date(2024, 1, 5)),
        record(user, Kind::Expense, dec!(300), groceries.id, "Weekly shop", date(2024, 1, 10)),
        record(user, Kind::Expense, dec!(100), groceries.id, "Top-up", date(2024, 1, 20)),
    ];
    let categories = vec![groceries.clone(), salary];

    let totals =
        AggregationService::summarize(&txns, &categories, date(2024, 1, 20), WeekStart::Monday);
    assert_eq!(totals.total_income, dec!(1000));
    assert_eq!(totals.total_expenses, dec!(400));
    assert_eq!(totals.net_balance.value(), dec!(600));
    assert_eq!(totals.net_balance.direction(), BalanceDirection::Surplus);
    assert_eq!(totals.spend_by_category, HashMap::from([(groceries.id, dec!(400))]));
    assert!(totals.unresolved.is_empty());

    let evaluations = BudgetService::evaluate(&totals.spend_by_category, &categories);
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].utilization_ratio.round_dp(3), dec!(1.333));
    assert_eq!(evaluations[0].status, BudgetStatus::Exceeded);
    assert_eq!(evaluations[0].remaining(), dec!(-100));
}

#[test]
fn empty_ledger_produces_zero_aggregates() {
    let snapshot = LedgerSnapshot::default();
    let totals = AggregationService::summarize(
        &snapshot.transactions,
        &snapshot.categories,
        date(2024, 1, 15),
        WeekStart::Monday,
    );
    assert_eq!(totals.total_income, Decimal::ZERO);
    assert_eq!(totals.total_expenses, Decimal::ZERO);
    assert_eq!(totals.net_balance.direction(), BalanceDirection::Surplus);
    assert!(totals.spend_by_category.is_empty());
    assert_eq!(totals.weekly_transaction_count, 0);
    assert!(BudgetService::evaluate(&totals.spend_by_category, &snapshot.categories).is_empty());
    assert_eq!(
        ExportService::to_csv(&snapshot.transactions, &snapshot.category_names()).unwrap(),
        "Date,Type,Category,Description,Amount\n"
    );
}

#[test]
fn export_delivers_exact_csv_to_sink() {
    let user = Uuid::new_v4();
    let dining = Category::new(user, "Dining", Kind::Expense).unwrap();
    let snapshot = LedgerSnapshot::new(
        vec![record(user, Kind::Expense, dec!(4.50), dining.id, "Coffee", date(2024, 2, 1))],
        vec![dining],
    );
    let sink = CapturingSink::default();

    ExportService::export_to(
        &sink,
        DEFAULT_EXPORT_FILE_NAME,
        &snapshot.transactions,
        &snapshot.category_names(),
    )
    .expect("export succeeds");

    let delivered = sink.delivered.borrow();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, "transactions.csv");
    assert_eq!(
        delivered[0].1,
        "Date,Type,Category,Description,Amount\n2024-02-01,Expense,Dining,Coffee,4.50\n"
    );
}

#[test]
fn unknown_category_counts_in_totals_only() {
    let user = Uuid::new_v4();
    let orphan = Uuid::new_v4();
    let txns = vec![record(user, Kind::Expense, dec!(25), orphan, "Mystery", date(2024, 6, 2))];

    let totals = AggregationService::summarize(&txns, &[], date(2024, 6, 3), WeekStart::Monday);
    assert_eq!(totals.total_expenses, dec!(25));
    assert!(!totals.spend_by_category.contains_key(&orphan));
    assert_eq!(totals.unresolved.len(), 1);
    assert_eq!(totals.unresolved[0].transaction_id(), txns[0].id);

    let csv = ExportService::to_csv(&txns, &HashMap::new()).unwrap();
    assert!(csv.ends_with("2024-06-02,Expense,,Mystery,25.00\n"));
}

#[test]
fn filtering_before_totals_matches_totals_of_filtered_subset() {
    let user = Uuid::new_v4();
    let food = Category::new(user, "Food", Kind::Expense).unwrap();
    let pay = Category::new(user, "Pay", Kind::Income).unwrap();
    let txns = vec![
        record(user, Kind::Expense, dec!(12.30), food.id, "Lunch", date(2024, 4, 2)),
        record(user, Kind::Income, dec!(900), pay.id, "Bonus", date(2024, 4, 5)),
        record(user, Kind::Expense, dec!(7.70), food.id, "Lunch again", date(2024, 4, 9)),
        record(user, Kind::Expense, dec!(40), food.id, "Dinner", date(2024, 3, 30)),
    ];
    let filter = TransactionFilter::new()
        .with_search("lunch")
        .with_date_range(DateRange::new(Some(date(2024, 4, 1)), None).unwrap());

    let subset = filter.apply(&txns);
    assert_eq!(subset.len(), 2);
    let expenses = AggregationService::total_expenses(subset.iter().copied());
    assert_eq!(expenses, dec!(20.00));

    let income = AggregationService::total_income(&txns);
    let all_expenses = AggregationService::total_expenses(&txns);
    assert_eq!(
        AggregationService::net_balance(&txns).value(),
        income - all_expenses
    );
}

#[test]
fn filtering_by_kind_commutes_with_totals() {
    let user = Uuid::new_v4();
    let food = Category::new(user, "Food", Kind::Expense).unwrap();
    let pay = Category::new(user, "Pay", Kind::Income).unwrap();
    let txns = vec![
        record(user, Kind::Expense, dec!(12.30), food.id, "Lunch", date(2024, 4, 2)),
        record(user, Kind::Income, dec!(900), pay.id, "Bonus", date(2024, 4, 5)),
        record(user, Kind::Expense, dec!(7.70), food.id, "Dinner", date(2024, 4, 9)),
        record(user, Kind::Income, dec!(0.01), pay.id, "Interest", date(2024, 4, 30)),
    ];

    let income_only = TransactionFilter::new().with_kind(Kind::Income).apply(&txns);
    assert_eq!(
        AggregationService::total_income(income_only.iter().copied()),
        AggregationService::total_income(&txns)
    );
    assert_eq!(
        AggregationService::total_expenses(income_only.iter().copied()),
        Decimal::ZERO
    );

    let expenses_only = TransactionFilter::new().with_kind(Kind::Expense).apply(&txns);
    assert_eq!(
        AggregationService::total_expenses(expenses_only.iter().copied()),
        AggregationService::total_expenses(&txns)
    );
    assert_eq!(
        AggregationService::total_income(expenses_only.iter().copied()),
        Decimal::ZERO
    );
    assert_eq!(AggregationService::total_income(&txns), dec!(900.01));
    assert_eq!(AggregationService::total_expenses(&txns), dec!(20.00));
}

#[test]
fn month_window_excludes_previous_month_spend() {
    let user = Uuid::new_v4();
    let rent = Category::new(user, "Rent", Kind::Expense).unwrap();
    let txns = vec![
        record(user, Kind::Expense, dec!(800), rent.id, "March rent", date(2024, 3, 1)),
        record(user, Kind::Expense, dec!(800), rent.id, "February rent", date(2024, 2, 1)),
    ];
    let spend = AggregationService::spend_by_category(
        &txns,
        std::slice::from_ref(&rent),
        DateWindow::month_to_date(date(2024, 3, 31)),
    );
    assert_eq!(spend.get(&rent.id), Some(&dec!(800)));
}

#[test]
fn snapshot_from_store_feeds_every_engine() {
    let user = Uuid::new_v4();
    let mut store = InMemoryLedgerStore::new();
    let dining = store.add_category(
        Category::default_category("Dining", Kind::Expense)
            .unwrap()
            .with_budget(Amount::new(dec!(50)).unwrap()),
    );
    store
        .add_transaction(record(user, Kind::Expense, dec!(45), dining, "Pizza", date(2024, 7, 3)))
        .unwrap();

    let snapshot = load_snapshot(&store, &StaticSession::signed_in(user)).unwrap();
    let totals = AggregationService::summarize(
        &snapshot.transactions,
        &snapshot.categories,
        date(2024, 7, 4),
        WeekStart::Monday,
    );
    let evaluation = BudgetService::evaluate(&totals.spend_by_category, &snapshot.categories);
    assert_eq!(evaluation[0].status, BudgetStatus::Warning);
    assert_eq!(evaluation[0].utilization_percent(), dec!(90));
}
