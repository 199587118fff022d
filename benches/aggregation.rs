use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tally::tally_core::{
    AggregationService, BudgetService, DashboardSettings, ExportService, SummaryService,
    TransactionFilter,
};
use tally::tally_domain::{Amount, Category, Kind, LedgerSnapshot, Transaction, WeekStart};
use uuid::Uuid;

fn build_sample_snapshot(txn_count: usize) -> LedgerSnapshot {
    let user = Uuid::new_v4();
    let mut categories: Vec<Category> = (0..12)
        .map(|idx| {
            Category::new(user, format!("Expense {idx}"), Kind::Expense)
                .unwrap()
                .with_budget(Amount::new(Decimal::from(250 + idx * 50)).unwrap())
        })
        .collect();
    categories.push(Category::new(user, "Salary", Kind::Income).unwrap());

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let transactions = (0..txn_count)
        .map(|idx| {
            let (kind, category) = if idx % 10 == 0 {
                (Kind::Income, &categories[12])
            } else {
                (Kind::Expense, &categories[idx % 12])
            };
            let cents = Decimal::new(500 + (idx % 9_000) as i64, 2);
            Transaction::new(
                user,
                kind,
                Amount::new(cents).unwrap(),
                category.id,
                format!("Entry {idx}"),
                start + Duration::days((idx % 365) as i64),
            )
            .unwrap()
        })
        .collect();
    LedgerSnapshot::new(transactions, categories)
}

fn bench_aggregation(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("summarize_10k", |b| {
        b.iter(|| {
            let totals = AggregationService::summarize(
                &snapshot.transactions,
                &snapshot.categories,
                reference,
                WeekStart::Monday,
            );
            black_box(BudgetService::evaluate(&totals.spend_by_category, &snapshot.categories));
        })
    });

    c.bench_function("dashboard_10k", |b| {
        b.iter(|| {
            black_box(SummaryService::dashboard(
                &snapshot,
                reference,
                &DashboardSettings::default(),
            ));
        })
    });
}

fn bench_filter_and_export(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let names = snapshot.category_names();
    let filter = TransactionFilter::new()
        .with_search("entry 1")
        .with_kind(Kind::Expense);

    c.bench_function("filter_10k", |b| {
        b.iter(|| black_box(filter.apply(&snapshot.transactions)))
    });

    c.bench_function("export_csv_10k", |b| {
        b.iter(|| {
            let csv = ExportService::to_csv(&snapshot.transactions, &names).expect("export");
            black_box(csv);
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_filter_and_export);
criterion_main!(benches);
