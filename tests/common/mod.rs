#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally::tally_config::{Config, ConfigManager};
use tally::tally_core::InMemoryLedgerStore;
use tally::tally_domain::{Amount, Category, Kind, Transaction};
use tempfile::TempDir;
use uuid::Uuid;

/// Reference day used by every fixture: Saturday 2024-01-20.
pub fn today() -> NaiveDate {
    date(2024, 1, 20)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).expect("non-negative amount")
}

/// A ledger file and config file living in their own temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub user: Uuid,
    pub ledger_path: PathBuf,
    pub config_path: PathBuf,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// January 2024 for one user: income 1000, groceries 400 against a 300 budget and a
/// 4.50 coffee in a shared category budgeted at 100. A second user's record is mixed in.
pub fn sample_store(user: Uuid) -> InMemoryLedgerStore {
    let mut store = InMemoryLedgerStore::new();
    let salary = store.add_category(Category::new(user, "Salary", Kind::Income).unwrap());
    let groceries = store.add_category(
        Category::new(user, "Groceries", Kind::Expense)
            .unwrap()
            .with_budget(amount(dec!(300))),
    );
    let dining = store.add_category(
        Category::default_category("Dining", Kind::Expense)
            .unwrap()
            .with_budget(amount(dec!(100))),
    );

    let records = [
        (Kind::Income, dec!(1000), salary, "Paycheck", date(2024, 1, 5)),
        (Kind::Expense, dec!(300), groceries, "Weekly shop", date(2024, 1, 10)),
        (Kind::Expense, dec!(100), groceries, "Farmers market", date(2024, 1, 20)),
        (Kind::Expense, dec!(4.50), dining, "Coffee", date(2024, 1, 18)),
    ];
    for (kind, value, category, description, on) in records {
        let txn = Transaction::new(user, kind, amount(value), category, description, on).unwrap();
        store.add_transaction(txn).expect("valid fixture transaction");
    }

    let stranger = Uuid::new_v4();
    let txn = Transaction::new(
        stranger,
        Kind::Expense,
        amount(dec!(999)),
        dining,
        "Someone else's dinner",
        date(2024, 1, 19),
    )
    .unwrap();
    store.add_transaction(txn).expect("shared category accepts any user");
    store
}

/// Writes the sample ledger plus a colourless config into a fresh temp dir.
pub fn setup_fixture() -> Fixture {
    let dir = TempDir::new().expect("create temp dir");
    let user = Uuid::new_v4();

    let ledger_path = dir.path().join("ledger.json");
    let json = serde_json::to_string_pretty(&sample_store(user)).expect("serialize ledger");
    std::fs::write(&ledger_path, json).expect("write ledger");

    let config_path = dir.path().join("config.json");
    let config = Config {
        ui_color_enabled: false,
        ..Config::default()
    };
    ConfigManager::new(config_path.clone())
        .save(&config)
        .expect("save config");

    Fixture {
        dir,
        user,
        ledger_path,
        config_path,
    }
}
