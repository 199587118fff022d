use std::collections::HashMap;
use std::fmt;

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use tally_core::{BalanceDirection, BudgetStatus};
use tally_domain::{display_money, Transaction};
use uuid::Uuid;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

/// Turns colour on or off for everything printed afterwards.
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => text,
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => format!("warning: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("error: {text}").bright_red().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Warning | MessageKind::Error => eprintln!("{formatted}"),
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// `USD 12.50`
pub fn money(currency: &str, value: Decimal) -> String {
    format!("{currency} {}", display_money(value))
}

/// Percentage with one decimal place, e.g. `133.3%`.
pub fn percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

pub fn status_label(status: BudgetStatus) -> String {
    let label = status.to_string();
    match status {
        BudgetStatus::Normal => label.green().to_string(),
        BudgetStatus::Warning => label.yellow().to_string(),
        BudgetStatus::Exceeded => label.red().bold().to_string(),
    }
}

pub fn direction_label(direction: BalanceDirection) -> String {
    let label = direction.to_string();
    match direction {
        BalanceDirection::Surplus => label.green().to_string(),
        BalanceDirection::Deficit => label.red().to_string(),
    }
}

/// One aligned line per transaction; unknown categories show as `-`.
pub fn transaction_row(
    txn: &Transaction,
    category_names: &HashMap<Uuid, String>,
    currency: &str,
) -> String {
    let category = category_names
        .get(&txn.category_id)
        .map(String::as_str)
        .unwrap_or("-");
    format!(
        "{}  {:<7}  {:<16}  {:<28}  {:>14}",
        txn.date.format("%Y-%m-%d"),
        txn.kind.to_string(),
        category,
        txn.description,
        money(currency, txn.amount.value())
    )
}
