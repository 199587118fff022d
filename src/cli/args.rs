//! Command line definitions for the `tally` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tally_domain::Kind;
use uuid::Uuid;

/// Tally - summarize a personal ledger and check budgets
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Transaction totals, budget health and CSV export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger JSON file (defaults to the path in the config)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Signed-in user id
    #[arg(long, global = true, env = "TALLY_USER")]
    pub user: Option<Uuid>,

    /// Reference day for "this month" and "this week" (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show income, expenses, net balance, weekly activity and budget health
    Summary,

    /// Show budget versus spend for every expense category this month
    Budgets,

    /// List transactions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Write transactions as CSV into a directory
    Export {
        /// Target directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// File name (defaults to the configured export file name)
        #[arg(long)]
        file_name: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print build metadata
    Version,
}

/// Filter flags shared by `list` and `export`. Omitted flags match everything.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive text to find in descriptions
    #[arg(long)]
    pub search: Option<String>,

    /// Only `income` or `expense`
    #[arg(long)]
    pub kind: Option<Kind>,

    /// Category name or id
    #[arg(long)]
    pub category: Option<String>,

    /// Earliest date, inclusive
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest date, inclusive
    #[arg(long)]
    pub to: Option<NaiveDate>,
}
