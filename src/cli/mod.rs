pub mod args;
pub mod handlers;
pub mod output;

pub use args::{Cli, Command, FilterArgs};
pub use handlers::CommandContext;

use std::path::Path;

use clap::Parser;
use tally_config::{Config, ConfigManager};
use tally_core::{load_snapshot, Clock, FixedClock, StaticSession};

use crate::{errors::Result, storage, utils::SystemClock};

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    if let Command::Version = cli.command {
        handlers::version();
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    output::set_color_enabled(config.ui_color_enabled);

    let ledger_path = cli
        .ledger
        .clone()
        .unwrap_or_else(|| config.resolve_default_ledger_path());
    let store = storage::load_ledger(&ledger_path)?;
    let session = cli
        .user
        .map(StaticSession::signed_in)
        .unwrap_or_else(StaticSession::anonymous);
    let snapshot = load_snapshot(&store, &session)?;

    let clock: Box<dyn Clock> = match cli.today {
        Some(day) => Box::new(FixedClock::new(day)),
        None => Box::new(SystemClock),
    };
    let ctx = CommandContext {
        config,
        snapshot,
        today: clock.today(),
    };

    match cli.command {
        Command::Summary => handlers::summary(&ctx),
        Command::Budgets => handlers::budgets(&ctx),
        Command::List { filter } => handlers::list(&ctx, &filter),
        Command::Export {
            out,
            file_name,
            filter,
        } => handlers::export(&ctx, out, file_name, &filter).map(|_| ()),
        Command::Version => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let manager = match path {
        Some(path) => ConfigManager::new(path.to_path_buf()),
        None => ConfigManager::default_location()?,
    };
    let config = manager.load()?;
    tracing::debug!(path = %manager.config_path().display(), "config loaded");
    Ok(config)
}
