use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tally_domain::WeekStart;

/// User preferences that shape reporting and presentation.
///
/// Every field has a default, so partial files still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub week_start: WeekStart,
    /// Transactions per week counted as full progress on the dashboard.
    #[serde(default = "Config::default_weekly_goal")]
    pub weekly_goal: u32,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Config::default_export_file_name")]
    pub export_file_name: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Ledger file used when none is given on the command line.
    pub default_ledger_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            week_start: WeekStart::default(),
            weekly_goal: Self::default_weekly_goal(),
            recent_limit: Self::default_recent_limit(),
            export_file_name: Self::default_export_file_name(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_ledger_path: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_weekly_goal() -> u32 {
        20
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_export_file_name() -> String {
        "transactions.csv".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_default_ledger_path(&self) -> PathBuf {
        if let Some(path) = &self.default_ledger_path {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("tally").join("ledger.json")
    }
}
