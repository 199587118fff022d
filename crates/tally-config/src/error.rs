use std::io;

use thiserror::Error;

/// Failures while reading or writing the preferences file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
