use tally_config::ConfigError;
use tally_core::CoreError;
use tally_domain::DomainError;
use thiserror::Error;

/// Unified error for the tally facade and CLI.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DomainError> for TallyError {
    fn from(err: DomainError) -> Self {
        TallyError::Core(CoreError::Domain(err))
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
