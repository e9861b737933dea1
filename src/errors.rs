use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::RecordError;

/// Error type that captures failures outside the pure calculators.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
