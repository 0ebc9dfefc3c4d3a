//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Malformed holdings file.
    #[error("Invalid holdings file: {0}")]
    InvalidHoldings(String),

    /// Market overrides must come in pairs.
    #[error("--market-return and --risk-free-rate must be given together")]
    IncompleteMarketOverride,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
