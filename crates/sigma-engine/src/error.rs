//! Engine error types.

use sigma_config::ConfigError;
use sigma_core::CoreError;
use sigma_math::MathError;
use sigma_portfolio::reports::ExcludedHolding;
use sigma_portfolio::PortfolioError;
use sigma_traits::TraitError;
use thiserror::Error;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A collaborator failed
    #[error("data source error: {0}")]
    Source(#[from] TraitError),

    /// Portfolio analytics error
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Statistics error
    #[error(transparent)]
    Math(#[from] MathError),

    /// Domain type error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A series was too short or malformed for the calculation.
    #[error("insufficient history for {symbol}: {reason}")]
    InsufficientHistory {
        /// Symbol of the series.
        symbol: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Every holding was excluded.
    #[error("no holding has usable data ({} excluded)", excluded.len())]
    NoUsableHoldings {
        /// The exclusions, with reasons.
        excluded: Vec<ExcludedHolding>,
    },

    /// Missing dependency
    #[error("missing dependency: {0}")]
    MissingDependency(String),
}

impl EngineError {
    /// Creates an insufficient-history error.
    #[must_use]
    pub fn insufficient_history(symbol: impl ToString, reason: impl Into<String>) -> Self {
        Self::InsufficientHistory {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
