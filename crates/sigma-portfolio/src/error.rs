//! Error types for portfolio analytics.
//!
//! This module defines the error types used throughout the portfolio crate.

use sigma_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// No holdings, or none with usable data.
    #[error("Portfolio has no holdings with usable data")]
    EmptyPortfolio,

    /// Invalid portfolio configuration.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{symbol}': {reason}")]
    InvalidHolding {
        /// The holding symbol.
        symbol: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// The same symbol appears more than once.
    #[error("Duplicate holding '{symbol}'")]
    DuplicateHolding {
        /// The repeated symbol.
        symbol: String,
    },

    /// Weight outside `[0, 1]` or not finite.
    #[error("Invalid weight for holding '{symbol}': {value}")]
    InvalidWeight {
        /// The holding symbol.
        symbol: String,
        /// The invalid weight value.
        value: f64,
    },

    /// Weights do not sum to 1 within tolerance.
    #[error("Weights sum to {sum:.4}, expected 1.0 ± {tolerance}")]
    WeightSumOutOfTolerance {
        /// Actual sum of weights.
        sum: f64,
        /// Allowed deviation from 1.
        tolerance: f64,
    },

    /// Holdings were dropped and renormalization is disabled.
    #[error("Missing data for holdings: {}", symbols.join(", "))]
    MissingHoldings {
        /// Symbols without usable data.
        symbols: Vec<String>,
    },

    /// A ratio denominator was zero or not finite.
    #[error("{ratio} is undefined: denominator is {denominator}")]
    DivisionGuard {
        /// Name of the ratio.
        ratio: String,
        /// The rejected denominator.
        denominator: f64,
    },

    /// Underlying statistical error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Create an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create a division guard error.
    #[must_use]
    pub fn division_guard(ratio: impl Into<String>, denominator: f64) -> Self {
        Self::DivisionGuard {
            ratio: ratio.into(),
            denominator,
        }
    }
}
