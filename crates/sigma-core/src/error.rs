//! Error types for the core domain types.

use thiserror::Error;

/// A specialized Result type for core type construction.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or validating core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid or unparseable date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Symbol is empty or contains unsupported characters.
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol {
        /// The rejected symbol text.
        symbol: String,
        /// Reason for rejection.
        reason: String,
    },

    /// A closing price that cannot produce a return.
    #[error("Invalid price {value} on {date} for {symbol}")]
    InvalidPrice {
        /// Symbol the price belongs to.
        symbol: String,
        /// Observation date.
        date: String,
        /// The offending close.
        value: f64,
    },

    /// Observations are not strictly ascending by date.
    #[error("Price series for {symbol} is not strictly ascending at {date}")]
    UnorderedSeries {
        /// Symbol the series belongs to.
        symbol: String,
        /// First date that breaks the ordering.
        date: String,
    },

    /// A date range whose start is after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Range start.
        start: String,
        /// Range end.
        end: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid symbol error.
    #[must_use]
    pub fn invalid_symbol(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}
