//! Error types for trait operations.

use sigma_core::CoreError;
use thiserror::Error;

/// Common error type for trait operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraitError {
    /// The source does not know the symbol.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// The source knows the symbol but has no usable data for the request.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl TraitError {
    /// True for errors scoped to a single symbol, which callers recover from
    /// by excluding that holding or falling back to a lower tier.
    #[must_use]
    pub fn is_per_symbol(&self) -> bool {
        matches!(
            self,
            TraitError::SymbolNotFound(_) | TraitError::DataUnavailable(_)
        )
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<CoreError> for TraitError {
    fn from(e: CoreError) -> Self {
        TraitError::ParseError(e.to_string())
    }
}

/// Result type for trait operations.
pub type TraitResult<T> = Result<T, TraitError>;
