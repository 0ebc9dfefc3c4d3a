//! Ticker symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A normalized ticker symbol.
///
/// Symbols are trimmed and upper-cased on construction so `"spy "` and
/// `"SPY"` compare equal. Index quotes such as `^IRX` and share classes
/// such as `BRK.B` or `BRK-B` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol, normalizing case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSymbol` if the symbol is empty or contains
    /// characters other than ASCII alphanumerics, `^`, `.`, `-` and `=`.
    pub fn new(raw: &str) -> CoreResult<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(CoreError::invalid_symbol(raw, "symbol is empty"));
        }
        if let Some(bad) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '^' | '.' | '-' | '=')))
        {
            return Err(CoreError::invalid_symbol(
                raw,
                format!("unsupported character '{bad}'"),
            ));
        }
        Ok(Self(normalized))
    }

    /// Returns the symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
