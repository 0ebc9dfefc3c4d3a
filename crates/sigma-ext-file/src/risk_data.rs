//! File-based vendor statistics, rate quotes and a fixed market context.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use sigma_core::Symbol;
use sigma_traits::error::TraitError;
use sigma_traits::market_data::{
    MarketContextProvider, RateQuoteProvider, SourceType, VendorStatsProvider,
};
use sigma_traits::{MarketContext, VendorStats};

// =============================================================================
// JSON VENDOR STATISTICS
// =============================================================================

/// JSON-based vendor statistics.
///
/// The file is an object keyed by symbol:
///
/// ```json
/// {
///   "AAPL": { "beta": 1.21 },
///   "VTI":  { "beta_3y": 1.02,
///             "five_year": { "beta": 1.0, "alpha": -0.001, "sharpe_ratio": 0.78,
///                            "treynor_ratio": 0.12, "std_dev": 0.17, "r_squared": 0.99 } }
/// }
/// ```
pub struct JsonVendorStatsSource {
    file_path: PathBuf,
    stats: DashMap<Symbol, VendorStats>,
}

impl JsonVendorStatsSource {
    /// Create a new JSON vendor statistics source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            stats: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload statistics from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            return Ok(()); // Empty source
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        let raw: std::collections::HashMap<String, VendorStats> =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        self.stats.clear();
        for (symbol, stats) in raw {
            self.stats.insert(Symbol::new(&symbol)?, stats);
        }
        debug!(path = %self.file_path.display(), symbols = self.stats.len(), "loaded vendor stats");

        Ok(())
    }

    /// Number of symbols covered.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True if no symbols are covered.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[async_trait]
impl VendorStatsProvider for JsonVendorStatsSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn fetch_vendor_risk_stats(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<VendorStats>, TraitError> {
        Ok(self.stats.get(symbol).map(|s| *s))
    }
}

// =============================================================================
// CSV RATE QUOTES
// =============================================================================

/// CSV record for rate quotes.
#[derive(Debug, Deserialize)]
struct RateRecord {
    symbol: String,
    rate: f64,
}

/// CSV-based rate quotes with a `symbol,rate` header, rates in percent.
pub struct CsvRateQuoteSource {
    file_path: PathBuf,
    rates: DashMap<Symbol, f64>,
}

impl CsvRateQuoteSource {
    /// Create a new CSV rate quote source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            rates: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload quotes from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            return Ok(()); // Empty source
        }

        let mut reader = csv::Reader::from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        self.rates.clear();
        for result in reader.deserialize() {
            let record: RateRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            if !record.rate.is_finite() {
                return Err(TraitError::ParseError(format!(
                    "rate for {} is not a number",
                    record.symbol
                )));
            }
            self.rates.insert(Symbol::new(&record.symbol)?, record.rate);
        }

        Ok(())
    }
}

#[async_trait]
impl RateQuoteProvider for CsvRateQuoteSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn fetch_rate_quote(&self, symbol: &Symbol) -> Result<f64, TraitError> {
        self.rates
            .get(symbol)
            .map(|r| *r)
            .ok_or_else(|| TraitError::SymbolNotFound(format!("no rate quote for {}", symbol)))
    }
}

// =============================================================================
// STATIC MARKET CONTEXT
// =============================================================================

/// Market context fixed at construction, e.g. from command-line overrides.
#[derive(Debug, Clone, Copy)]
pub struct StaticMarketContext {
    context: MarketContext,
}

impl StaticMarketContext {
    /// Context from a market return and risk-free rate, both decimals.
    pub fn new(market_return: f64, risk_free_rate: f64) -> Self {
        Self {
            context: MarketContext::live(market_return, risk_free_rate),
        }
    }
}

#[async_trait]
impl MarketContextProvider for StaticMarketContext {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_market_context(&self) -> Result<MarketContext, TraitError> {
        Ok(self.context)
    }
}
