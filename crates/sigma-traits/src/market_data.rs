//! Market data source traits.
//!
//! These traits define interfaces for the engine's collaborators:
//! - [`PriceSeriesProvider`]: daily or monthly closing prices
//! - [`VendorStatsProvider`]: pre-computed vendor risk statistics
//! - [`RateQuoteProvider`]: quoted rates such as the 13-week T-bill yield
//! - [`MarketContextProvider`]: market return and risk-free rate in one call
//!
//! All sources are request/response; the engine never streams.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sigma_core::{DateRange, Interval, PriceSeries, Symbol};
use sigma_portfolio::types::{MarketContext, VendorStats};

use crate::error::TraitError;

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// In-memory or configured values
    Manual,
}

// =============================================================================
// PRICE SERIES
// =============================================================================

/// Trait for historical price providers.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Closing prices for `symbol` within `range`, ascending by date.
    ///
    /// Fails with [`TraitError::SymbolNotFound`] for an unknown symbol and
    /// [`TraitError::DataUnavailable`] when the symbol has no prices in range.
    async fn fetch_price_series(
        &self,
        symbol: &Symbol,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, TraitError>;
}

// =============================================================================
// VENDOR STATISTICS
// =============================================================================

/// Trait for vendor risk statistics.
#[async_trait]
pub trait VendorStatsProvider: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Vendor statistics for `symbol`; `Ok(None)` when the vendor does not
    /// cover it.
    async fn fetch_vendor_risk_stats(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<VendorStats>, TraitError>;
}

/// Vendor source that covers no symbols.
pub struct EmptyVendorStatsSource;

#[async_trait]
impl VendorStatsProvider for EmptyVendorStatsSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_vendor_risk_stats(
        &self,
        _symbol: &Symbol,
    ) -> Result<Option<VendorStats>, TraitError> {
        Ok(None)
    }
}

// =============================================================================
// RATE QUOTES
// =============================================================================

/// Trait for quoted rates.
#[async_trait]
pub trait RateQuoteProvider: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Latest quote for a rate symbol, in percent (4.5 for 4.5%).
    async fn fetch_rate_quote(&self, symbol: &Symbol) -> Result<f64, TraitError>;
}

/// Rate source with no quotes.
pub struct EmptyRateQuoteSource;

#[async_trait]
impl RateQuoteProvider for EmptyRateQuoteSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_rate_quote(&self, symbol: &Symbol) -> Result<f64, TraitError> {
        Err(TraitError::SourceNotAvailable(format!(
            "no rate source configured for {}",
            symbol
        )))
    }
}

// =============================================================================
// MARKET CONTEXT
// =============================================================================

/// Trait for providers that supply the market context directly.
#[async_trait]
pub trait MarketContextProvider: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Market-proxy return and risk-free rate.
    async fn fetch_market_context(&self) -> Result<MarketContext, TraitError>;
}

// =============================================================================
// PROVIDER BUNDLE
// =============================================================================

/// The collaborators an analysis engine draws on.
#[derive(Clone)]
pub struct DataProviders {
    /// Historical prices
    pub prices: Arc<dyn PriceSeriesProvider>,
    /// Vendor risk statistics
    pub vendor_stats: Arc<dyn VendorStatsProvider>,
    /// Rate quotes
    pub rates: Arc<dyn RateQuoteProvider>,
    /// Direct market context, overriding derivation from prices and rates
    pub market_context: Option<Arc<dyn MarketContextProvider>>,
}

impl DataProviders {
    /// Creates a bundle with only a price source.
    pub fn new(prices: Arc<dyn PriceSeriesProvider>) -> Self {
        Self {
            prices,
            vendor_stats: Arc::new(EmptyVendorStatsSource),
            rates: Arc::new(EmptyRateQuoteSource),
            market_context: None,
        }
    }

    /// Set the vendor statistics source.
    #[must_use]
    pub fn with_vendor_stats(mut self, vendor_stats: Arc<dyn VendorStatsProvider>) -> Self {
        self.vendor_stats = vendor_stats;
        self
    }

    /// Set the rate quote source.
    #[must_use]
    pub fn with_rates(mut self, rates: Arc<dyn RateQuoteProvider>) -> Self {
        self.rates = rates;
        self
    }

    /// Set a direct market context source.
    #[must_use]
    pub fn with_market_context(mut self, provider: Arc<dyn MarketContextProvider>) -> Self {
        self.market_context = Some(provider);
        self
    }
}

impl std::fmt::Debug for DataProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataProviders")
            .field("prices", &self.prices.source_type())
            .field("vendor_stats", &self.vendor_stats.source_type())
            .field("rates", &self.rates.source_type())
            .field(
                "market_context",
                &self.market_context.as_ref().map(|m| m.source_type()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoPrices;

    #[async_trait]
    impl PriceSeriesProvider for NoPrices {
        fn source_type(&self) -> SourceType {
            SourceType::Manual
        }

        async fn fetch_price_series(
            &self,
            symbol: &Symbol,
            _range: &DateRange,
            _interval: Interval,
        ) -> Result<PriceSeries, TraitError> {
            Err(TraitError::SymbolNotFound(symbol.to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_sources() {
        let providers = DataProviders::new(Arc::new(NoPrices));
        let spy = Symbol::new("SPY").unwrap();

        assert_eq!(
            providers.vendor_stats.fetch_vendor_risk_stats(&spy).await,
            Ok(None)
        );
        assert!(matches!(
            providers.rates.fetch_rate_quote(&spy).await,
            Err(TraitError::SourceNotAvailable(_))
        ));
        assert!(providers.market_context.is_none());
        assert!(format!("{:?}", providers).contains("Manual"));
    }
}
