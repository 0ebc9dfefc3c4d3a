//! End-to-end engine tests against in-memory providers.

use std::collections::HashMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rust_decimal_macros::dec;

use sigma_config::EngineConfig;
use sigma_core::{Date, DateRange, Interval, PricePoint, PriceSeries, Symbol};
use sigma_engine::{AnalyticsEngine, AnalyticsEngineBuilder, EngineError};
use sigma_math::covariance::CovarianceMatrix;
use sigma_math::returns::ReturnSeries;
use sigma_portfolio::prelude::*;
use sigma_traits::market_data::{
    MarketContextProvider, PriceSeriesProvider, RateQuoteProvider, SourceType, VendorStatsProvider,
};
use sigma_traits::{DataProviders, TraitError};

// =============================================================================
// IN-MEMORY PROVIDERS
// =============================================================================

#[derive(Default)]
struct MemoryPrices {
    series: HashMap<(Symbol, Interval), PriceSeries>,
}

impl MemoryPrices {
    fn with(mut self, series: PriceSeries) -> Self {
        self.series
            .insert((series.symbol().clone(), series.interval()), series);
        self
    }
}

#[async_trait]
impl PriceSeriesProvider for MemoryPrices {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_price_series(
        &self,
        symbol: &Symbol,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, TraitError> {
        let series = self
            .series
            .get(&(symbol.clone(), interval))
            .ok_or_else(|| TraitError::SymbolNotFound(symbol.to_string()))?;
        let sliced = series.slice(range);
        if sliced.is_empty() {
            return Err(TraitError::DataUnavailable(symbol.to_string()));
        }
        Ok(sliced)
    }
}

#[derive(Default)]
struct MemoryVendor {
    stats: HashMap<Symbol, VendorStats>,
}

#[async_trait]
impl VendorStatsProvider for MemoryVendor {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_vendor_risk_stats(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<VendorStats>, TraitError> {
        Ok(self.stats.get(symbol).copied())
    }
}

struct FixedRate(f64);

#[async_trait]
impl RateQuoteProvider for FixedRate {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_rate_quote(&self, _symbol: &Symbol) -> Result<f64, TraitError> {
        Ok(self.0)
    }
}

struct BrokenContext;

#[async_trait]
impl MarketContextProvider for BrokenContext {
    fn source_type(&self) -> SourceType {
        SourceType::Snapshot
    }

    async fn fetch_market_context(&self) -> Result<MarketContext, TraitError> {
        Err(TraitError::SourceNotAvailable("upstream down".into()))
    }
}

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn as_of() -> Date {
    Date::from_ymd(2024, 12, 31).unwrap()
}

/// 250 consecutive daily closes starting 2024-01-02.
fn daily(symbol: &str, close: impl Fn(usize) -> f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let points = (0..250)
        .map(|i| PricePoint::new(Date::from(start + Duration::days(i as i64)), close(i)))
        .collect();
    PriceSeries::new(sym(symbol), Interval::Daily, points).unwrap()
}

/// Closes compounding the given periodic returns from 100.
fn compounded(returns: impl Fn(usize) -> f64) -> impl Fn(usize) -> f64 {
    move |i| (0..i).fold(100.0, |p, k| p * (1.0 + returns(k)))
}

/// 60 month-start closes from January 2020 to December 2024.
fn monthly(symbol: &str, returns: impl Fn(usize) -> f64) -> PriceSeries {
    let close = compounded(returns);
    let points = (0..60)
        .map(|i| {
            let date = Date::from_ymd(2020 + (i / 12) as i32, (i % 12) as u32 + 1, 1).unwrap();
            PricePoint::new(date, close(i))
        })
        .collect();
    PriceSeries::new(sym(symbol), Interval::Monthly, points).unwrap()
}

fn market_monthly_return(i: usize) -> f64 {
    0.005 + 0.02 * (i as f64 * 1.3).sin()
}

fn spy_daily() -> PriceSeries {
    daily("SPY", |i| 100.0 + 10.0 * i as f64 / 249.0)
}

fn holding_prices() -> MemoryPrices {
    MemoryPrices::default()
        .with(spy_daily())
        .with(daily("AAA", compounded(|k| 0.01 * (k as f64 * 0.7).sin())))
        .with(daily("BBB", compounded(|k| 0.004 * (k as f64 * 0.3).cos())))
}

fn engine_with(providers: DataProviders, config: EngineConfig) -> AnalyticsEngine {
    AnalyticsEngineBuilder::new()
        .with_config(config)
        .with_providers(providers)
        .build()
        .unwrap()
}

fn three_holdings() -> Vec<Holding> {
    vec![
        Holding::weighted(sym("AAA"), 0.5),
        Holding::weighted(sym("BBB"), 0.3),
        Holding::weighted(sym("CCC"), 0.2),
    ]
}

// =============================================================================
// MARKET CONTEXT
// =============================================================================

#[tokio::test]
async fn test_live_market_context() {
    let providers =
        DataProviders::new(Arc::new(holding_prices())).with_rates(Arc::new(FixedRate(4.5)));
    let engine = engine_with(providers, EngineConfig::default());

    let ctx = engine.market_context(as_of()).await;
    assert_relative_eq!(ctx.market_return, 0.10, epsilon = 1e-12);
    assert_relative_eq!(ctx.risk_free_rate, 0.045, epsilon = 1e-12);
    assert!(!ctx.uses_defaults());
}

#[tokio::test]
async fn test_each_figure_defaults_independently() {
    let providers = DataProviders::new(Arc::new(holding_prices()));
    let engine = engine_with(providers, EngineConfig::default());

    let ctx = engine.market_context(as_of()).await;
    assert_eq!(ctx.market_return_source, ContextSource::Live);
    assert_eq!(ctx.risk_free_rate_source, ContextSource::Default);
    assert_eq!(ctx.risk_free_rate, 0.045);
}

#[tokio::test]
async fn test_failed_context_provider_uses_defaults() {
    let providers = DataProviders::new(Arc::new(MemoryPrices::default()))
        .with_market_context(Arc::new(BrokenContext));
    let engine = engine_with(providers, EngineConfig::default());

    let ctx = engine.market_context(as_of()).await;
    assert_eq!(ctx, MarketContext::defaulted(0.10, 0.045));
}

// =============================================================================
// RISK METRICS AND EXCLUSION
// =============================================================================

#[tokio::test]
async fn test_missing_holding_is_excluded_and_weights_renormalized() {
    let providers =
        DataProviders::new(Arc::new(holding_prices())).with_rates(Arc::new(FixedRate(4.5)));
    let engine = engine_with(providers, EngineConfig::default());

    let bundle = engine.risk_metrics(&three_holdings(), as_of()).await.unwrap();

    assert_eq!(bundle.holdings.len(), 2);
    assert_eq!(bundle.excluded.len(), 1);
    assert_eq!(bundle.excluded[0].symbol, sym("CCC"));
    assert_eq!(bundle.weight_origin, WeightOrigin::Renormalized);
    assert_relative_eq!(bundle.holdings[0].weight, 0.625, epsilon = 1e-12);
    assert_relative_eq!(bundle.holdings[1].weight, 0.375, epsilon = 1e-12);
    assert!(bundle.is_partial());
    assert!(!bundle.market.uses_defaults());
    // No vendor data and no monthly series: every beta is the default
    assert_eq!(bundle.lowest_fidelity(), Some(DataSource::Default));
    assert_relative_eq!(bundle.portfolio.beta, 1.0, epsilon = 1e-12);
}

#[tokio::test]
async fn test_exclusion_without_renormalization_fails() {
    let providers = DataProviders::new(Arc::new(holding_prices()));
    let config = EngineConfig::default().with_renormalize_after_exclusion(false);
    let engine = engine_with(providers, config);

    match engine.risk_metrics(&three_holdings(), as_of()).await {
        Err(EngineError::Portfolio(PortfolioError::MissingHoldings { symbols })) => {
            assert_eq!(symbols, vec!["CCC".to_string()]);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_usable_holdings() {
    let providers = DataProviders::new(Arc::new(MemoryPrices::default()));
    let engine = engine_with(providers, EngineConfig::default());

    let holdings = vec![Holding::weighted(sym("XXX"), 1.0)];
    assert!(matches!(
        engine.risk_metrics(&holdings, as_of()).await,
        Err(EngineError::NoUsableHoldings { ref excluded }) if excluded.len() == 1
    ));
}

#[tokio::test]
async fn test_malformed_weights_abort() {
    let providers = DataProviders::new(Arc::new(holding_prices()));
    let engine = engine_with(providers, EngineConfig::default());

    let holdings = vec![
        Holding::weighted(sym("AAA"), 0.5),
        Holding::weighted(sym("BBB"), 0.3),
    ];
    assert!(matches!(
        engine.volatility(&holdings, as_of()).await,
        Err(EngineError::Portfolio(PortfolioError::WeightSumOutOfTolerance { .. }))
    ));
}

#[tokio::test]
async fn test_dollar_holdings_carry_totals() {
    let providers = DataProviders::new(Arc::new(holding_prices()));
    let engine = engine_with(providers, EngineConfig::default());

    let holdings = vec![
        Holding::valued(sym("AAA"), dec!(6000)).with_cost_basis(dec!(5000)),
        Holding::valued(sym("BBB"), dec!(4000)),
    ];
    let bundle = engine.risk_metrics(&holdings, as_of()).await.unwrap();

    assert_eq!(bundle.weight_origin, WeightOrigin::DollarValue);
    assert_eq!(bundle.total_value, Some(dec!(10000)));
    assert_eq!(bundle.total_cost_basis, Some(dec!(5000)));
    assert_relative_eq!(bundle.holdings[0].weight, 0.6, epsilon = 1e-12);
    assert_eq!(
        bundle.holdings[0].std_dev.map(|s| s.source),
        Some(StdDevSource::Calculated)
    );

    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["risk_free_rate_source"], "default");
    assert_eq!(json["holdings"][0]["data_source"], "default");
}

/// Daily closes from 2020-01-02 through 2024-12-31: large swings through
/// 2023, then a quiet final year.
fn volatile_then_calm(symbol: &str) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let mut close = 100.0;
    let mut points = Vec::new();
    let mut day = start;
    let mut k = 0;
    while day <= end {
        points.push(PricePoint::new(Date::from(day), close));
        let amplitude = if day < NaiveDate::from_ymd_opt(2023, 12, 31).unwrap() {
            0.03
        } else {
            0.001
        };
        close *= 1.0 + amplitude * (k as f64 * 0.9).sin();
        day += Duration::days(1);
        k += 1;
    }
    PriceSeries::new(sym(symbol), Interval::Daily, points).unwrap()
}

#[tokio::test]
async fn test_calculated_std_dev_spans_five_years() {
    let series = volatile_then_calm("SWING");
    let five_year = ReturnSeries::from_price_series(&series).unwrap().annualized_std_dev();
    let final_year = ReturnSeries::from_price_series(
        &series.slice(&DateRange::new(Date::from_ymd(2023, 12, 31).unwrap(), as_of()).unwrap()),
    )
    .unwrap()
    .annualized_std_dev();

    let prices = MemoryPrices::default().with(spy_daily()).with(series);
    let engine = engine_with(DataProviders::new(Arc::new(prices)), EngineConfig::default());
    let holdings = vec![Holding::weighted(sym("SWING"), 1.0)];

    let bundle = engine.risk_metrics(&holdings, as_of()).await.unwrap();
    let resolved = bundle.holdings[0].std_dev.unwrap();

    assert_eq!(resolved.source, StdDevSource::Calculated);
    assert_relative_eq!(resolved.value, five_year, epsilon = 1e-12);
    assert!(resolved.value > 10.0 * final_year);
    // Portfolio risk still comes from the one-year window
    assert_relative_eq!(bundle.portfolio.std_dev, final_year, epsilon = 1e-12);
}

// =============================================================================
// BETA TIERS
// =============================================================================

#[tokio::test]
async fn test_beta_tiers_resolve_per_holding() {
    let prices = MemoryPrices::default()
        .with(monthly("SPY", market_monthly_return))
        .with(monthly("CALC", |i| 1.5 * market_monthly_return(i)));

    let mut vendor = MemoryVendor::default();
    vendor.stats.insert(
        sym("FUND"),
        VendorStats::five_year(FiveYearRiskStats {
            beta: 0.85,
            alpha: 0.01,
            sharpe_ratio: 0.9,
            treynor_ratio: 0.07,
            std_dev: 0.11,
            r_squared: 0.93,
        }),
    );
    vendor.stats.insert(sym("STOCK"), VendorStats::beta_only(1.3));

    let providers = DataProviders::new(Arc::new(prices)).with_vendor_stats(Arc::new(vendor));
    let engine = engine_with(providers, EngineConfig::default());

    let holdings = vec![
        Holding::weighted(sym("FUND"), 0.25),
        Holding::weighted(sym("STOCK"), 0.25),
        Holding::weighted(sym("CALC"), 0.25),
        Holding::weighted(sym("NEW"), 0.25),
    ];
    let report = engine.beta(&holdings, as_of()).await.unwrap();

    let sources: Vec<DataSource> = report.holdings.iter().map(|h| h.data_source).collect();
    assert_eq!(
        sources,
        vec![
            DataSource::Vendor5y,
            DataSource::VendorBeta,
            DataSource::Calculated,
            DataSource::Default
        ]
    );
    assert_relative_eq!(report.holdings[2].beta, 1.5, epsilon = 1e-9);
    assert_relative_eq!(
        report.portfolio_beta,
        0.25 * (0.85 + 1.3 + 1.5 + 1.0),
        epsilon = 1e-9
    );
    assert!(report.excluded.is_empty());
}

// =============================================================================
// VOLATILITY
// =============================================================================

#[tokio::test]
async fn test_volatility_matches_direct_calculation() {
    let prices = holding_prices();
    let a = ReturnSeries::from_price_series(&prices.series[&(sym("AAA"), Interval::Daily)]).unwrap();
    let b = ReturnSeries::from_price_series(&prices.series[&(sym("BBB"), Interval::Daily)]).unwrap();
    let expected = CovarianceMatrix::from_series(&[a, b])
        .unwrap()
        .portfolio_variance(&[0.6, 0.4])
        .unwrap();

    let engine = engine_with(DataProviders::new(Arc::new(prices)), EngineConfig::default());
    let holdings = vec![
        Holding::weighted(sym("AAA"), 0.6),
        Holding::weighted(sym("BBB"), 0.4),
    ];
    let report = engine.volatility(&holdings, as_of()).await.unwrap();

    assert_relative_eq!(report.portfolio_variance, expected, epsilon = 1e-15);
    assert_relative_eq!(report.portfolio_std_dev, expected.sqrt(), epsilon = 1e-15);
    assert_eq!(report.assets[0].observations, 249);
    assert_eq!(report.weight_origin, WeightOrigin::Explicit);
    assert!(report.correlation.is_well_formed());
}

// =============================================================================
// BENCHMARKS
// =============================================================================

#[tokio::test]
async fn test_benchmarks_isolate_missing_funds() {
    let prices = MemoryPrices::default()
        .with(daily("AOK", |i| 50.0 + 2.5 * i as f64 / 249.0))
        .with(daily("AOA", |i| 60.0 + 9.0 * i as f64 / 249.0));
    let engine = engine_with(DataProviders::new(Arc::new(prices)), EngineConfig::default());

    let report = engine.benchmarks(as_of(), Some(0.08)).await.unwrap();

    assert_eq!(report.returns.len(), 2);
    assert_eq!(report.unavailable.len(), 6);
    assert_eq!(report.for_profile(RiskProfile::Aggressive).len(), 1);
    assert_relative_eq!(report.returns[0].one_year_return, 0.05, epsilon = 1e-12);

    let comparison = report.comparison.unwrap();
    assert_eq!(comparison.best_benchmark().unwrap().fund.symbol, "AOA");
    assert_eq!(comparison.outperforming_benchmarks().len(), 1);
}

// =============================================================================
// BUILDER
// =============================================================================

#[test]
fn test_builder_requires_providers() {
    assert!(matches!(
        AnalyticsEngineBuilder::new().build(),
        Err(EngineError::MissingDependency(_))
    ));
}

#[test]
fn test_builder_rejects_invalid_config() {
    let providers = DataProviders::new(Arc::new(MemoryPrices::default()));
    let config = EngineConfig::default().with_weight_tolerance(-1.0);
    assert!(matches!(
        AnalyticsEngineBuilder::new()
            .with_config(config)
            .with_providers(providers)
            .build(),
        Err(EngineError::Config(_))
    ));
}
