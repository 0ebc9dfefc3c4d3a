//! The analysis engine.

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use sigma_config::EngineConfig;
use sigma_core::{Date, Interval, PriceSeries, Symbol};
use sigma_math::performance::ReturnConvention;
use sigma_math::regression::BetaEstimate;
use sigma_portfolio::analytics::BetaResolution;
use sigma_portfolio::reports::{
    compute_risk_metrics, BetaReport, ExcludedHolding, HoldingInput, MetricsOptions,
    RiskMetricsBundle, VolatilityReport,
};
use sigma_portfolio::types::{Holding, MarketContext, PortfolioWeights};
use sigma_traits::DataProviders;

use crate::batch::BatchFetchResult;
use crate::error::{EngineError, EngineResult};
use crate::market::resolve_market_context;
use crate::resolution::{estimate_beta, lookback, History};

/// Runs portfolio analyses against a set of data providers.
///
/// Every analysis fetches per-holding data concurrently, isolates
/// per-holding failures, applies the configured exclusion policy and hands
/// the survivors to the pure calculators in `sigma-portfolio`.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    config: EngineConfig,
    providers: DataProviders,
}

impl AnalyticsEngine {
    /// Creates an engine. Prefer [`crate::AnalyticsEngineBuilder`], which
    /// validates the configuration.
    pub fn new(config: EngineConfig, providers: DataProviders) -> Self {
        Self { config, providers }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Data providers.
    pub fn providers(&self) -> &DataProviders {
        &self.providers
    }

    /// Market return and risk-free rate as of `as_of`, with defaults
    /// substituted for unavailable figures.
    pub async fn market_context(&self, as_of: Date) -> MarketContext {
        resolve_market_context(&self.providers, &self.config, as_of).await
    }

    // =========================================================================
    // ANALYSES
    // =========================================================================

    /// Covariance-based portfolio volatility over the volatility lookback.
    pub async fn volatility(
        &self,
        holdings: &[Holding],
        as_of: Date,
    ) -> EngineResult<VolatilityReport> {
        let span = analysis_span("volatility", holdings.len());
        async {
            let weights = PortfolioWeights::from_holdings(holdings, self.config.weight_tolerance)?;
            let history = self
                .fetch_histories(
                    &weights.symbols(),
                    self.config.volatility_lookback_years,
                    ReturnConvention::SimpleTotal,
                    as_of,
                )
                .await?;

            let excluded = history.exclusions();
            let weights = self.apply_exclusions(&weights, &excluded)?;
            let series: Vec<_> = history
                .succeeded
                .into_iter()
                .map(|(symbol, h)| h.returns.with_symbol(symbol))
                .collect();

            let report = VolatilityReport::compute(
                &weights,
                &series,
                self.config.correlation_tolerance,
                excluded,
            )?;
            log_anomalies(report.correlation.anomalies().len());
            info!(
                portfolio_std_dev = report.portfolio_std_dev,
                assets = report.assets.len(),
                "volatility analysis complete"
            );
            Ok::<_, EngineError>(report)
        }
        .instrument(span)
        .await
    }

    /// Weighted portfolio beta with per-holding tier resolution.
    pub async fn beta(&self, holdings: &[Holding], as_of: Date) -> EngineResult<BetaReport> {
        let span = analysis_span("beta", holdings.len());
        async {
            let weights = PortfolioWeights::from_holdings(holdings, self.config.weight_tolerance)?;
            let resolutions = self.resolve_betas(&weights.symbols(), as_of).await;
            let report = BetaReport::compute(&weights, &resolutions, Vec::new())?;
            info!(portfolio_beta = report.portfolio_beta, "beta analysis complete");
            Ok::<_, EngineError>(report)
        }
        .instrument(span)
        .await
    }

    /// Sharpe, Treynor, Jensen's alpha and the per-holding breakdown.
    ///
    /// Holding returns and covariance use the return lookback; a calculated
    /// standard deviation uses the longer standard-deviation lookback.
    pub async fn risk_metrics(
        &self,
        holdings: &[Holding],
        as_of: Date,
    ) -> EngineResult<RiskMetricsBundle> {
        let span = analysis_span("risk_metrics", holdings.len());
        async {
            let weights = PortfolioWeights::from_holdings(holdings, self.config.weight_tolerance)?;
            let symbols = weights.symbols();

            let (market, history, long_history, resolutions) = futures::join!(
                self.market_context(as_of),
                self.fetch_histories(
                    &symbols,
                    self.config.return_lookback_years,
                    self.config.return_convention,
                    as_of,
                ),
                self.fetch_histories(
                    &symbols,
                    self.config.std_dev_lookback_years,
                    ReturnConvention::SimpleTotal,
                    as_of,
                ),
                self.resolve_betas(&symbols, as_of),
            );
            let history = history?;
            let long_history = long_history?;

            let excluded = history.exclusions();
            let weights = self.apply_exclusions(&weights, &excluded)?;

            let inputs: Vec<HoldingInput> = history
                .succeeded
                .into_iter()
                .map(|(symbol, h)| {
                    let holding = holdings.iter().find(|x| x.symbol == symbol);
                    let resolution = resolutions
                        .iter()
                        .find(|(s, _)| *s == symbol)
                        .map_or(
                            BetaResolution::Default {
                                beta: self.config.market.default_beta,
                            },
                            |(_, r)| *r,
                        );
                    let std_dev_returns = long_history.get(&symbol).map(|l| l.returns.clone());
                    HoldingInput {
                        symbol,
                        daily_returns: h.returns,
                        std_dev_returns,
                        period_return: h.period_return,
                        resolution,
                        total_value: holding.and_then(Holding::total_value),
                        cost_basis: holding.and_then(Holding::cost_basis),
                    }
                })
                .collect();

            let options = MetricsOptions {
                return_convention: self.config.return_convention,
                correlation_tolerance: self.config.correlation_tolerance,
                weight_tolerance: self.config.weight_tolerance,
            };
            let bundle = compute_risk_metrics(&weights, &inputs, market, excluded, &options)?;

            log_anomalies(bundle.correlation_anomalies.len());
            info!(
                sharpe = %bundle.sharpe_ratio,
                treynor = %bundle.treynor_ratio,
                alpha = bundle.jensens_alpha,
                excluded = bundle.excluded.len(),
                "risk metrics complete"
            );
            Ok::<_, EngineError>(bundle)
        }
        .instrument(span)
        .await
    }

    // =========================================================================
    // FETCHING
    // =========================================================================

    /// Daily histories for `symbols` over `years` ending on `as_of`.
    pub(crate) async fn fetch_histories(
        &self,
        symbols: &[Symbol],
        years: u32,
        convention: ReturnConvention,
        as_of: Date,
    ) -> EngineResult<BatchFetchResult<History>> {
        let range = lookback(years, as_of)?;
        let range = &range;
        let result = BatchFetchResult::collect(symbols, |symbol| async move {
            let series = self
                .providers
                .prices
                .fetch_price_series(&symbol, range, Interval::Daily)
                .await?;
            Ok::<_, EngineError>(History::from_series(&series, convention)?)
        })
        .await;

        for (symbol, reason) in &result.failed {
            warn!(%symbol, %reason, "daily history unavailable");
        }
        debug!(
            fetched = result.succeeded.len(),
            failed = result.failed.len(),
            "daily histories fetched"
        );
        Ok(result)
    }

    /// Resolves a beta for every symbol; never fails, since the last tier
    /// is the configured default.
    pub(crate) async fn resolve_betas(
        &self,
        symbols: &[Symbol],
        as_of: Date,
    ) -> Vec<(Symbol, BetaResolution)> {
        let vendor = BatchFetchResult::collect(symbols, |symbol| async move {
            self.providers
                .vendor_stats
                .fetch_vendor_risk_stats(&symbol)
                .await
        })
        .await;
        for (symbol, reason) in &vendor.failed {
            debug!(%symbol, %reason, "vendor statistics unavailable");
        }

        let from_vendor: Vec<(Symbol, Option<BetaResolution>)> = symbols
            .iter()
            .map(|s| {
                let stats = vendor.get(s).and_then(Option::as_ref);
                (s.clone(), BetaResolution::from_vendor(stats))
            })
            .collect();

        let pending: Vec<Symbol> = from_vendor
            .iter()
            .filter(|(_, r)| r.is_none())
            .map(|(s, _)| s.clone())
            .collect();
        let estimates = if pending.is_empty() {
            BatchFetchResult {
                succeeded: Vec::new(),
                failed: Vec::new(),
            }
        } else {
            self.estimate_betas(&pending, as_of).await
        };

        from_vendor
            .into_iter()
            .map(|(symbol, resolved)| {
                let resolution = resolved.unwrap_or_else(|| {
                    BetaResolution::from_estimate(
                        estimates.get(&symbol).copied(),
                        self.config.market.default_beta,
                    )
                });
                debug!(%symbol, beta = resolution.beta(), source = %resolution.data_source(), "beta resolved");
                (symbol, resolution)
            })
            .collect()
    }

    /// Monthly regression betas against the market proxy.
    async fn estimate_betas(
        &self,
        symbols: &[Symbol],
        as_of: Date,
    ) -> BatchFetchResult<BetaEstimate> {
        let (range, market) = match self.fetch_market_monthly(as_of).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "market proxy history unavailable, beta regression skipped");
                return BatchFetchResult {
                    succeeded: Vec::new(),
                    failed: symbols.iter().map(|s| (s.clone(), e.to_string())).collect(),
                };
            }
        };

        let (range, market) = (&range, &market);
        let result = BatchFetchResult::collect(symbols, |symbol| async move {
            let series = self
                .providers
                .prices
                .fetch_price_series(&symbol, range, Interval::Monthly)
                .await?;
            Ok::<_, EngineError>(estimate_beta(&series, market)?)
        })
        .await;

        for (symbol, reason) in &result.failed {
            debug!(%symbol, %reason, "beta regression unavailable");
        }
        result
    }

    async fn fetch_market_monthly(
        &self,
        as_of: Date,
    ) -> EngineResult<(sigma_core::DateRange, PriceSeries)> {
        let range = lookback(self.config.beta_lookback_years, as_of)?;
        let proxy = self.config.market_proxy_symbol()?;
        let market = self
            .providers
            .prices
            .fetch_price_series(&proxy, &range, Interval::Monthly)
            .await?;
        Ok((range, market))
    }

    // =========================================================================
    // EXCLUSION
    // =========================================================================

    /// Applies the configured exclusion policy.
    pub(crate) fn apply_exclusions(
        &self,
        weights: &PortfolioWeights,
        excluded: &[ExcludedHolding],
    ) -> EngineResult<PortfolioWeights> {
        if excluded.is_empty() {
            return Ok(weights.clone());
        }
        if excluded.len() >= weights.len() {
            return Err(EngineError::NoUsableHoldings {
                excluded: excluded.to_vec(),
            });
        }

        let missing: Vec<Symbol> = excluded.iter().map(|e| e.symbol.clone()).collect();
        warn!(
            excluded = missing.len(),
            renormalize = self.config.renormalize_after_exclusion,
            "excluding holdings without usable data"
        );
        Ok(weights.exclude(&missing, self.config.renormalize_after_exclusion)?)
    }
}

fn analysis_span(kind: &'static str, holdings: usize) -> tracing::Span {
    let id = Uuid::new_v4();
    info_span!("analysis", %id, kind, holdings)
}

fn log_anomalies(count: usize) {
    if count > 0 {
        warn!(count, "correlation entries outside [-1, 1] beyond tolerance");
    }
}
