//! Comprehensive risk metrics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sigma_core::Symbol;
use sigma_math::covariance::{CorrelationAnomaly, CovarianceMatrix, CORRELATION_TOLERANCE};
use sigma_math::performance::ReturnConvention;
use sigma_math::returns::ReturnSeries;

use crate::analytics::{
    aggregate_with_tolerance, resolve_std_dev, AlphaRating, AssetStats, BetaResolution,
    PortfolioStats, ResolvedStdDev, RiskRatios, SharpeRating,
};
use crate::error::{PortfolioError, PortfolioResult};
use crate::reports::ExcludedHolding;
use crate::types::{
    DataSource, MarketContext, PortfolioWeights, Ratio, WeightOrigin, DEFAULT_WEIGHT_TOLERANCE,
};

/// Everything known about one holding before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingInput {
    /// Holding symbol.
    pub symbol: Symbol,
    /// Daily returns over the return window, used for covariance.
    pub daily_returns: ReturnSeries,
    /// Daily returns over the longer window behind the calculated σ.
    pub std_dev_returns: Option<ReturnSeries>,
    /// Holding return under the report's convention.
    pub period_return: f64,
    /// Resolved beta tier.
    pub resolution: BetaResolution,
    /// Market value, when holdings were given in dollars.
    pub total_value: Option<Decimal>,
    /// Cost basis, when known.
    pub cost_basis: Option<Decimal>,
}

/// Per-holding line of a [`RiskMetricsBundle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingBreakdown {
    /// Holding symbol.
    pub symbol: Symbol,
    /// Portfolio weight used in aggregation.
    pub weight: f64,
    /// Holding return under the report's convention.
    pub period_return: f64,
    /// Resolved beta.
    pub beta: f64,
    /// Resolution tier of the beta and vendor figures.
    pub data_source: DataSource,
    /// Annualized standard deviation and its provenance.
    pub std_dev: Option<ResolvedStdDev>,
    /// Vendor alpha (`vendor-5y` only).
    pub alpha: Option<f64>,
    /// Vendor Sharpe ratio (`vendor-5y` only).
    pub sharpe_ratio: Option<f64>,
    /// Vendor Treynor ratio (`vendor-5y` only).
    pub treynor_ratio: Option<f64>,
    /// Vendor R² (`vendor-5y` only).
    pub r_squared: Option<f64>,
    /// Market value.
    pub total_value: Option<Decimal>,
    /// Cost basis.
    pub cost_basis: Option<Decimal>,
}

impl HoldingBreakdown {
    fn from_input(input: &HoldingInput, weight: f64) -> Self {
        let r = &input.resolution;
        Self {
            symbol: input.symbol.clone(),
            weight,
            period_return: input.period_return,
            beta: r.beta(),
            data_source: r.data_source(),
            std_dev: resolve_std_dev(
                r,
                input
                    .std_dev_returns
                    .as_ref()
                    .map(ReturnSeries::annualized_std_dev),
            ),
            alpha: r.alpha(),
            sharpe_ratio: r.sharpe_ratio(),
            treynor_ratio: r.treynor_ratio(),
            r_squared: r.r_squared(),
            total_value: input.total_value,
            cost_basis: input.cost_basis,
        }
    }
}

/// Options for [`compute_risk_metrics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsOptions {
    /// Convention used for holding returns.
    pub return_convention: ReturnConvention,
    /// Tolerance beyond ±1 before a correlation is flagged.
    pub correlation_tolerance: f64,
    /// Allowed deviation of the aggregated weights from 1.
    pub weight_tolerance: f64,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            return_convention: ReturnConvention::Annualized,
            correlation_tolerance: CORRELATION_TOLERANCE,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
        }
    }
}

/// Risk-adjusted performance of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetricsBundle {
    /// `(Rp - Rf) / σp`.
    pub sharpe_ratio: Ratio,
    /// `(Rp - Rf) / βp`.
    pub treynor_ratio: Ratio,
    /// `Rp - [Rf + (Rm - Rf) βp]`.
    pub jensens_alpha: f64,
    /// Market return, risk-free rate and their sources.
    #[serde(flatten)]
    pub market: MarketContext,
    /// Portfolio return, variance, σ and beta.
    pub portfolio: PortfolioStats,
    /// Convention used for holding returns.
    pub return_convention: ReturnConvention,
    /// How the weights were obtained.
    pub weight_origin: WeightOrigin,
    /// Per-holding breakdown in weight order.
    pub holdings: Vec<HoldingBreakdown>,
    /// Holdings left out.
    pub excluded: Vec<ExcludedHolding>,
    /// Correlation entries flagged as out of bounds.
    pub correlation_anomalies: Vec<CorrelationAnomaly>,
    /// Sum of holding market values, when known.
    pub total_value: Option<Decimal>,
    /// Sum of holding cost bases, when known.
    pub total_cost_basis: Option<Decimal>,
    /// When the bundle was computed.
    pub calculated_at: DateTime<Utc>,
}

impl RiskMetricsBundle {
    /// Market-proxy return.
    pub fn market_return(&self) -> f64 {
        self.market.market_return
    }

    /// Risk-free rate.
    pub fn risk_free_rate(&self) -> f64 {
        self.market.risk_free_rate
    }

    /// Rating band for the Sharpe ratio.
    pub fn sharpe_rating(&self) -> Option<SharpeRating> {
        SharpeRating::from_ratio(self.sharpe_ratio)
    }

    /// Rating band for Jensen's alpha.
    pub fn alpha_rating(&self) -> AlphaRating {
        AlphaRating::from_alpha(self.jensens_alpha)
    }

    /// Least authoritative tier used by any holding.
    pub fn lowest_fidelity(&self) -> Option<DataSource> {
        self.holdings.iter().map(|h| h.data_source).max()
    }

    /// True when every holding used a full vendor record.
    pub fn is_full_vendor_fidelity(&self) -> bool {
        self.lowest_fidelity() == Some(DataSource::Vendor5y)
    }

    /// True when any holding was excluded.
    pub fn is_partial(&self) -> bool {
        !self.excluded.is_empty()
    }

    /// Sets the calculation timestamp.
    #[must_use]
    pub fn with_calculated_at(mut self, at: DateTime<Utc>) -> Self {
        self.calculated_at = at;
        self
    }
}

/// Computes the comprehensive metrics from resolved per-holding inputs.
///
/// `weights` must already reflect the exclusion policy; `inputs` must hold
/// one entry per weighted symbol, in any order.
///
/// # Errors
///
/// - `PortfolioError::EmptyPortfolio` if there are no weights
/// - `PortfolioError::MissingHoldings` if a weighted symbol has no input
/// - `PortfolioError::WeightSumOutOfTolerance` if the weights drift from 1
///   beyond `options.weight_tolerance`
/// - statistical errors from covariance construction
pub fn compute_risk_metrics(
    weights: &PortfolioWeights,
    inputs: &[HoldingInput],
    market: MarketContext,
    excluded: Vec<ExcludedHolding>,
    options: &MetricsOptions,
) -> PortfolioResult<RiskMetricsBundle> {
    if weights.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    let mut ordered: Vec<(&HoldingInput, f64)> = Vec::with_capacity(weights.len());
    let mut missing = Vec::new();
    for (symbol, weight) in weights.entries() {
        match inputs.iter().find(|i| &i.symbol == symbol) {
            Some(input) => ordered.push((input, *weight)),
            None => missing.push(symbol.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(PortfolioError::MissingHoldings { symbols: missing });
    }

    let series: Vec<ReturnSeries> = ordered
        .iter()
        .map(|(i, _)| i.daily_returns.clone().with_symbol(i.symbol.clone()))
        .collect();
    let covariance = CovarianceMatrix::from_series(&series)?;
    let correlation = covariance.correlation_with_tolerance(options.correlation_tolerance);

    let assets: Vec<AssetStats> = ordered
        .iter()
        .map(|(i, w)| AssetStats::new(i.symbol.clone(), *w, i.period_return, i.resolution.beta()))
        .collect();
    let portfolio = aggregate_with_tolerance(&assets, &covariance, options.weight_tolerance)?;

    let ratios = RiskRatios::compute(
        portfolio.expected_return,
        market.risk_free_rate,
        market.market_return,
        portfolio.beta,
        portfolio.std_dev,
    );

    let holdings: Vec<HoldingBreakdown> = ordered
        .iter()
        .map(|(i, w)| HoldingBreakdown::from_input(i, *w))
        .collect();

    Ok(RiskMetricsBundle {
        sharpe_ratio: ratios.sharpe_ratio,
        treynor_ratio: ratios.treynor_ratio,
        jensens_alpha: ratios.jensens_alpha,
        market,
        portfolio,
        return_convention: options.return_convention,
        weight_origin: weights.origin(),
        total_value: sum_known(holdings.iter().map(|h| h.total_value)),
        total_cost_basis: sum_known(holdings.iter().map(|h| h.cost_basis)),
        holdings,
        excluded,
        correlation_anomalies: correlation.anomalies().to_vec(),
        calculated_at: Utc::now(),
    })
}

/// Sum of the known values, or `None` when none are known.
fn sum_known(values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values.flatten().fold(None, |acc, v| Some(acc.unwrap_or(Decimal::ZERO) + v))
}
