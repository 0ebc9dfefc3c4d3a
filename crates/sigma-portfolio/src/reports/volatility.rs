//! Portfolio volatility report.

use serde::Serialize;
use sigma_core::Symbol;
use sigma_math::covariance::{CorrelationMatrix, CovarianceMatrix};
use sigma_math::returns::ReturnSeries;

use crate::analytics::checked_portfolio_variance;
use crate::error::{PortfolioError, PortfolioResult};
use crate::reports::ExcludedHolding;
use crate::types::{PortfolioWeights, WeightOrigin};

/// One asset's return statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetVolatility {
    /// Asset symbol.
    pub symbol: Symbol,
    /// Portfolio weight.
    pub weight: f64,
    /// Mean periodic return.
    pub mean_return: f64,
    /// Annualized standard deviation.
    pub annualized_std_dev: f64,
    /// Number of returns observed.
    pub observations: usize,
}

/// Covariance-based portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityReport {
    /// Per-asset statistics in weight order.
    pub assets: Vec<AssetVolatility>,
    /// Annualized covariance matrix.
    pub covariance: CovarianceMatrix,
    /// Correlation matrix, with any out-of-bounds entries flagged.
    pub correlation: CorrelationMatrix,
    /// `wᵀ Cov w`.
    pub portfolio_variance: f64,
    /// `√variance`.
    pub portfolio_std_dev: f64,
    /// How the weights were obtained.
    pub weight_origin: WeightOrigin,
    /// Holdings left out.
    pub excluded: Vec<ExcludedHolding>,
}

impl VolatilityReport {
    /// Builds the report. `series` may be in any order but must contain one
    /// labelled series per weighted symbol.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::EmptyPortfolio` if there are no weights
    /// - `PortfolioError::MissingHoldings` if a weighted symbol has no series
    /// - statistical errors from covariance construction
    /// - `PortfolioError::InvalidPortfolio` for a negative portfolio variance
    pub fn compute(
        weights: &PortfolioWeights,
        series: &[ReturnSeries],
        correlation_tolerance: f64,
        excluded: Vec<ExcludedHolding>,
    ) -> PortfolioResult<Self> {
        if weights.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }

        let mut ordered = Vec::with_capacity(weights.len());
        let mut missing = Vec::new();
        for (symbol, _) in weights.entries() {
            match series.iter().find(|s| s.symbol() == Some(symbol)) {
                Some(s) => ordered.push(s.clone()),
                None => missing.push(symbol.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(PortfolioError::MissingHoldings { symbols: missing });
        }

        let covariance = CovarianceMatrix::from_series(&ordered)?;
        let correlation = covariance.correlation_with_tolerance(correlation_tolerance);
        let portfolio_variance = checked_portfolio_variance(&covariance, &weights.weights())?;

        let assets = weights
            .entries()
            .iter()
            .zip(&ordered)
            .map(|((symbol, weight), s)| AssetVolatility {
                symbol: symbol.clone(),
                weight: *weight,
                mean_return: s.mean(),
                annualized_std_dev: s.annualized_std_dev(),
                observations: s.len(),
            })
            .collect();

        Ok(Self {
            assets,
            covariance,
            correlation,
            portfolio_variance,
            portfolio_std_dev: portfolio_variance.sqrt(),
            weight_origin: weights.origin(),
            excluded,
        })
    }
}
