//! Portfolio-level aggregation of per-asset statistics.

use serde::{Deserialize, Serialize};
use sigma_core::Symbol;
use sigma_math::covariance::CovarianceMatrix;
use sigma_math::MathError;

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{validate_weight_sum, DEFAULT_WEIGHT_TOLERANCE};

/// Rounding slack below zero accepted for a quadratic-form variance.
const NEGATIVE_VARIANCE_SLACK: f64 = 1e-12;

/// Per-asset inputs to aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStats {
    /// Asset symbol.
    pub symbol: Symbol,
    /// Portfolio weight.
    pub weight: f64,
    /// Return under the caller's chosen convention.
    pub expected_return: f64,
    /// Resolved beta.
    pub beta: f64,
}

impl AssetStats {
    /// Creates asset inputs.
    #[must_use]
    pub fn new(symbol: Symbol, weight: f64, expected_return: f64, beta: f64) -> Self {
        Self {
            symbol,
            weight,
            expected_return,
            beta,
        }
    }
}

/// Portfolio return, risk and market sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// `Σ w_i r_i`.
    pub expected_return: f64,
    /// `wᵀ Cov w`.
    pub variance: f64,
    /// `√variance`.
    pub std_dev: f64,
    /// `Σ w_i β_i`.
    pub beta: f64,
}

/// Weighted sum `Σ w_i x_i`.
///
/// # Errors
///
/// Returns a dimension mismatch if the slices differ in length.
pub fn weighted_sum(weights: &[f64], values: &[f64]) -> PortfolioResult<f64> {
    if weights.len() != values.len() {
        return Err(MathError::dimension_mismatch(weights.len(), values.len()).into());
    }
    Ok(weights.iter().zip(values).map(|(w, x)| w * x).sum())
}

/// `wᵀ Cov w`, rejecting a negative result beyond rounding.
///
/// # Errors
///
/// - a dimension mismatch if `weights` and the matrix differ in size
/// - `PortfolioError::InvalidPortfolio` if the quadratic form is negative
///   beyond rounding, which means the matrix is not a valid covariance
pub fn checked_portfolio_variance(covariance: &CovarianceMatrix, weights: &[f64]) -> PortfolioResult<f64> {
    let variance = covariance.portfolio_variance(weights)?;
    if variance < -NEGATIVE_VARIANCE_SLACK {
        return Err(PortfolioError::invalid_portfolio(format!(
            "portfolio variance {variance} is negative"
        )));
    }
    Ok(variance.max(0.0))
}

/// Aggregates per-asset statistics into [`PortfolioStats`], requiring the
/// weights to sum to 1 within [`DEFAULT_WEIGHT_TOLERANCE`].
///
/// `covariance` must list the assets in the same order as `assets`.
///
/// # Errors
///
/// See [`aggregate_with_tolerance`].
pub fn aggregate(assets: &[AssetStats], covariance: &CovarianceMatrix) -> PortfolioResult<PortfolioStats> {
    aggregate_with_tolerance(assets, covariance, DEFAULT_WEIGHT_TOLERANCE)
}

/// Aggregates per-asset statistics with an explicit weight-sum tolerance.
///
/// # Errors
///
/// - `PortfolioError::EmptyPortfolio` if `assets` is empty
/// - `PortfolioError::WeightSumOutOfTolerance` if the weights do not sum
///   to 1 within `tolerance`
/// - a dimension mismatch if the covariance matrix has a different size
/// - `PortfolioError::InvalidPortfolio` for a negative variance, see
///   [`checked_portfolio_variance`]
pub fn aggregate_with_tolerance(
    assets: &[AssetStats],
    covariance: &CovarianceMatrix,
    tolerance: f64,
) -> PortfolioResult<PortfolioStats> {
    if assets.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    let weights: Vec<f64> = assets.iter().map(|a| a.weight).collect();
    validate_weight_sum(&weights, tolerance)?;
    let returns: Vec<f64> = assets.iter().map(|a| a.expected_return).collect();
    let betas: Vec<f64> = assets.iter().map(|a| a.beta).collect();

    let variance = checked_portfolio_variance(covariance, &weights)?;

    Ok(PortfolioStats {
        expected_return: weighted_sum(&weights, &returns)?,
        variance,
        std_dev: variance.sqrt(),
        beta: weighted_sum(&weights, &betas)?,
    })
}
