//! Beta estimation by regression of asset returns on market returns.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// A beta estimated from paired return observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaEstimate {
    /// Slope of asset returns on market returns.
    pub beta: f64,
    /// Number of paired observations used.
    pub observations: usize,
}

/// Estimates beta as `Cov(asset, market) / Var(market)`.
///
/// Both statistics are sample statistics (denominator `m - 1`) over the
/// leading `m = min(asset.len(), market.len())` observations, centred on
/// the means of that overlap. Callers aligning by date should pass series
/// of equal length.
///
/// # Errors
///
/// - `MathError::InsufficientData` if the overlap has fewer than 2 points
/// - `MathError::DivisionByZero` if the market returns have no variance
///
/// # Example
///
/// ```rust
/// use sigma_math::regression::regression_beta;
///
/// let market = [0.01, -0.02, 0.03, 0.00];
/// let asset: Vec<f64> = market.iter().map(|r| 1.5 * r).collect();
/// let est = regression_beta(&asset, &market).unwrap();
/// assert!((est.beta - 1.5).abs() < 1e-12);
/// ```
pub fn regression_beta(asset: &[f64], market: &[f64]) -> MathResult<BetaEstimate> {
    let m = asset.len().min(market.len());
    if m < 2 {
        return Err(MathError::insufficient_data(2, m));
    }
    let (asset, market) = (&asset[..m], &market[..m]);

    let n = m as f64;
    let mean_a = asset.iter().sum::<f64>() / n;
    let mean_m = market.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (a, mk) in asset.iter().zip(market) {
        cov += (a - mean_a) * (mk - mean_m);
        var += (mk - mean_m).powi(2);
    }
    cov /= n - 1.0;
    var /= n - 1.0;

    if var.abs() < f64::EPSILON * f64::EPSILON {
        return Err(MathError::DivisionByZero { value: var });
    }

    Ok(BetaEstimate {
        beta: cov / var,
        observations: m,
    })
}
