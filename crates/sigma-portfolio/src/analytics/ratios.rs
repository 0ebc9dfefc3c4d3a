//! Risk-adjusted performance ratios.
//!
//! | Ratio | Formula | Undefined when |
//! |-------|---------|----------------|
//! | Sharpe | `(Rp - Rf) / σp` | `σp = 0` |
//! | Treynor | `(Rp - Rf) / βp` | `βp = 0` |
//! | Jensen's alpha | `Rp - [Rf + (Rm - Rf) βp]` | never |

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Ratio;

/// Sharpe ratio: excess return per unit of total risk.
pub fn sharpe_ratio(portfolio_return: f64, risk_free_rate: f64, std_dev: f64) -> Ratio {
    Ratio::guarded(portfolio_return - risk_free_rate, std_dev)
}

/// Treynor ratio: excess return per unit of systematic risk.
pub fn treynor_ratio(portfolio_return: f64, risk_free_rate: f64, beta: f64) -> Ratio {
    Ratio::guarded(portfolio_return - risk_free_rate, beta)
}

/// Sharpe ratio that fails instead of returning [`Ratio::Undefined`].
///
/// # Errors
///
/// Returns `PortfolioError::DivisionGuard` for a zero or non-finite
/// standard deviation.
pub fn sharpe_ratio_strict(
    portfolio_return: f64,
    risk_free_rate: f64,
    std_dev: f64,
) -> PortfolioResult<f64> {
    sharpe_ratio(portfolio_return, risk_free_rate, std_dev)
        .value()
        .ok_or_else(|| PortfolioError::division_guard("Sharpe ratio", std_dev))
}

/// Treynor ratio that fails instead of returning [`Ratio::Undefined`].
///
/// # Errors
///
/// Returns `PortfolioError::DivisionGuard` for a zero or non-finite beta.
pub fn treynor_ratio_strict(
    portfolio_return: f64,
    risk_free_rate: f64,
    beta: f64,
) -> PortfolioResult<f64> {
    treynor_ratio(portfolio_return, risk_free_rate, beta)
        .value()
        .ok_or_else(|| PortfolioError::division_guard("Treynor ratio", beta))
}

/// Jensen's alpha: realized return minus the CAPM expected return.
pub fn jensens_alpha(portfolio_return: f64, risk_free_rate: f64, market_return: f64, beta: f64) -> f64 {
    portfolio_return - (risk_free_rate + (market_return - risk_free_rate) * beta)
}

/// The three portfolio ratios computed together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRatios {
    /// Sharpe ratio.
    pub sharpe_ratio: Ratio,
    /// Treynor ratio.
    pub treynor_ratio: Ratio,
    /// Jensen's alpha.
    pub jensens_alpha: f64,
}

impl RiskRatios {
    /// Computes all three ratios.
    #[must_use]
    pub fn compute(
        portfolio_return: f64,
        risk_free_rate: f64,
        market_return: f64,
        beta: f64,
        std_dev: f64,
    ) -> Self {
        Self {
            sharpe_ratio: sharpe_ratio(portfolio_return, risk_free_rate, std_dev),
            treynor_ratio: treynor_ratio(portfolio_return, risk_free_rate, beta),
            jensens_alpha: jensens_alpha(portfolio_return, risk_free_rate, market_return, beta),
        }
    }
}
