//! Analysis reports assembled from in-memory data.
//!
//! | Report | Contents |
//! |--------|----------|
//! | [`RiskMetricsBundle`] | Sharpe, Treynor, alpha, portfolio stats, per-holding breakdown |
//! | [`VolatilityReport`] | Per-asset σ, covariance and correlation, portfolio σ |
//! | [`BetaReport`] | Per-holding and portfolio beta |
//!
//! Every report lists holdings excluded for missing data so partial
//! results are never mistaken for complete ones.

mod beta;
mod metrics;
mod volatility;

pub use beta::{BetaReport, HoldingBeta};
pub use metrics::{compute_risk_metrics, HoldingBreakdown, HoldingInput, MetricsOptions, RiskMetricsBundle};
pub use volatility::{AssetVolatility, VolatilityReport};

use serde::{Deserialize, Serialize};
use sigma_core::Symbol;

/// A holding left out of an analysis, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedHolding {
    /// Symbol of the excluded holding.
    pub symbol: Symbol,
    /// Why its data was unusable.
    pub reason: String,
}

impl ExcludedHolding {
    /// Creates an exclusion record.
    #[must_use]
    pub fn new(symbol: Symbol, reason: impl Into<String>) -> Self {
        Self {
            symbol,
            reason: reason.into(),
        }
    }
}
