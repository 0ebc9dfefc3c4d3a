//! Vendor-supplied risk statistics.

use serde::{Deserialize, Serialize};

/// A complete five-year risk record as published by a data vendor.
///
/// All figures are decimals (0.15 for 15%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveYearRiskStats {
    /// Beta against the vendor's benchmark.
    pub beta: f64,
    /// Alpha against the vendor's benchmark.
    pub alpha: f64,
    /// Sharpe ratio.
    pub sharpe_ratio: f64,
    /// Treynor ratio.
    pub treynor_ratio: f64,
    /// Annualized standard deviation.
    pub std_dev: f64,
    /// Coefficient of determination against the benchmark.
    pub r_squared: f64,
}

impl FiveYearRiskStats {
    /// True when every figure is finite.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            self.beta,
            self.alpha,
            self.sharpe_ratio,
            self.treynor_ratio,
            self.std_dev,
            self.r_squared,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Whatever risk statistics a vendor offers for one symbol.
///
/// Individual stocks typically carry only `beta`; funds may carry a
/// three-year beta and a full five-year record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorStats {
    /// Full five-year record, if published.
    pub five_year: Option<FiveYearRiskStats>,
    /// Standalone beta.
    pub beta: Option<f64>,
    /// Three-year beta, typically for funds.
    pub beta_3y: Option<f64>,
}

impl VendorStats {
    /// Stats carrying only a standalone beta.
    #[must_use]
    pub fn beta_only(beta: f64) -> Self {
        Self {
            beta: Some(beta),
            ..Self::default()
        }
    }

    /// Stats carrying a full five-year record.
    #[must_use]
    pub fn five_year(stats: FiveYearRiskStats) -> Self {
        Self {
            five_year: Some(stats),
            ..Self::default()
        }
    }

    /// Sets the three-year beta.
    #[must_use]
    pub fn with_beta_3y(mut self, beta: f64) -> Self {
        self.beta_3y = Some(beta);
        self
    }

    /// The standalone beta, falling back to the three-year figure.
    #[must_use]
    pub fn standalone_beta(&self) -> Option<f64> {
        self.beta
            .filter(|b| b.is_finite())
            .or(self.beta_3y.filter(|b| b.is_finite()))
    }
}
