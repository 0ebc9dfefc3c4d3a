//! Per-holding beta and standard deviation resolution.
//!
//! Each holding's beta is resolved through four tiers, first match wins:
//!
//! | Tier | Condition | Beta | Also supplies |
//! |------|-----------|------|---------------|
//! | `vendor-5y` | complete five-year vendor record | vendor 5y beta | alpha, Sharpe, Treynor, σ, R² |
//! | `vendor-beta` | standalone vendor beta (or 3y fund beta) | vendor beta | nothing else |
//! | `calculated` | monthly regression succeeded | Cov / Var | nothing else |
//! | `default` | everything above failed | configured default (1.0) | nothing else |
//!
//! Every tier is a pure function of its inputs. The vendor tiers are split
//! from the fallback tiers so callers can skip fetching monthly history when
//! a vendor figure already exists.

use serde::{Deserialize, Serialize};
use sigma_math::regression::BetaEstimate;

use crate::types::{DataSource, FiveYearRiskStats, VendorStats};

/// Terminal state of beta resolution for one holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BetaResolution {
    /// Full five-year vendor record.
    Vendor5y(FiveYearRiskStats),
    /// Standalone vendor beta.
    VendorBeta {
        /// Vendor beta.
        beta: f64,
    },
    /// Regression estimate from monthly returns.
    Calculated(BetaEstimate),
    /// Configured default.
    Default {
        /// Default beta.
        beta: f64,
    },
}

impl BetaResolution {
    /// Tiers 1 and 2: vendor data only.
    #[must_use]
    pub fn from_vendor(vendor: Option<&VendorStats>) -> Option<Self> {
        tier_vendor_5y(vendor).or_else(|| tier_vendor_beta(vendor))
    }

    /// Tiers 3 and 4: regression estimate, else the default beta.
    #[must_use]
    pub fn from_estimate(estimate: Option<BetaEstimate>, default_beta: f64) -> Self {
        tier_calculated(estimate).unwrap_or_else(|| tier_default(default_beta))
    }

    /// Resolved beta.
    #[must_use]
    pub fn beta(&self) -> f64 {
        match self {
            BetaResolution::Vendor5y(stats) => stats.beta,
            BetaResolution::VendorBeta { beta } | BetaResolution::Default { beta } => *beta,
            BetaResolution::Calculated(est) => est.beta,
        }
    }

    /// Provenance tag.
    #[must_use]
    pub fn data_source(&self) -> DataSource {
        match self {
            BetaResolution::Vendor5y(_) => DataSource::Vendor5y,
            BetaResolution::VendorBeta { .. } => DataSource::VendorBeta,
            BetaResolution::Calculated(_) => DataSource::Calculated,
            BetaResolution::Default { .. } => DataSource::Default,
        }
    }

    /// The full vendor record, for `vendor-5y` only.
    #[must_use]
    pub fn vendor_record(&self) -> Option<&FiveYearRiskStats> {
        match self {
            BetaResolution::Vendor5y(stats) => Some(stats),
            _ => None,
        }
    }

    /// Vendor alpha, for `vendor-5y` only.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        self.vendor_record().map(|s| s.alpha)
    }

    /// Vendor Sharpe ratio, for `vendor-5y` only.
    #[must_use]
    pub fn sharpe_ratio(&self) -> Option<f64> {
        self.vendor_record().map(|s| s.sharpe_ratio)
    }

    /// Vendor Treynor ratio, for `vendor-5y` only.
    #[must_use]
    pub fn treynor_ratio(&self) -> Option<f64> {
        self.vendor_record().map(|s| s.treynor_ratio)
    }

    /// Vendor R², for `vendor-5y` only.
    #[must_use]
    pub fn r_squared(&self) -> Option<f64> {
        self.vendor_record().map(|s| s.r_squared)
    }

    /// Vendor standard deviation, for `vendor-5y` only.
    #[must_use]
    pub fn vendor_std_dev(&self) -> Option<f64> {
        self.vendor_record().map(|s| s.std_dev)
    }
}

/// Tier 1: a complete five-year vendor record.
#[must_use]
pub fn tier_vendor_5y(vendor: Option<&VendorStats>) -> Option<BetaResolution> {
    vendor
        .and_then(|v| v.five_year)
        .filter(FiveYearRiskStats::is_complete)
        .map(BetaResolution::Vendor5y)
}

/// Tier 2: a standalone vendor beta.
#[must_use]
pub fn tier_vendor_beta(vendor: Option<&VendorStats>) -> Option<BetaResolution> {
    vendor
        .and_then(VendorStats::standalone_beta)
        .map(|beta| BetaResolution::VendorBeta { beta })
}

/// Tier 3: a finite regression estimate.
#[must_use]
pub fn tier_calculated(estimate: Option<BetaEstimate>) -> Option<BetaResolution> {
    estimate
        .filter(|e| e.beta.is_finite())
        .map(BetaResolution::Calculated)
}

/// Tier 4: the configured default beta.
#[must_use]
pub fn tier_default(default_beta: f64) -> BetaResolution {
    BetaResolution::Default { beta: default_beta }
}

/// Runs all four tiers in order.
#[must_use]
pub fn resolve_beta(
    vendor: Option<&VendorStats>,
    estimate: Option<BetaEstimate>,
    default_beta: f64,
) -> BetaResolution {
    BetaResolution::from_vendor(vendor)
        .unwrap_or_else(|| BetaResolution::from_estimate(estimate, default_beta))
}

/// Where a holding's standard deviation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevSource {
    /// Vendor five-year record.
    Vendor,
    /// Annualized from the holding's own daily returns.
    Calculated,
}

/// A resolved annualized standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStdDev {
    /// Annualized standard deviation.
    pub value: f64,
    /// Provenance.
    pub source: StdDevSource,
}

/// Prefers the vendor figure, else the figure computed from daily returns.
#[must_use]
pub fn resolve_std_dev(resolution: &BetaResolution, calculated: Option<f64>) -> Option<ResolvedStdDev> {
    resolution
        .vendor_std_dev()
        .map(|value| ResolvedStdDev {
            value,
            source: StdDevSource::Vendor,
        })
        .or_else(|| {
            calculated.filter(|v| v.is_finite()).map(|value| ResolvedStdDev {
                value,
                source: StdDevSource::Calculated,
            })
        })
}
