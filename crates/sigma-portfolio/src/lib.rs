//! # Sigma Portfolio
//!
//! Portfolio-level risk and return analytics.
//!
//! This crate turns per-holding statistics into portfolio figures:
//!
//! - **Weights**: explicit fractions validated to sum to one, or dollar
//!   values normalized by their total
//! - **Aggregation**: weighted return and beta, quadratic-form variance
//! - **Ratios**: Sharpe, Treynor and Jensen's alpha, with undefined results
//!   where a denominator is zero
//! - **Beta tiers**: vendor five-year record, vendor beta, regression
//!   estimate, configured default
//! - **Reports**: comprehensive metrics, volatility and beta reports
//! - **Benchmarks**: the risk-profile fund catalog and excess returns
//!
//! ## Design
//!
//! All functions are pure: market data, vendor statistics and market context
//! are passed in explicitly. Fetching and caching live in `sigma-engine`.
//!
//! ## Example
//!
//! ```rust
//! use sigma_portfolio::prelude::*;
//!
//! let ratios = RiskRatios::compute(0.12, 0.03, 0.10, 1.1, 0.2078);
//! assert!(ratios.sharpe_ratio.is_defined());
//! assert!((ratios.jensens_alpha - 0.013).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod analytics;
pub mod benchmark;
pub mod error;
pub mod reports;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        aggregate, aggregate_with_tolerance, jensens_alpha, resolve_beta, resolve_std_dev, sharpe_ratio, treynor_ratio,
        weighted_sum, AlphaRating, AssetStats, BetaResolution, PortfolioStats, ResolvedStdDev,
        RiskRatios, SharpeRating, StdDevSource,
    };
    pub use crate::benchmark::{
        funds_for, BenchmarkComparison, BenchmarkFund, BenchmarkReturn, RiskProfile,
        BENCHMARK_FUNDS,
    };
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::reports::{
        compute_risk_metrics, AssetVolatility, BetaReport, ExcludedHolding, HoldingBeta,
        HoldingBreakdown, HoldingInput, MetricsOptions, RiskMetricsBundle, VolatilityReport,
    };
    pub use crate::types::{
        ContextSource, DataSource, FiveYearRiskStats, Holding, HoldingAmount, MarketContext,
        PortfolioWeights, Ratio, VendorStats, WeightOrigin, DEFAULT_WEIGHT_TOLERANCE,
    };
}

pub use error::{PortfolioError, PortfolioResult};
