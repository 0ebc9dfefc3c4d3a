//! Portfolio analytics.
//!
//! - [`aggregate`]: weighted return and beta, quadratic-form variance
//! - [`ratios`]: Sharpe, Treynor and Jensen's alpha
//! - [`tiers`]: per-holding beta and standard deviation resolution
//! - [`ratings`]: qualitative bands for Sharpe and alpha

pub mod aggregate;
pub mod ratings;
pub mod ratios;
pub mod tiers;

pub use aggregate::{
    aggregate, aggregate_with_tolerance, checked_portfolio_variance, weighted_sum, AssetStats,
    PortfolioStats,
};
pub use ratings::{AlphaRating, SharpeRating};
pub use ratios::{jensens_alpha, sharpe_ratio, sharpe_ratio_strict, treynor_ratio, treynor_ratio_strict, RiskRatios};
pub use tiers::{resolve_beta, resolve_std_dev, BetaResolution, ResolvedStdDev, StdDevSource};
