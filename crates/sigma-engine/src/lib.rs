//! # Sigma Engine
//!
//! The async analysis engine for Sigma.
//!
//! This crate provides:
//! - [`AnalyticsEngine`]: volatility, beta, risk-metrics and benchmark analyses
//! - [`BatchFetchResult`]: concurrent per-symbol fetches with failure isolation
//! - [`resolve_market_context`]: market return and risk-free rate with
//!   per-figure defaults
//!
//! ## Architecture
//!
//! ```text
//! Holdings ─> PortfolioWeights
//!                  │
//!                  ├─> daily prices ──┬─> ReturnSeries ─> CovarianceMatrix ─┐
//!                  │   (fan-out)      │                                     │
//!                  ├─> vendor stats ──┴─> BetaResolution ───────────────────┼─> RiskMetricsBundle
//!                  │   monthly prices                                       │
//!                  └─> market proxy + rate quote ─> MarketContext ──────────┘
//! ```
//!
//! Holdings whose data cannot be fetched are excluded and reported; the
//! remaining weights are renormalized or the analysis fails, per
//! configuration.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = AnalyticsEngineBuilder::new()
//!     .with_config(EngineConfig::default())
//!     .with_providers(DataProviders::new(prices).with_rates(rates))
//!     .build()?;
//!
//! let bundle = engine.risk_metrics(&holdings, Date::today()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod builder;
pub mod error;
pub mod market;
pub mod resolution;

mod benchmarks;
mod engine;

// Re-exports
pub use batch::BatchFetchResult;
pub use benchmarks::BenchmarkReport;
pub use builder::AnalyticsEngineBuilder;
pub use engine::AnalyticsEngine;
pub use error::{EngineError, EngineResult};
pub use market::resolve_market_context;
pub use resolution::{aligned_returns, estimate_beta, History};
