//! # Sigma Traits
//!
//! Trait definitions for the collaborators of the Sigma analytics engine.
//!
//! This crate contains ONLY trait definitions and the data they exchange.
//! Implementations live in extension crates (`sigma-ext-file`) or in the
//! embedding application.
//!
//! ## Module Structure
//!
//! - [`market_data`]: price series, vendor risk statistics, rate quotes and
//!   market context sources
//! - [`error`]: the shared [`TraitError`]
//!
//! ## Dependency Injection
//!
//! The engine receives its collaborators as a [`market_data::DataProviders`]
//! bundle:
//!
//! ```ignore
//! AnalyticsEngineBuilder::new()
//!     .with_providers(DataProviders::new(prices)
//!         .with_vendor_stats(vendor)
//!         .with_rates(rates))
//!     .with_config(config)
//!     .build()?
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;

// Re-export commonly used types
pub use error::{TraitError, TraitResult};
pub use market_data::{
    DataProviders, MarketContextProvider, PriceSeriesProvider, RateQuoteProvider, SourceType,
    VendorStatsProvider,
};
pub use sigma_portfolio::types::{
    ContextSource as MarketContextSource, FiveYearRiskStats, MarketContext, VendorStats,
};
