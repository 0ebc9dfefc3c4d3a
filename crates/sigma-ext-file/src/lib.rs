//! # Sigma Ext File
//!
//! File-based data sources for the Sigma analytics engine.
//!
//! This crate provides default implementations for offline analysis and tests:
//! - CSV price files, one per symbol, daily and monthly
//! - JSON vendor risk statistics
//! - CSV rate quotes
//! - A fixed market context for manual overrides
//!
//! Live quote services plug in through the same traits in `sigma-traits`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod prices;
mod risk_data;

pub use prices::*;
pub use risk_data::*;

use std::path::Path;
use std::sync::Arc;

use sigma_traits::error::TraitError;
use sigma_traits::market_data::DataProviders;

/// Create file-based data providers.
///
/// `prices_dir` must exist. Vendor statistics and rate quotes are optional;
/// without them the engine falls back to calculated betas and the default
/// risk-free rate.
pub fn create_file_providers(
    prices_dir: impl AsRef<Path>,
    vendor_json: Option<&Path>,
    rates_csv: Option<&Path>,
) -> Result<DataProviders, TraitError> {
    let mut providers = DataProviders::new(Arc::new(CsvPriceSource::new(prices_dir)?));
    if let Some(path) = vendor_json {
        providers = providers.with_vendor_stats(Arc::new(JsonVendorStatsSource::new(path)?));
    }
    if let Some(path) = rates_csv {
        providers = providers.with_rates(Arc::new(CsvRateQuoteSource::new(path)?));
    }
    Ok(providers)
}
