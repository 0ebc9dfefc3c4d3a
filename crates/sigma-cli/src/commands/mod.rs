//! CLI command implementations.

pub mod benchmarks;
pub mod beta;
pub mod config;
pub mod metrics;
pub mod volatility;

// Re-export submodules for convenience
pub use benchmarks::BenchmarksArgs;
pub use beta::BetaArgs;
pub use config::ConfigArgs;
pub use metrics::MetricsArgs;
pub use volatility::VolatilityArgs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;

use sigma_config::EngineConfig;
use sigma_core::{Date, Symbol};
use sigma_engine::{AnalyticsEngine, AnalyticsEngineBuilder};
use sigma_ext_file::{create_file_providers, StaticMarketContext};
use sigma_portfolio::types::Holding;

use crate::error::{CliError, CliResult};

/// Data sources shared by the analysis commands.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Directory of `<SYMBOL>.csv` price files, with monthly files under `monthly/`
    #[arg(short, long)]
    pub prices: PathBuf,

    /// JSON file of vendor risk statistics keyed by symbol
    #[arg(long)]
    pub vendor: Option<PathBuf>,

    /// CSV file of rate quotes (`symbol,rate`, in percent)
    #[arg(long)]
    pub rates: Option<PathBuf>,

    /// Analysis date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Market return override, as a decimal (0.10 for 10%)
    #[arg(long, requires = "risk_free_rate")]
    pub market_return: Option<f64>,

    /// Risk-free rate override, as a decimal
    #[arg(long, requires = "market_return")]
    pub risk_free_rate: Option<f64>,
}

impl DataArgs {
    /// The analysis date.
    pub fn as_of(&self) -> CliResult<Date> {
        match &self.as_of {
            Some(s) => parse_date(s),
            None => Ok(Date::today()),
        }
    }

    /// Builds an engine over the file providers.
    pub fn engine(&self, config: EngineConfig) -> anyhow::Result<AnalyticsEngine> {
        let mut providers =
            create_file_providers(&self.prices, self.vendor.as_deref(), self.rates.as_deref())?;

        match (self.market_return, self.risk_free_rate) {
            (Some(market), Some(rf)) => {
                providers =
                    providers.with_market_context(Arc::new(StaticMarketContext::new(market, rf)));
            }
            (None, None) => {}
            _ => return Err(CliError::IncompleteMarketOverride.into()),
        }

        Ok(AnalyticsEngineBuilder::new()
            .with_config(config)
            .with_providers(providers)
            .build()?)
    }
}

/// Loads the engine configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path).map_err(|e| CliError::Config(e.to_string())),
        None => Ok(EngineConfig::default()),
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s.trim()).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// One row of a holdings file.
#[derive(Debug, Deserialize)]
struct HoldingRecord {
    symbol: String,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    total_value: Option<f64>,
    #[serde(default)]
    cost_basis: Option<f64>,
}

/// Reads holdings from CSV.
///
/// Either `symbol,weight` or `symbol,total_value[,cost_basis]`; every row
/// must use the same form.
pub fn load_holdings(path: &Path) -> CliResult<Vec<Holding>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| CliError::InvalidHoldings(e.to_string()))?;

    let mut holdings = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let record: HoldingRecord =
            result.map_err(|e| CliError::InvalidHoldings(e.to_string()))?;
        holdings.push(to_holding(record).map_err(|e| {
            CliError::InvalidHoldings(format!("row {}: {}", line + 1, e))
        })?);
    }

    if holdings.is_empty() {
        return Err(CliError::InvalidHoldings(format!(
            "{} has no holdings",
            path.display()
        )));
    }
    let valued = holdings.iter().filter(|h| h.total_value().is_some()).count();
    if valued != 0 && valued != holdings.len() {
        return Err(CliError::InvalidHoldings(
            "mix of weights and dollar values".to_string(),
        ));
    }

    Ok(holdings)
}

fn to_holding(record: HoldingRecord) -> Result<Holding, String> {
    let symbol = Symbol::new(&record.symbol).map_err(|e| e.to_string())?;
    match (record.weight, record.total_value) {
        (Some(weight), None) => Ok(Holding::weighted(symbol, weight)),
        (None, Some(value)) => {
            let mut holding = Holding::valued(symbol, to_decimal(value)?);
            if let Some(basis) = record.cost_basis {
                holding = holding.with_cost_basis(to_decimal(basis)?);
            }
            Ok(holding)
        }
        (Some(_), Some(_)) => Err("both weight and total_value given".to_string()),
        (None, None) => Err("neither weight nor total_value given".to_string()),
    }
}

fn to_decimal(value: f64) -> Result<Decimal, String> {
    Decimal::try_from(value).map_err(|e| format!("{}: {}", value, e))
}
