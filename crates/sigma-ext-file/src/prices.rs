//! File-based price series.
//!
//! Each symbol lives in its own CSV file with a `date,close` header:
//!
//! ```text
//! DIR/SPY.csv           daily closes
//! DIR/monthly/SPY.csv   monthly closes
//! ```
//!
//! Rows may be in any order; they are sorted by date on load.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use sigma_core::{Date, DateRange, Interval, PricePoint, PriceSeries, Symbol};
use sigma_traits::error::TraitError;
use sigma_traits::market_data::{PriceSeriesProvider, SourceType};

/// CSV record for closing prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    date: String,
    close: f64,
}

/// CSV-based price source, one file per symbol and interval.
///
/// Files are read on first request and cached.
pub struct CsvPriceSource {
    root: PathBuf,
    cache: DashMap<(Symbol, Interval), PriceSeries>,
}

impl CsvPriceSource {
    /// Create a price source reading from `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, TraitError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(TraitError::SourceNotAvailable(format!(
                "price directory {} does not exist",
                root.display()
            )));
        }
        Ok(Self {
            root,
            cache: DashMap::new(),
        })
    }

    /// Path of the file holding `symbol` at `interval`.
    pub fn path_for(&self, symbol: &Symbol, interval: Interval) -> PathBuf {
        let file = format!("{}.csv", symbol.as_str());
        match interval {
            Interval::Daily => self.root.join(file),
            Interval::Monthly => self.root.join("monthly").join(file),
        }
    }

    /// Drop all cached series.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn load(&self, symbol: &Symbol, interval: Interval) -> Result<PriceSeries, TraitError> {
        if let Some(series) = self.cache.get(&(symbol.clone(), interval)) {
            return Ok(series.clone());
        }

        let path = self.path_for(symbol, interval);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TraitError::SymbolNotFound(format!(
                    "{} ({} file {} missing)",
                    symbol,
                    interval,
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let series = parse_prices(symbol, interval, &content)?;
        debug!(%symbol, %interval, points = series.len(), "loaded price file");
        self.cache
            .insert((symbol.clone(), interval), series.clone());
        Ok(series)
    }
}

/// Parses `date,close` CSV content into a validated series.
pub fn parse_prices(
    symbol: &Symbol,
    interval: Interval,
    content: &str,
) -> Result<PriceSeries, TraitError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut points = Vec::new();
    for result in reader.deserialize() {
        let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
        points.push(PricePoint::new(Date::parse(record.date.trim())?, record.close));
    }
    points.sort_by_key(|p| p.date);

    Ok(PriceSeries::new(symbol.clone(), interval, points)?)
}

#[async_trait]
impl PriceSeriesProvider for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn fetch_price_series(
        &self,
        symbol: &Symbol,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, TraitError> {
        let series = self.load(symbol, interval).await?.slice(range);
        if series.is_empty() {
            return Err(TraitError::DataUnavailable(format!(
                "{} has no {} prices in {}",
                symbol, interval, range
            )));
        }
        Ok(series)
    }
}
