//! Simple-return series and their moments.
//!
//! A [`ReturnSeries`] is derived from closing prices and carries the
//! statistics every downstream calculation needs:
//!
//! | Field | Formula |
//! |-------|---------|
//! | `returns` | `r_i = (p_i - p_{i-1}) / p_{i-1}` |
//! | `mean` | `Σ r_i / n` |
//! | `variance` | `Σ (r_i - mean)² / (n - 1)` |
//! | `std_dev` | `√variance` |
//! | `annualized_std_dev` | `std_dev × √periods_per_year` |

use serde::{Deserialize, Serialize};
use sigma_core::{Interval, PriceSeries, Symbol};

use crate::error::{MathError, MathResult};

/// Converts prices into simple returns.
///
/// # Errors
///
/// - `MathError::InsufficientData` if fewer than 2 prices are supplied
/// - `MathError::InvalidInput` if a price is zero, negative or non-finite
pub fn simple_returns(prices: &[f64]) -> MathResult<Vec<f64>> {
    if prices.len() < 2 {
        return Err(MathError::insufficient_data(2, prices.len()));
    }
    if let Some(bad) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(MathError::invalid_input(format!(
            "price {bad} cannot produce a simple return"
        )));
    }

    Ok(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect())
}

/// Arithmetic mean.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty slice.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with denominator `n - 1`.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` if fewer than 2 values are supplied.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let m = mean(values)?;
    Ok(sum_squared_deviations(values, m) / (values.len() - 1) as f64)
}

fn sum_squared_deviations(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|r| (r - mean).powi(2)).sum()
}

/// A simple-return series with precomputed moments.
///
/// # Example
///
/// ```rust
/// use sigma_core::Interval;
/// use sigma_math::returns::ReturnSeries;
///
/// let series = ReturnSeries::from_prices(&[100.0, 110.0, 121.0], Interval::Daily).unwrap();
/// assert_eq!(series.len(), 2);
/// assert!((series.mean() - 0.10).abs() < 1e-12);
/// assert_eq!(series.annualized_std_dev(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    symbol: Option<Symbol>,
    interval: Interval,
    returns: Vec<f64>,
    mean: f64,
    variance: f64,
}

impl ReturnSeries {
    /// Builds a series from raw closing prices.
    ///
    /// # Errors
    ///
    /// - `MathError::InsufficientData` with fewer than 3 prices: at least
    ///   2 returns are needed for a sample variance
    /// - `MathError::InvalidInput` for non-positive or non-finite prices
    pub fn from_prices(prices: &[f64], interval: Interval) -> MathResult<Self> {
        Self::from_returns(simple_returns(prices)?, interval)
    }

    /// Builds a series from a validated price series, keeping its symbol.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ReturnSeries::from_prices`].
    pub fn from_price_series(series: &PriceSeries) -> MathResult<Self> {
        let mut out = Self::from_prices(&series.closes(), series.interval())?;
        out.symbol = Some(series.symbol().clone());
        Ok(out)
    }

    /// Builds a series from already-computed periodic returns.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientData` with fewer than 2 returns.
    pub fn from_returns(returns: Vec<f64>, interval: Interval) -> MathResult<Self> {
        if returns.iter().any(|r| !r.is_finite()) {
            return Err(MathError::invalid_input("return series contains non-finite values"));
        }
        let variance = sample_variance(&returns)?;
        let mean = mean(&returns)?;

        Ok(Self {
            symbol: None,
            interval,
            returns,
            mean,
            variance,
        })
    }

    /// Attaches a symbol label.
    #[must_use]
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Symbol label, if any.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// Sampling interval of the underlying prices.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Periods per year for the sampling interval (252 or 12).
    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.interval.periods_per_year())
    }

    /// The periodic returns.
    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Always false: a constructed series has at least 2 returns.
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Arithmetic mean of the periodic returns.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance of the periodic returns.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Periodic standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Variance scaled to a year.
    pub fn annualized_variance(&self) -> f64 {
        self.variance * self.periods_per_year()
    }

    /// Standard deviation scaled to a year.
    pub fn annualized_std_dev(&self) -> f64 {
        self.std_dev() * self.interval.annualization_factor()
    }
}
