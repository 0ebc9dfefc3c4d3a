//! Per-holding inputs derived from fetched series.

use std::cmp::Ordering;

use sigma_core::{Date, DateRange, PricePoint, PriceSeries, Period};
use sigma_math::performance::ReturnConvention;
use sigma_math::regression::{regression_beta, BetaEstimate};
use sigma_math::returns::{simple_returns, ReturnSeries};
use sigma_math::{MathError, MathResult};

/// The window of `years` ending on `as_of`.
pub(crate) fn lookback(years: u32, as_of: Date) -> sigma_core::CoreResult<DateRange> {
    match Period::from_years(years) {
        Some(period) => period.range_ending(as_of),
        None => DateRange::new(as_of.sub_years(years)?, as_of),
    }
}

/// A holding's daily history reduced to what the analyses use.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    /// Daily simple returns.
    pub returns: ReturnSeries,
    /// Return over the whole window under the requested convention.
    pub period_return: f64,
}

impl History {
    /// Derives returns and the period return from a price series.
    ///
    /// # Errors
    ///
    /// - `MathError::InsufficientData` with fewer than 3 prices
    /// - `MathError::InvalidInput` if the window spans no time
    pub fn from_series(series: &PriceSeries, convention: ReturnConvention) -> MathResult<Self> {
        let returns = ReturnSeries::from_price_series(series)?;
        let (first, last) = endpoints(series)?;
        let years = first.date.years_until(&last.date);
        let period_return = convention.apply(first.close, last.close, years)?;
        Ok(Self {
            returns,
            period_return,
        })
    }
}

fn endpoints(series: &PriceSeries) -> MathResult<(&PricePoint, &PricePoint)> {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(MathError::insufficient_data(2, series.len())),
    }
}

/// Simple returns of `asset` and `market` over the dates both series share.
///
/// # Errors
///
/// `MathError::InsufficientData` if fewer than 2 dates are shared.
pub fn aligned_returns(
    asset: &PriceSeries,
    market: &PriceSeries,
) -> MathResult<(Vec<f64>, Vec<f64>)> {
    let (a, m) = (asset.points(), market.points());
    let mut asset_closes = Vec::with_capacity(a.len().min(m.len()));
    let mut market_closes = Vec::with_capacity(a.len().min(m.len()));

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < m.len() {
        match a[i].date.cmp(&m[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                asset_closes.push(a[i].close);
                market_closes.push(m[j].close);
                i += 1;
                j += 1;
            }
        }
    }

    Ok((simple_returns(&asset_closes)?, simple_returns(&market_closes)?))
}

/// Regression beta of `asset` on `market` over their shared dates.
///
/// # Errors
///
/// Propagates [`aligned_returns`] and [`regression_beta`] errors.
pub fn estimate_beta(asset: &PriceSeries, market: &PriceSeries) -> MathResult<BetaEstimate> {
    let (asset_returns, market_returns) = aligned_returns(asset, market)?;
    regression_beta(&asset_returns, &market_returns)
}
