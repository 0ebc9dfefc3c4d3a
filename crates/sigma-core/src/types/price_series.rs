//! Closing-price series.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, DateRange, Interval, Symbol};

/// A single closing-price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a price point.
    #[must_use]
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ordered closing prices for one symbol.
///
/// Construction enforces strictly ascending dates and positive, finite
/// closes, so every consecutive pair produces a finite simple return.
/// The series is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    interval: Interval,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a validated series.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidPrice` for a zero, negative or non-finite close
    /// - `CoreError::UnorderedSeries` if dates are not strictly ascending
    pub fn new(symbol: Symbol, interval: Interval, points: Vec<PricePoint>) -> CoreResult<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(CoreError::InvalidPrice {
                    symbol: symbol.to_string(),
                    date: point.date.to_string(),
                    value: point.close,
                });
            }
            if i > 0 && points[i - 1].date >= point.date {
                return Err(CoreError::UnorderedSeries {
                    symbol: symbol.to_string(),
                    date: point.date.to_string(),
                });
            }
        }

        Ok(Self {
            symbol,
            interval,
            points,
        })
    }

    /// Symbol the series belongs to.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Sampling interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// All observations in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in date order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest observation.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Latest observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Range spanned by the observations, if any.
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                start: first.date,
                end: last.date,
            }),
            _ => None,
        }
    }

    /// A new series holding only the observations inside `range`.
    #[must_use]
    pub fn slice(&self, range: &DateRange) -> Self {
        Self {
            symbol: self.symbol.clone(),
            interval: self.interval,
            points: self
                .points
                .iter()
                .filter(|p| range.contains(&p.date))
                .copied()
                .collect(),
        }
    }
}
