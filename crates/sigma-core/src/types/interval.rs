//! Sampling intervals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling frequency of a price series.
///
/// | Interval | Periods / year | Std-dev factor |
/// |----------|----------------|----------------|
/// | Daily    | 252            | √252           |
/// | Monthly  | 12             | √12            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    /// One observation per trading day.
    #[default]
    Daily,
    /// One observation per month.
    Monthly,
}

impl Interval {
    /// Number of periods in a year: 252 trading days or 12 months.
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Interval::Daily => 252,
            Interval::Monthly => 12,
        }
    }

    /// Factor that scales a periodic standard deviation to an annual one.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        f64::from(self.periods_per_year()).sqrt()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Daily => write!(f, "daily"),
            Interval::Monthly => write!(f, "monthly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Interval::Daily.periods_per_year(), 252);
        assert_eq!(Interval::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_annualization_factor() {
        assert!((Interval::Daily.annualization_factor() - 252f64.sqrt()).abs() < 1e-15);
        assert!((Interval::Monthly.annualization_factor() - 12f64.sqrt()).abs() < 1e-15);
    }
}
