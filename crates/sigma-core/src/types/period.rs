//! Lookback periods and date ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date (inclusive).
    pub start: Date,
    /// Last date (inclusive).
    pub end: Date,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: &Date) -> bool {
        *date >= self.start && *date <= self.end
    }

    /// Length of the range in years (365.25-day years).
    #[must_use]
    pub fn years(&self) -> f64 {
        self.start.years_until(&self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Standard lookback windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Trailing twelve months.
    #[serde(rename = "1y")]
    OneYear,
    /// Trailing three years.
    #[serde(rename = "3y")]
    ThreeYears,
    /// Trailing five years.
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    /// Builds a period from a whole number of years.
    #[must_use]
    pub fn from_years(years: u32) -> Option<Self> {
        match years {
            1 => Some(Period::OneYear),
            3 => Some(Period::ThreeYears),
            5 => Some(Period::FiveYears),
            _ => None,
        }
    }

    /// Number of years covered.
    #[must_use]
    pub const fn years(&self) -> u32 {
        match self {
            Period::OneYear => 1,
            Period::ThreeYears => 3,
            Period::FiveYears => 5,
        }
    }

    /// The window of this length ending on `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the start date is out of range.
    pub fn range_ending(&self, as_of: Date) -> CoreResult<DateRange> {
        DateRange::new(as_of.sub_years(self.years())?, as_of)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y", self.years())
    }
}
