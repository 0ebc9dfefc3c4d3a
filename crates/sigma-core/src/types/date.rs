//! Calendar dates for price observations and lookback windows.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Average calendar days per year, used when converting day counts to years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate` with the month/year arithmetic needed to
/// build lookback windows.
///
/// # Example
///
/// ```rust
/// use sigma_core::Date;
///
/// let as_of = Date::from_ymd(2024, 2, 29).unwrap();
/// let start = as_of.sub_years(1).unwrap();
/// assert_eq!(start, Date::from_ymd(2023, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the components do not form a date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's local date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Moves the date back by whole months, clamping to the month end.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn sub_months(&self, months: u32) -> CoreResult<Self> {
        self.0
            .checked_sub_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} minus {months} months")))
    }

    /// Moves the date back by whole years, clamping 29 February.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn sub_years(&self, years: u32) -> CoreResult<Self> {
        self.sub_months(years * 12)
    }

    /// Signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_until(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Year fraction from `self` to `other` on a 365.25-day year.
    #[must_use]
    pub fn years_until(&self, other: &Date) -> f64 {
        self.days_until(other) as f64 / DAYS_PER_YEAR
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}
