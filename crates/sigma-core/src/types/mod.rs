//! Domain types for portfolio analytics.

mod date;
mod interval;
mod period;
mod price_series;
mod symbol;

pub use date::{Date, DAYS_PER_YEAR};
pub use interval::Interval;
pub use period::{DateRange, Period};
pub use price_series::{PricePoint, PriceSeries};
pub use symbol::Symbol;
