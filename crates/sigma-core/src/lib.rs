//! # Sigma Core
//!
//! Core domain types for the Sigma portfolio analytics engine.
//!
//! This crate provides the vocabulary shared by the statistics, portfolio,
//! provider and engine crates:
//!
//! - **Symbols**: normalized ticker identifiers (`SPY`, `^IRX`, `BRK.B`)
//! - **Dates**: a `Date` newtype with lookback arithmetic
//! - **Intervals**: daily and monthly sampling with their annualization factors
//! - **Price series**: validated, ascending `(date, close)` sequences
//!
//! ## Example
//!
//! ```rust
//! use sigma_core::prelude::*;
//!
//! let series = PriceSeries::new(
//!     Symbol::new("spy").unwrap(),
//!     Interval::Daily,
//!     vec![
//!         PricePoint::new(Date::from_ymd(2024, 1, 2).unwrap(), 100.0),
//!         PricePoint::new(Date::from_ymd(2024, 1, 3).unwrap(), 110.0),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(series.symbol().as_str(), "SPY");
//! assert_eq!(series.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Date, DateRange, Interval, Period, PricePoint, PriceSeries, Symbol, DAYS_PER_YEAR,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::*;
