//! # Sigma Math
//!
//! Statistical building blocks for the Sigma portfolio analytics engine.
//!
//! This crate provides:
//!
//! - **Returns**: simple-return series with mean, sample variance and
//!   annualized standard deviation
//! - **Symmetric matrices**: upper-triangle storage with symmetric access
//! - **Covariance / correlation**: annualized sample covariance across
//!   assets and the derived correlation matrix
//! - **Regression**: beta as Cov(asset, market) / Var(market)
//! - **Performance**: total return, CAGR, time- and money-weighted returns,
//!   future value
//! - **Solvers**: Newton-Raphson root finding
//!
//! ## Conventions
//!
//! | Statistic | Convention |
//! |-----------|------------|
//! | Return | Simple, `(p_i - p_{i-1}) / p_{i-1}` |
//! | Mean | Arithmetic |
//! | Variance / covariance | Sample, denominator `n - 1` |
//! | Annualization | Variance × periods, std-dev × √periods |
//!
//! Every function is pure and deterministic; nothing here logs or performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::uninlined_format_args)]

pub mod covariance;
pub mod error;
pub mod matrix;
pub mod performance;
pub mod regression;
pub mod returns;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::covariance::{
        CorrelationAnomaly, CorrelationMatrix, CovarianceMatrix, CORRELATION_TOLERANCE,
    };
    pub use crate::error::{MathError, MathResult};
    pub use crate::matrix::SymmetricMatrix;
    pub use crate::performance::{
        cagr, future_value, money_weighted_return, time_weighted_return, total_return,
        DatedCashFlow, ReturnConvention,
    };
    pub use crate::regression::regression_beta;
    pub use crate::returns::{mean, sample_variance, simple_returns, ReturnSeries};
    pub use crate::solvers::{newton_raphson, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
