//! Period returns and growth.
//!
//! | Function | Formula |
//! |----------|---------|
//! | [`total_return`] | `(end - start) / start` |
//! | [`cagr`] | `(1 + R)^(1 / years) - 1` |
//! | [`time_weighted_return`] | `Π (1 + r_i) - 1` |
//! | [`money_weighted_return`] | IRR of dated cash flows |
//! | [`future_value`] | `PV (1 + r)^n` |

use serde::{Deserialize, Serialize};
use sigma_core::Date;

use crate::error::{MathError, MathResult};
use crate::solvers::{newton_raphson, SolverConfig};

/// Simple return between two values.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` unless `start` is positive and both
/// values are finite.
pub fn total_return(start: f64, end: f64) -> MathResult<f64> {
    if !start.is_finite() || !end.is_finite() || start <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "cannot compute a return from {start} to {end}"
        )));
    }
    Ok((end - start) / start)
}

/// Compound annual growth rate for a total return earned over `years`.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` if `years` is not positive or the
/// total return is below -100%.
pub fn cagr(total_return: f64, years: f64) -> MathResult<f64> {
    if !years.is_finite() || years <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "holding period must be positive, got {years} years"
        )));
    }
    if total_return < -1.0 {
        return Err(MathError::invalid_input(format!(
            "total return {total_return} is below -100%"
        )));
    }
    Ok((1.0 + total_return).powf(1.0 / years) - 1.0)
}

/// Chain-linked return of consecutive period returns.
///
/// An empty slice yields 0.
pub fn time_weighted_return(period_returns: &[f64]) -> f64 {
    period_returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Value of `present_value` compounded annually at `rate` for `years`.
pub fn future_value(present_value: f64, rate: f64, years: f64) -> f64 {
    present_value * (1.0 + rate).powf(years)
}

/// How a holding's price history is turned into a single return figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReturnConvention {
    /// Total-period simple return, not scaled by time.
    #[default]
    SimpleTotal,
    /// Total-period return compounded to an annual rate (CAGR).
    Annualized,
}

impl ReturnConvention {
    /// Applies the convention to the first and last value of a window
    /// spanning `years`.
    ///
    /// # Errors
    ///
    /// Propagates [`total_return`] and [`cagr`] errors.
    pub fn apply(&self, start: f64, end: f64, years: f64) -> MathResult<f64> {
        let simple = total_return(start, end)?;
        match self {
            ReturnConvention::SimpleTotal => Ok(simple),
            ReturnConvention::Annualized => cagr(simple, years),
        }
    }
}

/// A dated cash flow: negative for contributions, positive for
/// withdrawals and the ending value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedCashFlow {
    /// Flow date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
}

impl DatedCashFlow {
    /// Creates a cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Initial rate guess for the IRR search.
pub const MWR_INITIAL_GUESS: f64 = 0.1;

/// Tolerance on the net present value for the IRR search.
pub const MWR_TOLERANCE: f64 = 1e-4;

/// Iteration cap for the IRR search.
pub const MWR_MAX_ITERATIONS: u32 = 100;

/// Money-weighted (dollar-weighted) return: the annual rate that sets the
/// net present value of the flows to zero.
///
/// Flows are discounted over year fractions measured from the earliest
/// flow on a 365.25-day year, and solved by Newton-Raphson from a 10%
/// guess.
///
/// # Errors
///
/// - `MathError::InsufficientData` with fewer than 2 flows
/// - `MathError::InvalidInput` unless flows of both signs are present
/// - solver errors if the iteration fails to converge
pub fn money_weighted_return(flows: &[DatedCashFlow]) -> MathResult<f64> {
    if flows.len() < 2 {
        return Err(MathError::insufficient_data(2, flows.len()));
    }
    if !(flows.iter().any(|f| f.amount < 0.0) && flows.iter().any(|f| f.amount > 0.0)) {
        return Err(MathError::invalid_input(
            "money-weighted return needs both contributions and withdrawals",
        ));
    }

    let mut sorted = flows.to_vec();
    sorted.sort_by_key(|f| f.date);
    let start = sorted[0].date;
    let timed: Vec<(f64, f64)> = sorted
        .iter()
        .map(|f| (start.years_until(&f.date), f.amount))
        .collect();

    let npv = |rate: f64| {
        timed
            .iter()
            .map(|(t, amount)| amount / (1.0 + rate).powf(*t))
            .sum::<f64>()
    };
    let d_npv = |rate: f64| {
        timed
            .iter()
            .map(|(t, amount)| -t * amount / (1.0 + rate).powf(t + 1.0))
            .sum::<f64>()
    };

    let config = SolverConfig::new(MWR_TOLERANCE, MWR_MAX_ITERATIONS);
    newton_raphson(npv, d_npv, MWR_INITIAL_GUESS, &config).map(|r| r.root)
}
