//! Brokerage holdings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sigma_core::Symbol;

/// How a holding's size is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingAmount {
    /// Fraction of the portfolio in `[0, 1]`.
    Weight(f64),
    /// Market value, optionally with its cost basis.
    Value {
        /// Current market value.
        total_value: Decimal,
        /// Amount originally paid.
        cost_basis: Option<Decimal>,
    },
}

/// A single position in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Position size.
    pub amount: HoldingAmount,
}

impl Holding {
    /// A holding expressed as a portfolio weight.
    #[must_use]
    pub fn weighted(symbol: Symbol, weight: f64) -> Self {
        Self {
            symbol,
            amount: HoldingAmount::Weight(weight),
        }
    }

    /// A holding expressed as a dollar value.
    #[must_use]
    pub fn valued(symbol: Symbol, total_value: Decimal) -> Self {
        Self {
            symbol,
            amount: HoldingAmount::Value {
                total_value,
                cost_basis: None,
            },
        }
    }

    /// Sets the cost basis. Has no effect on weight-based holdings.
    #[must_use]
    pub fn with_cost_basis(mut self, basis: Decimal) -> Self {
        if let HoldingAmount::Value { cost_basis, .. } = &mut self.amount {
            *cost_basis = Some(basis);
        }
        self
    }

    /// Market value, for value-based holdings.
    #[must_use]
    pub fn total_value(&self) -> Option<Decimal> {
        match self.amount {
            HoldingAmount::Value { total_value, .. } => Some(total_value),
            HoldingAmount::Weight(_) => None,
        }
    }

    /// Cost basis, when known.
    #[must_use]
    pub fn cost_basis(&self) -> Option<Decimal> {
        match self.amount {
            HoldingAmount::Value { cost_basis, .. } => cost_basis,
            HoldingAmount::Weight(_) => None,
        }
    }
}
