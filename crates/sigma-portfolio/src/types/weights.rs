//! Portfolio weights.
//!
//! Weights come from one of two paths:
//!
//! | Input | Rule |
//! |-------|------|
//! | Explicit weights | Each in `[0, 1]`, sum within `1 ± tolerance`; never rescaled |
//! | Dollar values | `weight_i = value_i / Σ value` |
//!
//! After holdings are excluded for missing data, [`PortfolioWeights::retain`]
//! rescales the survivors to sum to 1 and marks the result as renormalized.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sigma_core::Symbol;
use std::collections::HashSet;

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{Holding, HoldingAmount};

/// Default tolerance on the sum of explicit weights.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.01;

/// How a weight vector was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightOrigin {
    /// Supplied directly and validated.
    Explicit,
    /// Derived from dollar values.
    DollarValue,
    /// Rescaled after excluding holdings.
    Renormalized,
}

/// Checks that weights sum to 1 within `tolerance`.
///
/// # Errors
///
/// Returns `PortfolioError::WeightSumOutOfTolerance` with the actual sum.
pub fn validate_weight_sum(weights: &[f64], tolerance: f64) -> PortfolioResult<f64> {
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(PortfolioError::WeightSumOutOfTolerance { sum, tolerance });
    }
    Ok(sum)
}

/// Symbols and their portfolio weights, in holding order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioWeights {
    entries: Vec<(Symbol, f64)>,
    origin: WeightOrigin,
}

impl PortfolioWeights {
    /// Resolves weights from holdings.
    ///
    /// All holdings must use the same representation: either all weights
    /// or all dollar values.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::EmptyPortfolio` for no holdings
    /// - `PortfolioError::DuplicateHolding` for a repeated symbol
    /// - `PortfolioError::InvalidPortfolio` for mixed representations or a
    ///   non-positive total value
    /// - `PortfolioError::InvalidWeight` / `WeightSumOutOfTolerance` for
    ///   bad explicit weights
    /// - `PortfolioError::InvalidHolding` for a negative dollar value
    pub fn from_holdings(holdings: &[Holding], tolerance: f64) -> PortfolioResult<Self> {
        if holdings.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }

        let mut seen = HashSet::new();
        for h in holdings {
            if !seen.insert(&h.symbol) {
                return Err(PortfolioError::DuplicateHolding {
                    symbol: h.symbol.to_string(),
                });
            }
        }

        let weights: Option<Vec<f64>> = holdings
            .iter()
            .map(|h| match h.amount {
                HoldingAmount::Weight(w) => Some(w),
                HoldingAmount::Value { .. } => None,
            })
            .collect();
        if let Some(weights) = weights {
            let entries = holdings
                .iter()
                .map(|h| h.symbol.clone())
                .zip(weights)
                .collect();
            return Self::explicit(entries, tolerance);
        }

        let values: Option<Vec<Decimal>> = holdings.iter().map(Holding::total_value).collect();
        match values {
            Some(values) => {
                let entries = holdings
                    .iter()
                    .map(|h| h.symbol.clone())
                    .zip(values)
                    .collect::<Vec<_>>();
                Self::from_values(&entries)
            }
            None => Err(PortfolioError::invalid_portfolio(
                "holdings mix weights and dollar values",
            )),
        }
    }

    /// Validates explicit weights without rescaling them.
    ///
    /// # Errors
    ///
    /// See [`PortfolioWeights::from_holdings`].
    pub fn explicit(entries: Vec<(Symbol, f64)>, tolerance: f64) -> PortfolioResult<Self> {
        if entries.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        for (symbol, w) in &entries {
            if !w.is_finite() || *w < 0.0 || *w > 1.0 {
                return Err(PortfolioError::InvalidWeight {
                    symbol: symbol.to_string(),
                    value: *w,
                });
            }
        }
        let weights: Vec<f64> = entries.iter().map(|(_, w)| *w).collect();
        validate_weight_sum(&weights, tolerance)?;

        Ok(Self {
            entries,
            origin: WeightOrigin::Explicit,
        })
    }

    /// Derives weights from dollar values: `value / Σ value`.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::InvalidHolding` for a negative value
    /// - `PortfolioError::InvalidPortfolio` if the total is not positive
    pub fn from_values(entries: &[(Symbol, Decimal)]) -> PortfolioResult<Self> {
        if entries.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        if let Some((symbol, _)) = entries.iter().find(|(_, v)| v.is_sign_negative()) {
            return Err(PortfolioError::invalid_holding(
                symbol.as_str(),
                "total value is negative",
            ));
        }

        let total: Decimal = entries.iter().map(|(_, v)| *v).sum();
        if total <= Decimal::ZERO {
            return Err(PortfolioError::invalid_portfolio(
                "total portfolio value must be positive",
            ));
        }

        let entries = entries
            .iter()
            .map(|(symbol, value)| {
                let weight = (*value / total).to_f64().ok_or_else(|| {
                    PortfolioError::invalid_holding(symbol.as_str(), "weight not representable")
                })?;
                Ok((symbol.clone(), weight))
            })
            .collect::<PortfolioResult<Vec<_>>>()?;

        Ok(Self {
            entries,
            origin: WeightOrigin::DollarValue,
        })
    }

    /// Keeps only `keep`, rescaling the survivors to sum to 1.
    ///
    /// Order follows the original holdings.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::EmptyPortfolio` if nothing survives
    /// - `PortfolioError::InvalidPortfolio` if the survivors carry no weight
    pub fn retain(&self, keep: &[Symbol]) -> PortfolioResult<Self> {
        let kept: Vec<(Symbol, f64)> = self
            .entries
            .iter()
            .filter(|(s, _)| keep.contains(s))
            .cloned()
            .collect();
        if kept.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        if kept.len() == self.entries.len() {
            return Ok(self.clone());
        }

        let total: f64 = kept.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(PortfolioError::invalid_portfolio(
                "remaining holdings carry no weight",
            ));
        }

        Ok(Self {
            entries: kept.into_iter().map(|(s, w)| (s, w / total)).collect(),
            origin: WeightOrigin::Renormalized,
        })
    }

    /// Applies the exclusion policy for holdings without usable data.
    ///
    /// With `renormalize` the survivors are rescaled to sum to 1; without
    /// it any exclusion is an error naming the missing symbols.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::MissingHoldings` when excluding without renormalizing
    /// - errors from [`PortfolioWeights::retain`]
    pub fn exclude(&self, missing: &[Symbol], renormalize: bool) -> PortfolioResult<Self> {
        let missing: Vec<&Symbol> = missing
            .iter()
            .filter(|m| self.entries.iter().any(|(s, _)| s == *m))
            .collect();
        if missing.is_empty() {
            return Ok(self.clone());
        }
        if !renormalize {
            return Err(PortfolioError::MissingHoldings {
                symbols: missing.iter().map(ToString::to_string).collect(),
            });
        }

        let keep: Vec<Symbol> = self
            .entries
            .iter()
            .map(|(s, _)| s)
            .filter(|s| !missing.contains(s))
            .cloned()
            .collect();
        self.retain(&keep)
    }

    /// How the weights were obtained.
    pub fn origin(&self) -> WeightOrigin {
        self.origin
    }

    /// `(symbol, weight)` pairs.
    pub fn entries(&self) -> &[(Symbol, f64)] {
        &self.entries
    }

    /// Symbols in order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    /// Weights in order.
    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    /// Weight of `symbol`, if held.
    pub fn weight_of(&self, symbol: &Symbol) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, w)| *w)
    }

    /// Sum of the weights.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Number of holdings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no holdings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
