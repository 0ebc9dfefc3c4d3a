//! Portfolio beta report.

use serde::Serialize;
use sigma_core::Symbol;

use crate::analytics::{weighted_sum, BetaResolution};
use crate::error::{PortfolioError, PortfolioResult};
use crate::reports::ExcludedHolding;
use crate::types::{DataSource, PortfolioWeights};

/// One holding's beta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingBeta {
    /// Holding symbol.
    pub symbol: Symbol,
    /// Portfolio weight.
    pub weight: f64,
    /// Resolved beta.
    pub beta: f64,
    /// Resolution tier.
    pub data_source: DataSource,
}

/// Weighted portfolio beta with its per-holding inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetaReport {
    /// `Σ w_i β_i`.
    pub portfolio_beta: f64,
    /// Per-holding betas in weight order.
    pub holdings: Vec<HoldingBeta>,
    /// Holdings left out.
    pub excluded: Vec<ExcludedHolding>,
}

impl BetaReport {
    /// Builds the report from weights and a resolution per symbol.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::EmptyPortfolio` if there are no weights
    /// - `PortfolioError::MissingHoldings` if a weighted symbol has no resolution
    pub fn compute(
        weights: &PortfolioWeights,
        resolutions: &[(Symbol, BetaResolution)],
        excluded: Vec<ExcludedHolding>,
    ) -> PortfolioResult<Self> {
        if weights.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }

        let mut missing = Vec::new();
        let mut holdings = Vec::with_capacity(weights.len());
        for (symbol, weight) in weights.entries() {
            match resolutions.iter().find(|(s, _)| s == symbol) {
                Some((_, r)) => holdings.push(HoldingBeta {
                    symbol: symbol.clone(),
                    weight: *weight,
                    beta: r.beta(),
                    data_source: r.data_source(),
                }),
                None => missing.push(symbol.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(PortfolioError::MissingHoldings { symbols: missing });
        }

        let w: Vec<f64> = holdings.iter().map(|h| h.weight).collect();
        let b: Vec<f64> = holdings.iter().map(|h| h.beta).collect();

        Ok(Self {
            portfolio_beta: weighted_sum(&w, &b)?,
            holdings,
            excluded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn test_weighted_beta() {
        let weights =
            PortfolioWeights::explicit(vec![(sym("A"), 0.6), (sym("B"), 0.4)], 0.01).unwrap();
        let resolutions = vec![
            (sym("B"), BetaResolution::Default { beta: 1.0 }),
            (sym("A"), BetaResolution::VendorBeta { beta: 1.5 }),
        ];

        let report = BetaReport::compute(&weights, &resolutions, vec![]).unwrap();
        assert_relative_eq!(report.portfolio_beta, 1.3, epsilon = 1e-12);
        assert_eq!(report.holdings[0].symbol, sym("A"));
        assert_eq!(report.holdings[1].data_source, DataSource::Default);
    }

    #[test]
    fn test_missing_resolution() {
        let weights =
            PortfolioWeights::explicit(vec![(sym("A"), 0.6), (sym("B"), 0.4)], 0.01).unwrap();
        let resolutions = vec![(sym("A"), BetaResolution::VendorBeta { beta: 1.5 })];
        assert!(matches!(
            BetaReport::compute(&weights, &resolutions, vec![]).unwrap_err(),
            PortfolioError::MissingHoldings { .. }
        ));
    }
}
