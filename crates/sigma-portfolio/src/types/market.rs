//! Market context: market-proxy return and risk-free rate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a market figure came from live data or a configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// Derived from provider data.
    Live,
    /// Substituted from configuration because live data was unavailable.
    Default,
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSource::Live => f.write_str("live"),
            ContextSource::Default => f.write_str("default"),
        }
    }
}

/// Market return and risk-free rate used as the CAPM baseline.
///
/// Each figure carries its own source so a defaulted value is never
/// indistinguishable from a live one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Annual return of the market proxy.
    pub market_return: f64,
    /// Annual risk-free rate.
    pub risk_free_rate: f64,
    /// Source of `market_return`.
    pub market_return_source: ContextSource,
    /// Source of `risk_free_rate`.
    pub risk_free_rate_source: ContextSource,
}

impl MarketContext {
    /// A context built entirely from live figures.
    #[must_use]
    pub fn live(market_return: f64, risk_free_rate: f64) -> Self {
        Self {
            market_return,
            risk_free_rate,
            market_return_source: ContextSource::Live,
            risk_free_rate_source: ContextSource::Live,
        }
    }

    /// A context built entirely from defaults.
    #[must_use]
    pub fn defaulted(market_return: f64, risk_free_rate: f64) -> Self {
        Self {
            market_return,
            risk_free_rate,
            market_return_source: ContextSource::Default,
            risk_free_rate_source: ContextSource::Default,
        }
    }

    /// True if either figure is a default.
    #[must_use]
    pub fn uses_defaults(&self) -> bool {
        self.market_return_source == ContextSource::Default
            || self.risk_free_rate_source == ContextSource::Default
    }

    /// Market risk premium `Rm - Rf`.
    #[must_use]
    pub fn risk_premium(&self) -> f64 {
        self.market_return - self.risk_free_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sources() {
        let live = MarketContext::live(0.12, 0.05);
        assert!(!live.uses_defaults());

        let mut mixed = live;
        mixed.risk_free_rate_source = ContextSource::Default;
        assert!(mixed.uses_defaults());

        let defaulted = MarketContext::defaulted(0.10, 0.045);
        assert!(defaulted.uses_defaults());
        assert_relative_eq!(defaulted.risk_premium(), 0.055, epsilon = 1e-12);
    }
}
