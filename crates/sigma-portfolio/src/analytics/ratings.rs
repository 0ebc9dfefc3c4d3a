//! Qualitative ratings for Sharpe ratio and Jensen's alpha.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Ratio;

/// Sharpe ratio bands.
///
/// | Sharpe | Rating |
/// |--------|--------|
/// | < 0 | Poor |
/// | < 1 | Below Average |
/// | < 2 | Good |
/// | < 3 | Very Good |
/// | ≥ 3 | Exceptional |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpeRating {
    /// Below the risk-free rate.
    Poor,
    /// Suboptimal risk-adjusted return.
    BelowAverage,
    /// Good risk-adjusted return.
    Good,
    /// Well above average.
    VeryGood,
    /// Exceptional.
    Exceptional,
}

impl SharpeRating {
    /// Rates a Sharpe ratio; `None` when the ratio is undefined.
    #[must_use]
    pub fn from_ratio(ratio: Ratio) -> Option<Self> {
        ratio.value().map(Self::from_value)
    }

    /// Rates a Sharpe ratio value.
    #[must_use]
    pub fn from_value(sharpe: f64) -> Self {
        if sharpe < 0.0 {
            SharpeRating::Poor
        } else if sharpe < 1.0 {
            SharpeRating::BelowAverage
        } else if sharpe < 2.0 {
            SharpeRating::Good
        } else if sharpe < 3.0 {
            SharpeRating::VeryGood
        } else {
            SharpeRating::Exceptional
        }
    }

    /// Short guidance for the rating.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            SharpeRating::Poor => {
                "Underperforming the risk-free rate; consider rebalancing or benchmark funds."
            }
            SharpeRating::BelowAverage => {
                "Risk-adjusted returns are suboptimal; review the asset allocation."
            }
            SharpeRating::Good => "Good risk-adjusted performance.",
            SharpeRating::VeryGood => "Risk-adjusted returns well above average.",
            SharpeRating::Exceptional => "Exceptional risk-adjusted returns.",
        }
    }
}

impl fmt::Display for SharpeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SharpeRating::Poor => "Poor",
            SharpeRating::BelowAverage => "Below Average",
            SharpeRating::Good => "Good",
            SharpeRating::VeryGood => "Very Good",
            SharpeRating::Exceptional => "Exceptional",
        })
    }
}

/// Jensen's alpha bands, in percentage points.
///
/// | Alpha | Rating |
/// |-------|--------|
/// | < -2% | Underperforming |
/// | < 0% | Below Market |
/// | < 1% | Market Performance |
/// | < 3% | Outperforming |
/// | ≥ 3% | Exceptional |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaRating {
    /// Significantly negative alpha.
    Underperforming,
    /// Negative alpha.
    BelowMarket,
    /// Alpha near zero.
    MarketPerformance,
    /// Positive alpha.
    Outperforming,
    /// Strongly positive alpha.
    Exceptional,
}

impl AlphaRating {
    /// Rates an alpha given as a decimal (0.009 for 0.9%).
    #[must_use]
    pub fn from_alpha(alpha: f64) -> Self {
        let pct = alpha * 100.0;
        if pct < -2.0 {
            AlphaRating::Underperforming
        } else if pct < 0.0 {
            AlphaRating::BelowMarket
        } else if pct < 1.0 {
            AlphaRating::MarketPerformance
        } else if pct < 3.0 {
            AlphaRating::Outperforming
        } else {
            AlphaRating::Exceptional
        }
    }

    /// Short guidance for the rating.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            AlphaRating::Underperforming => {
                "Significant negative alpha; passive index funds may serve better."
            }
            AlphaRating::BelowMarket => "Underperforming the market on a risk-adjusted basis.",
            AlphaRating::MarketPerformance => {
                "Matching the market; index funds may offer similar returns at lower cost."
            }
            AlphaRating::Outperforming => "Positive alpha from security selection.",
            AlphaRating::Exceptional => "Strong positive alpha.",
        }
    }
}

impl fmt::Display for AlphaRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlphaRating::Underperforming => "Underperforming",
            AlphaRating::BelowMarket => "Below Market",
            AlphaRating::MarketPerformance => "Market Performance",
            AlphaRating::Outperforming => "Outperforming",
            AlphaRating::Exceptional => "Exceptional",
        })
    }
}
