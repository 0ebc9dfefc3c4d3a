//! Static catalog of allocation funds by risk profile.

use serde::Serialize;
use std::fmt;

/// Investor risk profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    /// Mostly bonds.
    UltraConservative,
    /// Bond-heavy.
    Conservative,
    /// Balanced toward equities.
    Moderate,
    /// Equity-heavy.
    Aggressive,
}

impl RiskProfile {
    /// All profiles from least to most aggressive.
    pub const ALL: [RiskProfile; 4] = [
        RiskProfile::UltraConservative,
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskProfile::UltraConservative => "Ultra Conservative",
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        })
    }
}

/// A benchmark allocation fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BenchmarkFund {
    /// Risk profile the fund represents.
    pub profile: RiskProfile,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Fund name.
    pub name: &'static str,
    /// Equity/bond split.
    pub allocation: &'static str,
}

/// Two funds per profile: a Vanguard LifeStrategy fund and an iShares
/// allocation ETF.
pub const BENCHMARK_FUNDS: [BenchmarkFund; 8] = [
    BenchmarkFund {
        profile: RiskProfile::UltraConservative,
        symbol: "VASIX",
        name: "Vanguard LifeStrategy Income Fund",
        allocation: "20% Equities, 80% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::UltraConservative,
        symbol: "AOK",
        name: "iShares Core Conservative Allocation ETF",
        allocation: "30% Equities, 70% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::Conservative,
        symbol: "VSCGX",
        name: "Vanguard LifeStrategy Conservative Growth Fund",
        allocation: "40% Equities, 60% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::Conservative,
        symbol: "AOM",
        name: "iShares Core Moderate Allocation ETF",
        allocation: "40% Equities, 60% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::Moderate,
        symbol: "VSMGX",
        name: "Vanguard LifeStrategy Moderate Growth Fund",
        allocation: "60% Equities, 40% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::Moderate,
        symbol: "AOR",
        name: "iShares Core Growth Allocation ETF",
        allocation: "60% Equities, 40% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::Aggressive,
        symbol: "VASGX",
        name: "Vanguard LifeStrategy Growth Fund",
        allocation: "80% Equities, 20% Bonds",
    },
    BenchmarkFund {
        profile: RiskProfile::Aggressive,
        symbol: "AOA",
        name: "iShares Core Aggressive Allocation ETF",
        allocation: "80% Equities, 20% Bonds",
    },
];

/// Funds for one profile.
pub fn funds_for(profile: RiskProfile) -> impl Iterator<Item = &'static BenchmarkFund> {
    BENCHMARK_FUNDS.iter().filter(move |f| f.profile == profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigma_core::Symbol;

    #[test]
    fn test_two_funds_per_profile() {
        for profile in RiskProfile::ALL {
            assert_eq!(funds_for(profile).count(), 2);
        }
        let moderate: Vec<_> = funds_for(RiskProfile::Moderate).map(|f| f.symbol).collect();
        assert_eq!(moderate, vec!["VSMGX", "AOR"]);
    }

    #[test]
    fn test_symbols_are_valid() {
        for fund in &BENCHMARK_FUNDS {
            assert_eq!(Symbol::new(fund.symbol).unwrap().as_str(), fund.symbol);
        }
    }
}
