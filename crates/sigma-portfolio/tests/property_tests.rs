//! Property-based tests for portfolio invariants.
//!
//! These tests verify properties that should hold for any portfolio:
//! - Weights sum to 1, including after exclusion
//! - Portfolio beta lies within the holdings' betas
//! - Uncorrelated variance equals the weighted sum of variances
//! - Weights that do not sum to 1 are rejected by aggregation
//! - Ratios are either finite or undefined

use proptest::prelude::*;
use rust_decimal::Decimal;
use sigma_core::{Interval, Symbol};
use sigma_math::covariance::CovarianceMatrix;
use sigma_portfolio::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn symbol(i: usize) -> Symbol {
    Symbol::new(&format!("H{}", i)).unwrap()
}

fn labels(weights: &PortfolioWeights) -> Vec<String> {
    weights.symbols().iter().map(ToString::to_string).collect()
}

/// Dollar-valued holdings between $1,000 and $1,000,000.
fn holding_values(min: usize, max: usize) -> impl Strategy<Value = Vec<(Symbol, Decimal)>> {
    prop::collection::vec(1_000i64..1_000_000, min..max).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (symbol(i), Decimal::from(v)))
            .collect()
    })
}

/// Per-asset (return, beta, σ) with returns in [-10%, 30%], betas in
/// [0.2, 2.2] and σ in [5%, 45%].
fn asset_figures(n: usize) -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((-0.10f64..0.30, 0.2f64..2.2, 0.05f64..0.45), n)
}

/// Holdings paired with matching per-asset figures.
fn portfolio(min: usize, max: usize) -> impl Strategy<Value = (PortfolioWeights, Vec<(f64, f64, f64)>)> {
    holding_values(min, max).prop_flat_map(|values| {
        let weights = PortfolioWeights::from_values(&values).unwrap();
        let n = weights.len();
        (Just(weights), asset_figures(n))
    })
}

fn assets(weights: &PortfolioWeights, figures: &[(f64, f64, f64)]) -> Vec<AssetStats> {
    weights
        .entries()
        .iter()
        .zip(figures)
        .map(|((s, w), (ret, beta, _))| AssetStats::new(s.clone(), *w, *ret, *beta))
        .collect()
}

// =============================================================================
// WEIGHTS SUM TO 1
// =============================================================================

proptest! {
    #[test]
    fn dollar_weights_sum_to_one(values in holding_values(1, 100)) {
        let weights = PortfolioWeights::from_values(&values).unwrap();
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9, "sum was {}", weights.sum());
    }

    #[test]
    fn renormalized_weights_sum_to_one(
        values in holding_values(3, 50),
        dropped in prop::collection::vec(any::<bool>(), 50),
    ) {
        let weights = PortfolioWeights::from_values(&values).unwrap();
        let size = weights.len();
        let missing: Vec<Symbol> = (0..size)
            .filter(|i| dropped[*i])
            .take(size - 1)
            .map(symbol)
            .collect();

        let kept = weights.exclude(&missing, true).unwrap();
        prop_assert_eq!(kept.len(), size - missing.len());
        prop_assert!((kept.sum() - 1.0).abs() < 1e-9, "sum was {}", kept.sum());
    }
}

// =============================================================================
// AGGREGATION
// =============================================================================

proptest! {
    #[test]
    fn portfolio_beta_within_holding_betas(
        (weights, figures) in portfolio(2, 20),
        rho in 0.0f64..0.9,
    ) {
        let sigmas: Vec<f64> = figures.iter().map(|f| f.2).collect();
        let cov = CovarianceMatrix::from_std_devs(labels(&weights), Interval::Daily, &sigmas, |_, _| rho)
            .unwrap();
        let inputs = assets(&weights, &figures);

        let stats = aggregate(&inputs, &cov).unwrap();
        let min = inputs.iter().map(|a| a.beta).fold(f64::INFINITY, f64::min);
        let max = inputs.iter().map(|a| a.beta).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(
            stats.beta >= min - 1e-12 && stats.beta <= max + 1e-12,
            "portfolio beta {} outside [{}, {}]",
            stats.beta,
            min,
            max
        );
        prop_assert!(stats.variance >= 0.0);
    }

    #[test]
    fn uncorrelated_variance_is_weighted_sum((weights, figures) in portfolio(1, 10)) {
        let sigmas: Vec<f64> = figures.iter().map(|f| f.2).collect();
        let cov = CovarianceMatrix::from_std_devs(labels(&weights), Interval::Daily, &sigmas, |_, _| 0.0)
            .unwrap();

        let stats = aggregate(&assets(&weights, &figures), &cov).unwrap();
        let expected: f64 = weights
            .weights()
            .iter()
            .zip(&sigmas)
            .map(|(w, s)| w * w * s * s)
            .sum();
        prop_assert!((stats.variance - expected).abs() < 1e-12, "{} != {}", stats.variance, expected);
    }

    #[test]
    fn scaled_weights_are_rejected(
        (weights, figures) in portfolio(1, 10),
        scale in prop_oneof![0.2f64..0.95, 1.05f64..3.0],
    ) {
        let sigmas: Vec<f64> = figures.iter().map(|f| f.2).collect();
        let cov = CovarianceMatrix::from_std_devs(labels(&weights), Interval::Daily, &sigmas, |_, _| 0.2)
            .unwrap();
        let scaled: Vec<AssetStats> = assets(&weights, &figures)
            .into_iter()
            .map(|mut a| {
                a.weight *= scale;
                a
            })
            .collect();

        let is_out_of_tolerance = matches!(
            aggregate(&scaled, &cov),
            Err(PortfolioError::WeightSumOutOfTolerance { .. })
        );
        prop_assert!(is_out_of_tolerance);
    }
}

// =============================================================================
// RATIOS ARE FINITE OR UNDEFINED
// =============================================================================

fn denominator() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(1e-300),
        -2.0f64..2.0,
    ]
}

proptest! {
    #[test]
    fn ratios_never_non_finite(
        rp in -0.2f64..0.4,
        beta in denominator(),
        sd in denominator(),
    ) {
        let r = RiskRatios::compute(rp, 0.045, 0.10, beta, sd);
        for ratio in [r.sharpe_ratio, r.treynor_ratio] {
            if let Ratio::Value(v) = ratio {
                prop_assert!(v.is_finite(), "non-finite ratio for beta={}, sd={}", beta, sd);
            }
        }
        prop_assert!(r.jensens_alpha.is_finite());
    }
}
