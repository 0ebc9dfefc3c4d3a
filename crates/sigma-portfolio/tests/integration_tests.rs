//! Integration tests for sigma-portfolio.
//!
//! These tests run whole analyses over small, hand-checked portfolios.

use approx::assert_relative_eq;
use rust_decimal_macros::dec;
use sigma_core::{Interval, Symbol};
use sigma_math::prelude::*;
use sigma_math::regression::BetaEstimate;
use sigma_portfolio::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn daily(returns: &[f64]) -> ReturnSeries {
    ReturnSeries::from_returns(returns.to_vec(), Interval::Daily).unwrap()
}

fn holding_input(s: &str, returns: &[f64], period_return: f64, resolution: BetaResolution) -> HoldingInput {
    HoldingInput {
        symbol: sym(s),
        daily_returns: daily(returns),
        std_dev_returns: Some(daily(returns)),
        period_return,
        resolution,
        total_value: None,
        cost_basis: None,
    }
}

fn five_year(beta: f64, std_dev: f64) -> VendorStats {
    VendorStats::five_year(FiveYearRiskStats {
        beta,
        alpha: 0.02,
        sharpe_ratio: 0.9,
        treynor_ratio: 0.08,
        std_dev,
        r_squared: 0.9,
    })
}

// =============================================================================
// AGGREGATION
// =============================================================================

#[test]
fn test_two_asset_textbook_portfolio() {
    let cov = CovarianceMatrix::from_std_devs(
        vec!["A".into(), "B".into()],
        Interval::Daily,
        &[0.20, 0.30],
        |_, _| 0.5,
    )
    .unwrap();
    let assets = [
        AssetStats::new(sym("A"), 0.6, 0.10, 0.9),
        AssetStats::new(sym("B"), 0.4, 0.15, 1.4),
    ];

    let stats = aggregate(&assets, &cov).unwrap();
    assert_relative_eq!(stats.variance, 0.0432, epsilon = 1e-12);
    assert_relative_eq!(stats.std_dev, 0.0432_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(stats.expected_return, 0.12, epsilon = 1e-12);
    assert_relative_eq!(stats.beta, 1.1, epsilon = 1e-12);

    let ratios = RiskRatios::compute(stats.expected_return, 0.03, 0.10, stats.beta, stats.std_dev);
    assert_relative_eq!(ratios.sharpe_ratio.value().unwrap(), 0.09 / 0.0432_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(ratios.treynor_ratio.value().unwrap(), 0.09 / 1.1, epsilon = 1e-12);
}

#[test]
fn test_jensens_alpha_against_market() {
    let alpha = jensens_alpha(0.12, 0.045, 0.10, 1.2);
    assert_relative_eq!(alpha, 0.009, epsilon = 1e-12);
    assert_eq!(AlphaRating::from_alpha(alpha), AlphaRating::MarketPerformance);
}

// =============================================================================
// EXCLUSION POLICY
// =============================================================================

#[test]
fn test_excluded_holding_renormalizes_survivors() {
    let weights = PortfolioWeights::explicit(
        vec![(sym("AAA"), 0.5), (sym("BBB"), 0.3), (sym("CCC"), 0.2)],
        DEFAULT_WEIGHT_TOLERANCE,
    )
    .unwrap();

    let kept = weights.exclude(&[sym("CCC")], true).unwrap();
    assert_eq!(kept.origin(), WeightOrigin::Renormalized);
    assert_eq!(kept.symbols(), vec![sym("AAA"), sym("BBB")]);
    assert_relative_eq!(kept.weight_of(&sym("AAA")).unwrap(), 0.625, epsilon = 1e-12);
    assert_relative_eq!(kept.weight_of(&sym("BBB")).unwrap(), 0.375, epsilon = 1e-12);

    let inputs = vec![
        holding_input("AAA", &[0.01, -0.02, 0.015, 0.003], 0.10, BetaResolution::Default { beta: 1.0 }),
        holding_input("BBB", &[0.004, 0.001, -0.003, 0.002], 0.05, BetaResolution::Default { beta: 1.0 }),
    ];
    let bundle = compute_risk_metrics(
        &kept,
        &inputs,
        MarketContext::live(0.10, 0.045),
        vec![ExcludedHolding::new(sym("CCC"), "no price history")],
        &MetricsOptions::default(),
    )
    .unwrap();

    assert!(bundle.is_partial());
    assert_eq!(bundle.holdings.len(), 2);
    assert_relative_eq!(bundle.portfolio.expected_return, 0.625 * 0.10 + 0.375 * 0.05, epsilon = 1e-12);
}

#[test]
fn test_excluded_holding_without_renormalization_fails() {
    let weights = PortfolioWeights::explicit(
        vec![(sym("AAA"), 0.5), (sym("BBB"), 0.3), (sym("CCC"), 0.2)],
        DEFAULT_WEIGHT_TOLERANCE,
    )
    .unwrap();

    match weights.exclude(&[sym("CCC")], false).unwrap_err() {
        PortfolioError::MissingHoldings { symbols } => assert_eq!(symbols, vec!["CCC".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_dollar_values_become_weights() {
    let weights = PortfolioWeights::from_values(&[
        (sym("AAA"), dec!(7500)),
        (sym("BBB"), dec!(2500)),
    ])
    .unwrap();
    assert_eq!(weights.origin(), WeightOrigin::DollarValue);
    assert_relative_eq!(weights.sum(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(weights.weight_of(&sym("AAA")).unwrap(), 0.75, epsilon = 1e-12);
}

// =============================================================================
// BETA TIERS
// =============================================================================

#[test]
fn test_each_holding_resolves_its_own_tier() {
    let fund = five_year(0.85, 0.11);
    let stock = VendorStats::beta_only(1.3);
    let estimate = BetaEstimate {
        beta: 1.05,
        observations: 59,
    };

    let resolutions = vec![
        (sym("FUND"), resolve_beta(Some(&fund), None, 1.0)),
        (sym("STOCK"), resolve_beta(Some(&stock), Some(estimate), 1.0)),
        (sym("CALC"), resolve_beta(None, Some(estimate), 1.0)),
        (sym("NEW"), resolve_beta(None, None, 1.0)),
    ];
    let sources: Vec<DataSource> = resolutions.iter().map(|(_, r)| r.data_source()).collect();
    assert_eq!(
        sources,
        vec![
            DataSource::Vendor5y,
            DataSource::VendorBeta,
            DataSource::Calculated,
            DataSource::Default
        ]
    );

    let weights = PortfolioWeights::explicit(
        vec![(sym("FUND"), 0.25), (sym("STOCK"), 0.25), (sym("CALC"), 0.25), (sym("NEW"), 0.25)],
        DEFAULT_WEIGHT_TOLERANCE,
    )
    .unwrap();
    let report = BetaReport::compute(&weights, &resolutions, vec![]).unwrap();
    assert_relative_eq!(
        report.portfolio_beta,
        0.25 * (0.85 + 1.3 + 1.05 + 1.0),
        epsilon = 1e-12
    );
}

#[test]
fn test_vendor_std_dev_preferred_over_calculated() {
    let fund = resolve_beta(Some(&five_year(0.9, 0.14)), None, 1.0);
    let stock = resolve_beta(None, None, 1.0);

    let from_vendor = resolve_std_dev(&fund, Some(0.25)).unwrap();
    assert_eq!(from_vendor.source, StdDevSource::Vendor);
    assert_eq!(from_vendor.value, 0.14);

    let calculated = resolve_std_dev(&stock, Some(0.25)).unwrap();
    assert_eq!(calculated.source, StdDevSource::Calculated);
    assert!(resolve_std_dev(&stock, None).is_none());
}

// =============================================================================
// VOLATILITY AND SERIALIZATION
// =============================================================================

#[test]
fn test_volatility_report_matches_quadratic_form() {
    let a = daily(&[0.01, -0.02, 0.015, 0.003, -0.007]).with_symbol(sym("AAA"));
    let b = daily(&[0.002, 0.004, -0.001, 0.006, 0.001]).with_symbol(sym("BBB"));
    let weights =
        PortfolioWeights::explicit(vec![(sym("AAA"), 0.6), (sym("BBB"), 0.4)], DEFAULT_WEIGHT_TOLERANCE)
            .unwrap();

    // Series supplied out of order
    let report =
        VolatilityReport::compute(&weights, &[b.clone(), a.clone()], CORRELATION_TOLERANCE, vec![])
            .unwrap();

    let cov = CovarianceMatrix::from_series(&[a, b]).unwrap();
    let expected = cov.portfolio_variance(&[0.6, 0.4]).unwrap();
    assert_relative_eq!(report.portfolio_variance, expected, epsilon = 1e-15);
    assert_eq!(report.assets[0].symbol, sym("AAA"));
    assert!(report.correlation.is_well_formed());
}

#[test]
fn test_undefined_ratios_serialize_as_null() {
    let weights = PortfolioWeights::explicit(vec![(sym("CASH"), 1.0)], DEFAULT_WEIGHT_TOLERANCE).unwrap();
    let inputs = vec![holding_input("CASH", &[0.0, 0.0, 0.0], 0.04, BetaResolution::Default { beta: 0.0 })];
    let bundle = compute_risk_metrics(
        &weights,
        &inputs,
        MarketContext::live(0.10, 0.045),
        vec![],
        &MetricsOptions::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&bundle).unwrap();
    assert!(json["sharpe_ratio"].is_null());
    assert!(json["treynor_ratio"].is_null());
    assert_eq!(json["market_return"], 0.10);
    assert_eq!(json["risk_free_rate"], 0.045);
}
