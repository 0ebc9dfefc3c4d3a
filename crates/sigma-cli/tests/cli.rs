//! Command-line tests against file fixtures.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sigma() -> Command {
    Command::cargo_bin("sigma").unwrap()
}

fn market_move(i: usize) -> f64 {
    0.01 * ((i % 5) as f64 - 1.8)
}

fn write_series(path: &Path, dates: &[String], returns: impl Fn(usize) -> f64) {
    let mut content = String::from("date,close\n");
    let mut close = 100.0;
    for (i, date) in dates.iter().enumerate() {
        if i > 0 {
            close *= 1.0 + returns(i);
        }
        writeln!(content, "{},{:.12}", date, close).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Prices, vendor stats, rates and two holdings files.
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let prices = dir.path().join("prices");
    let monthly = prices.join("monthly");
    fs::create_dir_all(&monthly).unwrap();

    let days: Vec<String> = (1..=12)
        .flat_map(|m| (1..=28).map(move |d| format!("2024-{:02}-{:02}", m, d)))
        .collect();
    write_series(&prices.join("SPY.csv"), &days, |i| market_move(i) / 4.0);
    write_series(&prices.join("AAA.csv"), &days, |i| market_move(i) / 2.0);
    write_series(&prices.join("BBB.csv"), &days, |i| 0.002 * ((i % 3) as f64 - 0.8));

    let months: Vec<String> = (2020..=2024)
        .flat_map(|y| (1..=12).map(move |m| format!("{}-{:02}-01", y, m)))
        .collect();
    write_series(&monthly.join("SPY.csv"), &months, market_move);
    write_series(&monthly.join("AAA.csv"), &months, |i| 2.0 * market_move(i));

    fs::write(dir.path().join("vendor.json"), r#"{ "BBB": { "beta": 0.8 } }"#).unwrap();
    fs::write(dir.path().join("rates.csv"), "symbol,rate\n^IRX,5.0\n").unwrap();
    fs::write(dir.path().join("weights.csv"), "symbol,weight\nAAA,0.5\nBBB,0.5\n").unwrap();
    fs::write(
        dir.path().join("values.csv"),
        "symbol,total_value,cost_basis\nAAA,7500,5000\nBBB,2500,2000\n",
    )
    .unwrap();
    dir
}

fn analysis(dir: &TempDir, command: &str, holdings: &str) -> Command {
    let mut cmd = sigma();
    cmd.current_dir(dir.path()).args([
        "--quiet",
        command,
        "--holdings",
        holdings,
        "--prices",
        "prices",
        "--vendor",
        "vendor.json",
        "--rates",
        "rates.csv",
        "--as-of",
        "2024-12-31",
    ]);
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.args(["--format", "json"]).assert().success();
    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_help_lists_commands() {
    sigma()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("metrics"))
        .stdout(predicate::str::contains("volatility"))
        .stdout(predicate::str::contains("benchmarks"));
}

#[test]
fn test_config_show_defaults() {
    let json = json_output(sigma().args(["config", "show"]));
    assert_eq!(json["market_proxy"], "SPY");
    assert_eq!(json["market"]["default_beta"], 1.0);
}

#[test]
fn test_config_validate_rejects_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sigma.toml");
    fs::write(&path, "weight_tolerance = -1.0\n").unwrap();

    sigma()
        .arg("--config")
        .arg(&path)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weight_tolerance"));
}

#[test]
fn test_config_validate_accepts_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sigma.toml");
    fs::write(&path, "market_proxy = \"VTI\"\n").unwrap();

    sigma()
        .arg("--config")
        .arg(&path)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

// =============================================================================
// ANALYSES
// =============================================================================

#[test]
fn test_beta_json() {
    let dir = fixture();
    let json = json_output(&mut analysis(&dir, "beta", "weights.csv"));

    let beta = json["portfolio_beta"].as_f64().unwrap();
    assert!((beta - 1.4).abs() < 1e-6, "portfolio beta {}", beta);
    assert_eq!(json["holdings"][0]["data_source"], "calculated");
    assert_eq!(json["holdings"][1]["data_source"], "vendor-beta");
}

#[test]
fn test_beta_minimal() {
    let dir = fixture();
    analysis(&dir, "beta", "weights.csv")
        .args(["--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1.4000"));
}

#[test]
fn test_metrics_with_dollar_values() {
    let dir = fixture();
    let json = json_output(&mut analysis(&dir, "metrics", "values.csv"));

    assert_eq!(json["weight_origin"], "dollar_value");
    assert!((json["risk_free_rate"].as_f64().unwrap() - 0.05).abs() < 1e-12);
    let weight = json["holdings"][0]["weight"].as_f64().unwrap();
    assert!((weight - 0.75).abs() < 1e-12);
}

#[test]
fn test_metrics_market_override() {
    let dir = fixture();
    let json = json_output(analysis(&dir, "metrics", "weights.csv").args([
        "--market-return",
        "0.12",
        "--risk-free-rate",
        "0.03",
    ]));
    assert_eq!(json["market_return"].as_f64(), Some(0.12));
    assert_eq!(json["risk_free_rate"].as_f64(), Some(0.03));
}

#[test]
fn test_market_override_needs_both_figures() {
    let dir = fixture();
    analysis(&dir, "metrics", "weights.csv")
        .args(["--market-return", "0.12"])
        .assert()
        .failure();
}

#[test]
fn test_volatility_table() {
    let dir = fixture();
    analysis(&dir, "volatility", "weights.csv")
        .arg("--correlation")
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio Std Dev"))
        .stdout(predicate::str::contains("AAA"));
}

#[test]
fn test_volatility_csv_rows() {
    let dir = fixture();
    analysis(&dir, "volatility", "weights.csv")
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("symbol,weight"))
        .stdout(predicate::str::contains("BBB,"));
}

#[test]
fn test_benchmarks_without_fund_files() {
    let dir = fixture();
    let json = json_output(sigma().current_dir(dir.path()).args([
        "--quiet",
        "benchmarks",
        "--prices",
        "prices",
        "--as-of",
        "2024-12-31",
    ]));
    assert_eq!(json["returns"].as_array().map(Vec::len), Some(0));
    assert_eq!(json["unavailable"].as_array().map(Vec::len), Some(8));
}

#[test]
fn test_missing_holdings_file() {
    let dir = fixture();
    analysis(&dir, "metrics", "nope.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid holdings file"));
}

#[test]
fn test_malformed_weights() {
    let dir = fixture();
    fs::write(dir.path().join("bad.csv"), "symbol,weight\nAAA,0.5\nBBB,0.2\n").unwrap();
    analysis(&dir, "beta", "bad.csv").assert().failure();
}
