//! Benchmarks command implementation.
//!
//! One-year returns of the allocation funds for each risk profile.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sigma_config::EngineConfig;
use sigma_portfolio::benchmark::BenchmarkReturn;

use crate::cli::OutputFormat;
use crate::commands::DataArgs;
use crate::output::{format_percent, print_header, print_json, print_output, print_warning};

/// Arguments for the benchmarks command.
#[derive(Args, Debug)]
pub struct BenchmarksArgs {
    /// Portfolio return to compare against, as a decimal
    #[arg(long)]
    pub portfolio_return: Option<f64>,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct BenchmarkRow {
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Allocation")]
    allocation: String,
    #[tabled(rename = "1Y Return")]
    one_year_return: String,
    #[tabled(rename = "Portfolio Excess")]
    excess: String,
}

impl BenchmarkRow {
    fn new(b: &BenchmarkReturn, portfolio_return: Option<f64>) -> Self {
        Self {
            profile: b.fund.profile.to_string(),
            symbol: b.fund.symbol.to_string(),
            allocation: b.fund.allocation.to_string(),
            one_year_return: format_percent(b.one_year_return),
            excess: portfolio_return
                .map_or_else(|| "-".to_string(), |r| format_percent(r - b.one_year_return)),
        }
    }
}

/// Execute the benchmarks command.
pub async fn execute(
    args: BenchmarksArgs,
    config: EngineConfig,
    format: OutputFormat,
) -> Result<()> {
    let as_of = args.data.as_of()?;
    let engine = args.data.engine(config)?;

    let report = engine.benchmarks(as_of, args.portfolio_return).await?;
    let rows: Vec<BenchmarkRow> = report
        .returns
        .iter()
        .map(|b| BenchmarkRow::new(b, args.portfolio_return))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Benchmark Returns");
            print_output(&rows, format)?;
            if let Some(best) = report.comparison.as_ref().and_then(|c| c.best_benchmark()) {
                println!(
                    "Best benchmark: {} ({})",
                    best.fund.symbol,
                    format_percent(best.one_year_return)
                );
            }
            for missing in &report.unavailable {
                print_warning(&format!("{} unavailable: {}", missing.symbol, missing.reason));
            }
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv | OutputFormat::Minimal => print_output(&rows, format)?,
    }

    Ok(())
}
