//! Beta command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sigma_config::EngineConfig;
use sigma_portfolio::reports::HoldingBeta;

use crate::cli::OutputFormat;
use crate::commands::{load_holdings, DataArgs};
use crate::output::{format_percent, print_header, print_json, print_output, KeyValue};

/// Arguments for the beta command.
#[derive(Args, Debug)]
pub struct BetaArgs {
    /// Holdings CSV: `symbol,weight` or `symbol,total_value[,cost_basis]`
    #[arg(long)]
    pub holdings: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct BetaRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Beta")]
    beta: String,
    #[tabled(rename = "Source")]
    data_source: String,
}

impl From<&HoldingBeta> for BetaRow {
    fn from(h: &HoldingBeta) -> Self {
        Self {
            symbol: h.symbol.to_string(),
            weight: format_percent(h.weight),
            beta: format!("{:.3}", h.beta),
            data_source: h.data_source.to_string(),
        }
    }
}

/// Execute the beta command.
pub async fn execute(args: BetaArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let holdings = load_holdings(&args.holdings)?;
    let as_of = args.data.as_of()?;
    let engine = args.data.engine(config)?;

    let report = engine.beta(&holdings, as_of).await?;
    let rows: Vec<BetaRow> = report.holdings.iter().map(BetaRow::from).collect();

    match format {
        OutputFormat::Table => {
            print_header("Portfolio Beta");
            print_output(&[KeyValue::from_f64("Portfolio Beta", report.portfolio_beta, 3)], format)?;
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => println!("{:.4}", report.portfolio_beta),
    }

    Ok(())
}
