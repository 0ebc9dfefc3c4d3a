//! Volatility command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sigma_config::EngineConfig;
use sigma_portfolio::reports::AssetVolatility;

use crate::cli::OutputFormat;
use crate::commands::{load_holdings, DataArgs};
use crate::output::{format_percent, print_header, print_json, print_output, print_warning, KeyValue};

/// Arguments for the volatility command.
#[derive(Args, Debug)]
pub struct VolatilityArgs {
    /// Holdings CSV: `symbol,weight` or `symbol,total_value[,cost_basis]`
    #[arg(long)]
    pub holdings: PathBuf,

    /// Print the correlation matrix
    #[arg(long)]
    pub correlation: bool,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Mean Daily Return")]
    mean_return: String,
    #[tabled(rename = "Annualized Std Dev")]
    std_dev: String,
    #[tabled(rename = "Observations")]
    observations: usize,
}

impl From<&AssetVolatility> for AssetRow {
    fn from(a: &AssetVolatility) -> Self {
        Self {
            symbol: a.symbol.to_string(),
            weight: format_percent(a.weight),
            mean_return: format!("{:.6}", a.mean_return),
            std_dev: format_percent(a.annualized_std_dev),
            observations: a.observations,
        }
    }
}

/// Execute the volatility command.
pub async fn execute(
    args: VolatilityArgs,
    config: EngineConfig,
    format: OutputFormat,
) -> Result<()> {
    let holdings = load_holdings(&args.holdings)?;
    let as_of = args.data.as_of()?;
    let engine = args.data.engine(config)?;

    let report = engine.volatility(&holdings, as_of).await?;
    let rows: Vec<AssetRow> = report.assets.iter().map(AssetRow::from).collect();

    match format {
        OutputFormat::Table => {
            print_header("Portfolio Volatility");
            print_output(
                &[
                    KeyValue::from_percent("Portfolio Std Dev", report.portfolio_std_dev),
                    KeyValue::from_f64("Portfolio Variance", report.portfolio_variance, 6),
                ],
                format,
            )?;
            print_header("Holdings");
            print_output(&rows, format)?;

            if args.correlation {
                print_header("Correlation");
                let labels = report.correlation.labels();
                for (i, label) in labels.iter().enumerate() {
                    let cells: Vec<String> = (0..labels.len())
                        .map(|j| {
                            report
                                .correlation
                                .get(i, j)
                                .map_or_else(|| "  n/a ".to_string(), |c| format!("{:>6.3}", c))
                        })
                        .collect();
                    println!("{:<8} {}", label, cells.join(" "));
                }
            }
            for excluded in &report.excluded {
                print_warning(&format!("{} excluded: {}", excluded.symbol, excluded.reason));
            }
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => println!("{:.6}", report.portfolio_std_dev),
    }

    Ok(())
}
