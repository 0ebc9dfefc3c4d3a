//! Metrics command implementation.
//!
//! Sharpe, Treynor and Jensen's alpha for a portfolio, with the breakdown
//! per holding.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sigma_config::EngineConfig;
use sigma_portfolio::reports::{HoldingBreakdown, RiskMetricsBundle};

use crate::cli::OutputFormat;
use crate::commands::{load_holdings, DataArgs};
use crate::output::{
    format_optional, format_percent, format_ratio, print_header, print_json, print_output,
    print_warning, KeyValue,
};

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Holdings CSV: `symbol,weight` or `symbol,total_value[,cost_basis]`
    #[arg(long)]
    pub holdings: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,
}

/// One holding as a table or CSV row.
#[derive(Debug, Serialize, Tabled)]
struct HoldingRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Return")]
    period_return: String,
    #[tabled(rename = "Beta")]
    beta: String,
    #[tabled(rename = "Source")]
    data_source: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Sharpe")]
    sharpe_ratio: String,
    #[tabled(rename = "Alpha")]
    alpha: String,
}

impl From<&HoldingBreakdown> for HoldingRow {
    fn from(h: &HoldingBreakdown) -> Self {
        Self {
            symbol: h.symbol.to_string(),
            weight: format_percent(h.weight),
            period_return: format_percent(h.period_return),
            beta: format!("{:.3}", h.beta),
            data_source: h.data_source.to_string(),
            std_dev: h
                .std_dev
                .map_or_else(|| "-".to_string(), |s| format_percent(s.value)),
            sharpe_ratio: format_optional(h.sharpe_ratio, 3),
            alpha: h.alpha.map_or_else(|| "-".to_string(), format_percent),
        }
    }
}

/// Execute the metrics command.
pub async fn execute(args: MetricsArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let holdings = load_holdings(&args.holdings)?;
    let as_of = args.data.as_of()?;
    let engine = args.data.engine(config)?;

    let bundle = engine.risk_metrics(&holdings, as_of).await?;

    match format {
        OutputFormat::Table => {
            print_header("Portfolio Risk Metrics");
            print_output(&summary(&bundle), format)?;
            print_header("Holdings");
            let rows: Vec<HoldingRow> = bundle.holdings.iter().map(HoldingRow::from).collect();
            print_output(&rows, format)?;
            report_gaps(&bundle);
        }
        OutputFormat::Json => print_json(&bundle)?,
        OutputFormat::Csv => {
            let rows: Vec<HoldingRow> = bundle.holdings.iter().map(HoldingRow::from).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            println!(
                "Sharpe: {}, Treynor: {}, Alpha: {:.4}",
                format_ratio(bundle.sharpe_ratio),
                format_ratio(bundle.treynor_ratio),
                bundle.jensens_alpha
            );
        }
    }

    Ok(())
}

fn summary(bundle: &RiskMetricsBundle) -> Vec<KeyValue> {
    let mut results = Vec::new();

    results.push(KeyValue::from_percent("Expected Return", bundle.portfolio.expected_return));
    results.push(KeyValue::from_percent("Volatility", bundle.portfolio.std_dev));
    results.push(KeyValue::from_f64("Beta", bundle.portfolio.beta, 3));
    results.push(KeyValue::new("", "")); // Separator

    let sharpe = match bundle.sharpe_rating() {
        Some(rating) => format!("{} ({})", format_ratio(bundle.sharpe_ratio), rating),
        None => format_ratio(bundle.sharpe_ratio),
    };
    results.push(KeyValue::new("Sharpe Ratio", sharpe));
    results.push(KeyValue::new("Treynor Ratio", format_ratio(bundle.treynor_ratio)));
    results.push(KeyValue::new(
        "Jensen's Alpha",
        format!("{} ({})", format_percent(bundle.jensens_alpha), bundle.alpha_rating()),
    ));
    results.push(KeyValue::new("", "")); // Separator

    results.push(KeyValue::new(
        "Market Return",
        format!(
            "{} ({})",
            format_percent(bundle.market_return()),
            bundle.market.market_return_source
        ),
    ));
    results.push(KeyValue::new(
        "Risk-Free Rate",
        format!(
            "{} ({})",
            format_percent(bundle.risk_free_rate()),
            bundle.market.risk_free_rate_source
        ),
    ));
    if let Some(total) = bundle.total_value {
        results.push(KeyValue::new("Total Value", format!("{:.2}", total)));
    }
    if let Some(basis) = bundle.total_cost_basis {
        results.push(KeyValue::new("Total Cost Basis", format!("{:.2}", basis)));
    }

    results
}

fn report_gaps(bundle: &RiskMetricsBundle) {
    for excluded in &bundle.excluded {
        print_warning(&format!("{} excluded: {}", excluded.symbol, excluded.reason));
    }
    for anomaly in &bundle.correlation_anomalies {
        print_warning(&format!(
            "correlation {}/{} out of range: {:.6}",
            anomaly.row, anomaly.column, anomaly.value
        ));
    }
    if bundle.market.uses_defaults() {
        print_warning("market context fell back to configured defaults");
    }
}
