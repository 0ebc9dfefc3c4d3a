//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BenchmarksArgs, BetaArgs, ConfigArgs, MetricsArgs, VolatilityArgs};

/// Sigma - Portfolio risk/return analytics CLI
#[derive(Parser)]
#[command(name = "sigma")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true, env = "SIGMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress log output below warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sharpe, Treynor and Jensen's alpha with a per-holding breakdown
    Metrics(MetricsArgs),

    /// Covariance-based portfolio volatility
    Volatility(VolatilityArgs),

    /// Weighted portfolio beta
    Beta(BetaArgs),

    /// One-year returns of the benchmark allocation funds
    Benchmarks(BenchmarksArgs),

    /// Show or validate the engine configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline values)
    Minimal,
}
