//! Sigma CLI - Command-line interface for portfolio risk/return analytics.
//!
//! # Usage
//!
//! ```bash
//! # Sharpe, Treynor and Jensen's alpha
//! sigma metrics --holdings holdings.csv --prices data/prices --vendor data/vendor.json
//!
//! # Covariance-based volatility
//! sigma volatility --holdings holdings.csv --prices data/prices --as-of 2024-12-31
//!
//! # Weighted beta
//! sigma beta --holdings holdings.csv --prices data/prices
//!
//! # Benchmark fund returns
//! sigma benchmarks --prices data/prices --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let default_filter = if cli.quiet { "warn" } else { "info,sigma=debug" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let config = commands::load_config(cli.config.as_deref())?;
    debug!(path = ?cli.config, "engine configuration loaded");

    match cli.command {
        Commands::Metrics(args) => commands::metrics::execute(args, config, format).await?,
        Commands::Volatility(args) => commands::volatility::execute(args, config, format).await?,
        Commands::Beta(args) => commands::beta::execute(args, config, format).await?,
        Commands::Benchmarks(args) => commands::benchmarks::execute(args, config, format).await?,
        Commands::Config(args) => commands::config::execute(args, config, format)?,
    }

    Ok(())
}
