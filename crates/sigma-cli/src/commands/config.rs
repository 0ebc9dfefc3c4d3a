//! Config command implementation.
//!
//! Shows or validates the engine configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use sigma_config::{EngineConfig, Validate};

use crate::cli::OutputFormat;
use crate::output::{print_error, print_header, print_json, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check the configuration for invalid values
    Validate,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(&config, format),
        ConfigCommand::Validate => validate(&config),
    }
}

fn show(config: &EngineConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(config),
        OutputFormat::Minimal => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows = Vec::new();
            flatten("", &serde_json::to_value(config)?, &mut rows);
            if format == OutputFormat::Table {
                print_header("Engine Configuration");
            }
            print_output(&rows, format)
        }
    }
}

/// Flattens nested objects into dotted keys.
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<KeyValue>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&key, value, rows);
            }
        }
        Value::String(s) => rows.push(KeyValue::new(prefix, s.clone())),
        other => rows.push(KeyValue::new(prefix, other.to_string())),
    }
}

fn validate(config: &EngineConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        print_success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        print_error(&error.to_string());
    }
    anyhow::bail!("{} configuration error(s)", errors.len())
}
