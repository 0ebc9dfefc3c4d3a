//! Engine configuration types.
//!
//! This module defines the settings an analysis run depends on.

use std::path::Path;

use serde::{Deserialize, Serialize};

use sigma_core::{CoreResult, Symbol};
use sigma_math::performance::ReturnConvention;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// MARKET DEFAULTS
// =============================================================================

/// Fallback market figures used when live data is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketDefaults {
    /// Expected market return.
    #[serde(default = "default_market_return")]
    pub default_market_return: f64,

    /// Risk-free rate.
    #[serde(default = "default_risk_free_rate")]
    pub default_risk_free_rate: f64,

    /// Beta assigned when neither vendor data nor a regression is available.
    #[serde(default = "default_beta")]
    pub default_beta: f64,
}

fn default_market_return() -> f64 {
    0.10
}

fn default_risk_free_rate() -> f64 {
    0.045
}

fn default_beta() -> f64 {
    1.0
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            default_market_return: default_market_return(),
            default_risk_free_rate: default_risk_free_rate(),
            default_beta: default_beta(),
        }
    }
}

impl Validate for MarketDefaults {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("market.default_market_return", self.default_market_return),
            ("market.default_risk_free_rate", self.default_risk_free_rate),
        ] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Rate {} must be a decimal between -1 and 1", value),
                    "decimal_rate",
                ));
            }
        }

        if !self.default_beta.is_finite() {
            errors.push(ValidationError::new(
                "market.default_beta",
                "Default beta must be finite",
            ));
        }

        errors
    }
}

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Settings for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Symbol whose 1-year return stands in for the market.
    #[serde(default = "default_market_proxy")]
    pub market_proxy: String,

    /// Rate symbol quoted in percent for the risk-free rate.
    #[serde(default = "default_risk_free_proxy")]
    pub risk_free_proxy: String,

    /// Allowed deviation of explicit weights from 1.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,

    /// Daily history used for volatility and covariance.
    #[serde(default = "default_volatility_lookback")]
    pub volatility_lookback_years: u32,

    /// Monthly history used for beta regression.
    #[serde(default = "default_beta_lookback")]
    pub beta_lookback_years: u32,

    /// History used for holding returns.
    #[serde(default = "default_return_lookback")]
    pub return_lookback_years: u32,

    /// Daily history behind a holding's calculated standard deviation.
    #[serde(default = "default_std_dev_lookback")]
    pub std_dev_lookback_years: u32,

    /// Tolerance beyond ±1 before a correlation is flagged.
    #[serde(default = "default_correlation_tolerance")]
    pub correlation_tolerance: f64,

    /// Rescale surviving weights when holdings are excluded; otherwise fail.
    #[serde(default = "default_true")]
    pub renormalize_after_exclusion: bool,

    /// Return convention of the comprehensive metrics.
    #[serde(default = "default_return_convention")]
    pub return_convention: ReturnConvention,

    /// Fallback market figures.
    #[serde(default)]
    pub market: MarketDefaults,
}

fn default_market_proxy() -> String {
    "SPY".to_string()
}

fn default_risk_free_proxy() -> String {
    "^IRX".to_string()
}

fn default_weight_tolerance() -> f64 {
    0.01
}

fn default_volatility_lookback() -> u32 {
    1
}

fn default_beta_lookback() -> u32 {
    5
}

fn default_return_lookback() -> u32 {
    1
}

fn default_std_dev_lookback() -> u32 {
    5
}

fn default_correlation_tolerance() -> f64 {
    1e-5
}

fn default_true() -> bool {
    true
}

fn default_return_convention() -> ReturnConvention {
    ReturnConvention::Annualized
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            market: MarketDefaults::default(),
            market_proxy: default_market_proxy(),
            risk_free_proxy: default_risk_free_proxy(),
            weight_tolerance: default_weight_tolerance(),
            volatility_lookback_years: default_volatility_lookback(),
            beta_lookback_years: default_beta_lookback(),
            return_lookback_years: default_return_lookback(),
            std_dev_lookback_years: default_std_dev_lookback(),
            correlation_tolerance: default_correlation_tolerance(),
            renormalize_after_exclusion: true,
            return_convention: default_return_convention(),
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document; missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Set the market defaults.
    #[must_use]
    pub fn with_market(mut self, market: MarketDefaults) -> Self {
        self.market = market;
        self
    }

    /// Set the market proxy symbol.
    #[must_use]
    pub fn with_market_proxy(mut self, symbol: impl Into<String>) -> Self {
        self.market_proxy = symbol.into();
        self
    }

    /// Set the weight tolerance.
    #[must_use]
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// Set the exclusion policy.
    #[must_use]
    pub fn with_renormalize_after_exclusion(mut self, renormalize: bool) -> Self {
        self.renormalize_after_exclusion = renormalize;
        self
    }

    /// Set the return convention of the comprehensive metrics.
    #[must_use]
    pub fn with_return_convention(mut self, convention: ReturnConvention) -> Self {
        self.return_convention = convention;
        self
    }

    /// The market proxy as a [`Symbol`].
    pub fn market_proxy_symbol(&self) -> CoreResult<Symbol> {
        Symbol::new(&self.market_proxy)
    }

    /// The risk-free proxy as a [`Symbol`].
    pub fn risk_free_proxy_symbol(&self) -> CoreResult<Symbol> {
        Symbol::new(&self.risk_free_proxy)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.market.validate();

        if let Err(e) = self.market_proxy_symbol() {
            errors.push(ValidationError::new("market_proxy", e.to_string()));
        }
        if let Err(e) = self.risk_free_proxy_symbol() {
            errors.push(ValidationError::new("risk_free_proxy", e.to_string()));
        }

        if !(self.weight_tolerance > 0.0 && self.weight_tolerance < 1.0) {
            errors.push(ValidationError::with_rule(
                "weight_tolerance",
                "Weight tolerance must be between 0 and 1",
                "valid_tolerance",
            ));
        }

        if !(self.correlation_tolerance >= 0.0 && self.correlation_tolerance <= 1e-2) {
            errors.push(ValidationError::with_rule(
                "correlation_tolerance",
                "Correlation tolerance must be between 0 and 0.01",
                "valid_tolerance",
            ));
        }

        for (field, years) in [
            ("volatility_lookback_years", self.volatility_lookback_years),
            ("beta_lookback_years", self.beta_lookback_years),
            ("return_lookback_years", self.return_lookback_years),
            ("std_dev_lookback_years", self.std_dev_lookback_years),
        ] {
            if years == 0 || years > 30 {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Lookback of {} years must be between 1 and 30", years),
                    "valid_lookback",
                ));
            }
        }

        errors
    }
}
