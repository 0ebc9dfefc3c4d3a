//! Sigma Configuration Layer
//!
//! This crate provides configuration for the Sigma analytics engine: the
//! market defaults substituted when live data is unavailable, proxy symbols,
//! lookback windows and numeric tolerances.
//!
//! # Features
//!
//! - **Market defaults**: market return, risk-free rate and beta used as
//!   fallbacks, held in one place
//! - **TOML loading**: every field is optional and defaults sensibly
//! - **Validation**: the [`Validate`] trait reports every problem at once
//!
//! # Example
//!
//! ```rust
//! use sigma_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     market_proxy = "VTI"
//!
//!     [market]
//!     default_risk_free_rate = 0.05
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.market_proxy, "VTI");
//! assert_eq!(config.market.default_risk_free_rate, 0.05);
//! assert_eq!(config.market.default_market_return, 0.10);
//! assert!(config.is_valid());
//! ```
//!
//! # Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | `market.default_market_return` | 0.10 |
//! | `market.default_risk_free_rate` | 0.045 |
//! | `market.default_beta` | 1.0 |
//! | `market_proxy` | `SPY` |
//! | `risk_free_proxy` | `^IRX` |
//! | `weight_tolerance` | 0.01 |
//! | `volatility_lookback_years` | 1 |
//! | `beta_lookback_years` | 5 |
//! | `return_lookback_years` | 1 |
//! | `std_dev_lookback_years` | 5 |
//! | `correlation_tolerance` | 1e-5 |
//! | `renormalize_after_exclusion` | true |
//! | `return_convention` | `annualized` |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod engine;
mod error;

// Re-export core types
pub use engine::{EngineConfig, MarketDefaults};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{EngineConfig, MarketDefaults};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
