//! Builder pattern for the analytics engine.

use sigma_config::{EngineConfig, Validate};
use sigma_traits::DataProviders;

use crate::engine::AnalyticsEngine;
use crate::error::EngineError;

/// Builder for constructing an [`AnalyticsEngine`].
#[derive(Debug, Default)]
pub struct AnalyticsEngineBuilder {
    config: Option<EngineConfig>,
    providers: Option<DataProviders>,
}

impl AnalyticsEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the data providers.
    #[must_use]
    pub fn with_providers(mut self, providers: DataProviders) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Build the engine, validating the configuration.
    pub fn build(self) -> Result<AnalyticsEngine, EngineError> {
        let config = self.config.unwrap_or_default();
        config.validate_or_error()?;

        let providers = self
            .providers
            .ok_or_else(|| EngineError::MissingDependency("data providers not configured".into()))?;

        Ok(AnalyticsEngine::new(config, providers))
    }
}
