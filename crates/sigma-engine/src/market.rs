//! Market context resolution.
//!
//! The market return is the one-year simple return of the market proxy and
//! the risk-free rate is the proxy rate quote divided by 100. Each figure
//! falls back to its configured default on its own, and is tagged with its
//! source either way.

use tracing::{debug, warn};

use sigma_config::EngineConfig;
use sigma_core::{Date, DateRange, Interval};
use sigma_math::performance::total_return;
use sigma_portfolio::types::{ContextSource, MarketContext};
use sigma_traits::DataProviders;

use crate::error::{EngineError, EngineResult};

/// Resolves the market context as of `as_of`. Never fails: unavailable
/// figures are replaced by the configured defaults.
pub async fn resolve_market_context(
    providers: &DataProviders,
    config: &EngineConfig,
    as_of: Date,
) -> MarketContext {
    let defaults = &config.market;

    if let Some(provider) = &providers.market_context {
        return match provider.fetch_market_context().await {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "market context unavailable, using defaults");
                MarketContext::defaulted(
                    defaults.default_market_return,
                    defaults.default_risk_free_rate,
                )
            }
        };
    }

    let (market, risk_free) = futures::join!(
        market_return(providers, config, as_of),
        risk_free_rate(providers, config)
    );

    let (market_return, market_return_source) = match market {
        Ok(r) => (r, ContextSource::Live),
        Err(e) => {
            warn!(
                proxy = %config.market_proxy,
                error = %e,
                default = defaults.default_market_return,
                "market return unavailable, using default"
            );
            (defaults.default_market_return, ContextSource::Default)
        }
    };
    let (risk_free_rate, risk_free_rate_source) = match risk_free {
        Ok(r) => (r, ContextSource::Live),
        Err(e) => {
            warn!(
                proxy = %config.risk_free_proxy,
                error = %e,
                default = defaults.default_risk_free_rate,
                "risk-free rate unavailable, using default"
            );
            (defaults.default_risk_free_rate, ContextSource::Default)
        }
    };

    debug!(market_return, risk_free_rate, "resolved market context");
    MarketContext {
        market_return,
        risk_free_rate,
        market_return_source,
        risk_free_rate_source,
    }
}

/// One-year simple return of the market proxy.
async fn market_return(
    providers: &DataProviders,
    config: &EngineConfig,
    as_of: Date,
) -> EngineResult<f64> {
    let symbol = config.market_proxy_symbol()?;
    let range = DateRange::new(as_of.sub_years(1)?, as_of)?;
    let series = providers
        .prices
        .fetch_price_series(&symbol, &range, Interval::Daily)
        .await?;

    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => {
            Ok(total_return(first.close, last.close)?)
        }
        _ => Err(EngineError::insufficient_history(
            symbol,
            format!("{} prices in the last year", series.len()),
        )),
    }
}

/// Risk-free rate from a percent quote.
async fn risk_free_rate(providers: &DataProviders, config: &EngineConfig) -> EngineResult<f64> {
    let symbol = config.risk_free_proxy_symbol()?;
    let quote = providers.rates.fetch_rate_quote(&symbol).await?;
    if !quote.is_finite() {
        return Err(EngineError::insufficient_history(
            symbol,
            format!("non-finite rate quote {}", quote),
        ));
    }
    Ok(quote / 100.0)
}
