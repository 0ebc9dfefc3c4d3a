//! Benchmark fund returns.

use serde::Serialize;
use tracing::{info, warn, Instrument};

use sigma_core::{Date, Interval, Symbol};
use sigma_math::performance::total_return;
use sigma_portfolio::benchmark::{
    BenchmarkComparison, BenchmarkFund, BenchmarkReturn, RiskProfile, BENCHMARK_FUNDS,
};
use sigma_portfolio::reports::ExcludedHolding;

use crate::batch::BatchFetchResult;
use crate::engine::AnalyticsEngine;
use crate::error::{EngineError, EngineResult};
use crate::resolution::lookback;

/// One-year returns of the benchmark catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// Funds whose return could be computed, in catalog order.
    pub returns: Vec<BenchmarkReturn>,
    /// Funds whose prices were unavailable.
    pub unavailable: Vec<ExcludedHolding>,
    /// Comparison with a portfolio return, when one was supplied.
    pub comparison: Option<BenchmarkComparison>,
}

impl BenchmarkReport {
    /// Returns for the funds of one risk profile.
    pub fn for_profile(&self, profile: RiskProfile) -> Vec<&BenchmarkReturn> {
        self.returns
            .iter()
            .filter(|r| r.fund.profile == profile)
            .collect()
    }
}

impl AnalyticsEngine {
    /// Fetches one-year simple returns for every catalog fund concurrently
    /// and, given `portfolio_return`, compares the portfolio against them.
    pub async fn benchmarks(
        &self,
        as_of: Date,
        portfolio_return: Option<f64>,
    ) -> EngineResult<BenchmarkReport> {
        let span = tracing::info_span!("benchmarks", funds = BENCHMARK_FUNDS.len());
        async {
            let range = lookback(1, as_of)?;
            let range = &range;

            let mut symbols = Vec::with_capacity(BENCHMARK_FUNDS.len());
            let mut unavailable = Vec::new();
            for fund in &BENCHMARK_FUNDS {
                match Symbol::new(fund.symbol) {
                    Ok(s) => symbols.push(s),
                    Err(e) => warn!(fund = fund.symbol, error = %e, "invalid benchmark symbol"),
                }
            }

            let fetched = BatchFetchResult::collect(&symbols, |symbol| async move {
                let series = self
                    .providers()
                    .prices
                    .fetch_price_series(&symbol, range, Interval::Daily)
                    .await?;
                match (series.first(), series.last()) {
                    (Some(first), Some(last)) if series.len() >= 2 => {
                        Ok(total_return(first.close, last.close)?)
                    }
                    _ => Err(EngineError::insufficient_history(
                        &symbol,
                        format!("{} prices in range", series.len()),
                    )),
                }
            })
            .await;

            for (symbol, reason) in &fetched.failed {
                warn!(%symbol, %reason, "benchmark return unavailable");
            }
            unavailable.extend(fetched.exclusions());

            let returns: Vec<BenchmarkReturn> = BENCHMARK_FUNDS
                .iter()
                .filter_map(|fund: &BenchmarkFund| {
                    fetched
                        .succeeded
                        .iter()
                        .find(|(s, _)| s.as_str() == fund.symbol)
                        .map(|(_, r)| BenchmarkReturn {
                            fund: *fund,
                            one_year_return: *r,
                        })
                })
                .collect();

            info!(
                available = returns.len(),
                unavailable = unavailable.len(),
                "benchmark returns fetched"
            );
            Ok::<_, EngineError>(BenchmarkReport {
                comparison: portfolio_return.map(|r| BenchmarkComparison::new(r, &returns)),
                returns,
                unavailable,
            })
        }
        .instrument(span)
        .await
    }
}
