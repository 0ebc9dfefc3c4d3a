//! Concurrent per-symbol fetches with failure isolation.

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;

use sigma_core::Symbol;
use sigma_portfolio::reports::ExcludedHolding;

/// Outcome of fetching one item per symbol.
///
/// Failures never abort the batch; each is recorded with its reason.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFetchResult<T> {
    /// Successful fetches in request order.
    pub succeeded: Vec<(Symbol, T)>,
    /// Failed fetches in request order, with the reason.
    pub failed: Vec<(Symbol, String)>,
}

impl<T> BatchFetchResult<T> {
    /// Runs `fetch` for every symbol concurrently and waits for all of them.
    pub async fn collect<F, Fut, E>(symbols: &[Symbol], fetch: F) -> Self
    where
        F: Fn(Symbol) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let outcomes = join_all(symbols.iter().map(|symbol| {
            let fut = fetch(symbol.clone());
            async move { (symbol.clone(), fut.await) }
        }))
        .await;

        let mut succeeded = Vec::with_capacity(outcomes.len());
        let mut failed = Vec::new();
        for (symbol, outcome) in outcomes {
            match outcome {
                Ok(value) => succeeded.push((symbol, value)),
                Err(e) => failed.push((symbol, e.to_string())),
            }
        }
        Self { succeeded, failed }
    }

    /// True when nothing failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// The value fetched for `symbol`.
    pub fn get(&self, symbol: &Symbol) -> Option<&T> {
        self.succeeded
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| v)
    }

    /// Symbols that failed.
    pub fn failed_symbols(&self) -> Vec<Symbol> {
        self.failed.iter().map(|(s, _)| s.clone()).collect()
    }

    /// Failures as exclusion records.
    pub fn exclusions(&self) -> Vec<ExcludedHolding> {
        self.failed
            .iter()
            .map(|(s, reason)| ExcludedHolding::new(s.clone(), reason.clone()))
            .collect()
    }
}
