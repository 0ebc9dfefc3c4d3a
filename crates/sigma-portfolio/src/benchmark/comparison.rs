//! Portfolio return against benchmark fund returns.

use serde::Serialize;

use crate::benchmark::BenchmarkFund;

/// A benchmark fund's trailing return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkReturn {
    /// The fund.
    pub fund: BenchmarkFund,
    /// Trailing one-year simple return.
    pub one_year_return: f64,
}

/// Portfolio return compared with each available benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    /// Portfolio return being compared.
    pub portfolio_return: f64,
    /// `(benchmark, portfolio - benchmark)` pairs in catalog order.
    pub excess_returns: Vec<(BenchmarkReturn, f64)>,
}

impl BenchmarkComparison {
    /// Compares `portfolio_return` with every benchmark.
    #[must_use]
    pub fn new(portfolio_return: f64, benchmarks: &[BenchmarkReturn]) -> Self {
        Self {
            portfolio_return,
            excess_returns: benchmarks
                .iter()
                .map(|b| (*b, portfolio_return - b.one_year_return))
                .collect(),
        }
    }

    /// Benchmarks that returned more than the portfolio.
    #[must_use]
    pub fn outperforming_benchmarks(&self) -> Vec<&BenchmarkReturn> {
        self.excess_returns
            .iter()
            .filter(|(_, excess)| *excess < 0.0)
            .map(|(b, _)| b)
            .collect()
    }

    /// The benchmark with the highest return.
    #[must_use]
    pub fn best_benchmark(&self) -> Option<&BenchmarkReturn> {
        self.excess_returns
            .iter()
            .map(|(b, _)| b)
            .max_by(|a, b| a.one_year_return.total_cmp(&b.one_year_return))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::BENCHMARK_FUNDS;
    use approx::assert_relative_eq;

    #[test]
    fn test_comparison() {
        let returns = [
            BenchmarkReturn {
                fund: BENCHMARK_FUNDS[0],
                one_year_return: 0.04,
            },
            BenchmarkReturn {
                fund: BENCHMARK_FUNDS[7],
                one_year_return: 0.15,
            },
        ];
        let cmp = BenchmarkComparison::new(0.10, &returns);

        assert_relative_eq!(cmp.excess_returns[0].1, 0.06, epsilon = 1e-12);
        assert_eq!(cmp.outperforming_benchmarks().len(), 1);
        assert_eq!(cmp.best_benchmark().unwrap().fund.symbol, "AOA");
    }

    #[test]
    fn test_empty() {
        let cmp = BenchmarkComparison::new(0.10, &[]);
        assert!(cmp.best_benchmark().is_none());
    }
}
