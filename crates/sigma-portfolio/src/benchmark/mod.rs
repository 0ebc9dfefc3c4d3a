//! Benchmark allocation funds and portfolio comparison.

mod catalog;
mod comparison;

pub use catalog::{funds_for, BenchmarkFund, RiskProfile, BENCHMARK_FUNDS};
pub use comparison::{BenchmarkComparison, BenchmarkReturn};
