//! Covariance and correlation matrices across return series.
//!
//! # Construction
//!
//! For series `i` and `j` with periods-per-year `P`:
//!
//! - diagonal: `Var_i × P`
//! - off-diagonal: `Σ_{k<m} (r_ik - mean_i)(r_jk - mean_j) / (m - 1) × P` where
//!   `m = min(len_i, len_j)` and each mean is the series' own full-length mean
//!
//! Correlation is `Cov_ij / (σ_i σ_j)` with `σ` the annualized standard
//! deviation; the diagonal is set to exactly 1.0.

use serde::Serialize;
use sigma_core::Interval;

use crate::error::{MathError, MathResult};
use crate::matrix::SymmetricMatrix;
use crate::returns::ReturnSeries;

/// Default tolerance beyond ±1 before a correlation is flagged.
pub const CORRELATION_TOLERANCE: f64 = 1e-5;

/// Annualized sample covariance matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceMatrix {
    labels: Vec<String>,
    interval: Interval,
    matrix: SymmetricMatrix<f64>,
}

impl CovarianceMatrix {
    /// Builds the matrix from return series sharing one sampling interval.
    ///
    /// Labels come from each series' symbol, or `#i` when unlabelled.
    ///
    /// # Errors
    ///
    /// - `MathError::InsufficientData` if no series are supplied or a series
    ///   has fewer than 2 returns
    /// - `MathError::IntervalMismatch` if the series mix intervals
    pub fn from_series(series: &[ReturnSeries]) -> MathResult<Self> {
        let first = series
            .first()
            .ok_or_else(|| MathError::insufficient_data(1, 0))?;
        let interval = first.interval();

        for s in series {
            if s.interval() != interval {
                return Err(MathError::IntervalMismatch {
                    expected: interval,
                    actual: s.interval(),
                });
            }
            if s.len() < 2 {
                return Err(MathError::insufficient_data(2, s.len()));
            }
        }

        let periods = f64::from(interval.periods_per_year());
        let matrix = SymmetricMatrix::from_fn(series.len(), |i, j| {
            if i == j {
                series[i].variance() * periods
            } else {
                overlap_covariance(&series[i], &series[j]) * periods
            }
        });

        let labels = series
            .iter()
            .enumerate()
            .map(|(i, s)| s.symbol().map_or_else(|| format!("#{i}"), ToString::to_string))
            .collect();

        Ok(Self {
            labels,
            interval,
            matrix,
        })
    }

    /// Wraps an already-annualized matrix.
    ///
    /// # Errors
    ///
    /// - `MathError::DimensionMismatch` if `labels` and the matrix disagree
    /// - `MathError::InvalidInput` for a negative or non-finite variance
    pub fn from_matrix(
        labels: Vec<String>,
        interval: Interval,
        matrix: SymmetricMatrix<f64>,
    ) -> MathResult<Self> {
        if labels.len() != matrix.dim() {
            return Err(MathError::dimension_mismatch(matrix.dim(), labels.len()));
        }
        if let Some(v) = matrix.diagonal().into_iter().find(|v| !v.is_finite() || *v < 0.0) {
            return Err(MathError::invalid_input(format!(
                "variance {v} on the diagonal"
            )));
        }
        Ok(Self {
            labels,
            interval,
            matrix,
        })
    }

    /// Builds the matrix from annualized standard deviations and a
    /// correlation lookup: `Cov_ij = ρ_ij σ_i σ_j`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CovarianceMatrix::from_matrix`].
    pub fn from_std_devs<F>(
        labels: Vec<String>,
        interval: Interval,
        std_devs: &[f64],
        mut correlation: F,
    ) -> MathResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let matrix = SymmetricMatrix::from_fn(std_devs.len(), |i, j| {
            if i == j {
                std_devs[i] * std_devs[i]
            } else {
                correlation(i, j) * std_devs[i] * std_devs[j]
            }
        });
        Self::from_matrix(labels, interval, matrix)
    }

    /// Number of assets.
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    /// Asset labels in matrix order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Sampling interval the matrix was annualized from.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Entry `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    /// Annualized variance of asset `i`.
    pub fn variance(&self, i: usize) -> f64 {
        self.matrix.get(i, i)
    }

    /// Annualized standard deviation of asset `i`.
    pub fn std_dev(&self, i: usize) -> f64 {
        self.variance(i).sqrt()
    }

    /// Underlying symmetric matrix.
    pub fn matrix(&self) -> &SymmetricMatrix<f64> {
        &self.matrix
    }

    /// Portfolio variance `wᵀ Cov w`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::DimensionMismatch` if `weights.len() != dim`.
    pub fn portfolio_variance(&self, weights: &[f64]) -> MathResult<f64> {
        self.matrix.quadratic_form(weights)
    }

    /// Correlation matrix using [`CORRELATION_TOLERANCE`].
    pub fn correlation(&self) -> CorrelationMatrix {
        self.correlation_with_tolerance(CORRELATION_TOLERANCE)
    }

    /// Correlation matrix, flagging entries beyond `1 + tolerance` in
    /// magnitude.
    ///
    /// Entries are never clamped. A pair involving a zero-variance asset
    /// has no defined correlation and is stored as `None`.
    pub fn correlation_with_tolerance(&self, tolerance: f64) -> CorrelationMatrix {
        let std_devs: Vec<f64> = (0..self.dim()).map(|i| self.std_dev(i)).collect();
        let mut anomalies = Vec::new();

        let matrix = SymmetricMatrix::from_fn(self.dim(), |i, j| {
            if i == j {
                return Some(1.0);
            }
            let denom = std_devs[i] * std_devs[j];
            if denom == 0.0 || !denom.is_finite() {
                return None;
            }
            let rho = self.get(i, j) / denom;
            if rho.abs() > 1.0 + tolerance {
                anomalies.push(CorrelationAnomaly {
                    row: self.labels[i].clone(),
                    column: self.labels[j].clone(),
                    value: rho,
                });
            }
            Some(rho)
        });

        CorrelationMatrix {
            labels: self.labels.clone(),
            matrix,
            anomalies,
        }
    }
}

/// Sample covariance over the leading overlap of two series, each centred
/// on its own full-length mean.
fn overlap_covariance(a: &ReturnSeries, b: &ReturnSeries) -> f64 {
    let m = a.len().min(b.len());
    let (mean_a, mean_b) = (a.mean(), b.mean());
    let sum: f64 = a.returns()[..m]
        .iter()
        .zip(&b.returns()[..m])
        .map(|(ra, rb)| (ra - mean_a) * (rb - mean_b))
        .sum();
    sum / (m - 1) as f64
}

/// A correlation entry outside `[-1, 1]` beyond tolerance.
///
/// Signals numerical drift, typically from series whose overlap is much
/// shorter than their full length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationAnomaly {
    /// Row asset label.
    pub row: String,
    /// Column asset label.
    pub column: String,
    /// The computed correlation.
    pub value: f64,
}

/// Correlation matrix derived from a [`CovarianceMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    matrix: SymmetricMatrix<Option<f64>>,
    anomalies: Vec<CorrelationAnomaly>,
}

impl CorrelationMatrix {
    /// Number of assets.
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    /// Asset labels in matrix order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Correlation `(i, j)`, `None` when undefined.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.matrix.get(i, j)
    }

    /// Underlying symmetric matrix.
    pub fn matrix(&self) -> &SymmetricMatrix<Option<f64>> {
        &self.matrix
    }

    /// Entries flagged as out of bounds.
    pub fn anomalies(&self) -> &[CorrelationAnomaly] {
        &self.anomalies
    }

    /// True when no entry was flagged.
    pub fn is_well_formed(&self) -> bool {
        self.anomalies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sigma_core::Symbol;

    fn series(symbol: &str, returns: &[f64]) -> ReturnSeries {
        ReturnSeries::from_returns(returns.to_vec(), Interval::Daily)
            .unwrap()
            .with_symbol(Symbol::new(symbol).unwrap())
    }

    #[test]
    fn test_diagonal_is_annualized_variance() {
        let a = series("A", &[0.01, -0.02, 0.03, 0.00]);
        let cov = CovarianceMatrix::from_series(&[a.clone()]).unwrap();
        assert_relative_eq!(cov.variance(0), a.variance() * 252.0, epsilon = 1e-15);
        assert_relative_eq!(cov.std_dev(0), a.annualized_std_dev(), epsilon = 1e-12);
        assert_eq!(cov.labels(), &["A".to_string()]);
    }

    #[test]
    fn test_off_diagonal_uses_overlap_and_global_means() {
        let a = series("A", &[0.01, 0.02, 0.03, 0.10]);
        let b = series("B", &[0.02, 0.01, 0.04]);
        let cov = CovarianceMatrix::from_series(&[a.clone(), b.clone()]).unwrap();

        // overlap of 3 returns, centred on the full-length means
        let expected: f64 = (0..3)
            .map(|k| (a.returns()[k] - a.mean()) * (b.returns()[k] - b.mean()))
            .sum::<f64>()
            / 2.0
            * 252.0;

        assert_relative_eq!(cov.get(0, 1), expected, epsilon = 1e-15);
        assert_eq!(cov.get(0, 1), cov.get(1, 0));
    }

    #[test]
    fn test_correlation_diagonal_exact() {
        let a = series("A", &[0.01, -0.02, 0.03, 0.00, 0.015]);
        let b = series("B", &[0.00, -0.01, 0.02, 0.01, 0.005]);
        let corr = CovarianceMatrix::from_series(&[a, b]).unwrap().correlation();

        assert_eq!(corr.get(0, 0), Some(1.0));
        assert_eq!(corr.get(1, 1), Some(1.0));
        let rho = corr.get(0, 1).unwrap();
        assert!((-1.0..=1.0).contains(&rho));
        assert!(corr.is_well_formed());
    }

    #[test]
    fn test_perfect_correlation() {
        let a = series("A", &[0.01, -0.02, 0.03]);
        let b = series("B", &[0.02, -0.04, 0.06]);
        let corr = CovarianceMatrix::from_series(&[a, b]).unwrap().correlation();
        assert_relative_eq!(corr.get(0, 1).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_variance_correlation_is_undefined() {
        let flat = series("CASH", &[0.0, 0.0, 0.0]);
        let b = series("B", &[0.02, -0.04, 0.06]);
        let corr = CovarianceMatrix::from_series(&[flat, b]).unwrap().correlation();
        assert_eq!(corr.get(0, 0), Some(1.0));
        assert_eq!(corr.get(0, 1), None);
    }

    #[test]
    fn test_out_of_bounds_correlation_is_flagged_not_clamped() {
        let matrix = SymmetricMatrix::from_fn(2, |i, j| match (i, j) {
            (0, 0) | (1, 1) => 0.04,
            _ => 0.05,
        });
        let cov = CovarianceMatrix::from_matrix(
            vec!["A".into(), "B".into()],
            Interval::Daily,
            matrix,
        )
        .unwrap();
        let corr = cov.correlation();

        assert_relative_eq!(corr.get(0, 1).unwrap(), 1.25, epsilon = 1e-12);
        assert!(!corr.is_well_formed());
        assert_eq!(corr.anomalies().len(), 1);
        assert_eq!(corr.anomalies()[0].row, "A");
    }

    #[test]
    fn test_two_asset_portfolio_variance() {
        let cov = CovarianceMatrix::from_std_devs(
            vec!["A".into(), "B".into()],
            Interval::Daily,
            &[0.20, 0.30],
            |_, _| 0.5,
        )
        .unwrap();

        assert_relative_eq!(cov.get(0, 1), 0.03, epsilon = 1e-12);
        let var = cov.portfolio_variance(&[0.6, 0.4]).unwrap();
        assert_relative_eq!(var, 0.0432, epsilon = 1e-12);
        assert_relative_eq!(var.sqrt(), 0.2078, epsilon = 1e-4);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            CovarianceMatrix::from_series(&[]).unwrap_err(),
            MathError::insufficient_data(1, 0)
        );

        let daily = series("A", &[0.01, 0.02]);
        let monthly = ReturnSeries::from_returns(vec![0.01, 0.02], Interval::Monthly).unwrap();
        assert!(matches!(
            CovarianceMatrix::from_series(&[daily, monthly]).unwrap_err(),
            MathError::IntervalMismatch { .. }
        ));

        assert!(CovarianceMatrix::from_matrix(
            vec!["A".into()],
            Interval::Daily,
            SymmetricMatrix::filled(2, 0.0)
        )
        .is_err());
    }
}
