//! Symmetric matrix with packed upper-triangle storage.
//!
//! Only entries with `i <= j` are stored; reads of `(j, i)` resolve to the
//! same slot as `(i, j)`, so symmetry holds by construction rather than by
//! mirroring writes.

use serde::{Serialize, Serializer};

use crate::error::{MathError, MathResult};

/// An `n × n` symmetric matrix storing `n (n + 1) / 2` entries.
///
/// # Example
///
/// ```rust
/// use sigma_math::matrix::SymmetricMatrix;
///
/// let m = SymmetricMatrix::from_fn(3, |i, j| (i * 10 + j) as f64);
/// assert_eq!(m.get(0, 2), 2.0);
/// assert_eq!(m.get(2, 0), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix<T = f64> {
    dim: usize,
    data: Vec<T>,
}

impl<T: Copy> SymmetricMatrix<T> {
    /// Creates a matrix with every entry set to `value`.
    #[must_use]
    pub fn filled(dim: usize, value: T) -> Self {
        Self {
            dim,
            data: vec![value; packed_len(dim)],
        }
    }

    /// Creates a matrix by evaluating `f(i, j)` once per unordered pair.
    ///
    /// `f` is only called with `i <= j`.
    pub fn from_fn<F>(dim: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(packed_len(dim));
        for i in 0..dim {
            for j in i..dim {
                data.push(f(i, j));
            }
        }
        Self { dim, data }
    }

    /// Fallible variant of [`SymmetricMatrix::from_fn`].
    pub fn try_from_fn<F, E>(dim: usize, mut f: F) -> Result<Self, E>
    where
        F: FnMut(usize, usize) -> Result<T, E>,
    {
        let mut data = Vec::with_capacity(packed_len(dim));
        for i in 0..dim {
            for j in i..dim {
                data.push(f(i, j)?);
            }
        }
        Ok(Self { dim, data })
    }

    /// Matrix dimension `n`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry `(i, j)`; equal to entry `(j, i)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.index(i, j)]
    }

    /// Entry `(i, j)` or `None` when out of bounds.
    pub fn try_get(&self, i: usize, j: usize) -> Option<T> {
        (i < self.dim && j < self.dim).then(|| self.get(i, j))
    }

    /// Sets entries `(i, j)` and `(j, i)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    /// Diagonal entries.
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.dim).map(|i| self.get(i, i)).collect()
    }

    /// Expands to a dense row-major matrix.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        (0..self.dim)
            .map(|i| (0..self.dim).map(|j| self.get(i, j)).collect())
            .collect()
    }

    /// Iterates the stored upper triangle as `(i, j, value)` with `i <= j`.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.dim).flat_map(move |i| (i..self.dim).map(move |j| (i, j, self.get(i, j))))
    }

    fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.dim && j < self.dim,
            "index ({i}, {j}) out of bounds for {0}x{0} matrix",
            self.dim
        );
        let (r, c) = if i <= j { (i, j) } else { (j, i) };
        // rows before r hold n + (n-1) + ... + (n-r+1) entries
        r * self.dim - r * r.saturating_sub(1) / 2 + (c - r)
    }
}

impl SymmetricMatrix<f64> {
    /// Quadratic form `wᵀ M w`.
    ///
    /// Evaluated as the full double sum `Σ_i Σ_j w_i M_ij w_j`, so every
    /// cross term contributes twice.
    ///
    /// # Errors
    ///
    /// Returns `MathError::DimensionMismatch` if `weights.len() != dim`.
    pub fn quadratic_form(&self, weights: &[f64]) -> MathResult<f64> {
        if weights.len() != self.dim {
            return Err(MathError::dimension_mismatch(self.dim, weights.len()));
        }

        let mut total = 0.0;
        for i in 0..self.dim {
            for j in 0..self.dim {
                total += weights[i] * self.get(i, j) * weights[j];
            }
        }
        Ok(total)
    }
}

impl<T: Copy + Serialize> Serialize for SymmetricMatrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dense().serialize(serializer)
    }
}

fn packed_len(dim: usize) -> usize {
    dim * (dim + 1) / 2
}
