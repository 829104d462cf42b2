//! Small dense square matrices.

use std::ops::{Index, IndexMut};

use super::vector::Vector;
use crate::traits::BigFloat;
use crate::types::{LinearSolveError, Precision, RoundingMode};

/// Dense matrix stored in row-major order.
///
/// Jacobians are built fresh every Newton iteration and owned by that
/// iteration; nothing is shared between iterations.
///
/// # Example
///
/// ```
/// use mpsolve_core::math::linalg::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m[(1, 0)], 3.0);
/// assert!(m.is_square());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Build a `rows x cols` matrix from row-major `data`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearSolveError::DimensionMismatch`] when `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, LinearSolveError> {
        if data.len() != rows * cols {
            return Err(LinearSolveError::DimensionMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from a list of equally long rows.
    ///
    /// # Errors
    ///
    /// Returns [`LinearSolveError::DimensionMismatch`] for ragged rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, LinearSolveError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(LinearSolveError::DimensionMismatch {
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `true` when rows equal columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Exchange rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }
}

impl<T: BigFloat> Matrix<T> {
    /// `n x n` identity matrix at `precision`.
    pub fn identity(n: usize, precision: Precision, rounding: RoundingMode) -> Self {
        let one = T::from_i64(1, precision, rounding);
        let zero = T::zero(precision);
        let data = (0..n * n)
            .map(|k| if k / n == k % n { one.clone() } else { zero.clone() })
            .collect();
        Self {
            rows: n,
            cols: n,
            data,
        }
    }

    /// Matrix-vector product, each dot product accumulated with rounding.
    ///
    /// # Errors
    ///
    /// Returns [`LinearSolveError::DimensionMismatch`] when `v.len() != cols`.
    pub fn mul_vector(
        &self,
        v: &Vector<T>,
        rounding: RoundingMode,
    ) -> Result<Vector<T>, LinearSolveError> {
        if v.len() != self.cols {
            return Err(LinearSolveError::DimensionMismatch {
                expected: self.cols,
                got: v.len(),
            });
        }
        Ok((0..self.rows)
            .map(|i| Vector::from(self.row(i).to_vec()).dot(v, rounding))
            .collect())
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self {
            rows: R,
            cols: C,
            data: rows.into_iter().flatten().collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MpFloat;

    #[test]
    fn test_new_checks_length() {
        assert!(Matrix::new(2, 2, vec![1.0, 2.0, 3.0]).is_err());
        let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert!(!m.is_square());
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(
            result,
            Err(LinearSolveError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_from_array() {
        let m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m[(1, 2)], 6);
    }

    #[test]
    fn test_swap_rows() {
        let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.swap_rows(0, 1);
        assert_eq!(m.row(0), &[3.0, 4.0]);
        assert_eq!(m.row(1), &[1.0, 2.0]);
    }

    #[test]
    fn test_identity_times_vector() {
        let p = Precision::new(96).unwrap();
        let r = RoundingMode::Nearest;
        let id: Matrix<MpFloat> = Matrix::identity(3, p, r);
        let v: Vector<MpFloat> = Vector::from_f64s(&[1.0, -2.0, 0.5], p, r).unwrap();
        assert_eq!(id.mul_vector(&v, r).unwrap(), v);
    }

    #[test]
    fn test_mul_vector_dimension_check() {
        let p = Precision::new(64).unwrap();
        let r = RoundingMode::Nearest;
        let id: Matrix<MpFloat> = Matrix::identity(2, p, r);
        let v: Vector<MpFloat> = Vector::zeros(3, p);
        assert!(matches!(
            id.mul_vector(&v, r),
            Err(LinearSolveError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }
}
