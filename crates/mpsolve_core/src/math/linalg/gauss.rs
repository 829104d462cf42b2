//! Gaussian elimination with partial pivoting.

use tracing::trace;

use super::{check_shape, LinearSolver, Matrix, Vector};
use crate::traits::BigFloat;
use crate::types::{LinearSolveError, RoundingMode};

/// Gaussian elimination with partial (row) pivoting and back substitution.
///
/// At step `k` the row with the largest `|a[i][k]|`, `i >= k`, becomes the
/// pivot row. If that largest candidate is exactly zero the matrix is
/// reported singular. Works for any square size, including the one- and
/// two-unknown cases that [`CramerSolver`](super::CramerSolver) also covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussianElimination;

impl<T: BigFloat> LinearSolver<T> for GaussianElimination {
    fn solve(
        &self,
        jacobian: &Matrix<T>,
        residual: &Vector<T>,
        rounding: RoundingMode,
    ) -> Result<Vector<T>, LinearSolveError> {
        let n = check_shape(jacobian, residual)?;
        let mut a = jacobian.clone();
        let mut b = residual.neg();

        // Forward elimination
        for k in 0..n {
            let mut pivot_row = k;
            let mut pivot_abs = a[(k, k)].abs();
            for i in (k + 1)..n {
                let candidate = a[(i, k)].abs();
                if candidate > pivot_abs {
                    pivot_row = i;
                    pivot_abs = candidate;
                }
            }
            if pivot_abs.is_zero() {
                return Err(LinearSolveError::Singular);
            }
            if pivot_row != k {
                trace!(column = k, pivot_row, "swapping rows");
                a.swap_rows(k, pivot_row);
                let tmp = b[k].clone();
                b[k] = b[pivot_row].clone();
                b[pivot_row] = tmp;
            }

            for i in (k + 1)..n {
                if a[(i, k)].is_zero() {
                    continue;
                }
                let factor = a[(i, k)].div(&a[(k, k)], rounding)?;
                a[(i, k)] = T::zero(a[(i, k)].precision());
                for j in (k + 1)..n {
                    let update = factor.mul(&a[(k, j)], rounding);
                    a[(i, j)] = a[(i, j)].sub(&update, rounding);
                }
                let update = factor.mul(&b[k], rounding);
                b[i] = b[i].sub(&update, rounding);
            }
        }

        // Back substitution
        let mut x = b;
        for i in (0..n).rev() {
            let mut acc = x[i].clone();
            for j in (i + 1)..n {
                acc = acc.sub(&a[(i, j)].mul(&x[j], rounding), rounding);
            }
            x[i] = acc.div(&a[(i, i)], rounding)?;
        }
        Ok(x)
    }
}
