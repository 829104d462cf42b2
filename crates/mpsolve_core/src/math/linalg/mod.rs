//! Small dense linear algebra for the Newton sub-solve.
//!
//! This module provides:
//! - [`Vector`] and [`Matrix`]: owned containers of arbitrary-precision numbers
//! - [`LinearSolver`]: the capability the Newton driver depends on
//! - [`CramerSolver`]: closed-form determinant solve for one or two unknowns
//! - [`GaussianElimination`]: partial-pivoting elimination for any size
//! - [`DenseSolver`]: picks Cramer's rule up to two unknowns, elimination above
//!
//! Singularity is an exact-zero test everywhere: a zero determinant or a
//! column whose largest available pivot is exactly zero. There is no
//! near-singularity threshold.
//!
//! ## Example
//!
//! ```
//! use mpsolve_core::math::linalg::{CramerSolver, LinearSolver, Matrix, Vector};
//! use mpsolve_core::traits::BigFloat;
//! use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
//!
//! let p = Precision::new(128).unwrap();
//! let r = RoundingMode::Nearest;
//! let to_mp = |v: f64| MpFloat::from_f64(v, p, r).unwrap();
//!
//! // J = [[2, 1], [1, 3]], f = [-3, -5]  =>  J * delta = -f = [3, 5]
//! let j = Matrix::from_rows(vec![
//!     vec![to_mp(2.0), to_mp(1.0)],
//!     vec![to_mp(1.0), to_mp(3.0)],
//! ])
//! .unwrap();
//! let f = Vector::from(vec![to_mp(-3.0), to_mp(-5.0)]);
//!
//! let delta = CramerSolver.solve(&j, &f, r).unwrap();
//! assert!((delta[0].to_f64() - 0.8).abs() < 1e-15);
//! assert!((delta[1].to_f64() - 1.4).abs() < 1e-15);
//! ```

mod cramer;
mod gauss;
mod matrix;
mod vector;

pub use cramer::CramerSolver;
pub use gauss::GaussianElimination;
pub use matrix::Matrix;
pub use vector::Vector;

use crate::traits::BigFloat;
use crate::types::{LinearSolveError, RoundingMode};

/// Solver for the Newton correction `J * delta = -f`.
///
/// Implementations take the residual `f` itself and negate it internally,
/// so the driver never builds `-f`. All arithmetic runs at the precision of
/// the inputs with the given rounding mode.
pub trait LinearSolver<T: BigFloat> {
    /// Solve `jacobian * delta = -residual` for `delta`.
    ///
    /// # Errors
    ///
    /// - [`LinearSolveError::Singular`] when the matrix is exactly singular
    /// - [`LinearSolveError::DimensionMismatch`] when shapes disagree
    /// - [`LinearSolveError::UnsupportedDimension`] when the size is outside the solver's range
    fn solve(
        &self,
        jacobian: &Matrix<T>,
        residual: &Vector<T>,
        rounding: RoundingMode,
    ) -> Result<Vector<T>, LinearSolveError>;
}

/// Default solver: [`CramerSolver`] for one or two unknowns,
/// [`GaussianElimination`] for larger systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenseSolver;

impl<T: BigFloat> LinearSolver<T> for DenseSolver {
    fn solve(
        &self,
        jacobian: &Matrix<T>,
        residual: &Vector<T>,
        rounding: RoundingMode,
    ) -> Result<Vector<T>, LinearSolveError> {
        if jacobian.rows() <= CramerSolver::MAX_DIMENSION {
            CramerSolver.solve(jacobian, residual, rounding)
        } else {
            GaussianElimination.solve(jacobian, residual, rounding)
        }
    }
}

/// Shape check shared by the solvers.
fn check_shape<T>(jacobian: &Matrix<T>, residual: &Vector<T>) -> Result<usize, LinearSolveError> {
    if !jacobian.is_square() {
        return Err(LinearSolveError::DimensionMismatch {
            expected: jacobian.rows(),
            got: jacobian.cols(),
        });
    }
    if residual.len() != jacobian.rows() {
        return Err(LinearSolveError::DimensionMismatch {
            expected: jacobian.rows(),
            got: residual.len(),
        });
    }
    Ok(jacobian.rows())
}
