//! Newton-Raphson solvers on arbitrary-precision numbers.
//!
//! This module provides:
//! - [`NewtonSolver`]: Newton iteration for square nonlinear systems
//! - [`ScalarNewtonSolver`]: Newton iteration for a single equation
//! - [`NewtonConfig`]: tolerance, iteration budget and rounding mode of a solve
//! - [`FnSystem`] / [`FnEquation`]: closure adapters for caller-supplied functions
//! - [`solve`]: one-call system solve from closures
//! - [`solve_multi_start`]: independent solves from several guesses
//!
//! ## Examples
//!
//! ```
//! use mpsolve_core::math::linalg::{Matrix, Vector};
//! use mpsolve_core::math::solvers::solve;
//! use mpsolve_core::traits::BigFloat;
//! use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
//!
//! let p = Precision::new(128).unwrap();
//! let r = RoundingMode::Nearest;
//!
//! // x^2 - 2 = 0, y - x = 0
//! let root = solve(
//!     Vector::parse(&["1", "1"], p, r).unwrap(),
//!     MpFloat::parse("1e-30", p, r).unwrap(),
//!     r,
//!     50,
//!     |v: &Vector<MpFloat>, r| {
//!         let two = MpFloat::from_i64(2, p, r);
//!         Ok(Vector::from(vec![v[0].mul(&v[0], r).sub(&two, r), v[1].sub(&v[0], r)]))
//!     },
//!     |v: &Vector<MpFloat>, r| {
//!         Ok(Matrix::from([
//!             [v[0].add(&v[0], r), MpFloat::zero(p)],
//!             [MpFloat::from_i64(-1, p, r), MpFloat::one(p)],
//!         ]))
//!     },
//! )
//! .unwrap();
//!
//! assert!((root[0].to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
//! assert!((root[1].to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
//! ```

mod config;
mod function;
mod multi_start;
mod newton_scalar;
mod newton_system;
mod state;

// Re-export public types at module level
pub use config::{NewtonConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use function::{FnEquation, FnSystem};
pub use multi_start::{distinct_roots, solve_multi_start};
pub use newton_scalar::ScalarNewtonSolver;
pub use newton_system::NewtonSolver;
pub use state::{IterationRecord, ScalarIterationRecord, ScalarSolution, Solution, SolverState};

use crate::math::linalg::{Matrix, Vector};
use crate::traits::BigFloat;
use crate::types::{NumberError, RoundingMode, SolverError};

/// Solve a square nonlinear system given as closures.
///
/// The system dimension is the length of `initial_guess`. Uses the
/// [`DenseSolver`](crate::math::linalg::DenseSolver) for correction steps.
///
/// # Returns
///
/// * `Ok(root)` - the residual norm at `root` is below `tolerance`
/// * `Err(SolverError::NotConverged)` - `max_iterations` updates were not enough
/// * `Err(SolverError::SingularJacobian)` - exactly singular Jacobian
pub fn solve<T, F, J>(
    initial_guess: Vector<T>,
    tolerance: T,
    rounding: RoundingMode,
    max_iterations: usize,
    residual_fn: F,
    jacobian_fn: J,
) -> Result<Vector<T>, SolverError<T>>
where
    T: BigFloat,
    F: Fn(&Vector<T>, RoundingMode) -> Result<Vector<T>, NumberError>,
    J: Fn(&Vector<T>, RoundingMode) -> Result<Matrix<T>, NumberError>,
{
    let system = FnSystem::new(initial_guess.len(), residual_fn, jacobian_fn);
    let config = NewtonConfig::new(tolerance, max_iterations, rounding)?;
    NewtonSolver::new(config)
        .solve(&system, initial_guess)
        .map(|solution| solution.root)
}
