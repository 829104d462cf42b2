//! Newton-Raphson driver for a single equation.

use tracing::{debug, info, warn};

use super::config::NewtonConfig;
use super::state::{ScalarIterationRecord, ScalarSolution};
use crate::math::linalg::Vector;
use crate::traits::{BigFloat, ScalarEquation};
use crate::types::SolverError;

/// Newton-Raphson root finder for `f(x) = 0`.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops when `|f(x_n)|` is
/// strictly below the tolerance. A derivative that is exactly zero is
/// reported as [`SolverError::SingularJacobian`]; there is no near-zero
/// threshold.
///
/// Failure variants carry the iterate as a one-component [`Vector`].
///
/// # Example
///
/// ```
/// use mpsolve_core::math::solvers::{NewtonConfig, ScalarNewtonSolver};
/// use mpsolve_core::problems::Cubic;
/// use mpsolve_core::traits::BigFloat;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// let p = Precision::new(128).unwrap();
/// let config = NewtonConfig::<MpFloat>::from_decimal("1e-30", p, 100, RoundingMode::Nearest).unwrap();
/// let solver = ScalarNewtonSolver::new(config);
///
/// let x0 = MpFloat::from_i64(2, p, RoundingMode::Nearest);
/// let solution = solver.solve(&Cubic, x0).unwrap();
/// assert!((solution.root.to_f64() - 2.0945514815423265).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct ScalarNewtonSolver<T> {
    config: NewtonConfig<T>,
}

impl<T: BigFloat> ScalarNewtonSolver<T> {
    /// Create a new scalar solver with the given configuration.
    pub fn new(config: NewtonConfig<T>) -> Self {
        Self { config }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &NewtonConfig<T> {
        &self.config
    }

    /// Find a root of `equation` starting from `x0`.
    ///
    /// # Returns
    ///
    /// * `Ok(solution)` - `|f(solution.root)| < tolerance`
    /// * `Err(SolverError::SingularJacobian)` - `f'(x)` is exactly zero
    /// * `Err(SolverError::NotConverged)` - iteration budget exhausted
    pub fn solve<E>(&self, equation: &E, x0: T) -> Result<ScalarSolution<T>, SolverError<T>>
    where
        E: ScalarEquation<T> + ?Sized,
    {
        self.solve_with_observer(equation, x0, |_| {})
    }

    /// Solve like [`solve`](Self::solve), calling `observer` for every
    /// evaluated iterate.
    pub fn solve_with_observer<E, O>(
        &self,
        equation: &E,
        x0: T,
        mut observer: O,
    ) -> Result<ScalarSolution<T>, SolverError<T>>
    where
        E: ScalarEquation<T> + ?Sized,
        O: FnMut(&ScalarIterationRecord<'_, T>),
    {
        self.config.validate()?;
        let precision = self.config.precision();
        if x0.precision() != precision {
            return Err(SolverError::PrecisionMismatch {
                expected: precision,
                got: x0.precision(),
            });
        }

        let rounding = self.config.rounding;
        let mut x = x0;
        let mut iteration = 0;

        loop {
            let fx = equation.value(&x, rounding)?;
            let magnitude = fx.abs();
            observer(&ScalarIterationRecord {
                iteration,
                x: &x,
                value: &fx,
            });
            debug!(iteration, residual = magnitude.to_f64(), "scalar newton iteration");

            if magnitude < self.config.tolerance {
                info!(iterations = iteration, "scalar newton solve converged");
                return Ok(ScalarSolution {
                    root: x,
                    value: fx,
                    iterations: iteration,
                });
            }

            if iteration >= self.config.max_iterations {
                warn!(iterations = iteration, "scalar newton solve did not converge");
                return Err(SolverError::NotConverged {
                    iterations: iteration,
                    last_iterate: Vector::from(vec![x]),
                    residual_norm: magnitude,
                });
            }

            let derivative = equation.derivative(&x, rounding)?;
            if derivative.is_zero() {
                warn!(iteration, "zero derivative");
                return Err(SolverError::SingularJacobian {
                    iteration,
                    at: Vector::from(vec![x]),
                });
            }

            let step = fx.div(&derivative, rounding)?;
            x = x.sub(&step, rounding);
            iteration += 1;
        }
    }
}
