//! Newton-Raphson driver for systems of nonlinear equations.

use tracing::{debug, info, warn};

use super::config::NewtonConfig;
use super::state::{IterationRecord, Solution, SolverState};
use crate::math::linalg::{DenseSolver, LinearSolver, Vector};
use crate::traits::{BigFloat, NonlinearSystem};
use crate::types::{LinearSolveError, SolverError};

/// Newton-Raphson solver for square nonlinear systems.
///
/// Each iteration evaluates the residual `f(x)`, stops if `||f(x)||_2` is
/// strictly below the tolerance, otherwise solves `J(x) * delta = -f(x)` with
/// the configured [`LinearSolver`] and moves to `x + delta`.
///
/// Convergence is judged on the residual norm only, never on the step size.
///
/// # Type Parameters
///
/// * `T` - Arbitrary-precision number type
/// * `L` - Linear solver for the correction step (defaults to [`DenseSolver`])
///
/// # Failure Modes
///
/// - [`SolverError::SingularJacobian`]: the Jacobian at the current iterate is exactly singular
/// - [`SolverError::NotConverged`]: the iteration budget ran out
///
/// Both carry the iterate at which the solve stopped. Malformed input
/// (wrong length, mixed precisions, non-positive tolerance) is rejected
/// before the first evaluation.
///
/// # Example
///
/// ```
/// use mpsolve_core::math::linalg::Vector;
/// use mpsolve_core::math::solvers::{NewtonConfig, NewtonSolver};
/// use mpsolve_core::problems::CircleParabola;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// let p = Precision::new(128).unwrap();
/// let config = NewtonConfig::<MpFloat>::with_defaults(p).unwrap();
/// let solver = NewtonSolver::new(config);
///
/// let guess = Vector::parse(&["1.5", "1.5"], p, RoundingMode::Nearest).unwrap();
/// let solution = solver.solve(&CircleParabola, guess).unwrap();
///
/// let root = solution.root.to_f64_vec();
/// assert!((root[0] - 1.5174899135519797).abs() < 1e-14);
/// assert!((root[1] - 1.3027756377319946).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonSolver<T, L = DenseSolver> {
    config: NewtonConfig<T>,
    linear_solver: L,
}

impl<T: BigFloat> NewtonSolver<T> {
    /// Create a solver using the [`DenseSolver`] for correction steps.
    pub fn new(config: NewtonConfig<T>) -> Self {
        Self {
            config,
            linear_solver: DenseSolver,
        }
    }
}

impl<T: BigFloat, L: LinearSolver<T>> NewtonSolver<T, L> {
    /// Create a solver with an explicit linear solver.
    pub fn with_linear_solver(config: NewtonConfig<T>, linear_solver: L) -> Self {
        Self {
            config,
            linear_solver,
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &NewtonConfig<T> {
        &self.config
    }

    /// Solve `system(x) = 0` starting from `initial_guess`.
    ///
    /// # Returns
    ///
    /// * `Ok(solution)` - `solution.residual_norm < tolerance`
    /// * `Err(SolverError::SingularJacobian)` - exactly singular Jacobian
    /// * `Err(SolverError::NotConverged)` - iteration budget exhausted
    pub fn solve<S>(
        &self,
        system: &S,
        initial_guess: Vector<T>,
    ) -> Result<Solution<T>, SolverError<T>>
    where
        S: NonlinearSystem<T> + ?Sized,
    {
        self.solve_with_observer(system, initial_guess, |_| {})
    }

    /// Solve like [`solve`](Self::solve), calling `observer` once for every
    /// evaluated iterate, the initial guess included.
    pub fn solve_with_observer<S, O>(
        &self,
        system: &S,
        initial_guess: Vector<T>,
        mut observer: O,
    ) -> Result<Solution<T>, SolverError<T>>
    where
        S: NonlinearSystem<T> + ?Sized,
        O: FnMut(&IterationRecord<'_, T>),
    {
        self.validate_input(system, &initial_guess)?;

        let rounding = self.config.rounding;
        let tolerance = &self.config.tolerance;
        let mut state = SolverState::new(system, initial_guess, rounding)?;

        loop {
            observer(&state.record());
            debug!(
                iteration = state.iteration(),
                residual_norm = state.residual_norm().to_f64(),
                "newton iteration"
            );

            if state.residual_norm() < tolerance {
                info!(
                    iterations = state.iteration(),
                    residual_norm = state.residual_norm().to_f64(),
                    "newton solve converged"
                );
                return Ok(state.into_solution());
            }

            if state.iteration() >= self.config.max_iterations {
                warn!(
                    iterations = state.iteration(),
                    residual_norm = state.residual_norm().to_f64(),
                    "newton solve did not converge"
                );
                let iterations = state.iteration();
                let residual_norm = state.residual_norm().clone();
                return Err(SolverError::NotConverged {
                    iterations,
                    last_iterate: state.into_x(),
                    residual_norm,
                });
            }

            let jacobian = system.jacobian(state.x(), rounding)?;
            let step = self
                .linear_solver
                .solve(&jacobian, state.residual(), rounding);
            let delta = match step {
                Ok(delta) => delta,
                Err(LinearSolveError::Singular) => {
                    warn!(iteration = state.iteration(), "singular jacobian");
                    return Err(SolverError::SingularJacobian {
                        iteration: state.iteration(),
                        at: state.into_x(),
                    });
                }
                Err(LinearSolveError::Number(e)) => return Err(e.into()),
                Err(e) => return Err(SolverError::LinearSolve(e)),
            };

            state.advance(system, &delta, rounding)?;
        }
    }

    fn validate_input<S>(&self, system: &S, initial_guess: &Vector<T>) -> Result<(), SolverError<T>>
    where
        S: NonlinearSystem<T> + ?Sized,
    {
        self.config.validate()?;

        let dimension = system.dimension();
        if dimension == 0 || initial_guess.len() != dimension {
            return Err(SolverError::DimensionMismatch {
                expected: dimension,
                got: initial_guess.len(),
            });
        }

        let precision = self.config.precision();
        if let Some(got) = initial_guess.find_precision_mismatch(precision) {
            return Err(SolverError::PrecisionMismatch {
                expected: precision,
                got,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linalg::{CramerSolver, GaussianElimination, Matrix};
    use crate::math::solvers::FnSystem;
    use crate::problems::{CircleParabola, ThreeSpheres};
    use crate::types::{MpFloat, Precision, RoundingMode};
    use approx::assert_relative_eq;

    const N: RoundingMode = RoundingMode::Nearest;

    fn p128() -> Precision {
        Precision::new(128).unwrap()
    }

    fn guess(values: &[&str], p: Precision) -> Vector<MpFloat> {
        Vector::parse(values, p, N).unwrap()
    }

    fn solver(p: Precision) -> NewtonSolver<MpFloat> {
        NewtonSolver::new(NewtonConfig::with_defaults(p).unwrap())
    }

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_circle_parabola_converges() {
        let solution = solver(p128())
            .solve(&CircleParabola, guess(&["1.5", "1.5"], p128()))
            .unwrap();

        let root = solution.root.to_f64_vec();
        assert_relative_eq!(root[0], 1.5174899135519797, epsilon = 1e-14);
        assert_relative_eq!(root[1], 1.3027756377319946, epsilon = 1e-14);
        assert!(solution.iterations <= 6);
        assert!(solution.residual_norm < solver(p128()).config().tolerance);
    }

    #[test]
    fn test_converged_guess_returns_immediately() {
        let solution = solver(p128())
            .solve(&CircleParabola, guess(&["1.5", "1.5"], p128()))
            .unwrap();
        let again = solver(p128()).solve(&CircleParabola, solution.root).unwrap();
        assert_eq!(again.iterations, 0);
    }

    #[test]
    fn test_three_spheres_with_gauss() {
        let config = NewtonConfig::with_defaults(p128()).unwrap();
        let solver = NewtonSolver::with_linear_solver(config, GaussianElimination);
        let solution = solver
            .solve(&ThreeSpheres, guess(&["1.2", "1.8", "3.2"], p128()))
            .unwrap();
        let root = solution.root.to_f64_vec();
        assert_relative_eq!(root[0], 1.0, epsilon = 1e-20);
        assert_relative_eq!(root[1], 2.0, epsilon = 1e-20);
        assert_relative_eq!(root[2], 3.0, epsilon = 1e-20);
    }

    #[test]
    fn test_observer_sees_every_iterate() {
        let mut norms = Vec::new();
        let solution = solver(p128())
            .solve_with_observer(&CircleParabola, guess(&["1.5", "1.5"], p128()), |record| {
                norms.push(record.residual_norm.to_f64());
            })
            .unwrap();
        assert_eq!(norms.len(), solution.iterations + 1);
        // Quadratic convergence: norms shrink monotonically near the root
        for pair in norms.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    // ========================================
    // Failure Tests
    // ========================================

    #[test]
    fn test_singular_jacobian_at_guess() {
        let result = solver(p128()).solve(&CircleParabola, guess(&["0", "1.5"], p128()));
        match result {
            Err(SolverError::SingularJacobian { iteration, at }) => {
                assert_eq!(iteration, 0);
                assert_eq!(at.to_f64_vec(), vec![0.0, 1.5]);
            }
            other => panic!("expected SingularJacobian, got {:?}", other),
        }
    }

    #[test]
    fn test_singular_jacobian_after_a_step() {
        // x^2 + 1 = 0, y = 0: the first step from (1, 5) lands on x = 0
        let system = FnSystem::new(
            2,
            |v: &Vector<MpFloat>, r| {
                let one = MpFloat::one(v[0].precision());
                Ok(Vector::from(vec![v[0].square(r).add(&one, r), v[1].clone()]))
            },
            |v: &Vector<MpFloat>, r| {
                let p = v[0].precision();
                Ok(Matrix::from([
                    [v[0].add(&v[0], r), MpFloat::zero(p)],
                    [MpFloat::zero(p), MpFloat::one(p)],
                ]))
            },
        );
        let result = solver(p128()).solve(&system, guess(&["1", "5"], p128()));
        match result {
            Err(SolverError::SingularJacobian { iteration, at }) => {
                assert_eq!(iteration, 1);
                assert_eq!(at.to_f64_vec(), vec![0.0, 0.0]);
            }
            other => panic!("expected SingularJacobian, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let config = NewtonConfig::with_defaults(p128())
            .unwrap()
            .with_max_iterations(1);
        let result = NewtonSolver::new(config).solve(&CircleParabola, guess(&["1.5", "1.5"], p128()));
        match result {
            Err(SolverError::NotConverged {
                iterations,
                last_iterate,
                residual_norm,
            }) => {
                assert_eq!(iterations, 1);
                assert_eq!(last_iterate.len(), 2);
                assert!(residual_norm.to_f64() > 1e-25);
            }
            other => panic!("expected NotConverged, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_budget_evaluates_guess_once() {
        let config = NewtonConfig::with_defaults(p128())
            .unwrap()
            .with_max_iterations(0);
        let result = NewtonSolver::new(config).solve(&CircleParabola, guess(&["1.5", "1.5"], p128()));
        assert!(matches!(
            result,
            Err(SolverError::NotConverged { iterations: 0, .. })
        ));
    }

    #[test]
    fn test_cramer_rejects_three_unknowns() {
        let config = NewtonConfig::with_defaults(p128()).unwrap();
        let solver = NewtonSolver::with_linear_solver(config, CramerSolver);
        let result = solver.solve(&ThreeSpheres, guess(&["1.2", "1.8", "3.2"], p128()));
        assert!(matches!(
            result,
            Err(SolverError::LinearSolve(LinearSolveError::UnsupportedDimension { .. }))
        ));
    }

    // ========================================
    // Input Validation Tests
    // ========================================

    #[test]
    fn test_dimension_mismatch() {
        let result = solver(p128()).solve(&CircleParabola, guess(&["1.5"], p128()));
        assert!(matches!(
            result,
            Err(SolverError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_precision_mismatch() {
        let low = Precision::new(64).unwrap();
        let result = solver(p128()).solve(&CircleParabola, guess(&["1.5", "1.5"], low));
        assert_eq!(
            result,
            Err(SolverError::PrecisionMismatch {
                expected: p128(),
                got: low
            })
        );
    }
}
