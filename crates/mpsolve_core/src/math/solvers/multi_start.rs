//! Independent solves from several initial guesses.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::newton_system::NewtonSolver;
use super::state::Solution;
use crate::math::linalg::{LinearSolver, Vector};
use crate::traits::{BigFloat, NonlinearSystem};
use crate::types::{RoundingMode, SolverError};

/// Solve `system` once per initial guess.
///
/// Every solve owns its own iterate, residual and Jacobian; nothing is shared
/// except the read-only system and solver. With the `parallel` feature the
/// solves run on the rayon thread pool, otherwise sequentially. Results are
/// returned in the order of `guesses` either way.
///
/// # Example
///
/// ```
/// use mpsolve_core::math::linalg::Vector;
/// use mpsolve_core::math::solvers::{solve_multi_start, NewtonConfig, NewtonSolver};
/// use mpsolve_core::problems::CircleParabola;
/// use mpsolve_core::traits::BigFloat;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// let p = Precision::new(128).unwrap();
/// let solver = NewtonSolver::new(NewtonConfig::<MpFloat>::with_defaults(p).unwrap());
/// let guesses = vec![
///     Vector::parse(&["1.5", "1.5"], p, RoundingMode::Nearest).unwrap(),
///     Vector::parse(&["-1.5", "1.5"], p, RoundingMode::Nearest).unwrap(),
/// ];
///
/// let results = solve_multi_start(&solver, &CircleParabola, guesses);
/// let xs: Vec<f64> = results.iter().map(|r| r.as_ref().unwrap().root[0].to_f64()).collect();
/// assert!(xs[0] > 0.0 && xs[1] < 0.0);
/// ```
pub fn solve_multi_start<T, L, S>(
    solver: &NewtonSolver<T, L>,
    system: &S,
    guesses: Vec<Vector<T>>,
) -> Vec<Result<Solution<T>, SolverError<T>>>
where
    T: BigFloat,
    L: LinearSolver<T> + Sync,
    S: NonlinearSystem<T> + Sync + ?Sized,
{
    #[cfg(feature = "parallel")]
    let results: Vec<_> = guesses
        .into_par_iter()
        .map(|guess| solver.solve(system, guess))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = guesses
        .into_iter()
        .map(|guess| solver.solve(system, guess))
        .collect();

    results
}

/// Distinct roots among successful solutions, in first-seen order.
///
/// Two roots are the same when every component differs by less than
/// `separation`.
pub fn distinct_roots<T: BigFloat>(
    solutions: impl IntoIterator<Item = Solution<T>>,
    separation: &T,
    rounding: RoundingMode,
) -> Vec<Solution<T>> {
    let mut distinct: Vec<Solution<T>> = Vec::new();
    for candidate in solutions {
        let duplicate = distinct.iter().any(|known| {
            known
                .root
                .iter()
                .zip(candidate.root.iter())
                .all(|(a, b)| &a.sub(b, rounding).abs() < separation)
        });
        if !duplicate {
            distinct.push(candidate);
        }
    }
    distinct
}
