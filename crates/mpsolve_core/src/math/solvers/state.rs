//! Iteration state and results shared by the Newton drivers.

use crate::math::linalg::Vector;
use crate::traits::{BigFloat, NonlinearSystem};
use crate::types::{RoundingMode, SolverError};

/// Current iterate of a system solve together with its residual.
///
/// The residual is evaluated whenever the iterate changes, so `residual()`
/// is always `f(x())` for the current `x()`; a new iterate is never
/// observable before its residual has been computed.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverState<T> {
    x: Vector<T>,
    f: Vector<T>,
    norm: T,
    iteration: usize,
}

impl<T: BigFloat> SolverState<T> {
    /// Evaluate the system at `initial_guess` and start at iteration 0.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::DimensionMismatch`] if the system returns a
    /// residual of the wrong length, or [`SolverError::Number`] if the
    /// evaluation itself fails.
    pub fn new<S: NonlinearSystem<T> + ?Sized>(
        system: &S,
        initial_guess: Vector<T>,
        rounding: RoundingMode,
    ) -> Result<Self, SolverError<T>> {
        let (f, norm) = evaluate(system, &initial_guess, rounding)?;
        Ok(Self {
            x: initial_guess,
            f,
            norm,
            iteration: 0,
        })
    }

    /// Apply the Newton correction `x <- x + delta` and re-evaluate.
    ///
    /// The state is left untouched if evaluation at the new point fails.
    pub fn advance<S: NonlinearSystem<T> + ?Sized>(
        &mut self,
        system: &S,
        delta: &Vector<T>,
        rounding: RoundingMode,
    ) -> Result<(), SolverError<T>> {
        let x = self.x.add(delta, rounding);
        let (f, norm) = evaluate(system, &x, rounding)?;
        self.x = x;
        self.f = f;
        self.norm = norm;
        self.iteration += 1;
        Ok(())
    }

    /// Current iterate.
    pub fn x(&self) -> &Vector<T> {
        &self.x
    }

    /// Residual at the current iterate.
    pub fn residual(&self) -> &Vector<T> {
        &self.f
    }

    /// Euclidean norm of the residual.
    pub fn residual_norm(&self) -> &T {
        &self.norm
    }

    /// Number of Newton updates applied so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Borrowed view for observers.
    pub fn record(&self) -> IterationRecord<'_, T> {
        IterationRecord {
            iteration: self.iteration,
            x: &self.x,
            residual: &self.f,
            residual_norm: &self.norm,
        }
    }

    /// Consume the state as a converged solution.
    pub fn into_solution(self) -> Solution<T> {
        Solution {
            root: self.x,
            residual: self.f,
            residual_norm: self.norm,
            iterations: self.iteration,
        }
    }

    /// Consume the state, returning the iterate.
    pub fn into_x(self) -> Vector<T> {
        self.x
    }
}

fn evaluate<T: BigFloat, S: NonlinearSystem<T> + ?Sized>(
    system: &S,
    x: &Vector<T>,
    rounding: RoundingMode,
) -> Result<(Vector<T>, T), SolverError<T>> {
    let f = system.residual(x, rounding)?;
    if f.len() != x.len() {
        return Err(SolverError::DimensionMismatch {
            expected: x.len(),
            got: f.len(),
        });
    }
    let norm = f.euclidean_norm(rounding)?;
    Ok((f, norm))
}

/// Snapshot of one evaluated iterate, passed to observers.
///
/// Iteration 0 is the initial guess; iteration `k` is the point after `k`
/// Newton updates.
#[derive(Debug, Clone, Copy)]
pub struct IterationRecord<'a, T> {
    /// Number of Newton updates applied
    pub iteration: usize,
    /// Iterate
    pub x: &'a Vector<T>,
    /// Residual at `x`
    pub residual: &'a Vector<T>,
    /// Euclidean norm of `residual`
    pub residual_norm: &'a T,
}

/// Successful system solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T> {
    /// Converged iterate
    pub root: Vector<T>,
    /// Residual at `root`
    pub residual: Vector<T>,
    /// Euclidean norm of `residual`, strictly below the tolerance
    pub residual_norm: T,
    /// Number of Newton updates performed
    pub iterations: usize,
}

/// Snapshot of one scalar iterate, passed to observers.
#[derive(Debug, Clone, Copy)]
pub struct ScalarIterationRecord<'a, T> {
    /// Number of Newton updates applied
    pub iteration: usize,
    /// Iterate
    pub x: &'a T,
    /// `f(x)`
    pub value: &'a T,
}

/// Successful scalar solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSolution<T> {
    /// Converged iterate
    pub root: T,
    /// `f(root)`, with absolute value strictly below the tolerance
    pub value: T,
    /// Number of Newton updates performed
    pub iterations: usize,
}
