//! Closure adapters for caller-supplied residuals and derivatives.

use std::fmt;

use crate::math::linalg::{Matrix, Vector};
use crate::traits::{BigFloat, NonlinearSystem, ScalarEquation};
use crate::types::{NumberError, RoundingMode};

/// A [`NonlinearSystem`] built from a residual closure and a Jacobian closure.
///
/// # Example
///
/// ```
/// use mpsolve_core::math::linalg::{Matrix, Vector};
/// use mpsolve_core::math::solvers::{FnSystem, NewtonConfig, NewtonSolver};
/// use mpsolve_core::traits::BigFloat;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// // x * y - 6 = 0, x - y - 1 = 0
/// let system = FnSystem::new(
///     2,
///     |v: &Vector<MpFloat>, r| {
///         let p = v[0].precision();
///         Ok(Vector::from(vec![
///             v[0].mul(&v[1], r).sub(&MpFloat::from_i64(6, p, r), r),
///             v[0].sub(&v[1], r).sub(&MpFloat::one(p), r),
///         ]))
///     },
///     |v: &Vector<MpFloat>, r| {
///         let p = v[0].precision();
///         Ok(Matrix::from([
///             [v[1].clone(), v[0].clone()],
///             [MpFloat::one(p), MpFloat::from_i64(-1, p, r)],
///         ]))
///     },
/// );
///
/// let p = Precision::new(128).unwrap();
/// let solver = NewtonSolver::new(NewtonConfig::with_defaults(p).unwrap());
/// let guess = Vector::parse(&["4", "2"], p, RoundingMode::Nearest).unwrap();
/// let root = solver.solve(&system, guess).unwrap().root.to_f64_vec();
/// assert!((root[0] - 3.0).abs() < 1e-20);
/// assert!((root[1] - 2.0).abs() < 1e-20);
/// ```
pub struct FnSystem<F, J> {
    dimension: usize,
    residual: F,
    jacobian: J,
}

impl<F, J> FnSystem<F, J> {
    /// Wrap the closures for a system of `dimension` equations.
    pub fn new<T>(dimension: usize, residual: F, jacobian: J) -> Self
    where
        T: BigFloat,
        F: Fn(&Vector<T>, RoundingMode) -> Result<Vector<T>, NumberError>,
        J: Fn(&Vector<T>, RoundingMode) -> Result<Matrix<T>, NumberError>,
    {
        Self {
            dimension,
            residual,
            jacobian,
        }
    }
}

impl<T, F, J> NonlinearSystem<T> for FnSystem<F, J>
where
    T: BigFloat,
    F: Fn(&Vector<T>, RoundingMode) -> Result<Vector<T>, NumberError>,
    J: Fn(&Vector<T>, RoundingMode) -> Result<Matrix<T>, NumberError>,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn residual(&self, x: &Vector<T>, rounding: RoundingMode) -> Result<Vector<T>, NumberError> {
        (self.residual)(x, rounding)
    }

    fn jacobian(&self, x: &Vector<T>, rounding: RoundingMode) -> Result<Matrix<T>, NumberError> {
        (self.jacobian)(x, rounding)
    }
}

impl<F, J> fmt::Debug for FnSystem<F, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSystem")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

/// A [`ScalarEquation`] built from a value closure and a derivative closure.
pub struct FnEquation<F, D> {
    value: F,
    derivative: D,
}

impl<F, D> FnEquation<F, D> {
    /// Wrap `f` and `f'`.
    pub fn new<T>(value: F, derivative: D) -> Self
    where
        T: BigFloat,
        F: Fn(&T, RoundingMode) -> Result<T, NumberError>,
        D: Fn(&T, RoundingMode) -> Result<T, NumberError>,
    {
        Self { value, derivative }
    }
}

impl<T, F, D> ScalarEquation<T> for FnEquation<F, D>
where
    T: BigFloat,
    F: Fn(&T, RoundingMode) -> Result<T, NumberError>,
    D: Fn(&T, RoundingMode) -> Result<T, NumberError>,
{
    fn value(&self, x: &T, rounding: RoundingMode) -> Result<T, NumberError> {
        (self.value)(x, rounding)
    }

    fn derivative(&self, x: &T, rounding: RoundingMode) -> Result<T, NumberError> {
        (self.derivative)(x, rounding)
    }
}

impl<F, D> fmt::Debug for FnEquation<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEquation").finish_non_exhaustive()
    }
}
