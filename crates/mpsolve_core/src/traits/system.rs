//! Nonlinear problems with closed-form derivatives.

use crate::math::linalg::{Matrix, Vector};
use crate::traits::BigFloat;
use crate::types::{NumberError, RoundingMode};

/// A square system of `dimension()` nonlinear equations in as many unknowns.
///
/// Implementations evaluate at the precision of the input point and round
/// every operation with the supplied mode. Both methods must be pure. The
/// solver trusts that `jacobian` is the derivative of `residual`; a mismatch
/// slows or prevents convergence but is not detected.
///
/// # Examples
///
/// ```
/// use mpsolve_core::math::linalg::{Matrix, Vector};
/// use mpsolve_core::traits::{BigFloat, NonlinearSystem};
/// use mpsolve_core::types::{NumberError, RoundingMode};
///
/// /// x - 1 = 0, y - 2 = 0
/// struct Shift;
///
/// impl<T: BigFloat> NonlinearSystem<T> for Shift {
///     fn dimension(&self) -> usize {
///         2
///     }
///
///     fn residual(&self, x: &Vector<T>, r: RoundingMode) -> Result<Vector<T>, NumberError> {
///         let p = x[0].precision();
///         Ok(Vector::from(vec![
///             x[0].sub(&T::from_i64(1, p, r), r),
///             x[1].sub(&T::from_i64(2, p, r), r),
///         ]))
///     }
///
///     fn jacobian(&self, x: &Vector<T>, r: RoundingMode) -> Result<Matrix<T>, NumberError> {
///         Ok(Matrix::identity(2, x[0].precision(), r))
///     }
/// }
/// ```
pub trait NonlinearSystem<T: BigFloat> {
    /// Number of equations and unknowns.
    fn dimension(&self) -> usize;

    /// Residual vector `f(x)`.
    fn residual(&self, x: &Vector<T>, rounding: RoundingMode) -> Result<Vector<T>, NumberError>;

    /// Jacobian matrix `J(x)` with `J[i][j] = d f_i / d x_j`.
    fn jacobian(&self, x: &Vector<T>, rounding: RoundingMode) -> Result<Matrix<T>, NumberError>;
}

/// A single nonlinear equation `f(x) = 0` with derivative `f'(x)`.
pub trait ScalarEquation<T: BigFloat> {
    /// `f(x)`.
    fn value(&self, x: &T, rounding: RoundingMode) -> Result<T, NumberError>;

    /// `f'(x)`.
    fn derivative(&self, x: &T, rounding: RoundingMode) -> Result<T, NumberError>;
}

impl<T: BigFloat, S: NonlinearSystem<T> + ?Sized> NonlinearSystem<T> for &S {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn residual(&self, x: &Vector<T>, rounding: RoundingMode) -> Result<Vector<T>, NumberError> {
        (**self).residual(x, rounding)
    }

    fn jacobian(&self, x: &Vector<T>, rounding: RoundingMode) -> Result<Matrix<T>, NumberError> {
        (**self).jacobian(x, rounding)
    }
}

impl<T: BigFloat, E: ScalarEquation<T> + ?Sized> ScalarEquation<T> for &E {
    fn value(&self, x: &T, rounding: RoundingMode) -> Result<T, NumberError> {
        (**self).value(x, rounding)
    }

    fn derivative(&self, x: &T, rounding: RoundingMode) -> Result<T, NumberError> {
        (**self).derivative(x, rounding)
    }
}
