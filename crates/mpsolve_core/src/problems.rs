//! Reference problems with known roots.
//!
//! - [`CircleParabola`]: `x^2 + y^2 - 4 = 0`, `x^2 - y - 1 = 0`
//! - [`Cubic`]: `x^3 - 2x - 5 = 0`
//! - [`ThreeSpheres`]: `x^2 + y^2 + z^2 - 14 = 0`, `xy - 2 = 0`, `yz - 6 = 0`
//!
//! All evaluate at the precision of their input and round every operation
//! with the supplied mode.

use crate::math::linalg::{Matrix, Vector};
use crate::traits::{BigFloat, NonlinearSystem, ScalarEquation};
use crate::types::{NumberError, RoundingMode};

/// Intersection of the circle `x^2 + y^2 = 4` with the parabola `y = x^2 - 1`.
///
/// Real roots are `(+-sqrt((1 + sqrt(13)) / 2), (sqrt(13) - 1) / 2)`,
/// approximately `(+-1.5174899135519797, 1.3027756377319946)`.
///
/// The Jacobian `[[2x, 2y], [2x, -1]]` has determinant `-2x(1 + 2y)`, which is
/// exactly zero on the line `x = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CircleParabola;

impl<T: BigFloat> NonlinearSystem<T> for CircleParabola {
    fn dimension(&self) -> usize {
        2
    }

    fn residual(&self, v: &Vector<T>, r: RoundingMode) -> Result<Vector<T>, NumberError> {
        let (x, y) = (&v[0], &v[1]);
        let p = x.precision();
        let x2 = x.square(r);
        let f1 = x2.add(&y.square(r), r).sub(&T::from_i64(4, p, r), r);
        let f2 = x2.sub(y, r).sub(&T::from_i64(1, p, r), r);
        Ok(Vector::from(vec![f1, f2]))
    }

    fn jacobian(&self, v: &Vector<T>, r: RoundingMode) -> Result<Matrix<T>, NumberError> {
        let (x, y) = (&v[0], &v[1]);
        let p = x.precision();
        let two_x = x.add(x, r);
        let two_y = y.add(y, r);
        Ok(Matrix::from([
            [two_x.clone(), two_y],
            [two_x, T::from_i64(-1, p, r)],
        ]))
    }
}

/// The cubic `x^3 - 2x - 5`, with its single real root near `2.0945514815423265`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cubic;

impl<T: BigFloat> ScalarEquation<T> for Cubic {
    fn value(&self, x: &T, r: RoundingMode) -> Result<T, NumberError> {
        let p = x.precision();
        let x3 = x.powi(3, r);
        let two_x = x.add(x, r);
        Ok(x3.sub(&two_x, r).sub(&T::from_i64(5, p, r), r))
    }

    fn derivative(&self, x: &T, r: RoundingMode) -> Result<T, NumberError> {
        let p = x.precision();
        let three_x2 = x.square(r).mul(&T::from_i64(3, p, r), r);
        Ok(three_x2.sub(&T::from_i64(2, p, r), r))
    }
}

/// Three quadrics in three unknowns with a root at `(1, 2, 3)`.
///
/// Needs a linear solver that handles more than two unknowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreeSpheres;

impl<T: BigFloat> NonlinearSystem<T> for ThreeSpheres {
    fn dimension(&self) -> usize {
        3
    }

    fn residual(&self, v: &Vector<T>, r: RoundingMode) -> Result<Vector<T>, NumberError> {
        let (x, y, z) = (&v[0], &v[1], &v[2]);
        let p = x.precision();
        let f1 = x
            .square(r)
            .add(&y.square(r), r)
            .add(&z.square(r), r)
            .sub(&T::from_i64(14, p, r), r);
        let f2 = x.mul(y, r).sub(&T::from_i64(2, p, r), r);
        let f3 = y.mul(z, r).sub(&T::from_i64(6, p, r), r);
        Ok(Vector::from(vec![f1, f2, f3]))
    }

    fn jacobian(&self, v: &Vector<T>, r: RoundingMode) -> Result<Matrix<T>, NumberError> {
        let (x, y, z) = (&v[0], &v[1], &v[2]);
        let zero = T::zero(x.precision());
        Ok(Matrix::from([
            [x.add(x, r), y.add(y, r), z.add(z, r)],
            [y.clone(), x.clone(), zero.clone()],
            [zero, z.clone(), y.clone()],
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MpFloat, Precision};

    const N: RoundingMode = RoundingMode::Nearest;

    fn point(values: &[&str]) -> Vector<MpFloat> {
        Vector::parse(values, Precision::new(128).unwrap(), N).unwrap()
    }

    #[test]
    fn test_circle_parabola_residual() {
        let f = CircleParabola.residual(&point(&["2", "1"]), N).unwrap();
        assert_eq!(f.to_f64_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_circle_parabola_jacobian_singular_on_axis() {
        let j = CircleParabola.jacobian(&point(&["0", "1.5"]), N).unwrap();
        assert!(j[(0, 0)].is_zero());
        assert!(j[(1, 0)].is_zero());
        assert_eq!(j[(0, 1)].to_f64(), 3.0);
        assert_eq!(j[(1, 1)].to_f64(), -1.0);
    }

    #[test]
    fn test_cubic_value_and_derivative() {
        let x = MpFloat::from_i64(2, Precision::new(64).unwrap(), N);
        assert_eq!(Cubic.value(&x, N).unwrap().to_f64(), -1.0);
        assert_eq!(Cubic.derivative(&x, N).unwrap().to_f64(), 10.0);
    }

    #[test]
    fn test_three_spheres_root() {
        let f = ThreeSpheres.residual(&point(&["1", "2", "3"]), N).unwrap();
        assert!(f.iter().all(BigFloat::is_zero));

        let j = ThreeSpheres.jacobian(&point(&["1", "2", "3"]), N).unwrap();
        assert_eq!(j.row(0).iter().map(BigFloat::to_f64).collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
        assert_eq!(j.row(2).iter().map(BigFloat::to_f64).collect::<Vec<_>>(), vec![0.0, 3.0, 2.0]);
    }
}
