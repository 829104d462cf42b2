//! Cramer's rule for one or two unknowns.

use super::{check_shape, LinearSolver, Matrix, Vector};
use crate::traits::BigFloat;
use crate::types::{LinearSolveError, RoundingMode};

/// Closed-form determinant solve.
///
/// For two unknowns:
///
/// ```text
/// det    = J00*J11 - J01*J10
/// delta0 = (-f0*J11 - -f1*J01) / det
/// delta1 = (J00*-f1 - J10*-f0) / det
/// ```
///
/// A determinant that is exactly zero fails with
/// [`LinearSolveError::Singular`] before any division. For one unknown the
/// determinant is `J00` itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CramerSolver;

impl CramerSolver {
    /// Largest system this solver accepts.
    pub const MAX_DIMENSION: usize = 2;
}

impl<T: BigFloat> LinearSolver<T> for CramerSolver {
    fn solve(
        &self,
        jacobian: &Matrix<T>,
        residual: &Vector<T>,
        rounding: RoundingMode,
    ) -> Result<Vector<T>, LinearSolveError> {
        let n = check_shape(jacobian, residual)?;
        match n {
            0 => Ok(Vector::from(Vec::new())),
            1 => {
                let j00 = &jacobian[(0, 0)];
                if j00.is_zero() {
                    return Err(LinearSolveError::Singular);
                }
                let delta0 = residual[0].neg().div(j00, rounding)?;
                Ok(Vector::from(vec![delta0]))
            }
            2 => {
                let (j00, j01) = (&jacobian[(0, 0)], &jacobian[(0, 1)]);
                let (j10, j11) = (&jacobian[(1, 0)], &jacobian[(1, 1)]);

                let det = j00.mul(j11, rounding).sub(&j01.mul(j10, rounding), rounding);
                if det.is_zero() {
                    return Err(LinearSolveError::Singular);
                }

                let neg_f0 = residual[0].neg();
                let neg_f1 = residual[1].neg();

                let num0 = neg_f0
                    .mul(j11, rounding)
                    .sub(&neg_f1.mul(j01, rounding), rounding);
                let num1 = j00
                    .mul(&neg_f1, rounding)
                    .sub(&j10.mul(&neg_f0, rounding), rounding);

                let delta0 = num0.div(&det, rounding)?;
                let delta1 = num1.div(&det, rounding)?;
                Ok(Vector::from(vec![delta0, delta1]))
            }
            dimension => Err(LinearSolveError::UnsupportedDimension {
                dimension,
                max: Self::MAX_DIMENSION,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MpFloat, Precision};

    const N: RoundingMode = RoundingMode::Nearest;

    fn mp(v: f64) -> MpFloat {
        MpFloat::from_f64(v, Precision::new(128).unwrap(), N).unwrap()
    }

    fn matrix(rows: &[&[f64]]) -> Matrix<MpFloat> {
        Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&v| mp(v)).collect()).collect())
            .unwrap()
    }

    // ========================================
    // Two Unknowns
    // ========================================

    #[test]
    fn test_two_by_two_solution() {
        // J = [[3, 1], [1, 2]], -f = [9, 8] => delta = [2, 3]
        let j = matrix(&[&[3.0, 1.0], &[1.0, 2.0]]);
        let f = Vector::from(vec![mp(-9.0), mp(-8.0)]);
        let delta = CramerSolver.solve(&j, &f, N).unwrap();
        assert_eq!(delta.to_f64_vec(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_solution_satisfies_system() {
        let j = matrix(&[&[3.0, 3.0], &[3.0, -1.0]]);
        let f = Vector::from(vec![mp(0.25), mp(-0.75)]);
        let delta = CramerSolver.solve(&j, &f, N).unwrap();

        let lhs = j.mul_vector(&delta, N).unwrap();
        let rhs = f.neg();
        for (a, b) in lhs.iter().zip(rhs.iter()) {
            assert!((a.to_f64() - b.to_f64()).abs() < 1e-30);
        }
    }

    #[test]
    fn test_exactly_zero_determinant_is_singular() {
        // Jacobian of the circle/parabola system at (0, 1.5): [[0, 3], [0, -1]]
        let j = matrix(&[&[0.0, 3.0], &[0.0, -1.0]]);
        let f = Vector::from(vec![mp(-1.75), mp(-2.5)]);
        assert_eq!(CramerSolver.solve(&j, &f, N), Err(LinearSolveError::Singular));
    }

    #[test]
    fn test_tiny_determinant_is_not_singular() {
        let j = matrix(&[&[1e-200, 0.0], &[0.0, 1e-200]]);
        let f = Vector::from(vec![mp(-1e-200), mp(-2e-200)]);
        let delta = CramerSolver.solve(&j, &f, N).unwrap();
        assert!((delta[0].to_f64() - 1.0).abs() < 1e-12);
        assert!((delta[1].to_f64() - 2.0).abs() < 1e-12);
    }

    // ========================================
    // Other Sizes
    // ========================================

    #[test]
    fn test_single_unknown() {
        let j = matrix(&[&[4.0]]);
        let f = Vector::from(vec![mp(2.0)]);
        assert_eq!(CramerSolver.solve(&j, &f, N).unwrap().to_f64_vec(), vec![-0.5]);

        let zero = matrix(&[&[0.0]]);
        assert_eq!(
            CramerSolver.solve(&zero, &f, N),
            Err(LinearSolveError::Singular)
        );
    }

    #[test]
    fn test_three_unknowns_unsupported() {
        let j = matrix(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        let f = Vector::from(vec![mp(1.0), mp(1.0), mp(1.0)]);
        assert_eq!(
            CramerSolver.solve(&j, &f, N),
            Err(LinearSolveError::UnsupportedDimension {
                dimension: 3,
                max: 2
            })
        );
    }
}
