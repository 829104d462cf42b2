//! π and the circular functions for [`MpFloat`].
//!
//! The backend offers no π constant and no trigonometry, so both are built
//! from the basic operations: Machin's formula for π, quadrant reduction by
//! `π/2` and Taylor series for `sin`/`cos`. Series run at the target
//! precision plus guard bits under round-to-nearest; the result is rounded
//! once to the target precision in the caller's mode.

use super::error::NumberError;
use super::number::MpFloat;
use super::precision::{Precision, RoundingMode};
use crate::traits::BigFloat;

/// Extra bits carried through series evaluation.
const GUARD_BITS: usize = 32;

const N: RoundingMode = RoundingMode::Nearest;

impl MpFloat {
    /// π at `precision`.
    ///
    /// # Example
    ///
    /// ```
    /// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
    ///
    /// let pi = MpFloat::pi(Precision::new(64).unwrap(), RoundingMode::Nearest);
    /// assert_eq!(pi.to_decimal_string(10), "3.1415926536");
    /// ```
    pub fn pi(precision: Precision, rounding: RoundingMode) -> Self {
        pi_at(precision.widened(GUARD_BITS)).round_to(precision, rounding)
    }

    /// Sine of `self` (radians).
    pub fn sin(&self, rounding: RoundingMode) -> Self {
        let (r, quadrant) = reduce(self);
        let value = match quadrant {
            0 => sin_series(&r),
            1 => cos_series(&r),
            2 => sin_series(&r).neg(),
            _ => cos_series(&r).neg(),
        };
        value.round_to(self.precision(), rounding)
    }

    /// Cosine of `self` (radians).
    pub fn cos(&self, rounding: RoundingMode) -> Self {
        let (r, quadrant) = reduce(self);
        let value = match quadrant {
            0 => cos_series(&r),
            1 => sin_series(&r).neg(),
            2 => cos_series(&r).neg(),
            _ => sin_series(&r),
        };
        value.round_to(self.precision(), rounding)
    }

    /// Tangent of `self` (radians).
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::DivisionByZero`] if the cosine evaluates to
    /// exactly zero.
    pub fn tan(&self, rounding: RoundingMode) -> Result<Self, NumberError> {
        let (r, quadrant) = reduce(self);
        let (s, c) = (sin_series(&r), cos_series(&r));
        let value = if quadrant % 2 == 0 {
            s.div(&c, N)?
        } else {
            c.div(&s, N)?.neg()
        };
        Ok(value.round_to(self.precision(), rounding))
    }
}

/// `2^-bits` at `precision`, the cut-off for series terms.
fn epsilon(precision: Precision) -> MpFloat {
    let scale = MpFloat::from_i64(2, precision, N).powi(precision.bits() as u32, N);
    MpFloat::one(precision).quotient(&scale, N)
}

/// π = 16·atan(1/5) − 4·atan(1/239).
fn pi_at(precision: Precision) -> MpFloat {
    let sixteen = MpFloat::from_i64(16, precision, N);
    let four = MpFloat::from_i64(4, precision, N);
    arctan_inverse(5, precision)
        .mul(&sixteen, N)
        .sub(&arctan_inverse(239, precision).mul(&four, N), N)
}

/// `atan(1/k)` for an integer `k > 1`.
fn arctan_inverse(k: i64, precision: Precision) -> MpFloat {
    let eps = epsilon(precision);
    let k_squared = MpFloat::from_i64(k * k, precision, N);
    // 1 / k^(2n+1)
    let mut power = MpFloat::one(precision).quotient(&MpFloat::from_i64(k, precision, N), N);
    let mut sum = power.clone();
    let mut n: i64 = 1;
    loop {
        power = power.quotient(&k_squared, N);
        if power < eps {
            return sum;
        }
        let term = power.quotient(&MpFloat::from_i64(2 * n + 1, precision, N), N);
        sum = if n % 2 == 1 {
            sum.sub(&term, N)
        } else {
            sum.add(&term, N)
        };
        n += 1;
    }
}

/// Split `x` into `r = x - k·π/2` with `|r| <= π/4` (up to rounding) and
/// the quadrant `k mod 4`.
///
/// Works at the precision of `x` widened by the guard bits and by the
/// integer bits of `x`, so the cancellation in `x - k·π/2` leaves the full
/// target precision in `r`.
fn reduce(x: &MpFloat) -> (MpFloat, usize) {
    let precision = x.precision().widened(GUARD_BITS + x.integer_bits());
    let x = x.round_to(precision, N);
    let half_pi = pi_at(precision).quotient(&MpFloat::from_i64(2, precision, N), N);

    let k = x.quotient(&half_pi, N).round_integer();
    let r = x.sub(&k.mul(&half_pi, N), N);

    let quarter = k.quotient(&MpFloat::from_i64(4, precision, N), N);
    let quadrant = quarter
        .sub(&quarter.floor(), N)
        .mul(&MpFloat::from_i64(4, precision, N), N)
        .to_f64() as usize;
    (r, quadrant)
}

/// Taylor series of `sin(r)` for small `|r|`.
fn sin_series(r: &MpFloat) -> MpFloat {
    let precision = r.precision();
    let eps = epsilon(precision);
    let r_squared = r.square(N);
    let mut term = r.clone();
    let mut sum = r.clone();
    let mut n: i64 = 1;
    loop {
        let divisor = MpFloat::from_i64(2 * n * (2 * n + 1), precision, N);
        term = term.mul(&r_squared, N).quotient(&divisor, N).neg();
        if term.abs() < eps {
            return sum;
        }
        sum = sum.add(&term, N);
        n += 1;
    }
}

/// Taylor series of `cos(r)` for small `|r|`.
fn cos_series(r: &MpFloat) -> MpFloat {
    let precision = r.precision();
    let eps = epsilon(precision);
    let r_squared = r.square(N);
    let mut term = MpFloat::one(precision);
    let mut sum = term.clone();
    let mut n: i64 = 1;
    loop {
        let divisor = MpFloat::from_i64((2 * n - 1) * (2 * n), precision, N);
        term = term.mul(&r_squared, N).quotient(&divisor, N).neg();
        if term.abs() < eps {
            return sum;
        }
        sum = sum.add(&term, N);
        n += 1;
    }
}
