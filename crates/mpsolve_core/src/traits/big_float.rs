//! Interface to an arbitrary-precision floating-point backend.

use std::fmt;

use crate::types::{NumberError, Precision, RoundingMode};

/// Arbitrary-precision floating-point number with explicit rounding.
///
/// Every value knows its own [`Precision`]. Every inexact operation takes the
/// [`RoundingMode`] to apply; negation and absolute value are exact and take
/// none. Partial ordering compares numeric values regardless of precision.
///
/// The Newton drivers, vectors, matrices and linear solvers are written
/// against this trait only.
///
/// # Examples
///
/// ```
/// use mpsolve_core::traits::BigFloat;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// fn hypot<T: BigFloat>(a: &T, b: &T, r: RoundingMode) -> T {
///     let sum = a.mul(a, r).add(&b.mul(b, r), r);
///     sum.sqrt(r).unwrap()
/// }
///
/// let p = Precision::new(64).unwrap();
/// let r = RoundingMode::Nearest;
/// let h = hypot(&MpFloat::from_i64(3, p, r), &MpFloat::from_i64(4, p, r), r);
/// assert_eq!(h.to_f64(), 5.0);
/// ```
pub trait BigFloat: Clone + fmt::Debug + fmt::Display + PartialOrd + Send + Sync {
    /// Exact zero at `precision`.
    fn zero(precision: Precision) -> Self;

    /// Integer `value` rounded to `precision`.
    fn from_i64(value: i64, precision: Precision, rounding: RoundingMode) -> Self;

    /// Machine float `value` rounded to `precision`.
    ///
    /// # Errors
    ///
    /// Fails on NaN and infinities.
    fn from_f64(value: f64, precision: Precision, rounding: RoundingMode)
        -> Result<Self, NumberError>;

    /// Decimal string rounded to `precision`.
    ///
    /// # Errors
    ///
    /// Fails when `input` is not a decimal number.
    fn parse(input: &str, precision: Precision, rounding: RoundingMode) -> Result<Self, NumberError>;

    /// Precision this value was produced at.
    fn precision(&self) -> Precision;

    /// `self + rhs`, rounded.
    fn add(&self, rhs: &Self, rounding: RoundingMode) -> Self;

    /// `self - rhs`, rounded.
    fn sub(&self, rhs: &Self, rounding: RoundingMode) -> Self;

    /// `self * rhs`, rounded.
    fn mul(&self, rhs: &Self, rounding: RoundingMode) -> Self;

    /// `self / rhs`, rounded.
    ///
    /// # Errors
    ///
    /// Fails with [`NumberError::DivisionByZero`] when `rhs` is exactly zero.
    fn div(&self, rhs: &Self, rounding: RoundingMode) -> Result<Self, NumberError>;

    /// Square root, rounded.
    ///
    /// # Errors
    ///
    /// Fails with [`NumberError::NegativeSqrt`] when `self < 0`.
    fn sqrt(&self, rounding: RoundingMode) -> Result<Self, NumberError>;

    /// Exact negation.
    fn neg(&self) -> Self;

    /// Exact absolute value.
    fn abs(&self) -> Self;

    /// Exact-zero test.
    fn is_zero(&self) -> bool;

    /// Strictly below zero.
    fn is_negative(&self) -> bool;

    /// Nearest machine float, for logging and reporting.
    fn to_f64(&self) -> f64;

    /// `self * self`, rounded.
    fn square(&self, rounding: RoundingMode) -> Self {
        self.mul(self, rounding)
    }

    /// `self^exponent` by repeated squaring, each product rounded.
    fn powi(&self, exponent: u32, rounding: RoundingMode) -> Self {
        let mut result = Self::from_i64(1, self.precision(), rounding);
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base, rounding);
            }
            e >>= 1;
            if e > 0 {
                base = base.square(rounding);
            }
        }
        result
    }
}
