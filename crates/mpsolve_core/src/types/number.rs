//! Arbitrary-precision binary floating-point numbers.
//!
//! [`MpFloat`] wraps a `dashu-float` binary float together with the
//! [`Precision`] it was created at. Every rounded operation receives the
//! [`RoundingMode`] explicitly; the stored value itself carries no rounding
//! policy.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dashu_float::round::mode;
use dashu_float::{Context, FBig};

use super::error::NumberError;
use super::precision::{Precision, RoundingMode};
use crate::traits::BigFloat;

/// Storage representation. The rounding parameter is irrelevant for storage
/// because every operation re-selects its mode through `with_rounding_mode!`.
type Inner = FBig<mode::HalfEven, 2>;

/// Dispatches a runtime [`RoundingMode`] onto the matching `dashu-float`
/// rounding type, bound to `$mode` inside `$body`.
macro_rules! with_rounding_mode {
    ($rounding:expr, $mode:ident => $body:expr) => {
        match $rounding {
            RoundingMode::Nearest => {
                type $mode = mode::HalfEven;
                $body
            }
            RoundingMode::TowardZero => {
                type $mode = mode::Zero;
                $body
            }
            RoundingMode::TowardPositive => {
                type $mode = mode::Up;
                $body
            }
            RoundingMode::TowardNegative => {
                type $mode = mode::Down;
                $body
            }
        }
    };
}

/// Arbitrary-precision binary floating-point number.
///
/// Values are always finite. Binary operations produce a result at the larger
/// of the two operand precisions; within one solve all operands share a
/// precision, so results stay at the precision of the inputs.
///
/// # Examples
///
/// ```
/// use mpsolve_core::traits::BigFloat;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// let p = Precision::new(128).unwrap();
/// let r = RoundingMode::Nearest;
///
/// let two = MpFloat::from_i64(2, p, r);
/// let root = two.sqrt(r).unwrap();
/// assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
/// assert_eq!(root.precision(), p);
/// ```
#[derive(Clone)]
pub struct MpFloat {
    value: Inner,
    precision: Precision,
}

impl MpFloat {
    fn from_inner(value: Inner, precision: Precision) -> Self {
        Self { value, precision }
    }

    fn common_precision(&self, rhs: &Self) -> Precision {
        self.precision.max(rhs.precision)
    }

    /// Parse a decimal string such as `"1.5"`, `"-0.25"` or `"1e-25"`.
    ///
    /// The decimal value is rounded once, directly to `precision` bits.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::Parse`] if `input` is not a decimal number.
    pub fn parse(
        input: &str,
        precision: Precision,
        rounding: RoundingMode,
    ) -> Result<Self, NumberError> {
        let trimmed = input.trim();
        let value = with_rounding_mode!(rounding, R => {
            let decimal = FBig::<R, 10>::from_str(trimmed).map_err(|e| NumberError::Parse {
                input: input.to_string(),
                reason: e.to_string(),
            })?;
            decimal
                .with_base_and_precision::<2>(precision.bits())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Ok(Self::from_inner(value, precision))
    }

    /// Convert a machine float, rounding to `precision` bits.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::NonFinite`] for NaN and infinities.
    pub fn from_f64(
        value: f64,
        precision: Precision,
        rounding: RoundingMode,
    ) -> Result<Self, NumberError> {
        if !value.is_finite() {
            return Err(NumberError::NonFinite(value.to_string()));
        }
        let exact = Inner::try_from(value).map_err(|_| NumberError::NonFinite(value.to_string()))?;
        Ok(Self::from_inner(exact, precision).round_to(precision, rounding))
    }

    /// Convert an integer, rounding to `precision` bits.
    pub fn from_i64(value: i64, precision: Precision, rounding: RoundingMode) -> Self {
        Self::from_inner(Inner::from(value), precision).round_to(precision, rounding)
    }

    /// Zero at the given precision.
    pub fn zero(precision: Precision) -> Self {
        Self::from_inner(Inner::ZERO.with_precision(precision.bits()).value(), precision)
    }

    /// One at the given precision.
    pub fn one(precision: Precision) -> Self {
        Self::from_inner(Inner::ONE.with_precision(precision.bits()).value(), precision)
    }

    /// Re-round this value to a new precision.
    pub fn round_to(&self, precision: Precision, rounding: RoundingMode) -> Self {
        let value = with_rounding_mode!(rounding, R => {
            self.value
                .clone()
                .with_rounding::<R>()
                .with_precision(precision.bits())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Self::from_inner(value, precision)
    }

    /// `e^self`.
    pub fn exp(&self, rounding: RoundingMode) -> Self {
        let precision = self.precision;
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .exp(self.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Self::from_inner(value, precision)
    }

    /// Natural logarithm.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::NonPositiveLog`] when `self <= 0`.
    pub fn ln(&self, rounding: RoundingMode) -> Result<Self, NumberError> {
        if self.value <= Inner::ZERO {
            return Err(NumberError::NonPositiveLog);
        }
        let precision = self.precision;
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .ln(self.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Ok(Self::from_inner(value, precision))
    }

    /// Bits needed for the integer part of `|self|`.
    pub(crate) fn integer_bits(&self) -> usize {
        let repr = self.value.repr();
        (repr.digits() as isize + repr.exponent()).max(0) as usize
    }

    /// Nearest integer, ties away from zero.
    pub(crate) fn round_integer(&self) -> Self {
        Self::from_inner(self.value.round(), self.precision)
    }

    /// Largest integer not above `self`.
    pub(crate) fn floor(&self) -> Self {
        Self::from_inner(self.value.floor(), self.precision)
    }

    /// `self / rhs` for a divisor known to be non-zero.
    pub(crate) fn quotient(&self, rhs: &Self, rounding: RoundingMode) -> Self {
        let precision = self.common_precision(rhs);
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .div(self.value.repr(), rhs.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Self::from_inner(value, precision)
    }

    /// Decimal rendering with exactly `fraction_digits` digits after the point.
    ///
    /// Digits are those of the exact binary value, so a 64-bit `1/3` shows
    /// its representation error from the 20th digit on.
    pub fn to_decimal_string(&self, fraction_digits: usize) -> String {
        format!("{:.*}", fraction_digits, self.decimal(fraction_digits))
    }

    /// Decimal conversion carrying enough significant digits for
    /// `fraction_digits` digits after the point.
    fn decimal(&self, fraction_digits: usize) -> FBig<mode::HalfAway, 10> {
        let integer_digits = self.integer_bits() * 30_103 / 100_000 + 1;
        self.value
            .clone()
            .with_rounding::<mode::HalfAway>()
            .with_base_and_precision::<10>(integer_digits + fraction_digits + 2)
            .value()
    }
}

impl BigFloat for MpFloat {
    fn zero(precision: Precision) -> Self {
        MpFloat::zero(precision)
    }

    fn from_i64(value: i64, precision: Precision, rounding: RoundingMode) -> Self {
        MpFloat::from_i64(value, precision, rounding)
    }

    fn from_f64(
        value: f64,
        precision: Precision,
        rounding: RoundingMode,
    ) -> Result<Self, NumberError> {
        MpFloat::from_f64(value, precision, rounding)
    }

    fn parse(input: &str, precision: Precision, rounding: RoundingMode) -> Result<Self, NumberError> {
        MpFloat::parse(input, precision, rounding)
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn add(&self, rhs: &Self, rounding: RoundingMode) -> Self {
        let precision = self.common_precision(rhs);
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .add(self.value.repr(), rhs.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Self::from_inner(value, precision)
    }

    fn sub(&self, rhs: &Self, rounding: RoundingMode) -> Self {
        let precision = self.common_precision(rhs);
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .sub(self.value.repr(), rhs.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Self::from_inner(value, precision)
    }

    fn mul(&self, rhs: &Self, rounding: RoundingMode) -> Self {
        let precision = self.common_precision(rhs);
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .mul(self.value.repr(), rhs.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Self::from_inner(value, precision)
    }

    fn div(&self, rhs: &Self, rounding: RoundingMode) -> Result<Self, NumberError> {
        if rhs.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(self.quotient(rhs, rounding))
    }

    fn sqrt(&self, rounding: RoundingMode) -> Result<Self, NumberError> {
        if self.is_zero() {
            return Ok(Self::zero(self.precision));
        }
        if self.is_negative() {
            return Err(NumberError::NegativeSqrt);
        }
        let precision = self.precision;
        let value = with_rounding_mode!(rounding, R => {
            Context::<R>::new(precision.bits())
                .sqrt(self.value.repr())
                .value()
                .with_rounding::<mode::HalfEven>()
        });
        Ok(Self::from_inner(value, precision))
    }

    fn neg(&self) -> Self {
        Self::from_inner(-&self.value, self.precision)
    }

    fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    fn is_zero(&self) -> bool {
        self.value.repr().is_zero()
    }

    fn is_negative(&self) -> bool {
        self.value < Inner::ZERO
    }

    fn to_f64(&self) -> f64 {
        self.value.to_f64().value()
    }
}

impl PartialEq for MpFloat {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for MpFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.value.cmp(&other.value))
    }
}

impl fmt::Debug for MpFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MpFloat")
            .field("value", &format_args!("{}", self))
            .field("precision", &self.precision.bits())
            .finish()
    }
}

impl fmt::Display for MpFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(digits) => write!(f, "{:.*}", digits, self.decimal(digits)),
            None => write!(f, "{}", self.value.to_decimal().value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(bits: usize) -> Precision {
        Precision::new(bits).unwrap()
    }

    const N: RoundingMode = RoundingMode::Nearest;

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_parse_decimal_forms() {
        let a = MpFloat::parse("1.5", p(128), N).unwrap();
        assert_eq!(a.to_f64(), 1.5);

        let b = MpFloat::parse("-0.25", p(128), N).unwrap();
        assert_eq!(b.to_f64(), -0.25);

        let tol = MpFloat::parse("1e-25", p(128), N).unwrap();
        assert_relative_eq!(tol.to_f64(), 1e-25, max_relative = 1e-15);
        assert_eq!(tol.precision(), p(128));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = MpFloat::parse("one point five", p(64), N).unwrap_err();
        assert!(matches!(err, NumberError::Parse { .. }));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(matches!(
            MpFloat::from_f64(f64::NAN, p(64), N),
            Err(NumberError::NonFinite(_))
        ));
        assert!(matches!(
            MpFloat::from_f64(f64::INFINITY, p(64), N),
            Err(NumberError::NonFinite(_))
        ));
        assert!(MpFloat::from_f64(0.0, p(64), N).unwrap().is_zero());
    }

    #[test]
    fn test_from_f64_rounds_to_precision() {
        // 0.1 is not representable; at 8 bits it differs visibly from the f64
        let coarse = MpFloat::from_f64(0.1, p(8), N).unwrap();
        assert_eq!(coarse.precision(), p(8));
        assert!((coarse.to_f64() - 0.1).abs() > 1e-6);
        assert!((coarse.to_f64() - 0.1).abs() < 1e-3);
    }

    // ========================================
    // Arithmetic Tests
    // ========================================

    #[test]
    fn test_basic_arithmetic() {
        let a = MpFloat::parse("1.5", p(128), N).unwrap();
        let b = MpFloat::parse("0.5", p(128), N).unwrap();

        assert_eq!(a.add(&b, N).to_f64(), 2.0);
        assert_eq!(a.sub(&b, N).to_f64(), 1.0);
        assert_eq!(a.mul(&b, N).to_f64(), 0.75);
        assert_eq!(a.div(&b, N).unwrap().to_f64(), 3.0);
    }

    #[test]
    fn test_division_by_zero() {
        let a = MpFloat::from_i64(1, p(64), N);
        let zero = MpFloat::zero(p(64));
        assert_eq!(a.div(&zero, N), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_sqrt_domain() {
        let minus_one = MpFloat::from_i64(-1, p(64), N);
        assert_eq!(minus_one.sqrt(N), Err(NumberError::NegativeSqrt));
        assert!(MpFloat::zero(p(64)).sqrt(N).unwrap().is_zero());
    }

    #[test]
    fn test_sqrt_two_at_high_precision() {
        let two = MpFloat::from_i64(2, p(256), N);
        let root = two.sqrt(N).unwrap();
        let squared = root.mul(&root, N);
        let err = squared.sub(&two, N).abs();
        let bound = MpFloat::parse("1e-70", p(256), N).unwrap();
        assert!(err < bound);
    }

    #[test]
    fn test_exp_ln() {
        let one = MpFloat::one(p(128));
        let e = one.exp(N);
        assert_relative_eq!(e.to_f64(), std::f64::consts::E, max_relative = 1e-15);
        let back = e.ln(N).unwrap();
        assert_relative_eq!(back.to_f64(), 1.0, max_relative = 1e-15);

        assert_eq!(
            MpFloat::zero(p(64)).ln(N),
            Err(NumberError::NonPositiveLog)
        );
    }

    #[test]
    fn test_powi() {
        let a = MpFloat::parse("1.5", p(128), N).unwrap();
        assert_relative_eq!(a.powi(10, N).to_f64(), 57.6650390625, max_relative = 1e-15);
        assert_eq!(a.powi(0, N).to_f64(), 1.0);
    }

    #[test]
    fn test_neg_and_abs_are_exact() {
        let a = MpFloat::parse("-3.25", p(64), N).unwrap();
        assert_eq!(a.neg().to_f64(), 3.25);
        assert_eq!(a.abs().to_f64(), 3.25);
        assert!(a.is_negative());
        assert!(!a.abs().is_negative());
    }

    // ========================================
    // Rounding Tests
    // ========================================

    #[test]
    fn test_directed_rounding_brackets_one_third() {
        let one = MpFloat::from_i64(1, p(64), N);
        let three = MpFloat::from_i64(3, p(64), N);

        let down = one.div(&three, RoundingMode::TowardNegative).unwrap();
        let zero = one.div(&three, RoundingMode::TowardZero).unwrap();
        let nearest = one.div(&three, RoundingMode::Nearest).unwrap();
        let up = one.div(&three, RoundingMode::TowardPositive).unwrap();

        assert!(down <= zero);
        assert!(zero <= nearest);
        assert!(nearest <= up);
        assert!(down < up);
    }

    #[test]
    fn test_toward_zero_matches_down_for_negative_quotients() {
        let minus_one = MpFloat::from_i64(-1, p(64), N);
        let three = MpFloat::from_i64(3, p(64), N);

        let zero = minus_one.div(&three, RoundingMode::TowardZero).unwrap();
        let up = minus_one.div(&three, RoundingMode::TowardPositive).unwrap();
        let down = minus_one.div(&three, RoundingMode::TowardNegative).unwrap();

        assert_eq!(zero, up);
        assert!(down < zero);
    }

    #[test]
    fn test_round_to_lower_precision() {
        let third = MpFloat::from_i64(1, p(256), N)
            .div(&MpFloat::from_i64(3, p(256), N), N)
            .unwrap();
        let coarse = third.round_to(p(16), N);
        assert_eq!(coarse.precision(), p(16));
        assert!((coarse.to_f64() - 1.0 / 3.0).abs() < 1e-4);
    }

    // ========================================
    // Formatting Tests
    // ========================================

    #[test]
    fn test_decimal_string() {
        let a = MpFloat::parse("1.25", p(128), N).unwrap();
        assert_eq!(a.to_decimal_string(3), "1.250");
        assert_eq!(format!("{:.2}", a), "1.25");
    }

    #[test]
    fn test_decimal_string_shows_binary_representation_error() {
        let third = MpFloat::from_i64(1, p(64), N)
            .div(&MpFloat::from_i64(3, p(64), N), N)
            .unwrap();
        assert_eq!(third.to_decimal_string(20), "0.33333333333333333334");

        let big = MpFloat::from_i64(1_000_000, p(64), N);
        assert_eq!(big.to_decimal_string(2), "1000000.00");

        assert_eq!(MpFloat::zero(p(64)).to_decimal_string(4), "0.0000");
    }
}
