//! Precision and rounding-mode parameters.
//!
//! Every arbitrary-precision value carries an explicit [`Precision`] chosen at
//! construction time, and every rounded operation takes an explicit
//! [`RoundingMode`]. There is no process-wide default that operations fall
//! back to.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use super::error::NumberError;

/// Precision used by the reference problems (about 38 decimal digits).
pub const DEFAULT_PRECISION_BITS: usize = 128;

/// Number of significant bits of an arbitrary-precision value.
///
/// A precision is always at least one bit; zero is rejected at construction
/// because the underlying backend interprets it as "unlimited".
///
/// # Examples
///
/// ```
/// use mpsolve_core::types::Precision;
///
/// let p = Precision::new(128).unwrap();
/// assert_eq!(p.bits(), 128);
/// assert_eq!(p.decimal_digits(), 38);
/// assert!(Precision::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub struct Precision(NonZeroUsize);

impl Precision {
    /// Create a precision of `bits` significant bits.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidPrecision`] when `bits` is zero.
    pub fn new(bits: usize) -> Result<Self, NumberError> {
        NonZeroUsize::new(bits)
            .map(Self)
            .ok_or(NumberError::InvalidPrecision(bits))
    }

    /// Number of significant bits.
    #[inline]
    pub fn bits(self) -> usize {
        self.0.get()
    }

    /// This precision plus `extra_bits`.
    pub fn widened(self, extra_bits: usize) -> Self {
        Self(self.0.saturating_add(extra_bits))
    }

    /// Number of decimal digits fully representable at this precision,
    /// i.e. `floor(bits * log10(2))`.
    pub fn decimal_digits(self) -> usize {
        self.bits() * 30_103 / 100_000
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_PRECISION_BITS - 1))
    }
}

impl TryFrom<usize> for Precision {
    type Error = NumberError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<Precision> for usize {
    fn from(precision: Precision) -> Self {
        precision.bits()
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

/// Direction in which an exact result is rounded to the target precision.
///
/// The four modes correspond to the IEEE 754 directed roundings and to the
/// MPFR modes `RNDN`, `RNDZ`, `RNDU` and `RNDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    #[default]
    Nearest,
    /// Round toward zero (truncate).
    TowardZero,
    /// Round toward +infinity.
    TowardPositive,
    /// Round toward -infinity.
    TowardNegative,
}

impl RoundingMode {
    /// All rounding modes, nearest first.
    pub const ALL: [RoundingMode; 4] = [
        RoundingMode::Nearest,
        RoundingMode::TowardZero,
        RoundingMode::TowardPositive,
        RoundingMode::TowardNegative,
    ];

    /// Canonical lowercase name, accepted back by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Nearest => "nearest",
            RoundingMode::TowardZero => "toward-zero",
            RoundingMode::TowardPositive => "toward-positive",
            RoundingMode::TowardNegative => "toward-negative",
        }
    }

    /// Short MPFR-style mnemonic (`RNDN`, `RNDZ`, `RNDU`, `RNDD`).
    pub fn mnemonic(&self) -> &'static str {
        match self {
            RoundingMode::Nearest => "RNDN",
            RoundingMode::TowardZero => "RNDZ",
            RoundingMode::TowardPositive => "RNDU",
            RoundingMode::TowardNegative => "RNDD",
        }
    }
}

impl FromStr for RoundingMode {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" | "n" | "rndn" => Ok(RoundingMode::Nearest),
            "toward-zero" | "zero" | "z" | "rndz" => Ok(RoundingMode::TowardZero),
            "toward-positive" | "up" | "u" | "rndu" => Ok(RoundingMode::TowardPositive),
            "toward-negative" | "down" | "d" | "rndd" => Ok(RoundingMode::TowardNegative),
            _ => Err(NumberError::UnknownRoundingMode(s.to_string())),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_rejects_zero() {
        assert_eq!(Precision::new(0), Err(NumberError::InvalidPrecision(0)));
        assert!(Precision::try_from(0usize).is_err());
    }

    #[test]
    fn test_precision_default_is_128_bits() {
        assert_eq!(Precision::default().bits(), DEFAULT_PRECISION_BITS);
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(Precision::new(53).unwrap().decimal_digits(), 15);
        assert_eq!(Precision::new(64).unwrap().decimal_digits(), 19);
        assert_eq!(Precision::new(512).unwrap().decimal_digits(), 154);
        assert_eq!(Precision::new(1).unwrap().decimal_digits(), 0);
    }

    #[test]
    fn test_widened() {
        let p = Precision::new(64).unwrap();
        assert_eq!(p.widened(32).bits(), 96);
        assert_eq!(p.widened(0), p);
    }

    #[test]
    fn test_precision_ordering_and_display() {
        let low = Precision::new(64).unwrap();
        let high = Precision::new(256).unwrap();
        assert!(low < high);
        assert_eq!(format!("{}", high), "256 bits");
        assert_eq!(usize::from(high), 256);
    }

    #[test]
    fn test_rounding_mode_parsing() {
        assert_eq!(
            RoundingMode::from_str("nearest").unwrap(),
            RoundingMode::Nearest
        );
        assert_eq!(
            RoundingMode::from_str("RNDZ").unwrap(),
            RoundingMode::TowardZero
        );
        assert_eq!(
            RoundingMode::from_str("Up").unwrap(),
            RoundingMode::TowardPositive
        );
        assert_eq!(
            RoundingMode::from_str("toward-negative").unwrap(),
            RoundingMode::TowardNegative
        );
        assert!(matches!(
            RoundingMode::from_str("sideways"),
            Err(NumberError::UnknownRoundingMode(_))
        ));
    }

    #[test]
    fn test_rounding_mode_round_trips_through_display() {
        for mode in RoundingMode::ALL {
            assert_eq!(RoundingMode::from_str(&mode.to_string()).unwrap(), mode);
        }
    }

    #[test]
    fn test_rounding_mode_mnemonics_are_distinct() {
        let names: std::collections::HashSet<_> =
            RoundingMode::ALL.iter().map(|m| m.mnemonic()).collect();
        assert_eq!(names.len(), 4);
    }
}
