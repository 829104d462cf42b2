//! Newton solver configuration.

use crate::traits::BigFloat;
use crate::types::{Precision, RoundingMode, SolverError};

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default convergence tolerance, as a decimal string.
pub const DEFAULT_TOLERANCE: &str = "1e-25";

/// Configuration for the Newton-Raphson drivers.
///
/// Holds the convergence tolerance, the iteration budget and the single
/// rounding mode used for every operation of one solve.
///
/// # Type Parameters
///
/// * `T` - Arbitrary-precision number type (e.g., [`MpFloat`](crate::types::MpFloat))
///
/// # Example
///
/// ```
/// use mpsolve_core::math::solvers::NewtonConfig;
/// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
///
/// let p = Precision::new(128).unwrap();
///
/// // Defaults: tolerance 1e-25, 100 iterations, round to nearest
/// let config: NewtonConfig<MpFloat> = NewtonConfig::with_defaults(p).unwrap();
/// assert_eq!(config.max_iterations, 100);
///
/// // Custom tolerance
/// let custom = NewtonConfig::<MpFloat>::from_decimal("1e-30", p, 50, RoundingMode::TowardZero).unwrap();
/// assert_eq!(custom.rounding, RoundingMode::TowardZero);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonConfig<T> {
    /// Convergence tolerance.
    ///
    /// The solver stops when the Euclidean norm of the residual is strictly
    /// below this value. Must share the precision of the initial guess.
    pub tolerance: T,

    /// Maximum number of Newton updates.
    ///
    /// Zero is allowed: the initial guess is evaluated once and either
    /// accepted or reported as not converged.
    pub max_iterations: usize,

    /// Rounding mode applied to every operation of the solve.
    pub rounding: RoundingMode,
}

impl<T: BigFloat> NewtonConfig<T> {
    /// Create a configuration, rejecting a non-positive tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidTolerance`] if `tolerance <= 0`.
    pub fn new(
        tolerance: T,
        max_iterations: usize,
        rounding: RoundingMode,
    ) -> Result<Self, SolverError<T>> {
        let config = Self {
            tolerance,
            max_iterations,
            rounding,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration with the tolerance given as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Number`] if the tolerance does not parse and
    /// [`SolverError::InvalidTolerance`] if it is not positive.
    pub fn from_decimal(
        tolerance: &str,
        precision: Precision,
        max_iterations: usize,
        rounding: RoundingMode,
    ) -> Result<Self, SolverError<T>> {
        let tolerance = T::parse(tolerance, precision, rounding)?;
        Self::new(tolerance, max_iterations, rounding)
    }

    /// Default configuration at `precision`.
    ///
    /// Default values:
    /// - `tolerance`: 1e-25
    /// - `max_iterations`: 100
    /// - `rounding`: nearest
    pub fn with_defaults(precision: Precision) -> Result<Self, SolverError<T>> {
        Self::from_decimal(
            DEFAULT_TOLERANCE,
            precision,
            DEFAULT_MAX_ITERATIONS,
            RoundingMode::Nearest,
        )
    }

    /// Configuration pushing the tolerance close to the working precision.
    ///
    /// Uses `10^-(d - 5)`, where `d` is the number of decimal digits the
    /// precision holds, and 500 iterations.
    pub fn high_precision(precision: Precision) -> Result<Self, SolverError<T>> {
        let exponent = precision.decimal_digits().saturating_sub(5).max(1);
        Self::from_decimal(
            &format!("1e-{}", exponent),
            precision,
            500,
            RoundingMode::Nearest,
        )
    }

    /// Configuration with a relaxed tolerance (1e-10) and 50 iterations.
    pub fn fast(precision: Precision) -> Result<Self, SolverError<T>> {
        Self::from_decimal("1e-10", precision, 50, RoundingMode::Nearest)
    }

    /// Replace the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replace the rounding mode.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidTolerance`] if `tolerance <= 0`.
    pub fn validate(&self) -> Result<(), SolverError<T>> {
        if self.tolerance.is_zero() || self.tolerance.is_negative() {
            return Err(SolverError::InvalidTolerance);
        }
        Ok(())
    }

    /// Precision of the tolerance, which every value of the solve must share.
    pub fn precision(&self) -> Precision {
        self.tolerance.precision()
    }
}
