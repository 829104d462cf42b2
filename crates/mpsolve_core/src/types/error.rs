//! Error types for structured error handling.
//!
//! This module provides:
//! - `NumberError`: Errors from constructing or operating on arbitrary-precision numbers
//! - `LinearSolveError`: Errors from the small dense linear solvers
//! - `SolverError`: Errors from the Newton-Raphson drivers

use thiserror::Error;

use super::precision::Precision;
use crate::math::linalg::Vector;

/// Arbitrary-precision number errors.
///
/// The number backend has no NaN and no signed infinities, so every operation
/// that would produce one reports a variant of this enum instead.
///
/// # Examples
/// ```
/// use mpsolve_core::types::NumberError;
///
/// let err = NumberError::InvalidPrecision(0);
/// assert_eq!(format!("{}", err), "Invalid precision: 0 bits (must be at least 1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// Precision of zero bits requested.
    #[error("Invalid precision: {0} bits (must be at least 1)")]
    InvalidPrecision(usize),

    /// Decimal string could not be parsed.
    #[error("Cannot parse '{input}' as a number: {reason}")]
    Parse {
        /// Rejected input
        input: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Machine float is NaN or infinite.
    #[error("Non-finite machine float: {0}")]
    NonFinite(String),

    /// Division with an exactly zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// Square root of a negative number.
    #[error("Square root of a negative number")]
    NegativeSqrt,

    /// Logarithm of zero or a negative number.
    #[error("Logarithm of a non-positive number")]
    NonPositiveLog,

    /// Rounding mode name not recognised.
    #[error("Unknown rounding mode: {0}")]
    UnknownRoundingMode(String),
}

/// Errors from the small dense linear solvers.
///
/// # Examples
/// ```
/// use mpsolve_core::types::LinearSolveError;
///
/// let err = LinearSolveError::UnsupportedDimension { dimension: 3, max: 2 };
/// assert_eq!(format!("{}", err), "Unsupported dimension 3 (solver handles at most 2)");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearSolveError {
    /// Matrix is exactly singular (zero determinant or zero pivot).
    #[error("Singular matrix")]
    Singular,

    /// Matrix and right-hand side shapes disagree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// System size outside what this solver implements.
    #[error("Unsupported dimension {dimension} (solver handles at most {max})")]
    UnsupportedDimension {
        /// Requested system size
        dimension: usize,
        /// Largest supported size
        max: usize,
    },

    /// Arithmetic failure during elimination.
    #[error(transparent)]
    Number(#[from] NumberError),
}

/// Errors from the Newton-Raphson drivers.
///
/// `T` is the scalar number type of the solve. Failures that happen inside
/// the iteration carry the iterate at which they occurred so the caller can
/// inspect it; nothing is substituted for a failed solve.
///
/// # Examples
/// ```
/// use mpsolve_core::types::{SolverError, MpFloat};
///
/// let err: SolverError<MpFloat> = SolverError::InvalidTolerance;
/// assert_eq!(format!("{}", err), "Tolerance must be strictly positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError<T> {
    /// Iteration budget exhausted before the residual norm dropped below tolerance.
    #[error("Failed to converge after {iterations} iterations")]
    NotConverged {
        /// Number of Newton updates performed
        iterations: usize,
        /// Last evaluated iterate
        last_iterate: Vector<T>,
        /// Residual norm at `last_iterate`
        residual_norm: T,
    },

    /// Jacobian (or scalar derivative) exactly singular at the current iterate.
    #[error("Singular Jacobian at iteration {iteration}")]
    SingularJacobian {
        /// Number of Newton updates performed before the failure
        iteration: usize,
        /// Iterate at which the Jacobian was singular
        at: Vector<T>,
    },

    /// Input vector length does not match the system dimension.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// System dimension
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Values of one solve were constructed at different precisions.
    #[error("Precision mismatch: expected {expected}, got {got}")]
    PrecisionMismatch {
        /// Precision of the initial guess
        expected: Precision,
        /// Offending precision
        got: Precision,
    },

    /// Tolerance is zero or negative.
    #[error("Tolerance must be strictly positive")]
    InvalidTolerance,

    /// Linear sub-solve failed for a reason other than singularity.
    #[error("Linear solve failed: {0}")]
    LinearSolve(LinearSolveError),

    /// Arithmetic failure while evaluating the iteration.
    #[error(transparent)]
    Number(#[from] NumberError),
}

impl<T> SolverError<T> {
    /// Returns `true` for failures raised before the iteration started.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SolverError::DimensionMismatch { .. }
                | SolverError::PrecisionMismatch { .. }
                | SolverError::InvalidTolerance
        )
    }
}
