//! Core numeric and error types.
//!
//! This module provides:
//! - `precision`: bit precision and rounding-mode parameters
//! - `number`: the arbitrary-precision float [`MpFloat`]
//! - `elementary`: π, `sin`, `cos` and `tan` for [`MpFloat`]
//! - `error`: structured error types for numbers, linear solves and Newton solves
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Precision`], [`RoundingMode`] from `precision`
//! - [`MpFloat`] from `number`
//! - [`NumberError`], [`LinearSolveError`], [`SolverError`] from `error`

mod elementary;
pub mod error;
pub mod number;
pub mod precision;

// Re-export commonly used types at module level
pub use error::{LinearSolveError, NumberError, SolverError};
pub use number::MpFloat;
pub use precision::{Precision, RoundingMode, DEFAULT_PRECISION_BITS};
