//! Core traits for arbitrary-precision arithmetic and nonlinear problems.
//!
//! This module defines the abstractions the solvers are written against:
//! - Arbitrary-precision number operations (`BigFloat` trait)
//! - Systems of nonlinear equations with a closed-form Jacobian (`NonlinearSystem` trait)
//! - Single nonlinear equations with a closed-form derivative (`ScalarEquation` trait)
//!
//! The solvers are generic over these traits.

pub mod big_float;
pub mod system;

pub use big_float::BigFloat;
pub use system::{NonlinearSystem, ScalarEquation};
