//! Numerical building blocks.
//!
//! - [`linalg`]: vectors, matrices and the small dense linear solvers
//! - [`solvers`]: Newton-Raphson drivers for systems and single equations

pub mod linalg;
pub mod solvers;
