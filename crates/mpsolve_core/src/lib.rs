//! # mpsolve_core: Multi-Precision Newton-Raphson Solving
//!
//! ## Role
//!
//! mpsolve_core is the kernel of the workspace, providing:
//! - Arbitrary-precision numbers with explicit rounding (`types::MpFloat`)
//! - The arithmetic interface the solvers are written against (`traits::BigFloat`)
//! - Vectors, matrices and small dense linear solvers (`math::linalg`)
//! - Newton-Raphson drivers for systems and single equations (`math::solvers`)
//! - Reference problems with known roots (`problems`)
//!
//! ## Explicit Precision
//!
//! There is no process-wide default precision or rounding mode. Every
//! number is created at an explicit [`Precision`](types::Precision) and every
//! rounded operation receives a [`RoundingMode`](types::RoundingMode).
//!
//! ## Usage Examples
//!
//! ```rust
//! use mpsolve_core::math::linalg::Vector;
//! use mpsolve_core::math::solvers::{NewtonConfig, NewtonSolver};
//! use mpsolve_core::problems::CircleParabola;
//! use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
//!
//! let p = Precision::new(128).unwrap();
//! let config = NewtonConfig::<MpFloat>::with_defaults(p).unwrap();
//!
//! let guess = Vector::parse(&["1.5", "1.5"], p, RoundingMode::Nearest).unwrap();
//! let solution = NewtonSolver::new(config).solve(&CircleParabola, guess).unwrap();
//!
//! println!("x = {:.25}", solution.root[0]);
//! println!("y = {:.25}", solution.root[1]);
//! # assert!(solution.iterations < 10);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Run multi-start solves on the rayon thread pool
//! - `serde` (default): Enable serialisation for Precision and RoundingMode

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod problems;
pub mod traits;
pub mod types;
