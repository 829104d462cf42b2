//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod arith;
pub mod functions;
pub mod multistart;
pub mod precision;
pub mod rounding;
pub mod scalar;
pub mod system;
pub mod timing;

use clap::ValueEnum;
use mpsolve_core::math::linalg::Vector;
use mpsolve_core::problems::{CircleParabola, ThreeSpheres};
use mpsolve_core::traits::NonlinearSystem;
use mpsolve_core::types::{MpFloat, Precision, RoundingMode};

use crate::{CliError, Result};

/// Built-in nonlinear systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemProblem {
    /// x^2 + y^2 = 4, x^2 - y = 1
    CircleParabola,
    /// x^2 + y^2 + z^2 = 14, xy = 2, yz = 6
    ThreeSpheres,
}

impl SystemProblem {
    /// Problem name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            SystemProblem::CircleParabola => "circle-parabola",
            SystemProblem::ThreeSpheres => "three-spheres",
        }
    }

    /// The system itself.
    pub fn system(&self) -> &'static (dyn NonlinearSystem<MpFloat> + Sync) {
        match self {
            SystemProblem::CircleParabola => &CircleParabola,
            SystemProblem::ThreeSpheres => &ThreeSpheres,
        }
    }

    /// Starting point used when none is given.
    pub fn default_guess(&self) -> &'static str {
        match self {
            SystemProblem::CircleParabola => "1.5,1.5",
            SystemProblem::ThreeSpheres => "1.2,1.8,3.2",
        }
    }

    /// Variable names, one per component.
    pub fn variables(&self) -> Vec<String> {
        let names: &[&str] = match self {
            SystemProblem::CircleParabola => &["x", "y"],
            SystemProblem::ThreeSpheres => &["x", "y", "z"],
        };
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Residual component names.
    pub fn equations(&self) -> Vec<String> {
        (1..=self.system().dimension())
            .map(|i| format!("f{}", i))
            .collect()
    }
}

/// Parse a comma-separated point such as `"1.5,1.5"` with `dimension` components.
pub fn parse_point(
    input: &str,
    dimension: usize,
    precision: Precision,
    rounding: RoundingMode,
) -> Result<Vector<MpFloat>> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != dimension {
        return Err(CliError::InvalidInput(format!(
            "point '{}' has {} components, expected {}",
            input,
            parts.len(),
            dimension
        )));
    }
    Ok(Vector::parse(&parts, precision, rounding)?)
}

/// Parse a semicolon-separated list of points such as `"1.5,1.5;-1.5,1.5"`.
pub fn parse_points(
    input: &str,
    dimension: usize,
    precision: Precision,
    rounding: RoundingMode,
) -> Result<Vec<Vector<MpFloat>>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|point| parse_point(point, dimension, precision, rounding))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpsolve_core::traits::BigFloat;

    const N: RoundingMode = RoundingMode::Nearest;

    fn p() -> Precision {
        Precision::new(128).unwrap()
    }

    #[test]
    fn test_parse_point() {
        let v = parse_point(" 1.5, -2 ", 2, p(), N).unwrap();
        assert_eq!(v.to_f64_vec(), vec![1.5, -2.0]);
        assert_eq!(v[0].precision(), p());
    }

    #[test]
    fn test_parse_point_wrong_dimension() {
        assert!(matches!(
            parse_point("1.5", 2, p(), N),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_point_bad_number() {
        assert!(matches!(
            parse_point("1.5,abc", 2, p(), N),
            Err(CliError::Number(_))
        ));
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points("1.5,1.5; -1.5,1.5;", 2, p(), N).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].to_f64_vec(), vec![-1.5, 1.5]);
    }

    #[test]
    fn test_problem_metadata_matches_dimension() {
        for problem in [SystemProblem::CircleParabola, SystemProblem::ThreeSpheres] {
            let dimension = problem.system().dimension();
            assert_eq!(problem.variables().len(), dimension);
            assert_eq!(problem.equations().len(), dimension);
            assert!(parse_point(problem.default_guess(), dimension, p(), N).is_ok());
        }
    }
}
