//! `mpsolve system`: Newton's method on a built-in nonlinear system.
//!
//! Prints one table row per evaluated iterate, then the solution and the
//! residuals at the solution.

use mpsolve_core::math::solvers::NewtonSolver;
use mpsolve_core::types::{MpFloat, SolverError};
use tracing::info;

use super::{parse_point, SystemProblem};
use crate::config::AppConfig;
use crate::output::{self, decimals, IterationRow, SolveReport, SolveStatus};
use crate::Result;

/// Digits after the point for the reported solution.
pub const SOLUTION_DIGITS: usize = 25;

/// Report together with the solver failure, if any.
pub struct SolveOutcome {
    /// What was computed
    pub report: SolveReport,
    /// Why the solve failed
    pub failure: Option<SolverError<MpFloat>>,
}

/// Solve `problem` from `guess` (or its default starting point).
pub fn execute(
    config: &AppConfig,
    problem: SystemProblem,
    guess: Option<&str>,
) -> Result<SolveOutcome> {
    let precision = config.precision()?;
    let newton = config.newton_config()?;
    let rounding = newton.rounding;
    let system = problem.system();
    let initial_guess = parse_point(
        guess.unwrap_or(problem.default_guess()),
        system.dimension(),
        precision,
        rounding,
    )?;

    info!(
        problem = problem.name(),
        precision = precision.bits(),
        rounding = %rounding,
        tolerance = %config.tolerance,
        "Solving nonlinear system"
    );

    let solver = NewtonSolver::new(newton);
    let mut trace = Vec::new();
    let result = solver.solve_with_observer(system, initial_guess, |record| {
        trace.push(IterationRow::new(
            record.iteration,
            record.x,
            record.residual,
            record.residual_norm,
        ));
    });

    let mut report = SolveReport {
        problem: problem.name().to_string(),
        precision_bits: precision.bits(),
        rounding: rounding.to_string(),
        tolerance: config.tolerance.clone(),
        variables: problem.variables(),
        equations: problem.equations(),
        status: SolveStatus::Converged,
        iterations: 0,
        root: Vec::new(),
        residual: Vec::new(),
        residual_norm: None,
        error: None,
        trace,
    };

    let failure = match result {
        Ok(solution) => {
            report.iterations = solution.iterations;
            report.root = decimals(&solution.root, SOLUTION_DIGITS);
            report.residual = decimals(&solution.residual, SOLUTION_DIGITS);
            report.residual_norm = Some(output::scientific(&solution.residual_norm));
            None
        }
        Err(err) => {
            report.record_failure(&err, SOLUTION_DIGITS);
            Some(err)
        }
    };

    Ok(SolveOutcome { report, failure })
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig, problem: SystemProblem, guess: Option<&str>) -> Result<()> {
    let outcome = execute(config, problem, guess)?;
    output::emit(&outcome.report, config.format)?;
    match outcome.failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn root_component(report: &SolveReport, i: usize) -> f64 {
        report.root[i].parse().unwrap()
    }

    #[test]
    fn test_circle_parabola_from_default_guess() {
        let config = AppConfig::default();
        let outcome = execute(&config, SystemProblem::CircleParabola, None).unwrap();
        let report = outcome.report;

        assert!(outcome.failure.is_none());
        assert!(report.converged());
        assert_eq!(report.iterations, 5);
        assert_eq!(report.trace.len(), 6);
        assert_eq!(report.trace[0].x[0], "1.50000000000000000000");
        assert_relative_eq!(root_component(&report, 0), 1.5174899135519797, epsilon = 1e-15);
        assert_relative_eq!(root_component(&report, 1), 1.3027756377319946, epsilon = 1e-15);
        assert_eq!(report.root[0].split('.').nth(1).unwrap().len(), SOLUTION_DIGITS);
    }

    #[test]
    fn test_three_spheres() {
        let config = AppConfig::default();
        let outcome = execute(&config, SystemProblem::ThreeSpheres, None).unwrap();
        assert!(outcome.report.converged());
        assert_relative_eq!(root_component(&outcome.report, 0), 1.0, epsilon = 1e-20);
        assert_relative_eq!(root_component(&outcome.report, 1), 2.0, epsilon = 1e-20);
        assert_relative_eq!(root_component(&outcome.report, 2), 3.0, epsilon = 1e-20);
    }

    #[test]
    fn test_singular_start_is_reported() {
        let config = AppConfig::default();
        let outcome = execute(&config, SystemProblem::CircleParabola, Some("0,1.5")).unwrap();
        assert_eq!(outcome.report.status, SolveStatus::SingularJacobian);
        assert_eq!(outcome.report.iterations, 0);
        assert!(matches!(
            outcome.failure,
            Some(SolverError::SingularJacobian { iteration: 0, .. })
        ));
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        let config = AppConfig {
            max_iterations: 1,
            ..Default::default()
        };
        let outcome = execute(&config, SystemProblem::CircleParabola, None).unwrap();
        let report = outcome.report;
        assert_eq!(report.status, SolveStatus::NotConverged);
        assert_eq!(report.iterations, 1);
        assert_relative_eq!(root_component(&report, 0), 1.5208333333333333, epsilon = 1e-15);
        assert_relative_eq!(root_component(&report, 1), 1.3125, epsilon = 1e-15);
        assert!(report.residual_norm.is_some());
    }

    #[test]
    fn test_guess_with_wrong_dimension_is_rejected() {
        let config = AppConfig::default();
        assert!(execute(&config, SystemProblem::ThreeSpheres, Some("1,2")).is_err());
    }
}
