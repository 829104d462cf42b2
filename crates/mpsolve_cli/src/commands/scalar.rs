//! `mpsolve scalar`: Newton's method on `x^3 - 2x - 5 = 0`.

use mpsolve_core::math::linalg::Vector;
use mpsolve_core::math::solvers::ScalarNewtonSolver;
use mpsolve_core::problems::Cubic;
use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::MpFloat;
use tracing::info;

use super::system::SolveOutcome;
use crate::config::AppConfig;
use crate::output::{self, IterationRow, SolveReport, SolveStatus};
use crate::Result;

/// Digits after the point for the reported root.
pub const ROOT_DIGITS: usize = 30;

/// Starting point used when none is given.
pub const DEFAULT_GUESS: &str = "2";

/// Solve the cubic from `guess`.
pub fn execute(config: &AppConfig, guess: Option<&str>) -> Result<SolveOutcome> {
    let precision = config.precision()?;
    let newton = config.newton_config()?;
    let rounding = newton.rounding;
    let x0 = MpFloat::parse(guess.unwrap_or(DEFAULT_GUESS), precision, rounding)?;

    info!(
        precision = precision.bits(),
        rounding = %rounding,
        tolerance = %config.tolerance,
        "Solving x^3 - 2x - 5 = 0"
    );

    let solver = ScalarNewtonSolver::new(newton);
    let mut trace = Vec::new();
    let result = solver.solve_with_observer(&Cubic, x0, |record| {
        let x = Vector::from(vec![record.x.clone()]);
        let value = Vector::from(vec![record.value.clone()]);
        trace.push(IterationRow::new(
            record.iteration,
            &x,
            &value,
            &record.value.abs(),
        ));
    });

    let mut report = SolveReport {
        problem: "cubic x^3 - 2x - 5".to_string(),
        precision_bits: precision.bits(),
        rounding: rounding.to_string(),
        tolerance: config.tolerance.clone(),
        variables: vec!["x".to_string()],
        equations: vec!["f(x)".to_string()],
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
            report.root = vec![solution.root.to_decimal_string(ROOT_DIGITS)];
            report.residual = vec![solution.value.to_decimal_string(ROOT_DIGITS)];
            report.residual_norm = Some(output::scientific(&solution.value.abs()));
            None
        }
        Err(err) => {
            report.record_failure(&err, ROOT_DIGITS);
            Some(err)
        }
    };

    Ok(SolveOutcome { report, failure })
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig, guess: Option<&str>) -> Result<()> {
    let outcome = execute(config, guess)?;
    output::emit(&outcome.report, config.format)?;
    match outcome.failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
