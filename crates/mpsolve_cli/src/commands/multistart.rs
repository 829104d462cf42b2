//! `mpsolve multistart`: solve one system from several starting points.

use mpsolve_core::math::solvers::{distinct_roots, solve_multi_start, NewtonSolver};
use mpsolve_core::types::MpFloat;
use tracing::info;

use super::{parse_points, SystemProblem};
use crate::config::AppConfig;
use crate::output::{self, decimals, MultiStartReport, StartOutcome};
use crate::{CliError, Result};

/// Digits after the point for reported roots.
const ROOT_DIGITS: usize = 20;

/// Starting points used for the circle-parabola system when none are given.
pub const DEFAULT_GUESSES: &str = "1.5,1.5;-1.5,1.5;1.4,1.2;-1,2";

/// Solve `problem` from every point in `guesses`.
///
/// Roots closer than `separation` in every component are reported once.
pub fn execute(
    config: &AppConfig,
    problem: SystemProblem,
    guesses: &str,
    separation: &str,
) -> Result<MultiStartReport> {
    let precision = config.precision()?;
    let newton = config.newton_config()?;
    let rounding = newton.rounding;
    let system = problem.system();
    let starts = parse_points(guesses, system.dimension(), precision, rounding)?;
    if starts.is_empty() {
        return Err(CliError::InvalidInput("no starting points given".to_string()));
    }
    let separation = MpFloat::parse(separation, precision, rounding)?;

    info!(
        problem = problem.name(),
        starts = starts.len(),
        precision = precision.bits(),
        "Running multi-start solve"
    );

    let guess_strings: Vec<Vec<String>> = starts.iter().map(|g| decimals(g, 6)).collect();
    let solver = NewtonSolver::new(newton);
    let results = solve_multi_start(&solver, system, starts);

    let outcomes = guess_strings
        .into_iter()
        .zip(&results)
        .map(|(guess, result)| match result {
            Ok(solution) => StartOutcome {
                guess,
                root: Some(decimals(&solution.root, ROOT_DIGITS)),
                iterations: Some(solution.iterations),
                error: None,
            },
            Err(err) => StartOutcome {
                guess,
                root: None,
                iterations: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let solutions = results.into_iter().filter_map(|r| r.ok());
    let roots = distinct_roots(solutions, &separation, rounding)
        .iter()
        .map(|s| decimals(&s.root, ROOT_DIGITS))
        .collect();

    Ok(MultiStartReport {
        problem: problem.name().to_string(),
        precision_bits: precision.bits(),
        starts: outcomes,
        distinct_roots: roots,
    })
}

/// Run the command, printing the report in the configured format.
pub fn run(
    config: &AppConfig,
    problem: SystemProblem,
    guesses: Option<&str>,
    separation: &str,
) -> Result<()> {
    let guesses = match (guesses, problem) {
        (Some(g), _) => g,
        (None, SystemProblem::CircleParabola) => DEFAULT_GUESSES,
        (None, other) => other.default_guess(),
    };
    let report = execute(config, problem, guesses, separation)?;
    output::emit(&report, config.format)
}
