//! `mpsolve timing`: wall-clock cost of repeated multiply, divide and sqrt.

use std::hint::black_box;
use std::time::{Duration, Instant};

use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::{MpFloat, NumberError};
use tracing::debug;

use crate::config::AppConfig;
use crate::output::{self, ValueReport};
use crate::Result;

/// Repetitions used when none is given.
pub const DEFAULT_ITERATIONS: usize = 10_000;

const OPERAND_A: &str = "1.23456789";
const OPERAND_B: &str = "9.87654321";

fn time<F>(iterations: usize, mut op: F) -> std::result::Result<Duration, NumberError>
where
    F: FnMut() -> std::result::Result<MpFloat, NumberError>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(op()?);
    }
    Ok(start.elapsed())
}

/// Time `iterations` repetitions of each operation at the configured precision.
pub fn execute(config: &AppConfig, iterations: usize) -> Result<ValueReport> {
    let precision = config.precision()?;
    let rounding = config.rounding;
    let a = MpFloat::parse(OPERAND_A, precision, rounding)?;
    let b = MpFloat::parse(OPERAND_B, precision, rounding)?;

    let timings = [
        ("multiplications", time(iterations, || Ok(black_box(&a).mul(&b, rounding)))?),
        ("divisions", time(iterations, || black_box(&a).div(&b, rounding))?),
        ("square roots", time(iterations, || black_box(&a).sqrt(rounding))?),
    ];

    let mut report = ValueReport::new("Performance timing", Some(precision.bits()));
    for (name, elapsed) in timings {
        debug!(operation = name, iterations, elapsed_ns = elapsed.as_nanos() as u64, "timed");
        report.push(
            format!("{} {}", iterations, name),
            format!("{:.6} seconds", elapsed.as_secs_f64()),
        );
    }
    Ok(report)
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig, iterations: usize) -> Result<()> {
    let report = execute(config, iterations)?;
    output::emit(&report, config.format)
}
