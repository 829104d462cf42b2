//! `mpsolve rounding`: one quotient under every rounding mode.

use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::{MpFloat, Precision, RoundingMode};

use crate::config::AppConfig;
use crate::output::{self, ValueReport};
use crate::{CliError, Result};

/// Digits after the point in the report.
pub const DIGITS: usize = 20;

/// Precision used when none is given.
pub const DEFAULT_BITS: usize = 64;

/// `numerator / denominator` rounded in each mode, nearest first.
pub fn quotients(
    numerator: &str,
    denominator: &str,
    precision: Precision,
) -> Result<Vec<(RoundingMode, MpFloat)>> {
    RoundingMode::ALL
        .iter()
        .map(|&mode| {
            let a = MpFloat::parse(numerator, precision, mode)?;
            let b = MpFloat::parse(denominator, precision, mode)?;
            Ok((mode, a.div(&b, mode)?))
        })
        .collect()
}

/// `true` when `down <= toward-zero <= nearest <= up`, as required for a
/// positive quotient.
pub fn ordered(results: &[(RoundingMode, MpFloat)]) -> bool {
    let pick = |mode: RoundingMode| results.iter().find(|(m, _)| *m == mode).map(|(_, v)| v);
    match (
        pick(RoundingMode::TowardNegative),
        pick(RoundingMode::TowardZero),
        pick(RoundingMode::Nearest),
        pick(RoundingMode::TowardPositive),
    ) {
        (Some(down), Some(zero), Some(nearest), Some(up)) => {
            down <= zero && zero <= nearest && nearest <= up
        }
        _ => false,
    }
}

/// Compute `numerator / denominator` at `bits` under all four modes.
pub fn execute(numerator: &str, denominator: &str, bits: usize) -> Result<ValueReport> {
    let precision = Precision::new(bits)?;
    let results = quotients(numerator, denominator, precision)?;

    let mut report = ValueReport::new(
        format!("{} / {} under each rounding mode", numerator, denominator),
        Some(bits),
    );
    for (mode, value) in &results {
        report.push(
            format!("{} ({})", mode.mnemonic(), mode),
            value.to_decimal_string(DIGITS),
        );
    }

    let positive = results
        .iter()
        .all(|(_, v)| !v.is_negative() && !v.is_zero());
    if positive {
        if !ordered(&results) {
            return Err(CliError::InvalidInput(
                "rounding modes produced out-of-order results".to_string(),
            ));
        }
        report.note("ordering: RNDD <= RNDZ <= RNDN <= RNDU");
    }
    Ok(report)
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig, numerator: &str, denominator: &str, bits: usize) -> Result<()> {
    let report = execute(numerator, denominator, bits)?;
    output::emit(&report, config.format)
}
