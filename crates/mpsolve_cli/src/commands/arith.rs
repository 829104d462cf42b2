//! `mpsolve arith`: basic operations on two decimal operands.

use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::MpFloat;

use crate::config::AppConfig;
use crate::output::{self, ValueReport};
use crate::Result;

/// Digits after the point in the report.
pub const DIGITS: usize = 30;

/// Default first operand.
pub const DEFAULT_A: &str = "1.23456789012345678901234567890";

/// Default second operand.
pub const DEFAULT_B: &str = "9.87654321098765432109876543210";

/// Compute `a + b`, `a * b`, `a / b` and `a^10`.
pub fn execute(config: &AppConfig, a: &str, b: &str) -> Result<ValueReport> {
    let precision = config.precision()?;
    let rounding = config.rounding;
    let a = MpFloat::parse(a, precision, rounding)?;
    let b = MpFloat::parse(b, precision, rounding)?;

    let mut report = ValueReport::new("Basic operations", Some(precision.bits()));
    report.push("a", a.to_decimal_string(DIGITS));
    report.push("b", b.to_decimal_string(DIGITS));
    report.push("a + b", a.add(&b, rounding).to_decimal_string(DIGITS));
    report.push("a * b", a.mul(&b, rounding).to_decimal_string(DIGITS));
    report.push("a / b", a.div(&b, rounding)?.to_decimal_string(DIGITS));
    report.push("a^10", a.powi(10, rounding).to_decimal_string(DIGITS));
    Ok(report)
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig, a: &str, b: &str) -> Result<()> {
    let report = execute(config, a, b)?;
    output::emit(&report, config.format)
}
