//! `mpsolve functions`: elementary and circular functions, and domain errors.
//!
//! The number type has no NaN or infinities; out-of-domain arguments are
//! reported with the error the operation returns.

use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::{MpFloat, NumberError, Precision, RoundingMode};

use crate::config::AppConfig;
use crate::output::{self, ValueReport};
use crate::Result;

/// Digits after the point in the report.
pub const DIGITS: usize = 25;

/// Default argument.
pub const DEFAULT_X: &str = "0.5";

fn describe(result: std::result::Result<MpFloat, NumberError>) -> String {
    match result {
        Ok(value) => value.to_decimal_string(DIGITS),
        Err(err) => format!("error: {}", err),
    }
}

/// Evaluate `exp`, `ln`, `sqrt` and the circular functions at `x`, then
/// the domain edges.
pub fn execute(config: &AppConfig, x: &str) -> Result<ValueReport> {
    let precision = config.precision()?;
    let rounding = config.rounding;
    let x = MpFloat::parse(x, precision, rounding)?;

    let mut report = ValueReport::new("Mathematical functions", Some(precision.bits()));
    report.push("x", x.to_decimal_string(DIGITS));
    report.push("exp(x)", x.exp(rounding).to_decimal_string(DIGITS));
    report.push("ln(x)", describe(x.ln(rounding)));
    report.push("sqrt(x)", describe(x.sqrt(rounding)));
    report.push("sin(x)", x.sin(rounding).to_decimal_string(DIGITS));
    report.push("cos(x)", x.cos(rounding).to_decimal_string(DIGITS));
    report.push("tan(x)", describe(x.tan(rounding)));

    for (label, value) in domain_edges(precision, rounding) {
        report.push(label, value);
    }
    Ok(report)
}

fn domain_edges(precision: Precision, rounding: RoundingMode) -> Vec<(&'static str, String)> {
    let zero = MpFloat::zero(precision);
    let minus_one = MpFloat::from_i64(-1, precision, rounding);
    vec![
        ("sqrt(0)", describe(zero.sqrt(rounding))),
        ("ln(0)", describe(zero.ln(rounding))),
        ("sqrt(-1)", describe(minus_one.sqrt(rounding))),
        ("1 / 0", describe(minus_one.neg().div(&zero, rounding))),
    ]
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig, x: &str) -> Result<()> {
    let report = execute(config, x)?;
    output::emit(&report, config.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_functions_at_one_half() {
        let report = execute(&AppConfig::default(), DEFAULT_X).unwrap();
        assert_eq!(report.get("exp(x)"), Some("1.6487212707001281468486508"));
        assert_eq!(report.get("ln(x)"), Some("-0.6931471805599453094172321"));
        assert_eq!(report.get("sqrt(x)"), Some("0.7071067811865475244008444"));
        assert_eq!(report.get("sin(x)"), Some("0.4794255386042030002732879"));
        assert_eq!(report.get("cos(x)"), Some("0.8775825618903727161162816"));
        assert_eq!(report.get("tan(x)"), Some("0.5463024898437905132551795"));
    }

    #[test]
    fn test_domain_errors_are_reported() {
        let report = execute(&AppConfig::default(), DEFAULT_X).unwrap();
        assert_eq!(report.get("sqrt(0)"), Some("0.0000000000000000000000000"));
        assert_eq!(
            report.get("ln(0)"),
            Some("error: Logarithm of a non-positive number")
        );
        assert_eq!(
            report.get("sqrt(-1)"),
            Some("error: Square root of a negative number")
        );
        assert_eq!(report.get("1 / 0"), Some("error: Division by zero"));
    }

    #[test]
    fn test_negative_argument() {
        let report = execute(&AppConfig::default(), "-2").unwrap();
        assert!(report.get("ln(x)").unwrap().starts_with("error:"));
        assert!(report.get("sqrt(x)").unwrap().starts_with("error:"));
        assert!(report.get("exp(x)").unwrap().starts_with("0.1353352832"));
        assert!(report.get("sin(x)").unwrap().starts_with("-0.9092974268"));
        assert!(report.get("tan(x)").unwrap().starts_with("2.1850398632"));
    }
}
