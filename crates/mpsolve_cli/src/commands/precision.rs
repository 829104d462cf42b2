//! `mpsolve precision`: π at a low and a high precision.

use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::{MpFloat, Precision, RoundingMode};

use crate::config::AppConfig;
use crate::output::{self, ValueReport};
use crate::Result;

/// Low precision and the digits shown for it.
pub const LOW: (usize, usize) = (64, 20);

/// High precision and the digits shown for it.
pub const HIGH: (usize, usize) = (512, 50);

/// π at `bits`.
pub fn pi_at(bits: usize, rounding: RoundingMode) -> Result<MpFloat> {
    Ok(MpFloat::pi(Precision::new(bits)?, rounding))
}

/// Compare π at 64 and 512 bits.
pub fn execute(config: &AppConfig) -> Result<ValueReport> {
    let rounding = config.rounding;
    let mut report = ValueReport::new("pi at two precisions", None);
    for (bits, digits) in [LOW, HIGH] {
        report.push(
            format!("{} bits", bits),
            pi_at(bits, rounding)?.to_decimal_string(digits),
        );
    }

    let low = pi_at(LOW.0, rounding)?;
    let high = pi_at(HIGH.0, rounding)?;
    let difference = low.round_to(high.precision(), rounding).sub(&high, rounding);
    report.push("difference", format!("{:.6e}", difference.to_f64()));
    report.note(format!(
        "{} bits hold about {} decimal digits, {} bits about {}",
        LOW.0,
        Precision::new(LOW.0)?.decimal_digits(),
        HIGH.0,
        Precision::new(HIGH.0)?.decimal_digits()
    ));
    Ok(report)
}

/// Run the command, printing the report in the configured format.
pub fn run(config: &AppConfig) -> Result<()> {
    let report = execute(config)?;
    output::emit(&report, config.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pi_at_two_precisions() {
        let report = execute(&AppConfig::default()).unwrap();
        assert_eq!(report.get("64 bits"), Some("3.14159265358979323851"));
        assert_eq!(
            report.get("512 bits"),
            Some("3.14159265358979323846264338327950288419716939937511")
        );
        assert_eq!(
            report.notes,
            vec!["64 bits hold about 19 decimal digits, 512 bits about 154".to_string()]
        );
    }

    #[test]
    fn test_low_precision_error_is_visible() {
        let low = pi_at(LOW.0, RoundingMode::Nearest).unwrap();
        let high = pi_at(HIGH.0, RoundingMode::Nearest).unwrap();
        let lifted = low.round_to(high.precision(), RoundingMode::Nearest);
        let error = lifted.sub(&high, RoundingMode::Nearest).abs().to_f64();
        assert!(error > 0.0 && error < 1e-18);

        let report = execute(&AppConfig::default()).unwrap();
        assert!(report.get("difference").unwrap().contains('e'));
    }

    #[test]
    fn test_directed_rounding_changes_low_precision_digits() {
        let mut config = AppConfig::default();
        config.rounding = RoundingMode::TowardNegative;
        let down = execute(&config).unwrap();
        config.rounding = RoundingMode::TowardPositive;
        let up = execute(&config).unwrap();
        assert_ne!(down.get("64 bits"), up.get("64 bits"));
    }
}
