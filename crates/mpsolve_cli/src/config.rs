//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use mpsolve_core::math::solvers::{NewtonConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use mpsolve_core::types::{MpFloat, Precision, RoundingMode, DEFAULT_PRECISION_BITS};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid precision: {0} bits. Must be at least 1")]
    InvalidPrecision(usize),

    #[error("Invalid rounding mode: {0}. Must be one of: nearest, toward-zero, toward-positive, toward-negative")]
    InvalidRounding(String),

    #[error("Invalid tolerance: {0}. Must be a positive decimal number")]
    InvalidTolerance(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Solver and reporting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Working precision in bits
    pub precision: usize,
    /// Rounding mode applied to every operation
    #[serde(deserialize_with = "deserialize_rounding")]
    pub rounding: RoundingMode,
    /// Convergence tolerance as a decimal string
    pub tolerance: String,
    /// Newton iteration budget
    pub max_iterations: usize,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Report format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
}

fn deserialize_rounding<'de, D>(deserializer: D) -> Result<RoundingMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    RoundingMode::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION_BITS,
            rounding: RoundingMode::Nearest,
            tolerance: DEFAULT_TOLERANCE.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            log_level: LogLevel::Info,
            format: OutputFormat::Table,
        }
    }
}

impl AppConfig {
    /// Override fields for which an `MPSOLVE_*` variable is set
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(bits) = std::env::var("MPSOLVE_PRECISION") {
            self.precision = bits
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("MPSOLVE_PRECISION={}", bits)))?;
        }

        if let Ok(rounding) = std::env::var("MPSOLVE_ROUNDING") {
            self.rounding = parse_rounding(&rounding)?;
        }

        if let Ok(tolerance) = std::env::var("MPSOLVE_TOLERANCE") {
            self.tolerance = tolerance;
        }

        if let Ok(max_str) = std::env::var("MPSOLVE_MAX_ITERATIONS") {
            self.max_iterations = max_str
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("MPSOLVE_MAX_ITERATIONS={}", max_str)))?;
        }

        if let Ok(log_level) = std::env::var("MPSOLVE_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Ok(format) = std::env::var("MPSOLVE_FORMAT") {
            self.format = OutputFormat::from_str(&format)?;
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.newton_config().map(|_| ())
    }

    /// Working precision
    pub fn precision(&self) -> Result<Precision, ConfigError> {
        Precision::new(self.precision).map_err(|_| ConfigError::InvalidPrecision(self.precision))
    }

    /// Newton configuration at the working precision
    pub fn newton_config(&self) -> Result<NewtonConfig<MpFloat>, ConfigError> {
        let precision = self.precision()?;
        NewtonConfig::from_decimal(
            &self.tolerance,
            precision,
            self.max_iterations,
            self.rounding,
        )
        .map_err(|_| ConfigError::InvalidTolerance(self.tolerance.clone()))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        if let Some(rounding) = &cli.rounding {
            self.rounding = parse_rounding(rounding)?;
        }
        if let Some(tolerance) = &cli.tolerance {
            self.tolerance = tolerance.clone();
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        Ok(())
    }
}

fn parse_rounding(s: &str) -> Result<RoundingMode, ConfigError> {
    RoundingMode::from_str(s).map_err(|_| ConfigError::InvalidRounding(s.to_string()))
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Precision override (bits)
    pub precision: Option<usize>,
    /// Rounding mode override
    pub rounding: Option<String>,
    /// Tolerance override
    pub tolerance: Option<String>,
    /// Iteration budget override
    pub max_iterations: Option<usize>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpsolve_core::traits::BigFloat;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.precision, 128);
        assert_eq!(config.rounding, RoundingMode::Nearest);
        assert_eq!(config.tolerance, "1e-25");
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::from_str("csv"),
            Err(ConfigError::InvalidFormat(_))
        ));
        assert_eq!(format!("{}", OutputFormat::Json), "json");
    }

    #[test]
    fn test_validate_precision() {
        let config = AppConfig {
            precision: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrecision(0))
        ));
    }

    #[test]
    fn test_validate_tolerance() {
        let mut config = AppConfig::default();

        config.tolerance = "abc".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTolerance(_))
        ));

        config.tolerance = "0".to_string();
        assert!(config.validate().is_err());

        config.tolerance = "-1e-10".to_string();
        assert!(config.validate().is_err());

        config.tolerance = "1e-40".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_newton_config_uses_working_precision() {
        let config = AppConfig {
            precision: 256,
            rounding: RoundingMode::TowardZero,
            max_iterations: 7,
            ..Default::default()
        };
        let newton = config.newton_config().unwrap();
        assert_eq!(newton.precision().bits(), 256);
        assert_eq!(newton.tolerance.precision().bits(), 256);
        assert_eq!(newton.rounding, RoundingMode::TowardZero);
        assert_eq!(newton.max_iterations, 7);
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = AppConfig::default();
        let cli = CliArgs {
            precision: Some(512),
            rounding: Some("rndu".to_string()),
            tolerance: Some("1e-50".to_string()),
            max_iterations: Some(20),
            log_level: Some("debug".to_string()),
            format: Some("json".to_string()),
            config_file: None,
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.precision, 512);
        assert_eq!(config.rounding, RoundingMode::TowardPositive);
        assert_eq!(config.tolerance, "1e-50");
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_args_merge_rejects_unknown_rounding() {
        let mut config = AppConfig::default();
        let cli = CliArgs {
            rounding: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.merge_with_cli(&cli),
            Err(ConfigError::InvalidRounding(_))
        ));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            precision = 256
            rounding = "toward-negative"
            tolerance = "1e-60"
            max_iterations = 50
            log_level = "warn"
            format = "json"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.precision, 256);
        assert_eq!(config.rounding, RoundingMode::TowardNegative);
        assert_eq!(config.tolerance, "1e-60");
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            precision = 64
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.precision, 64);
        assert_eq!(config.rounding, RoundingMode::Nearest);
        assert_eq!(config.tolerance, "1e-25");
    }

    #[test]
    fn test_toml_rejects_unknown_rounding() {
        let toml_str = r#"
            rounding = "sideways"
        "#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let path = PathBuf::from("/nonexistent/mpsolve.toml");
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_build_config_with_defaults() {
        // Clear any environment variables that might interfere
        std::env::remove_var("MPSOLVE_PRECISION");
        std::env::remove_var("MPSOLVE_ROUNDING");
        std::env::remove_var("MPSOLVE_TOLERANCE");
        std::env::remove_var("MPSOLVE_MAX_ITERATIONS");
        std::env::remove_var("MPSOLVE_LOG_LEVEL");
        std::env::remove_var("MPSOLVE_FORMAT");

        let cli = CliArgs::default();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.precision, 128);
        assert_eq!(config.format, OutputFormat::Table);

        let cli = CliArgs {
            precision: Some(64),
            ..Default::default()
        };
        let config = build_config(&cli).unwrap();
        assert_eq!(config.precision().unwrap().bits(), 64);
    }
}
