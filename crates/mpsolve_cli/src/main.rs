//! mpsolve CLI - Multi-precision Newton-Raphson from the command line
//!
//! This is the operational entry point for the mpsolve library.
//!
//! # Commands
//!
//! - `mpsolve system` - Solve a built-in nonlinear system, printing every iterate
//! - `mpsolve scalar` - Solve `x^3 - 2x - 5 = 0`
//! - `mpsolve multistart --guesses "x,y;x,y"` - Solve from several starting points
//! - `mpsolve arith` / `functions` / `rounding` / `precision` / `timing` -
//!   arbitrary-precision arithmetic demonstrations
//!
//! # Configuration
//!
//! Settings are resolved with priority CLI arguments > `MPSOLVE_*`
//! environment variables > TOML file (`--config`) > defaults.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::SystemProblem;
use config::{build_config, CliArgs};

/// Multi-precision Newton-Raphson solver
#[derive(Parser)]
#[command(name = "mpsolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "MPSOLVE_CONFIG")]
    config: Option<PathBuf>,

    /// Working precision in bits
    #[arg(short, long, global = true)]
    precision: Option<usize>,

    /// Rounding mode (nearest, toward-zero, toward-positive, toward-negative)
    #[arg(short, long, global = true)]
    rounding: Option<String>,

    /// Convergence tolerance, as a decimal string
    #[arg(short, long, global = true)]
    tolerance: Option<String>,

    /// Newton iteration budget
    #[arg(short = 'n', long, global = true)]
    max_iterations: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            precision: self.precision,
            rounding: self.rounding.clone(),
            tolerance: self.tolerance.clone(),
            max_iterations: self.max_iterations,
            log_level: if self.verbose {
                Some("debug".to_string())
            } else {
                self.log_level.clone()
            },
            format: self.format.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a nonlinear system with Newton's method
    System {
        /// System to solve
        #[arg(long, value_enum, default_value = "circle-parabola")]
        problem: SystemProblem,

        /// Initial guess as comma-separated components (e.g. "1.5,1.5")
        #[arg(short, long, allow_hyphen_values = true)]
        guess: Option<String>,
    },

    /// Solve x^3 - 2x - 5 = 0 with Newton's method
    Scalar {
        /// Initial guess
        #[arg(short, long, allow_hyphen_values = true)]
        guess: Option<String>,
    },

    /// Solve a nonlinear system from several starting points in parallel
    Multistart {
        /// System to solve
        #[arg(long, value_enum, default_value = "circle-parabola")]
        problem: SystemProblem,

        /// Starting points, separated by ';' (e.g. "1.5,1.5;-1.5,1.5")
        #[arg(short, long, allow_hyphen_values = true)]
        guesses: Option<String>,

        /// Roots closer than this in every component are merged
        #[arg(short, long, default_value = "1e-10")]
        separation: String,
    },

    /// Sum, product, quotient and tenth power of two numbers
    Arith {
        /// First operand
        #[arg(short, long, default_value = commands::arith::DEFAULT_A, allow_hyphen_values = true)]
        a: String,

        /// Second operand
        #[arg(short, long, default_value = commands::arith::DEFAULT_B, allow_hyphen_values = true)]
        b: String,
    },

    /// exp, ln and sqrt of a number, plus domain errors
    Functions {
        /// Argument
        #[arg(short, long, default_value = commands::functions::DEFAULT_X, allow_hyphen_values = true)]
        x: String,
    },

    /// A quotient under every rounding mode
    Rounding {
        /// Numerator
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        numerator: String,

        /// Denominator
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        denominator: String,

        /// Precision in bits for this comparison
        #[arg(long, default_value_t = commands::rounding::DEFAULT_BITS)]
        bits: usize,
    },

    /// Pi at 64 and 512 bits
    Precision,

    /// Time repeated multiply, divide and sqrt
    Timing {
        /// Repetitions per operation
        #[arg(short, long, default_value_t = commands::timing::DEFAULT_ITERATIONS)]
        iterations: usize,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args()).context("failed to load configuration")?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!(
        precision = config.precision,
        rounding = %config.rounding,
        tolerance = %config.tolerance,
        max_iterations = config.max_iterations,
        format = %config.format,
        "Configuration loaded"
    );

    match cli.command {
        Commands::System { problem, guess } => {
            commands::system::run(&config, problem, guess.as_deref())
        }
        Commands::Scalar { guess } => commands::scalar::run(&config, guess.as_deref()),
        Commands::Multistart {
            problem,
            guesses,
            separation,
        } => commands::multistart::run(&config, problem, guesses.as_deref(), &separation),
        Commands::Arith { a, b } => commands::arith::run(&config, &a, &b),
        Commands::Functions { x } => commands::functions::run(&config, &x),
        Commands::Rounding {
            numerator,
            denominator,
            bits,
        } => commands::rounding::run(&config, &numerator, &denominator, bits),
        Commands::Precision => commands::precision::run(&config),
        Commands::Timing { iterations } => commands::timing::run(&config, iterations),
    }?;

    Ok(())
}
