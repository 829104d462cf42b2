//! Report types and rendering.
//!
//! Every command builds a serialisable report; [`emit`] prints it either as a
//! plain-text table or as pretty JSON depending on the configured format.

use std::io::Write;

use mpsolve_core::math::linalg::Vector;
use mpsolve_core::traits::BigFloat;
use mpsolve_core::types::{MpFloat, SolverError};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Width of one numeric column in iteration tables.
const COLUMN_WIDTH: usize = 26;

/// Digits after the point used for iterates in iteration tables.
const TRACE_DIGITS: usize = 20;

/// Plain-text rendering of a report.
pub trait TableReport {
    /// Write the report as aligned text.
    fn write_table(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

/// Render `report` in `format`.
pub fn render<R>(report: &R, format: OutputFormat) -> Result<String>
where
    R: Serialize + TableReport,
{
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Table => report.write_table(&mut buffer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut buffer, report)?;
            writeln!(buffer)?;
        }
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Render `report` in `format` to standard output.
pub fn emit<R>(report: &R, format: OutputFormat) -> Result<()>
where
    R: Serialize + TableReport,
{
    let rendered = render(report, format)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Decimal strings for every component of `v`.
pub fn decimals(v: &Vector<MpFloat>, fraction_digits: usize) -> Vec<String> {
    v.iter().map(|x| x.to_decimal_string(fraction_digits)).collect()
}

/// Compact scientific rendering for residual norms.
pub fn scientific(x: &MpFloat) -> String {
    format!("{:.6e}", x.to_f64())
}

// ========================================
// Solve reports
// ========================================

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolveStatus {
    /// Residual norm dropped below the tolerance.
    Converged,
    /// Iteration budget exhausted.
    NotConverged,
    /// Jacobian exactly singular at an iterate.
    SingularJacobian,
    /// Any other failure.
    Failed,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Converged => write!(f, "converged"),
            SolveStatus::NotConverged => write!(f, "not converged"),
            SolveStatus::SingularJacobian => write!(f, "singular Jacobian"),
            SolveStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One evaluated iterate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRow {
    /// Number of Newton updates applied
    pub iteration: usize,
    /// Iterate components
    pub x: Vec<String>,
    /// Residual components
    pub residual: Vec<String>,
    /// Euclidean norm of the residual
    pub residual_norm: String,
}

impl IterationRow {
    /// Row for iterate `x` with residual `residual` and norm `norm`.
    pub fn new(
        iteration: usize,
        x: &Vector<MpFloat>,
        residual: &Vector<MpFloat>,
        norm: &MpFloat,
    ) -> Self {
        Self {
            iteration,
            x: decimals(x, TRACE_DIGITS),
            residual: residual.iter().map(scientific).collect(),
            residual_norm: scientific(norm),
        }
    }
}

/// Outcome of a single Newton solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Problem name
    pub problem: String,
    /// Working precision in bits
    pub precision_bits: usize,
    /// Rounding mode
    pub rounding: String,
    /// Convergence tolerance
    pub tolerance: String,
    /// Variable names, one per component
    pub variables: Vec<String>,
    /// Residual component names
    pub equations: Vec<String>,
    /// How the solve ended
    pub status: SolveStatus,
    /// Newton updates performed
    pub iterations: usize,
    /// Root, or the last iterate on failure
    pub root: Vec<String>,
    /// Residual at `root`
    pub residual: Vec<String>,
    /// Residual norm at `root`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual_norm: Option<String>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Every evaluated iterate, initial guess first
    pub trace: Vec<IterationRow>,
}

impl SolveReport {
    /// `true` when the solve converged.
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    /// Record `err`, keeping the iterate it carries with `digits` decimals.
    pub fn record_failure(&mut self, err: &SolverError<MpFloat>, digits: usize) {
        self.error = Some(err.to_string());
        match err {
            SolverError::NotConverged {
                iterations,
                last_iterate,
                residual_norm,
            } => {
                self.status = SolveStatus::NotConverged;
                self.iterations = *iterations;
                self.root = decimals(last_iterate, digits);
                self.residual_norm = Some(scientific(residual_norm));
            }
            SolverError::SingularJacobian { iteration, at } => {
                self.status = SolveStatus::SingularJacobian;
                self.iterations = *iteration;
                self.root = decimals(at, digits);
            }
            _ => self.status = SolveStatus::Failed,
        }
    }
}

impl TableReport for SolveReport {
    fn write_table(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "=== {} ===", self.problem)?;
        writeln!(
            out,
            "precision: {} bits, rounding: {}, tolerance: {}",
            self.precision_bits, self.rounding, self.tolerance
        )?;
        writeln!(out)?;

        write!(out, "{:>5}", "iter")?;
        for name in self.variables.iter().chain(self.equations.iter()) {
            write!(out, " {:>width$}", name, width = COLUMN_WIDTH)?;
        }
        writeln!(out, " {:>14}", "norm")?;
        for row in &self.trace {
            write!(out, "{:>5}", row.iteration)?;
            for value in row.x.iter().chain(row.residual.iter()) {
                write!(out, " {:>width$}", value, width = COLUMN_WIDTH)?;
            }
            writeln!(out, " {:>14}", row.residual_norm)?;
        }
        writeln!(out)?;

        writeln!(out, "status: {} after {} iterations", self.status, self.iterations)?;
        if let Some(error) = &self.error {
            writeln!(out, "error: {}", error)?;
        }
        let label = if self.converged() { "solution" } else { "last iterate" };
        for (name, value) in self.variables.iter().zip(&self.root) {
            writeln!(out, "{} {} = {}", label, name, value)?;
        }
        if !self.residual.is_empty() {
            writeln!(out, "verification:")?;
            for (name, value) in self.equations.iter().zip(&self.residual) {
                writeln!(out, "  {} = {}", name, value)?;
            }
        }
        if let Some(norm) = &self.residual_norm {
            writeln!(out, "residual norm = {}", norm)?;
        }
        Ok(())
    }
}

/// Outcome of one starting point of a multi-start solve.
#[derive(Debug, Clone, Serialize)]
pub struct StartOutcome {
    /// Initial guess
    pub guess: Vec<String>,
    /// Converged root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<Vec<String>>,
    /// Newton updates performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a multi-start solve.
#[derive(Debug, Clone, Serialize)]
pub struct MultiStartReport {
    /// Problem name
    pub problem: String,
    /// Working precision in bits
    pub precision_bits: usize,
    /// Per-guess outcomes, in input order
    pub starts: Vec<StartOutcome>,
    /// Distinct roots found, in first-seen order
    pub distinct_roots: Vec<Vec<String>>,
}

impl TableReport for MultiStartReport {
    fn write_table(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "=== {} (multi-start) ===", self.problem)?;
        writeln!(out, "precision: {} bits", self.precision_bits)?;
        writeln!(out)?;
        for start in &self.starts {
            let guess = start.guess.join(", ");
            match (&start.root, start.iterations, &start.error) {
                (Some(root), Some(iterations), _) => writeln!(
                    out,
                    "({}) -> ({}) in {} iterations",
                    guess,
                    root.join(", "),
                    iterations
                )?,
                (_, _, Some(error)) => writeln!(out, "({}) -> {}", guess, error)?,
                _ => writeln!(out, "({}) -> no result", guess)?,
            }
        }
        writeln!(out)?;
        writeln!(out, "{} distinct roots:", self.distinct_roots.len())?;
        for root in &self.distinct_roots {
            writeln!(out, "  ({})", root.join(", "))?;
        }
        Ok(())
    }
}

// ========================================
// Value reports
// ========================================

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRow {
    /// Label
    pub label: String,
    /// Rendered value
    pub value: String,
}

/// Titled list of labelled values, used by the arithmetic demonstrations.
#[derive(Debug, Clone, Serialize)]
pub struct ValueReport {
    /// Section title
    pub title: String,
    /// Working precision in bits, when a single one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_bits: Option<usize>,
    /// Rows in display order
    pub rows: Vec<ValueRow>,
    /// Free-form remarks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ValueReport {
    /// Empty report titled `title`.
    pub fn new(title: impl Into<String>, precision_bits: Option<usize>) -> Self {
        Self {
            title: title.into(),
            precision_bits,
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(ValueRow {
            label: label.into(),
            value: value.into(),
        });
    }

    /// Append a remark.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Value of the first row labelled `label`.
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

impl TableReport for ValueReport {
    fn write_table(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "=== {} ===", self.title)?;
        if let Some(bits) = self.precision_bits {
            writeln!(out, "precision: {} bits", bits)?;
        }
        let width = self.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(out, "{:<width$} = {}", row.label, row.value, width = width)?;
        }
        for note in &self.notes {
            writeln!(out, "{}", note)?;
        }
        Ok(())
    }
}
