//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::LineResult;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Bare values or paths, one per line
    Plain,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A fully evaluated note.
#[derive(Debug, Serialize)]
pub struct SheetReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub lines: &'a [LineResult],
    pub total: f64,
    /// Total rendered with the configured number format.
    pub formatted_total: String,
}

/// The total of a single note.
#[derive(Debug, Serialize)]
pub struct NoteTotal {
    pub path: String,
    pub lines: usize,
    pub values: usize,
    pub errors: usize,
    pub total: f64,
}

/// Totals across several notes.
#[derive(Debug, Serialize)]
pub struct TotalsReport {
    pub notes: Vec<NoteTotal>,
    pub total: f64,
}

/// A line reported by the `check` command.
#[derive(Debug, Serialize)]
pub struct CheckIssue {
    pub path: String,
    /// 1-based line number; absent when the file itself could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub error: String,
    pub detail: String,
}

impl std::fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}: {}", self.path, line, self.error, self.detail),
            None => write!(f, "{}: {}", self.path, self.error),
        }
    }
}
