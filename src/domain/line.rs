//! Per-line parsing of calculator notes.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::expr::{ExprError, evaluate};

/// Number-like substrings picked up by the heuristic fallback.
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)?").expect("valid number pattern"));

/// How a line whose expression contains non-arithmetic characters is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    /// Report the first disallowed character as an error.
    #[default]
    Strict,
    /// Fall back to the last number-like substring of the text.
    ///
    /// A `-` directly before the digits makes the number negative unless it
    /// follows a letter or digit, so `Refund -50` is -50 but `pages 10-20`
    /// is 20.
    Heuristic,
}

/// Error returned when parsing an unknown evaluation mode.
#[derive(Debug, Clone)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid mode '{}': expected 'strict' or 'heuristic'",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for EvalMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(EvalMode::Strict),
            "heuristic" => Ok(EvalMode::Heuristic),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalMode::Strict => write!(f, "strict"),
            EvalMode::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Why a line that looked like an expression produced no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// The expression contains a character outside the arithmetic allow-list.
    InvalidCharacter(char),
    /// The expression was rejected by the evaluator.
    InvalidExpression(ExprError),
}

impl LineError {
    /// Returns a longer explanation than the display tag.
    pub fn detail(&self) -> String {
        match self {
            LineError::InvalidCharacter(c) => {
                format!("'{}' is not allowed in an expression", c)
            }
            LineError::InvalidExpression(e) => e.to_string(),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::InvalidCharacter(c) => write!(f, "Invalid character '{}'", c),
            LineError::InvalidExpression(_) => write!(f, "Invalid expression"),
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LineError::InvalidCharacter(_) => None,
            LineError::InvalidExpression(e) => Some(e),
        }
    }
}

/// What evaluating a line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank, prose, or label-only line. Not a failure.
    NotExpression,
    /// The line evaluated to a finite number.
    Value(f64),
    /// The line looked like an expression but could not be evaluated.
    Error(LineError),
}

/// The evaluation of a single line of a calculator note.
///
/// A result never carries both a value and an error: both are views of a
/// single [`Outcome`].
///
/// # Examples
///
/// ```
/// use tally::domain::parse_line;
///
/// let result = parse_line("coffee: 5.50");
/// assert_eq!(result.label(), Some("coffee"));
/// assert_eq!(result.value(), Some(5.5));
/// assert!(result.error().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    input: String,
    label: Option<String>,
    outcome: Outcome,
}

impl LineResult {
    /// The raw line as given.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Text before the first colon, trimmed.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn value(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LineError> {
        match &self.outcome {
            Outcome::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the line was classified as an expression.
    pub fn is_expression(&self) -> bool {
        !matches!(self.outcome, Outcome::NotExpression)
    }
}

#[derive(Serialize)]
struct LineResultRepr<'a> {
    input: &'a str,
    label: Option<&'a str>,
    value: Option<f64>,
    error: Option<String>,
}

impl Serialize for LineResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        LineResultRepr {
            input: &self.input,
            label: self.label(),
            value: self.value(),
            error: self.error().map(ToString::to_string),
        }
        .serialize(serializer)
    }
}

/// Parses and evaluates a line in [`EvalMode::Strict`].
pub fn parse_line(line: &str) -> LineResult {
    parse_line_with_mode(line, EvalMode::Strict)
}

/// Parses and evaluates one line of a calculator note.
///
/// The line is split at its first colon into a label and an expression.
/// Expressions without any digit are prose and yield neither value nor
/// error. Only digits, whitespace, and `+ - * / ( ) . , %` ever reach the
/// evaluator; anything else is an error in strict mode, while heuristic
/// mode takes the last number-like substring instead.
pub fn parse_line_with_mode(line: &str, mode: EvalMode) -> LineResult {
    let trimmed = line.trim();
    let (label, expr) = match trimmed.split_once(':') {
        Some((label, rest)) => (Some(label.trim().to_string()), rest.trim()),
        None => (None, trimmed),
    };

    LineResult {
        input: line.to_string(),
        label,
        outcome: evaluate_expression(expr, mode),
    }
}

fn evaluate_expression(expr: &str, mode: EvalMode) -> Outcome {
    if !expr.chars().any(|c| c.is_ascii_digit()) {
        return Outcome::NotExpression;
    }

    if let Some(bad) = expr.chars().find(|&c| !is_allowed(c)) {
        return match mode {
            EvalMode::Strict => {
                tracing::trace!(expr, %bad, "rejected disallowed character");
                Outcome::Error(LineError::InvalidCharacter(bad))
            }
            EvalMode::Heuristic => trailing_number(expr)
                .map(Outcome::Value)
                .unwrap_or(Outcome::NotExpression),
        };
    }

    match evaluate(expr) {
        Ok(value) => Outcome::Value(value),
        Err(e) => {
            tracing::trace!(expr, error = %e, "expression failed to evaluate");
            Outcome::Error(LineError::InvalidExpression(e))
        }
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || "+-*/().,%".contains(c)
}

/// Finds the last number-like substring, dropping thousands separators.
fn trailing_number(text: &str) -> Option<f64> {
    let found = TRAILING_NUMBER.find_iter(text).last()?;
    let mut number = found.as_str();
    let attached = text[..found.start()]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    if attached {
        number = number.trim_start_matches('-');
    }
    let digits: String = number
        .trim_end_matches(',')
        .chars()
        .filter(|&c| c != ',')
        .collect();
    digits.parse().ok().filter(|v: &f64| v.is_finite())
}
