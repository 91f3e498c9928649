//! Whole-note evaluation and running totals.

use serde::Serialize;

use super::line::{EvalMode, LineResult, parse_line_with_mode};

/// An evaluated calculator note: every line's result plus the total.
///
/// Sheets are derived from the note text and never edited in place;
/// re-evaluate the text to get a fresh sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    lines: Vec<LineResult>,
    total: f64,
}

impl Sheet {
    /// Evaluates each line independently and sums the values in line order.
    ///
    /// Lines without a value contribute nothing to the total.
    pub fn evaluate<I, S>(lines: I, mode: EvalMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<LineResult> = lines
            .into_iter()
            .map(|line| parse_line_with_mode(line.as_ref(), mode))
            .collect();
        // Folding from 0.0 keeps an empty total at positive zero.
        let total = lines
            .iter()
            .filter_map(LineResult::value)
            .fold(0.0, |acc, v| acc + v);

        tracing::debug!(lines = lines.len(), total, %mode, "evaluated sheet");
        Self { lines, total }
    }

    /// Evaluates a whole note buffer, one line per `\n` or `\r\n`.
    pub fn from_text(text: &str, mode: EvalMode) -> Self {
        Self::evaluate(text.lines(), mode)
    }

    pub fn lines(&self) -> &[LineResult] {
        &self.lines
    }

    /// Returns the sum of all line values.
    ///
    /// Every line value is finite, but the sum is not checked: totals past
    /// `f64::MAX` become infinite and serialize to JSON as `null`.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the number of lines that produced a value.
    pub fn value_count(&self) -> usize {
        self.lines.iter().filter(|l| l.value().is_some()).count()
    }

    /// Iterates over lines that failed to evaluate, with 1-based line numbers.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &LineResult)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.error().is_some())
            .map(|(i, l)| (i + 1, l))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Evaluates lines in [`EvalMode::Strict`] and totals them.
///
/// # Examples
///
/// ```
/// use tally::domain::calculate_total;
///
/// let sheet = calculate_total(["a: 1", "b: 2", "not a number"]);
/// assert_eq!(sheet.total(), 3.0);
/// assert_eq!(sheet.lines().len(), 3);
/// ```
pub fn calculate_total<I, S>(lines: I) -> Sheet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Sheet::evaluate(lines, EvalMode::Strict)
}
