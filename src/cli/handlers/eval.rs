//! Eval command handler.

use std::iter;
use std::path::Path;

use anyhow::Result;

use super::{load_note, truncate_str};
use crate::cli::EvalArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat, SheetReport};
use crate::domain::{EvalMode, NumberFormat, Outcome, Sheet};

/// Widest input column before lines are truncated.
const MAX_INPUT_WIDTH: usize = 60;

const TOTAL_LABEL: &str = "Total";

pub fn handle_eval(args: &EvalArgs, notes_dir: &Path, mode: EvalMode, config: &Config) -> Result<()> {
    let note = load_note(args.file.as_deref(), notes_dir)?;
    tracing::info!(note = %note.name, %mode, "evaluating note");
    let sheet = Sheet::from_text(&note.text, mode);

    match args.format {
        OutputFormat::Human => print!("{}", render_sheet(&sheet, &config.format, args.details)),
        OutputFormat::Json => {
            let report = SheetReport {
                path: note.path.as_ref().map(|p| p.display().to_string()),
                lines: sheet.lines(),
                total: sheet.total(),
                formatted_total: config.format.format(sheet.total()),
            };
            println!("{}", serde_json::to_string_pretty(&Output::new(report))?);
        }
        OutputFormat::Plain => {
            for line in sheet.lines() {
                match line.value() {
                    Some(value) => println!("{}", value),
                    None => println!(),
                }
            }
        }
    }

    Ok(())
}

/// Renders a sheet as an input column, a right-aligned result column, and a
/// total footer.
///
/// Failing lines show their error tag prefixed with `!`. With `details`,
/// an explanation of each failure follows the footer.
pub fn render_sheet(sheet: &Sheet, format: &NumberFormat, details: bool) -> String {
    let results: Vec<String> = sheet
        .lines()
        .iter()
        .map(|line| match line.outcome() {
            Outcome::Value(v) => format.format(*v),
            Outcome::Error(e) => format!("! {}", e),
            Outcome::NotExpression => String::new(),
        })
        .collect();
    let total = format.format(sheet.total());

    let input_width = sheet
        .lines()
        .iter()
        .map(|l| l.input().trim_end().chars().count())
        .max()
        .unwrap_or(0)
        .clamp(TOTAL_LABEL.len(), MAX_INPUT_WIDTH);
    let result_width = results
        .iter()
        .chain(iter::once(&total))
        .map(|r| r.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (line, result) in sheet.lines().iter().zip(&results) {
        let input = truncate_str(line.input().trim_end(), MAX_INPUT_WIDTH);
        let row = format!(
            "{:<iw$}  {:>rw$}",
            input,
            result,
            iw = input_width,
            rw = result_width
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push_str(&"-".repeat(input_width + 2 + result_width));
    out.push('\n');
    out.push_str(&format!(
        "{:<iw$}  {:>rw$}\n",
        TOTAL_LABEL,
        total,
        iw = input_width,
        rw = result_width
    ));

    if details {
        for (number, line) in sheet.errors() {
            if let Some(error) = line.error() {
                out.push_str(&format!("line {}: {}\n", number, error.detail()));
            }
        }
    }

    out
}
