//! Check command handler.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::{STDIN_NAME, read_stdin_note, resolve_note_path};
use crate::cli::CheckArgs;
use crate::cli::config::Config;
use crate::cli::output::{CheckIssue, Output, OutputFormat};
use crate::domain::{EvalMode, Sheet};
use crate::infra::{read_calc_note, scan_calc_notes};

pub fn handle_check(args: &CheckArgs, notes_dir: &Path, mode: EvalMode, config: &Config) -> Result<()> {
    // 1. Collect notes to check: explicit files, or every note in the directory
    let targets: Vec<(String, PathBuf)> = if args.files.is_empty() {
        scan_calc_notes(notes_dir, config.extension())
            .with_context(|| format!("failed to scan notes directory {}", notes_dir.display()))?
            .into_iter()
            .map(|p| (p.display().to_string(), notes_dir.join(p)))
            .collect()
    } else {
        args.files
            .iter()
            .map(|f| {
                if f == Path::new("-") {
                    (STDIN_NAME.to_string(), f.clone())
                } else {
                    (f.display().to_string(), resolve_note_path(f, notes_dir))
                }
            })
            .collect()
    };

    if targets.is_empty() {
        if matches!(args.format, OutputFormat::Human) {
            println!("No notes found.");
        }
        return Ok(());
    }

    // 2. Evaluate each note and collect failing lines
    let issues = collect_issues(&targets, mode);

    // 3. Display results
    match args.format {
        OutputFormat::Human => {
            if issues.is_empty() {
                println!("All notes OK.");
                return Ok(());
            }
            for issue in &issues {
                println!("error: {}", issue);
            }
            let affected = {
                let mut paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
                paths.dedup();
                paths.len()
            };
            println!(
                "\nFound {} error(s) in {} of {} note(s)",
                issues.len(),
                affected,
                targets.len()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&issues))?);
        }
        OutputFormat::Plain => {
            for issue in &issues {
                match issue.line {
                    Some(line) => println!("{}:{}", issue.path, line),
                    None => println!("{}", issue.path),
                }
            }
        }
    }

    // 4. Exit code: fail when any line failed
    if !issues.is_empty() {
        bail!("check failed");
    }
    Ok(())
}

/// Evaluates each target and reports unreadable files and failing lines.
///
/// A target path of `-` is read from stdin.
pub(crate) fn collect_issues(targets: &[(String, PathBuf)], mode: EvalMode) -> Vec<CheckIssue> {
    let mut issues = Vec::new();
    for (name, path) in targets {
        let read = if path == Path::new("-") {
            read_stdin_note()
        } else {
            read_calc_note(path)
        };
        let text = match read {
            Ok(text) => text,
            Err(e) => {
                issues.push(CheckIssue {
                    path: name.clone(),
                    line: None,
                    input: None,
                    error: e.to_string(),
                    detail: e.to_string(),
                });
                continue;
            }
        };

        let sheet = Sheet::from_text(&text, mode);
        for (number, line) in sheet.errors() {
            if let Some(error) = line.error() {
                issues.push(CheckIssue {
                    path: name.clone(),
                    line: Some(number),
                    input: Some(line.input().to_string()),
                    error: error.to_string(),
                    detail: error.detail(),
                });
            }
        }
    }
    issues
}
