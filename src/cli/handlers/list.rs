//! List command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::{note_total, truncate_str};
use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteTotal, Output, OutputFormat};
use crate::domain::{EvalMode, Sheet};
use crate::infra::{read_calc_note, scan_calc_notes};

pub fn handle_list(args: &ListArgs, notes_dir: &Path, mode: EvalMode, config: &Config) -> Result<()> {
    // 1. Discover notes
    let paths = scan_calc_notes(notes_dir, config.extension())
        .with_context(|| format!("failed to scan notes directory {}", notes_dir.display()))?;

    // 2. Evaluate each, skipping notes that cannot be read
    let mut notes: Vec<NoteTotal> = Vec::with_capacity(paths.len());
    for path in &paths {
        match read_calc_note(&notes_dir.join(path)) {
            Ok(text) => notes.push(note_total(
                path.display().to_string(),
                &Sheet::from_text(&text, mode),
            )),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable note"),
        }
    }

    // 3. Output based on format
    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                println!("{:<40}  {:>5}  {:>6}  {:>14}", "Path", "Lines", "Errors", "Total");
                println!(
                    "{:<40}  {:>5}  {:>6}  {:>14}",
                    "----------------------------------------", "-----", "------", "--------------"
                );

                for note in &notes {
                    println!(
                        "{:<40}  {:>5}  {:>6}  {:>14}",
                        truncate_str(&note.path, 40),
                        note.lines,
                        note.errors,
                        config.format.format(note.total)
                    );
                }

                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&notes))?);
        }
        OutputFormat::Plain => {
            for note in &notes {
                println!("{}", notes_dir.join(&note.path).display());
            }
        }
    }

    Ok(())
}
