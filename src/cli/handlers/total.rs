//! Total command handler.

use std::path::Path;

use anyhow::Result;

use super::{LoadedNote, load_note, note_total};
use crate::cli::TotalArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteTotal, Output, OutputFormat, TotalsReport};
use crate::domain::{EvalMode, Sheet};

pub fn handle_total(
    args: &TotalArgs,
    notes_dir: &Path,
    mode: EvalMode,
    config: &Config,
) -> Result<()> {
    let notes: Vec<LoadedNote> = if args.files.is_empty() {
        vec![load_note(None, notes_dir)?]
    } else {
        args.files
            .iter()
            .map(|file| load_note(Some(file), notes_dir))
            .collect::<Result<_>>()?
    };

    let totals: Vec<NoteTotal> = notes
        .iter()
        .map(|note| note_total(note.name.clone(), &Sheet::from_text(&note.text, mode)))
        .collect();
    let grand_total = totals.iter().map(|t| t.total).fold(0.0, |acc, v| acc + v);

    match args.format {
        OutputFormat::Human => {
            let mut rows: Vec<(&str, String)> = totals
                .iter()
                .map(|t| (t.path.as_str(), config.format.format(t.total)))
                .collect();
            if totals.len() > 1 {
                rows.push(("Total", config.format.format(grand_total)));
            }

            let name_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);
            let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
            for (name, value) in &rows {
                println!(
                    "{:<nw$}  {:>vw$}",
                    name,
                    value,
                    nw = name_width,
                    vw = value_width
                );
            }
        }
        OutputFormat::Json => {
            let report = TotalsReport {
                notes: totals,
                total: grand_total,
            };
            println!("{}", serde_json::to_string_pretty(&Output::new(report))?);
        }
        OutputFormat::Plain => println!("{}", grand_total),
    }

    Ok(())
}
