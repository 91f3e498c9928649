//! Command handlers for the CLI.

mod check;
mod completions;
mod eval;
mod list;
mod total;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::output::NoteTotal;
use crate::domain::Sheet;
use crate::infra::{FsError, decode_note_bytes, read_calc_note};

// Re-export public items
pub use check::handle_check;
pub use completions::handle_completions;
pub use eval::{handle_eval, render_sheet};
pub use list::handle_list;
pub use total::handle_total;

// ===========================================
// Shared Utilities
// ===========================================

/// Display name for notes read from standard input.
pub(crate) const STDIN_NAME: &str = "<stdin>";

/// A note's text along with the name it was requested by.
pub(crate) struct LoadedNote {
    pub(crate) name: String,
    pub(crate) path: Option<PathBuf>,
    pub(crate) text: String,
}

/// Loads a note from a file, or from stdin when `file` is absent or `-`.
pub(crate) fn load_note(file: Option<&Path>, notes_dir: &Path) -> Result<LoadedNote> {
    match file {
        Some(file) if file != Path::new("-") => {
            let path = resolve_note_path(file, notes_dir);
            let text = read_calc_note(&path)
                .with_context(|| format!("failed to read note {}", file.display()))?;
            Ok(LoadedNote {
                name: file.display().to_string(),
                path: Some(path),
                text,
            })
        }
        _ => {
            let text = read_stdin_note().context("failed to read note from stdin")?;
            Ok(LoadedNote {
                name: STDIN_NAME.to_string(),
                path: None,
                text,
            })
        }
    }
}

/// Reads a note from stdin with the same decoding rules as note files.
pub(crate) fn read_stdin_note() -> Result<String, FsError> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|source| FsError::Io {
            path: PathBuf::from(STDIN_NAME),
            source,
        })?;
    decode_note_bytes(bytes, Path::new(STDIN_NAME))
}

/// Resolves a note argument against the notes directory.
///
/// Absolute paths and paths that exist relative to the working directory are
/// used as given; anything else is looked up inside the notes directory.
pub(crate) fn resolve_note_path(file: &Path, notes_dir: &Path) -> PathBuf {
    if file.is_absolute() || file.exists() {
        file.to_path_buf()
    } else {
        notes_dir.join(file)
    }
}

/// Summarizes an evaluated note for listings.
pub(crate) fn note_total(path: String, sheet: &Sheet) -> NoteTotal {
    NoteTotal {
        path,
        lines: sheet.lines().len(),
        values: sheet.value_count(),
        errors: sheet.errors().count(),
        total: sheet.total(),
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
