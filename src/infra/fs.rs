//! File I/O for calculator notes.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations on calculator notes.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads a calculator note and returns its text.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
/// Returns `FsError::PermissionDenied` if access is denied.
/// Returns `FsError::InvalidEncoding` if the file is not valid UTF-8.
pub fn read_calc_note(path: &Path) -> Result<String, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
    decode_note_bytes(bytes, path)
}

/// Decodes note bytes as UTF-8, dropping a leading byte order mark.
///
/// Buffers with CR-only line endings are rejected, since their lines
/// would otherwise collapse into one.
pub fn decode_note_bytes(bytes: Vec<u8>, path: &Path) -> Result<String, FsError> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 LE detected (byte order mark FF FE); convert to UTF-8".into(),
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 BE detected (byte order mark FE FF); convert to UTF-8".into(),
        });
    }

    let content = String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;

    let has_lone_cr = content
        .as_bytes()
        .windows(2)
        .any(|w| w[0] == b'\r' && w[1] != b'\n')
        || content.as_bytes().last() == Some(&b'\r');
    if has_lone_cr {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "CR-only line endings detected (old Mac format); convert to LF or CRLF"
                .into(),
        });
    }

    match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(content),
    }
}

/// Scans a directory recursively for calculator notes with the given extension.
///
/// Skips hidden files and directories (starting with `.`). Returns paths
/// relative to the input directory, sorted for stable output.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn scan_calc_notes(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let extension = extension.trim_start_matches('.');
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_extension(e, extension))
        .filter_map(|e| e.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();

    paths.sort();
    tracing::debug!(dir = %dir.display(), count = paths.len(), "scanned for calculator notes");
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_extension(entry: &DirEntry, extension: &str) -> bool {
    entry.path().extension().is_some_and(|e| e == extension)
}
