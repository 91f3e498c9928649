//! File I/O for calculator notes

mod fs;

pub use fs::{FsError, decode_note_bytes, read_calc_note, scan_calc_notes};
