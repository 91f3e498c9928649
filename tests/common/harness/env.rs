//! Isolated test environment with temp directory.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use super::TallyCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// Creates a temp directory that is automatically cleaned up on drop. The
/// config file location is pinned inside the temp directory so the user's
/// own config never leaks into tests.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes directory
    notes_dir: PathBuf,
    /// Path the CLI reads its config from
    config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        std::fs::create_dir(&notes_dir).expect("Failed to create notes directory");
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_path,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the path of the config file used by commands.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Writes a calculator note into the notes directory and returns its path.
    pub fn add_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create note directory");
        }
        std::fs::write(&path, content).expect("Failed to write note");
        path
    }

    /// Copies a fixture into the notes directory under the same file name.
    pub fn add_fixture(&self, fixture: &Path) -> PathBuf {
        let name = fixture
            .file_name()
            .expect("Fixture has no file name")
            .to_string_lossy()
            .to_string();
        let content = crate::common::read_fixture(fixture);
        self.add_note(&name, &content)
    }

    /// Writes the config file read by commands in this environment.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(&self.config_path, contents).expect("Failed to write config");
    }

    /// Creates a TallyCommand configured for this test environment.
    pub fn cmd(&self) -> TallyCommand {
        TallyCommand::new()
            .dir(&self.notes_dir)
            .config(&self.config_path)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_notes_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir(), "notes directory should exist");
        assert!(!env.config_path().exists(), "config should start absent");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.notes_dir().to_string_lossy());
    }

    #[test]
    fn test_env_add_note_in_subdirectory() {
        let env = TestEnv::new();
        let path = env.add_note("trips/japan.calc", "Flights: 900");
        assert!(path.is_file());
        assert!(path.starts_with(env.notes_dir()));
    }
}
