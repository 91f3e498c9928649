//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `tally` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct TallyCommand {
    args: Vec<String>,
    config_path: Option<PathBuf>,
    stdin: Option<String>,
}

impl TallyCommand {
    /// Creates a new command for the `tally` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_path: None,
            stdin: None,
        }
    }

    /// Sets the `--dir` option to specify the notes directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `$TALLY_CONFIG` at the given file (which need not exist).
    pub fn config(mut self, path: &Path) -> Self {
        self.config_path = Some(path.to_path_buf());
        self
    }

    /// Feeds the given text to the command's stdin.
    pub fn stdin(mut self, text: impl Into<String>) -> Self {
        self.stdin = Some(text.into());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("tally").expect("Failed to find tally binary");
        cmd.args(&self.args);
        cmd.env_remove("TALLY_LOG");
        if let Some(path) = &self.config_path {
            cmd.env("TALLY_CONFIG", path);
        }
        cmd.write_stdin(self.stdin.unwrap_or_default());
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `eval` command with a note file.
    pub fn eval(self, file: &str) -> Self {
        self.args(["eval", file])
    }

    /// Configures for the `eval` command reading stdin.
    pub fn eval_stdin(self) -> Self {
        self.args(["eval"])
    }

    /// Configures for the `total` command with note files.
    pub fn total<I, S>(self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args(["total"]).args(files)
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `check` command.
    pub fn check(self) -> Self {
        self.args(["check"])
    }

    // ===========================================
    // Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format plain` to the command.
    pub fn format_plain(self) -> Self {
        self.args(["--format", "plain"])
    }

    /// Adds `--mode heuristic` to the command.
    pub fn heuristic(self) -> Self {
        self.args(["--mode", "heuristic"])
    }
}

impl Default for TallyCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_args_in_order() {
        let cmd = TallyCommand::new().eval("a.calc").format_json();
        assert_eq!(cmd.get_args(), ["eval", "a.calc", "--format", "json"]);
    }

    #[test]
    fn total_appends_files() {
        let cmd = TallyCommand::new().total(["a.calc", "b.calc"]);
        assert_eq!(cmd.get_args(), ["total", "a.calc", "b.calc"]);
    }
}
