//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{EvalMode, NumberFormat};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "TALLY_CONFIG";

/// Extension of calculator note files when none is configured.
pub const DEFAULT_EXTENSION: &str = "calc";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Default evaluation mode
    pub mode: Option<EvalMode>,

    /// File extension of calculator notes
    pub extension: Option<String>,

    /// Number display settings
    pub format: NumberFormat,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        let config = Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// `$TALLY_CONFIG` when set, otherwise `~/.config/tally/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tally")
            .join("config.toml")
    }

    /// Resolve the notes directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the evaluation mode: CLI `--mode`, then config, then strict.
    pub fn mode(&self, cli_mode: Option<EvalMode>) -> EvalMode {
        cli_mode.or(self.mode).unwrap_or_default()
    }

    /// Resolve the calculator note extension, without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension
            .as_deref()
            .map(|e| e.trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EXTENSION)
    }
}
