//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::EvalMode;
use output::OutputFormat;

/// tally - plain-text calculator notes with running totals
#[derive(Parser, Debug)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// How to treat lines with non-arithmetic text: strict or heuristic
    #[arg(short = 'm', long, global = true, value_name = "MODE")]
    pub mode: Option<EvalMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a calculator note line by line
    Eval(EvalArgs),

    /// Print the total of one or more notes
    Total(TotalArgs),

    /// List calculator notes with their totals
    #[command(name = "ls")]
    List(ListArgs),

    /// Report lines that fail to evaluate
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `eval` command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Note file to evaluate (reads stdin when omitted or `-`)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Explain why failing lines were rejected
    #[arg(long)]
    pub details: bool,
}

/// Arguments for the `total` command
#[derive(Parser, Debug)]
pub struct TotalArgs {
    /// Note files to total (reads stdin when none are given)
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Note files to check, `-` for stdin (checks every note in the directory when none are given)
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
