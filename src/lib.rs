//! tally - plain-text calculator notes with running totals

pub mod cli;
pub mod domain;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_check, handle_completions, handle_eval, handle_list, handle_total},
    logging::init_logging,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());
    let mode = config.mode(cli.mode);

    match &cli.command {
        Command::Eval(args) => handle_eval(args, &notes_dir, mode, &config),
        Command::Total(args) => handle_total(args, &notes_dir, mode, &config),
        Command::List(args) => handle_list(args, &notes_dir, mode, &config),
        Command::Check(args) => handle_check(args, &notes_dir, mode, &config),
        Command::Completions(args) => handle_completions(args),
    }
}
