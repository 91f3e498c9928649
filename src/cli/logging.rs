//! Diagnostic logging to stderr.

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an explicit filter directive (e.g. `tally=debug`).
pub const LOG_ENV: &str = "TALLY_LOG";

/// Installs the global subscriber.
///
/// `$TALLY_LOG` wins over the `-v` count. Stdout carries command output, so
/// logs always go to stderr. Calling this twice is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Maps the `-v` count to a filter directive.
pub(crate) fn level_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
