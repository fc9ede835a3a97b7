//! CLI module for wslevels.
//!
//! Parses arguments, installs logging, and hands the command to
//! [`commands::Cli::execute`].

mod commands;
mod output;

use clap::Parser;
pub use commands::{Cli, Commands, DirectiveArgs, Modifier, StateCommands};
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;
use crate::error::LevelsResult;

/// Runs the CLI.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> LevelsResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}

/// Installs a stderr subscriber.
///
/// `WSLEVELS_LOG` takes precedence; otherwise the verbosity flag picks the
/// level. The default is `warn`, so successful directives print nothing.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

const fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level_is_quiet() {
        assert_eq!(default_log_level(0), "warn");
        assert_eq!(default_log_level(1), "info");
        assert_eq!(default_log_level(2), "debug");
        assert_eq!(default_log_level(9), "debug");
    }
}
