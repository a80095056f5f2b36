//! # Stencil CLI
//!
//! Generates a fixed, ordered set of service projects from blueprints.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Load configuration (flags + env + file + defaults).
//! 3. Initialise the tracing subscriber. The log file path comes from config.
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                              |
//! |------|--------------------------------------|
//! |  0   | Success                              |
//! |  1   | Internal / filesystem error          |
//! |  2   | Usage error or invalid blueprint     |
//! |  3   | Required tool missing or broken      |
//! |  4   | Configuration error                  |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };
    let (global, command) = cli.into_parts();

    // ── 2. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(&global) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(CliError::from(e), &global),
    };

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    let log_file = writes_log_file(&command).then_some(config.log_file.as_path());
    if let Err(e) = init_logging(&global, log_file) {
        eprintln!("Failed to initialise logging: {e:#}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = global.verbose,
        quiet = global.quiet,
        base_dir = %config.base_dir.display(),
        "CLI started"
    );

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&global);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(command, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(e, &global),
    }
}

/// Only runs that touch the environment get a log file.
fn writes_log_file(command: &Commands) -> bool {
    matches!(command, Commands::Generate(_) | Commands::Check)
}

/// Dispatch to the correct command handler.
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, &config, output),
        Commands::Check => {
            commands::check::execute(&config, output)?;
            info!("Environment check passed");
            Ok(())
        }
        Commands::List(args) => commands::list::execute(args, &config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, global: &GlobalArgs) -> ExitCode {
    err.log();

    let verbose = global.verbose > 0;
    let colored = !global.no_color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn only_generate_and_check_write_the_log_file() {
        assert!(writes_log_file(&Commands::Check));
        assert!(writes_log_file(&Commands::Generate(Default::default())));
        assert!(!writes_log_file(&Commands::Config(cli::ConfigCommands::Path)));
    }
}
