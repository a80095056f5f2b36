//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`] so that `-v`, `-q`, etc.
//! are available on any invocation without repetition

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args, Default)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for DEBUG (`-v`), twice for TRACE (`-vv`). Conflicts with
    /// `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv)",
        long_help = "Increase logging verbosity:
    (none)  - Info level (every step of the run)
    -v      - Debug level (detailed diagnostics)
    -vv     - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Only report errors on the terminal. The log file is unaffected.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Directory the blueprints are generated into.
    #[arg(
        short = 'o',
        long = "base-dir",
        global = true,
        value_name = "DIR",
        help = "Output base directory (default: <executable dir>/generated)"
    )]
    pub base_dir: Option<PathBuf>,

    /// Log file, truncated at the start of every run.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Log file path (default: stencil.log beside the base directory)"
    )]
    pub log_file: Option<PathBuf>,
}
