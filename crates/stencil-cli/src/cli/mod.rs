//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Running `stencil` without a subcommand is the same as `stencil generate`.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a fixed set of service projects from blueprints",
    long_about = "Stencil checks that the Java toolchain is installed, then \
                  generates every blueprint into its own directory under the \
                  base directory, in a fixed order, stopping at the first failure.",
    after_help = "EXAMPLES:\n\
        \x20 stencil\n\
        \x20 stencil --base-dir ./out generate --dry-run\n\
        \x20 stencil check\n\
        \x20 stencil list --format json\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Split into global flags and the subcommand, defaulting to `generate`.
    pub fn into_parts(self) -> (GlobalArgs, Commands) {
        let command = self
            .command
            .unwrap_or_else(|| Commands::Generate(GenerateArgs::default()));
        (self.global, command)
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate the environment and generate every blueprint.
    #[command(
        visible_alias = "gen",
        about = "Generate all blueprints (default)",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate\n\
            \x20 stencil generate --dry-run"
    )]
    Generate(GenerateArgs),

    /// List available blueprints.
    #[command(
        visible_alias = "ls",
        about = "List available blueprints",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --format json"
    )]
    List(ListArgs),

    /// Run the environment checks only.
    #[command(about = "Check that the required tools are installed")]
    Check,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(about = "Configuration inspection", subcommand)]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Key name, e.g. `java_version`.
        key: String,
    },
    /// Print all effective configuration values.
    Show,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
