//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `stencil-core`
//! only *emits* spans and events.
//!
//! Two layers:
//!
//! - stderr, level from the flags below, ANSI only on a TTY;
//! - the run log file, truncated first, never ANSI, never below INFO so that
//!   every step of a run is recorded.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | stderr | log file |
//! |----------|--------|----------|
//! | (none)   | INFO   | INFO     |
//! | `-v`     | DEBUG  | DEBUG    |
//! | `-vv`    | TRACE  | TRACE    |
//! | `--quiet`| ERROR  | INFO     |
//!
//! `RUST_LOG` overrides the stderr level if set. The file ignores it.

use std::{
    fs::{self, File},
    io::IsTerminal as _,
    path::Path,
};

use anyhow::Context as _;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown.
const TARGETS: [&str; 3] = ["stencil", "stencil_core", "stencil_adapters"];

/// Initialise the global tracing subscriber.
///
/// With `log_file`, the file is created (or truncated) before the subscriber
/// is registered.
pub fn init_logging(args: &GlobalArgs, log_file: Option<&Path>) -> anyhow::Result<()> {
    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(derive_level(args)));

    let file_layer = match log_file {
        Some(path) => {
            let appender = truncated_appender(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(appender)
                    .with_filter(file_filter(args)),
            )
        }
        None => None,
    };

    // `try_init` returns an error instead of panicking if a subscriber is
    // already set.
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// `RUST_LOG` if set, otherwise `level` for our own crates.
fn stderr_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn file_filter(args: &GlobalArgs) -> EnvFilter {
    EnvFilter::new(directives(file_level(args)))
}

fn directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Create or truncate `path` and open a non-rotating appender on it.
fn truncated_appender(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .with_context(|| format!("log file path '{}' has no file name", path.display()))?;

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory '{}'", dir.display()))?;
    File::create(path).with_context(|| format!("failed to truncate '{}'", path.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("failed to open log file '{}'", path.display()))
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// The file never records less than INFO.
fn file_level(args: &GlobalArgs) -> &'static str {
    match derive_level(args) {
        "error" | "warn" => "info",
        level => level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn level_default_is_info() {
        assert_eq!(derive_level(&args_with(0, false)), "info");
    }

    #[test]
    fn level_verbose_one() {
        assert_eq!(derive_level(&args_with(1, false)), "debug");
    }

    #[test]
    fn level_verbose_two_plus() {
        assert_eq!(derive_level(&args_with(2, false)), "trace");
        assert_eq!(derive_level(&args_with(10, false)), "trace");
    }

    // quiet takes precedence over verbose
    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&args_with(3, true)), "error");
    }

    #[test]
    fn quiet_still_logs_info_to_file() {
        assert_eq!(file_level(&args_with(0, true)), "info");
        assert_eq!(file_level(&args_with(2, false)), "trace");
    }

    #[test]
    fn file_filter_is_at_least_info() {
        let hint = file_filter(&args_with(0, true)).max_level_hint();
        assert_eq!(hint, Some(LevelFilter::INFO));
        let hint = file_filter(&args_with(1, false)).max_level_hint();
        assert_eq!(hint, Some(LevelFilter::DEBUG));
    }

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            directives("debug"),
            "stencil=debug,stencil_core=debug,stencil_adapters=debug"
        );
    }

    #[test]
    fn appender_truncates_existing_log() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("stencil.log");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "previous run\n").unwrap();

        truncated_appender(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
