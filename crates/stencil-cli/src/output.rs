//! Output management and formatting.
//!
//! Human-facing lines go to stdout through [`OutputManager`]. Logs go to
//! stderr and the log file (see `logging`), never through here.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;

/// Manages CLI output based on global flags.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    interactive: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags.
    pub fn new(args: &GlobalArgs) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color,
            interactive: io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Success, msg)
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Warning, msg)
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    fn marked(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&mark.render(msg, !self.no_color))
    }

    /// Spinner on stdout while a run is in progress.
    ///
    /// Hidden when stdout is not a terminal or in quiet mode, so piped output
    /// stays clean. Call `finish_and_clear` when done.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || !self.interactive {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        pb.set_style(style);
        pb.set_message(msg.to_owned());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Success,
    Warning,
    Info,
}

impl Mark {
    fn glyph(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn render(self, msg: &str, color: bool) -> String {
        let glyph = self.glyph();
        if !color {
            return format!("{glyph} {msg}");
        }
        match self {
            Self::Success => format!("{} {}", glyph.green().bold(), msg.green()),
            Self::Warning => format!("{} {}", glyph.yellow().bold(), msg.yellow()),
            Self::Info => format!("{} {}", glyph.blue().bold(), msg.blue()),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            no_color,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args)
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn plain_marks_have_no_ansi() {
        assert_eq!(Mark::Warning.render("careful", false), "\u{26a0} careful");
        assert!(Mark::Success.render("done", true).contains("\u{1b}["));
    }

    #[test]
    fn spinner_hidden_in_quiet_mode() {
        let pb = make_manager(true, true).spinner("Generating");
        assert!(pb.is_hidden());
        pb.finish_and_clear();
    }
}
