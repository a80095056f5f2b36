//! Error handling for the Stencil CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use stencil_core::application::RunFailure;
use stencil_core::error::{ErrorCategory as CoreCategory, StencilError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration source could not be read or merged.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A run halted. Carries the failing step.
    #[error(transparent)]
    Run(Box<RunFailure>),

    /// An error propagated from `stencil-core` outside of a run.
    #[error("{0}")]
    Core(#[from] StencilError),

    /// Writing to the terminal failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<RunFailure> for CliError {
    fn from(failure: RunFailure) -> Self {
        CliError::Run(Box::new(failure))
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl CliError {
    /// The core error, if any.
    pub fn core(&self) -> Option<&StencilError> {
        match self {
            Self::Run(failure) => Some(&failure.error),
            Self::Core(e) => Some(e),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run: stencil config show   to see the effective values".into(),
            ],
            Self::Run(failure) => {
                let mut suggestions = failure.error.suggestions();
                if !failure.completed.is_empty() {
                    suggestions.push(format!(
                        "{} blueprint(s) were generated before the failure and were kept",
                        failure.completed.len()
                    ));
                }
                suggestions
            }
            Self::Core(core_err) => core_err.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check that the terminal or pipe is still open".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Run(_) | Self::Core(_) => match self.core().map(StencilError::category) {
                Some(CoreCategory::Environment) => ErrorCategory::Environment,
                Some(CoreCategory::Configuration) => ErrorCategory::Configuration,
                Some(CoreCategory::Validation) | Some(CoreCategory::NotFound) => {
                    ErrorCategory::UserError
                }
                Some(CoreCategory::Internal) | None => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Environment   |  3   |
    /// | Configuration |  4   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::Environment => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(output, "\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = write!(output, "\n  {} {}\n", "→".dimmed(), err.to_string().dimmed());
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = write!(output, "\n{}\n", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {}", suggestion);
            }
        }

        if !verbose {
            output.push('\n');
            let _ = writeln!(
                output,
                "{} {}",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {}", self);

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    ///
    /// Run failures were already logged by the orchestrator with their step;
    /// only the exit is recorded here.
    pub fn log(&self) {
        match self {
            Self::Run(failure) => tracing::error!(
                run_id = %failure.run_id,
                step = %failure.step,
                exit_code = self.exit_code(),
                "Stencil failed"
            ),
            _ if self.category() == ErrorCategory::UserError => {
                tracing::warn!("{}", self.log_line())
            }
            _ => tracing::error!("{}", self.log_line()),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }

    fn log_line(&self) -> String {
        match self.category() {
            ErrorCategory::UserError => format!("User error: {self}"),
            ErrorCategory::Environment => format!("Environment error: {self}"),
            // Display already reads "Configuration error: ...".
            ErrorCategory::Configuration => self.to_string(),
            ErrorCategory::Internal => format!("Internal error: {self}"),
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid input or blueprint definition.
    UserError,
    /// A required tool is missing or broken.
    Environment,
    /// Configuration error.
    Configuration,
    /// Internal/system error, including failed writes.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use stencil_core::application::{ApplicationError, RunStep};
    use stencil_core::domain::DomainError;
    use uuid::Uuid;

    fn failure(step: RunStep, error: StencilError) -> CliError {
        RunFailure {
            run_id: Uuid::nil(),
            step,
            error,
            warnings: Vec::new(),
            completed: Vec::new(),
            states: Vec::new(),
        }
        .into()
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn missing_tool_exits_with_three() {
        let err = failure(
            RunStep::ValidatingEnvironment,
            ApplicationError::PrerequisiteMissing { tool: "mvn".into() }.into(),
        );
        assert_eq!(err.exit_code(), 3);
        assert!(err.suggestions().iter().any(|s| s.contains("mvn")));
    }

    #[test]
    fn broken_tool_exits_with_three() {
        let err = failure(
            RunStep::ValidatingEnvironment,
            ApplicationError::ToolNotFunctional {
                tool: "java".into(),
                reason: "exited with 1".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn write_failure_exits_with_one() {
        let err = failure(
            RunStep::Materializing {
                index: 0,
                blueprint: "api-gateway".into(),
            },
            ApplicationError::FilesystemWriteFailure {
                path: "/gen/api-gateway/pom.xml".into(),
                reason: "read-only".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn definition_defect_exits_with_two() {
        let err = failure(
            RunStep::LoadingBlueprints,
            DomainError::DuplicatePath { path: "a".into() }.into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn configuration_exits_with_four() {
        let err = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);

        let core: CliError = StencilError::Configuration { message: "bad manifest".into() }.into();
        assert_eq!(core.exit_code(), 4);
    }

    #[test]
    fn io_error_exits_with_one() {
        let err: CliError = io::Error::other("broken pipe").into();
        assert_eq!(err.exit_code(), 1);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn run_failure_message_names_the_step() {
        let err = failure(
            RunStep::Materializing {
                index: 1,
                blueprint: "event-stream-processor".into(),
            },
            ApplicationError::FilesystemWriteFailure {
                path: "/gen/x".into(),
                reason: "disk full".into(),
            }
            .into(),
        );
        let s = err.format_plain(false);
        assert!(s.contains("Error: Run failed during"));
        assert!(s.contains("event-stream-processor"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn configuration_log_line_is_prefixed_once() {
        let core: CliError = StencilError::Configuration {
            message: "failed to parse 'broken.toml'".into(),
        }
        .into();
        assert_eq!(core.log_line(), "Configuration error: failed to parse 'broken.toml'");

        let err = CliError::ConfigError { message: "x".into(), source: None };
        assert_eq!(err.log_line(), "Configuration error: x");
    }

    #[test]
    fn format_plain_verbose_shows_cause_and_omits_hint() {
        let err = failure(
            RunStep::ValidatingEnvironment,
            ApplicationError::PrerequisiteMissing { tool: "java".into() }.into(),
        );
        let s = err.format_plain(true);
        assert!(s.contains("Caused by:"));
        assert!(!s.contains("--verbose"));
    }
}
