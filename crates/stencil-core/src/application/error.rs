//! Application layer errors.
//!
//! These errors represent failures of the environment or of I/O while
//! orchestrating a run. Blueprint definition defects are `DomainError`s
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A required external tool is not installed or not on `PATH`.
    #[error("Required tool '{tool}' was not found")]
    PrerequisiteMissing { tool: String },

    /// The tool exists but its version probe failed.
    #[error("Tool '{tool}' is installed but not functional: {reason}")]
    ToolNotFunctional { tool: String, reason: String },

    /// Any failure creating a directory or writing a file.
    #[error("Failed to write {path}: {reason}")]
    FilesystemWriteFailure { path: PathBuf, reason: String },

    /// Rendering produced something the materializer refuses to write.
    #[error("Rendering failed for blueprint '{blueprint}': {reason}")]
    RenderingFailed { blueprint: String, reason: String },

    /// Blueprint catalog could not be read.
    #[error("Blueprint catalog error: {reason}")]
    CatalogUnavailable { reason: String },

    /// Blueprint lookup by name failed.
    #[error("No blueprint named '{name}'")]
    BlueprintNotFound { name: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PrerequisiteMissing { tool } => vec![
                format!("Install '{}' and make sure it is on your PATH", tool),
                "Run: stencil check   to re-run the environment checks only".into(),
            ],
            Self::ToolNotFunctional { tool, .. } => vec![
                format!("'{}' was found but did not report a version", tool),
                format!("Try running '{}' manually to see what is wrong", tool),
            ],
            Self::FilesystemWriteFailure { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
                "Re-running is safe: completed files are rewritten atomically".into(),
            ],
            Self::BlueprintNotFound { .. } => vec![
                "Try: stencil list   to see available blueprints".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PrerequisiteMissing { .. } | Self::ToolNotFunctional { .. } => {
                ErrorCategory::Environment
            }
            Self::BlueprintNotFound { .. } => ErrorCategory::NotFound,
            Self::CatalogUnavailable { .. } => ErrorCategory::Configuration,
            Self::FilesystemWriteFailure { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
