//! Unified error handling for Stencil Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
///
/// This enum wraps all possible errors that can occur when using stencil-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StencilError {
    /// Errors from the domain layer (blueprint definition defects).
    #[error("Blueprint error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (environment and I/O failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Stencil".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True for failures that happen before anything is written.
    pub fn is_environment(&self) -> bool {
        self.category() == ErrorCategory::Environment
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Environment,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerequisite_missing_is_environment() {
        let err: StencilError = ApplicationError::PrerequisiteMissing { tool: "mvn".into() }.into();
        assert!(err.is_environment());
        assert!(err.suggestions().iter().any(|s| s.contains("mvn")));
    }

    #[test]
    fn write_failure_is_internal() {
        let err: StencilError = ApplicationError::FilesystemWriteFailure {
            path: "/x".into(),
            reason: "disk full".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn domain_errors_are_validation() {
        let err: StencilError = DomainError::DuplicatePath { path: "a".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("Duplicate path"));
    }
}
