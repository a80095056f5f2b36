// ============================================================================
// domain/error.rs - BLUEPRINT DEFINITION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant describes a defect in a blueprint definition, never an
/// environment or I/O failure. All errors are:
/// - Cloneable (carried inside run failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("Blueprint '{name}' declares no files")]
    EmptyBlueprint { name: String },

    #[error("Duplicate path in blueprint: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Target directory '{path}' is claimed by both '{first}' and '{second}'")]
    DuplicateTargetDirectory {
        path: String,
        first: String,
        second: String,
    },

    #[error(
        "Target directory '{inner}' of '{inner_owner}' lies inside '{outer}' of '{outer_owner}'"
    )]
    NestedTargetDirectory {
        outer: String,
        outer_owner: String,
        inner: String,
        inner_owner: String,
    },

    #[error("Template for '{path}' already contains the license header")]
    HeaderInTemplate { path: String },

    #[error("Unresolved placeholders in '{path}': {}", placeholders.join(", "))]
    UnresolvedPlaceholder {
        path: String,
        placeholders: Vec<String>,
    },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidBlueprint(msg) => vec![
                "Check the blueprint definition".into(),
                format!("Details: {}", msg),
            ],
            Self::DuplicateTargetDirectory { path, .. } => vec![
                format!("Two blueprints write into '{}'", path),
                "Give every blueprint a unique name or target directory".into(),
            ],
            Self::NestedTargetDirectory { outer, inner, .. } => vec![
                format!("'{}' would be generated inside '{}'", inner, outer),
                "Target directories must not contain one another".into(),
            ],
            Self::HeaderInTemplate { path } => vec![
                format!("Remove the license text from the template of '{}'", path),
                "The header is injected automatically for flagged files".into(),
            ],
            Self::UnresolvedPlaceholder { placeholders, .. } => vec![
                format!("Unknown parameters: {}", placeholders.join(", ")),
                "Declare the parameter on the blueprint or fix the placeholder name".into(),
            ],
            Self::EmptyBlueprint { name } => vec![
                format!("Blueprint '{}' has nothing to generate", name),
                "Add at least one file to the blueprint".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
