// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure blueprint logic with no I/O. Probing tools,
//! writing files and logging sinks are handled via ports (traits) defined
//! in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, process, or network calls
//! - **Immutable entities**: blueprints and run contexts never change after construction
//! - **Data, not code**: templates and dependency descriptors are plain values
//!
// Public API - what the world sees
pub mod entities;
pub mod environment;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    blueprint::{Blueprint, BlueprintBuilder, Dependency, Documentation, FileSpec, ManifestSpec},
    common::RelativePath,
    license::{DEFAULT_LICENSE_HEADER, LicenseHeader},
    render::{RenderParams, TemplateContent, TemplateSource, to_pascal_case},
    rendered_project::{DirectoryToCreate, FileToWrite, FsEntry, RenderedProject},
    run_context::RunContext,
};

pub use environment::{
    EnvironmentRequest, EnvironmentWarning, ToolRequirement, extract_version, version_matches,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Platform, TextTool};

pub use validation::DomainValidator;
