//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: use case orchestration (Orchestrator, EnvironmentValidator, Materializer, CatalogService)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer sequences the domain layer but contains no
//! blueprint rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BlueprintInfo, CatalogService, EnvironmentValidator, MaterializeReport, Materializer,
    Orchestrator, RunFailure, RunReport, RunRequest, RunState, RunStep, ValidatedEnvironment,
};

// Re-export port traits (for adapter implementation)
pub use ports::{BlueprintCatalog, BlueprintRenderer, Filesystem, ToolProbe};

pub use error::ApplicationError;
