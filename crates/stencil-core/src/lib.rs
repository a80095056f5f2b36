//! Stencil Core - blueprint execution engine.
//!
//! This crate provides the domain and application layers for the Stencil
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  Orchestrator → EnvironmentValidator    │
//! │              → Materializer             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, ToolProbe, Renderer, Catalog│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ Blueprint, RenderParams, RunContext, …  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::application::{Orchestrator, RunRequest};
//!
//! let orchestrator = Orchestrator::new(catalog, renderer, filesystem, probe);
//! let report = orchestrator.run(&RunRequest::new(environment_request))?;
//! println!("{} blueprints generated", report.blueprints.len());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BlueprintInfo, CatalogService, EnvironmentValidator, Materializer, Orchestrator,
        RunFailure, RunReport, RunRequest, RunStep,
        ports::{BlueprintCatalog, BlueprintRenderer, Filesystem, ToolProbe},
    };
    pub use crate::domain::{
        Blueprint, BlueprintBuilder, Dependency, Documentation, EnvironmentRequest,
        EnvironmentWarning, LicenseHeader, Platform, RenderParams, RenderedProject, RunContext,
        TemplateContent, TextTool, ToolRequirement,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
