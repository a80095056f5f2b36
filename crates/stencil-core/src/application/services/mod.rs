//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate the host" or "generate every blueprint".

pub mod catalog_service;
pub mod environment;
pub mod materializer;
pub mod orchestrator;

pub use catalog_service::{BlueprintInfo, CatalogService};
pub use environment::{EnvironmentValidator, ValidatedEnvironment};
pub use materializer::{MaterializeReport, Materializer};
pub use orchestrator::{Orchestrator, RunFailure, RunReport, RunRequest, RunState, RunStep};
