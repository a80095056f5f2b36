//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation and atomic file writes
//!   - `ToolProbe`: locating external tools and reading their versions
//!   - `BlueprintRenderer`: blueprint + run context to rendered file tree
//!   - `BlueprintCatalog`: ordered blueprint definitions
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{BlueprintCatalog, BlueprintRenderer, Filesystem, ToolProbe};
