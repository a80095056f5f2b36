//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations:
//!
//! - [`filesystem`]: atomic local writes and an in-memory tree for tests
//! - [`probe`]: `PATH` lookup and version probing of external tools
//! - [`renderer`]: flat `{{KEY}}` rendering plus the generated overview
//! - [`catalog`]: ordered blueprint catalog seeded with the built-ins
//! - [`manifest_loader`]: operator-supplied TOML blueprints

pub mod builtin_blueprints;
pub mod catalog;
pub mod filesystem;
pub mod manifest_loader;
pub mod probe;
pub mod renderer;

// Re-export commonly used adapters
pub use catalog::InMemoryCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest_loader::{ManifestError, ManifestLoader};
pub use probe::{StaticToolProbe, SystemToolProbe};
pub use renderer::SimpleRenderer;
