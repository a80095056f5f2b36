//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Blueprint, RenderedProject, RunContext};
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Succeeds if it
    /// already exists.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Replace `path` with `content` so that readers observe either the
    /// previous file (or nothing) or the complete new content, never a
    /// prefix. The parent directory must exist.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> StencilResult<()>;
}

/// Port for probing external tools.
///
/// Implemented by:
/// - `stencil_adapters::probe::SystemToolProbe` (searches `PATH`, runs the tool)
/// - `stencil_adapters::probe::StaticToolProbe` (scripted answers for tests)
#[cfg_attr(test, mockall::automock)]
pub trait ToolProbe: Send + Sync {
    /// Resolve a tool name to an executable path, if installed.
    fn locate(&self, tool: &str) -> Option<PathBuf>;

    /// Run the tool with `args` and return its combined version output.
    ///
    /// `Err` carries a human-readable reason (spawn failure, non-zero exit).
    fn version(&self, tool: &str, args: &[String]) -> Result<String, String>;
}

/// Port for rendering.
///
/// Implemented by:
/// - `stencil_adapters::renderer::SimpleRenderer` (flat substitution)
#[cfg_attr(test, mockall::automock)]
pub trait BlueprintRenderer: Send + Sync {
    /// Render a blueprint into the complete file tree under
    /// `context.project_root(blueprint)`.
    fn render(&self, blueprint: &Blueprint, context: &RunContext) -> StencilResult<RenderedProject>;
}

/// Port for blueprint definitions.
///
/// Implemented by:
/// - `stencil_adapters::catalog::InMemoryCatalog` (built-ins plus loaded manifests)
#[cfg_attr(test, mockall::automock)]
pub trait BlueprintCatalog: Send + Sync {
    /// All blueprints, in run order.
    fn list(&self) -> StencilResult<Vec<Blueprint>>;
}
