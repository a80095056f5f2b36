//! Command handlers. Each one translates arguments into calls on
//! `stencil-core` services and displays the result.

pub mod check;
pub mod completions;
pub mod config;
pub mod generate;
pub mod list;

use tracing::debug;

use stencil_adapters::{InMemoryCatalog, ManifestLoader};

use crate::{config::AppConfig, error::CliResult};

/// Built-in blueprints, then any manifests from `blueprints_dir`.
///
/// Manifests are read when the catalog is listed, so a run checks the
/// environment before it touches them.
pub fn load_catalog(config: &AppConfig) -> CliResult<InMemoryCatalog> {
    let catalog = InMemoryCatalog::with_builtin()?;

    match &config.blueprints_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "Blueprint manifests enabled");
            Ok(catalog.with_manifests(ManifestLoader::new(dir)))
        }
        None => Ok(catalog),
    }
}
