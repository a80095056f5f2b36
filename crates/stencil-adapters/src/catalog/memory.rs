//! In-memory blueprint catalog with the built-in blueprints.
//!
//! An optional manifest directory is read on every `list()`, so manifest
//! errors surface at the catalog step of a run rather than at startup.

use std::sync::{Arc, RwLock};

use stencil_core::{
    application::{ApplicationError, ports::BlueprintCatalog},
    domain::{Blueprint, DomainValidator as validator},
    error::StencilResult,
};
use tracing::debug;

use crate::{builtin_blueprints, manifest_loader::ManifestLoader};

/// Thread-safe, insertion-ordered blueprint catalog.
///
/// `list()` returns blueprints in the order they were inserted, followed by
/// any manifests, which is the order the orchestrator generates them in.
#[derive(Clone)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<Vec<Blueprint>>>,
    manifests: Option<ManifestLoader>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            manifests: None,
        }
    }

    /// Read manifests from `loader` each time the catalog is listed.
    pub fn with_manifests(mut self, loader: ManifestLoader) -> Self {
        self.manifests = Some(loader);
        self
    }

    /// Create a catalog with the built-in blueprints loaded.
    pub fn with_builtin() -> StencilResult<Self> {
        let catalog = Self::new();
        catalog.load_builtin()?;
        Ok(catalog)
    }

    /// Append the built-in blueprints.
    pub fn load_builtin(&self) -> StencilResult<()> {
        self.extend(builtin_blueprints::all()?)
    }

    /// Append a validated blueprint. A blueprint with the same name replaces
    /// the existing one in place.
    pub fn insert(&self, blueprint: Blueprint) -> StencilResult<()> {
        validator::validate_blueprint(&blueprint)?;

        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        merge(&mut inner, blueprint);
        Ok(())
    }

    pub fn extend(&self, blueprints: impl IntoIterator<Item = Blueprint>) -> StencilResult<()> {
        for blueprint in blueprints {
            self.insert(blueprint)?;
        }
        Ok(())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintCatalog for InMemoryCatalog {
    fn list(&self) -> StencilResult<Vec<Blueprint>> {
        let mut blueprints = self.inner.read().map_err(|_| poisoned())?.clone();

        if let Some(loader) = &self.manifests {
            for blueprint in loader.load_all()? {
                validator::validate_blueprint(&blueprint)?;
                merge(&mut blueprints, blueprint);
            }
        }

        Ok(blueprints)
    }
}

/// Replace a same-named blueprint in place, otherwise append.
fn merge(blueprints: &mut Vec<Blueprint>, blueprint: Blueprint) {
    match blueprints.iter_mut().find(|b| b.name() == blueprint.name()) {
        Some(existing) => {
            debug!(blueprint = %blueprint.name(), "Replacing blueprint");
            *existing = blueprint;
        }
        None => blueprints.push(blueprint),
    }
}

fn poisoned() -> ApplicationError {
    ApplicationError::CatalogUnavailable {
        reason: "catalog lock poisoned".into(),
    }
}
