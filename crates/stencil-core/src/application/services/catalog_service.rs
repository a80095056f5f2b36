//! Read-only views over the blueprint catalog for `list` and friends.

use serde::Serialize;
use tracing::debug;

use crate::{
    application::{ApplicationError, ports::BlueprintCatalog},
    domain::Blueprint,
    error::StencilResult,
};

/// Information about a blueprint for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintInfo {
    pub name: String,
    pub target_dir: String,
    pub language: String,
    pub package: String,
    pub purpose: String,
    pub features: Vec<String>,
    pub tech_stack: Vec<String>,
    pub dependencies: Vec<String>,
    pub files: usize,
}

impl From<&Blueprint> for BlueprintInfo {
    fn from(bp: &Blueprint) -> Self {
        Self {
            name: bp.name().to_string(),
            target_dir: bp.target_dir().to_slash_string(),
            language: bp.language().to_string(),
            package: bp.package().to_string(),
            purpose: bp.docs().purpose.clone(),
            features: bp.docs().features.clone(),
            tech_stack: bp.docs().tech_stack.clone(),
            dependencies: bp.dependencies().iter().map(ToString::to_string).collect(),
            // Declared files plus the build manifest and README.
            files: bp.files().len() + 2,
        }
    }
}

pub struct CatalogService {
    catalog: Box<dyn BlueprintCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Box<dyn BlueprintCatalog>) -> Self {
        Self { catalog }
    }

    /// All blueprints, in run order.
    pub fn list(&self) -> StencilResult<Vec<BlueprintInfo>> {
        let blueprints = self.catalog.list()?;
        debug!(count = blueprints.len(), "Listing blueprints");
        Ok(blueprints.iter().map(BlueprintInfo::from).collect())
    }

    /// Look up one blueprint by name.
    pub fn get(&self, name: &str) -> StencilResult<Blueprint> {
        self.catalog
            .list()?
            .into_iter()
            .find(|bp| bp.name() == name)
            .ok_or_else(|| ApplicationError::BlueprintNotFound { name: name.into() }.into())
    }
}
