//! Filesystem-based blueprint loader.
//!
//! Reads `*.toml` blueprint manifests from one directory and converts them
//! into domain [`Blueprint`]s. Manifests are read in file-name order, which
//! is the order they are generated in after the built-ins.
//!
//! # Directory layout expected
//!
//! ```text
//! blueprints/
//! ├── 10-billing.toml          ← one manifest per blueprint
//! ├── 20-notifications.toml
//! └── billing/
//!     └── BillingService.java  ← referenced by `source = "billing/..."`
//! ```
//!
//! # Manifest format
//!
//! ```toml
//! [blueprint]
//! name       = "billing-service"
//! target_dir = "billing"            # optional, defaults to name
//! language   = "java"               # optional
//! package    = "com.example.billing"
//!
//! [docs]
//! purpose    = "Invoices and payments"
//! features   = ["Monthly invoicing"]
//! tech_stack = ["Spring Boot"]
//!
//! [manifest]                        # optional, defaults to a Maven pom.xml
//! path     = "pom.xml"
//! document = "..."                  # must contain {{DEPENDENCIES}}
//! entry    = "..."                  # rendered once per dependency
//!
//! [params]
//! SERVER_PORT = "8085"
//!
//! [[dependencies]]
//! groupId    = "org.springframework.boot"
//! artifactId = "spring-boot-starter-web"
//! version    = "3.2.5"
//! scope      = "compile"
//!
//! [[files]]
//! path           = "src/main/java/com/example/billing/BillingService.java"
//! source         = "billing/BillingService.java"   # or inline `content`
//! type           = "parameterized"                 # literal | parameterized
//! license_header = true                            # defaults to *.java
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use stencil_core::{
    domain::{Blueprint, Dependency, DomainError, Documentation, TemplateContent},
    error::StencilError,
};

use crate::builtin_blueprints::{MAVEN_DEPENDENCY, MAVEN_POM};

/// Errors raised while loading manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("blueprints directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{path}': {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("'{path}': {source}")]
    Definition {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

impl From<ManifestError> for StencilError {
    fn from(e: ManifestError) -> Self {
        StencilError::Configuration {
            message: e.to_string(),
        }
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one blueprint manifest.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlueprintManifest {
    pub blueprint: BlueprintSection,
    #[serde(default)]
    pub docs: DocsSection,
    pub manifest: Option<BuildManifestSection>,
    /// Values must be strings, numbers or booleans.
    #[serde(default)]
    pub params: toml::Table,
    /// Each entry's keys become the placeholders of the manifest entry
    /// template, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<toml::Table>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// `[blueprint]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlueprintSection {
    pub name: String,
    pub target_dir: Option<String>,
    pub language: Option<String>,
    pub package: String,
}

/// `[docs]` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct DocsSection {
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

/// `[manifest]` section, the build manifest templates.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BuildManifestSection {
    #[serde(default = "default_manifest_path")]
    pub path: String,
    pub document: Option<String>,
    pub entry: Option<String>,
}

fn default_manifest_path() -> String {
    "pom.xml".into()
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub path: String,
    pub content: Option<String>,
    /// File relative to the manifest's directory.
    pub source: Option<String>,
    #[serde(rename = "type", default)]
    pub file_type: FileType,
    pub license_header: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Literal,
    #[default]
    Parameterized,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Blueprint`]s from a directory of TOML manifests.
///
/// Unlike built-ins, manifests are operator data: any manifest that cannot
/// be read, parsed or turned into a valid blueprint fails the whole load.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    dir: PathBuf,
}

impl ManifestLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every `*.toml` manifest directly inside the directory, in
    /// file-name order.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Blueprint>, ManifestError> {
        if !self.dir.is_dir() {
            return Err(ManifestError::MissingDirectory(self.dir.clone()));
        }

        let mut blueprints = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }

            let blueprint = self.load_file(path)?;
            debug!(
                blueprint = %blueprint.name(),
                manifest = %path.display(),
                "Loaded blueprint manifest"
            );
            blueprints.push(blueprint);
        }

        info!(count = blueprints.len(), "Loaded blueprint manifests");
        Ok(blueprints)
    }

    /// Parse and convert a single manifest file.
    pub fn load_file(&self, path: &Path) -> Result<Blueprint, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: BlueprintManifest =
            toml::from_str(&raw).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or(&self.dir);
        to_blueprint(manifest, base, path)
    }
}

/// Convert a parsed manifest. `base` resolves `source` references.
fn to_blueprint(
    manifest: BlueprintManifest,
    base: &Path,
    origin: &Path,
) -> Result<Blueprint, ManifestError> {
    let invalid = |reason: String| ManifestError::Invalid {
        path: origin.to_path_buf(),
        reason,
    };

    let section = manifest.blueprint;
    let mut builder = Blueprint::builder(section.name).package(section.package);
    if let Some(dir) = section.target_dir {
        builder = builder.target_dir(dir);
    }
    if let Some(language) = section.language {
        builder = builder.language(language);
    }

    let build = manifest.manifest.unwrap_or(BuildManifestSection {
        path: default_manifest_path(),
        document: None,
        entry: None,
    });
    let document = build.document.unwrap_or_else(|| MAVEN_POM.to_string());
    let entry = build.entry.unwrap_or_else(|| MAVEN_DEPENDENCY.to_string());
    builder = builder.manifest(
        build.path,
        TemplateContent::parameterized(document),
        TemplateContent::parameterized(entry),
    );

    let docs = manifest.docs;
    let mut documentation = Documentation::new(docs.purpose);
    for feature in docs.features {
        documentation = documentation.feature(feature);
    }
    for tech in docs.tech_stack {
        documentation = documentation.tech(tech);
    }
    builder = builder.docs(documentation);

    for (key, value) in &manifest.params {
        let value = scalar(value).ok_or_else(|| invalid(format!("param '{key}' must be a scalar")))?;
        builder = builder.param(key.as_str(), value);
    }

    for (i, table) in manifest.dependencies.iter().enumerate() {
        let mut dependency = Dependency::new();
        for (key, value) in table {
            let value = scalar(value).ok_or_else(|| {
                invalid(format!("dependencies[{i}].{key} must be a scalar"))
            })?;
            dependency = dependency.field(key.as_str(), value);
        }
        builder = builder.dependency(dependency);
    }

    for file in manifest.files {
        let text = match (file.content, file.source) {
            (Some(content), None) => content,
            (None, Some(source)) => {
                let full = base.join(&source);
                fs::read_to_string(&full).map_err(|source| ManifestError::Read {
                    path: full.clone(),
                    source,
                })?
            }
            _ => {
                return Err(invalid(format!(
                    "file '{}' needs exactly one of `content` or `source`",
                    file.path
                )));
            }
        };
        let content = match file.file_type {
            FileType::Literal => TemplateContent::literal(text),
            FileType::Parameterized => TemplateContent::parameterized(text),
        };
        let header = file
            .license_header
            .unwrap_or_else(|| file.path.ends_with(".java"));
        builder = if header {
            builder.source(file.path, content)
        } else {
            builder.file(file.path, content)
        };
    }

    builder.build().map_err(|source| ManifestError::Definition {
        path: origin.to_path_buf(),
        source,
    })
}

fn scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
