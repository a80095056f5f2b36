//! Blueprint aggregate: the declarative description of one generated project.
//!
//! ```text
//! Blueprint (Aggregate Root)
//! ├── name, target_dir, language, package   identity + layout
//! ├── ManifestSpec                           pom.xml document + entry template
//! ├── Vec<Dependency>                        opaque key/value descriptors
//! ├── Vec<FileSpec>                          path + template + header flag
//! ├── Documentation                          purpose / features / tech stack
//! └── RenderParams                           blueprint-specific parameters
//! ```
//!
//! A blueprint is plain data. Nothing here knows what a Spring Boot starter
//! or a Kafka client is; dependency fields are substituted into the manifest
//! entry template by name and listed verbatim in the overview.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::{
        common::RelativePath,
        render::{RenderParams, TemplateContent},
    },
    error::DomainError,
};

/// An opaque dependency descriptor.
///
/// Fields keep their declaration order. The engine only ever uses them as
/// render parameters and as display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dependency {
    fields: Vec<(String, String)>,
}

impl Dependency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. A repeated key replaces the earlier value in place.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields as render parameters, for the manifest entry template.
    pub fn params(&self) -> RenderParams {
        self.fields
            .iter()
            .fold(RenderParams::new(), |p, (k, v)| p.with(k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Dependency {
    /// Field values joined with `:`, e.g. `org.example:lib:1.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self.fields.iter().map(|(_, v)| v.as_str()).collect();
        write!(f, "{}", values.join(":"))
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    path: RelativePath,
    content: TemplateContent,
    license_header: bool,
}

impl FileSpec {
    pub fn new(path: RelativePath, content: TemplateContent) -> Self {
        Self {
            path,
            content,
            license_header: false,
        }
    }

    /// Request license-header injection for this file.
    pub fn with_license_header(mut self) -> Self {
        self.license_header = true;
        self
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn content(&self) -> &TemplateContent {
        &self.content
    }

    pub fn license_header(&self) -> bool {
        self.license_header
    }
}

/// The dependency manifest written at the blueprint root.
///
/// `document` carries a `{{DEPENDENCIES}}` placeholder; `entry` is rendered
/// once per dependency with that dependency's fields merged over the file
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSpec {
    path: RelativePath,
    document: TemplateContent,
    entry: TemplateContent,
}

impl ManifestSpec {
    pub const DEPENDENCIES_KEY: &'static str = "DEPENDENCIES";

    pub fn new(path: RelativePath, document: TemplateContent, entry: TemplateContent) -> Self {
        Self {
            path,
            document,
            entry,
        }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn document(&self) -> &TemplateContent {
        &self.document
    }

    pub fn entry(&self) -> &TemplateContent {
        &self.entry
    }

    /// Render the manifest for `dependencies` in declaration order.
    pub fn render(&self, params: &RenderParams, dependencies: &[Dependency]) -> String {
        let entries = dependencies
            .iter()
            .map(|d| self.entry.render(&params.clone().merged(&d.params())))
            .collect::<Vec<_>>()
            .join("\n");

        self.document
            .render(&params.clone().with(Self::DEPENDENCIES_KEY, entries))
    }
}

/// Human-facing metadata used to generate the overview document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Documentation {
    pub purpose: String,
    pub features: Vec<String>,
    pub tech_stack: Vec<String>,
}

impl Documentation {
    pub fn new(purpose: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            ..Self::default()
        }
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    pub fn tech(mut self, tech: impl Into<String>) -> Self {
        self.tech_stack.push(tech.into());
        self
    }
}

/// The blueprint aggregate.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `name` is non-empty and a single path segment
/// 2. at least one file is declared
/// 3. every generated path (files + manifest + overview) is unique
/// 4. `package` is a dotted identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    name: String,
    target_dir: RelativePath,
    language: String,
    package: String,
    manifest: ManifestSpec,
    dependencies: Vec<Dependency>,
    files: Vec<FileSpec>,
    docs: Documentation,
    params: RenderParams,
}

impl Blueprint {
    /// Name of the generated overview document at the blueprint root.
    pub const OVERVIEW_FILE: &'static str = "README.md";

    pub fn builder(name: impl Into<String>) -> BlueprintBuilder {
        BlueprintBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory under the base directory this blueprint owns.
    pub fn target_dir(&self) -> &RelativePath {
        &self.target_dir
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// `com.example.app` → `com/example/app`.
    pub fn package_path(&self) -> String {
        self.package.replace('.', "/")
    }

    pub fn manifest(&self) -> &ManifestSpec {
        &self.manifest
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn files(&self) -> &[FileSpec] {
        &self.files
    }

    pub fn docs(&self) -> &Documentation {
        &self.docs
    }

    /// Blueprint-specific render parameters.
    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Standard directory layout, relative to the blueprint root.
    pub fn layout(&self) -> Vec<String> {
        let pkg = self.package_path();
        let lang = &self.language;
        vec![
            format!("src/main/{lang}/{pkg}"),
            "src/main/resources".into(),
            format!("src/test/{lang}/{pkg}"),
            "config".into(),
            "docs".into(),
            "tests".into(),
        ]
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        // Invariant 1
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidBlueprint(
                "Blueprint name cannot be empty".into(),
            ));
        }
        if self.name.contains(['/', '\\']) || matches!(self.name.as_str(), "." | "..") {
            return Err(DomainError::InvalidBlueprint(format!(
                "Blueprint name '{}' must be a single path segment",
                self.name
            )));
        }

        // Invariant 2
        if self.files.is_empty() {
            return Err(DomainError::EmptyBlueprint {
                name: self.name.clone(),
            });
        }

        // Invariant 3
        let mut seen = HashSet::new();
        let generated = self
            .files
            .iter()
            .map(|f| f.path.to_slash_string())
            .chain(std::iter::once(self.manifest.path.to_slash_string()))
            .chain(std::iter::once(Self::OVERVIEW_FILE.to_string()));
        for path in generated {
            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath { path });
            }
        }

        // Invariant 4
        let valid_package = !self.package.is_empty()
            && self.package.split('.').all(|seg| {
                seg.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                    && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !valid_package {
            return Err(DomainError::InvalidBlueprint(format!(
                "'{}' is not a valid package name",
                self.package
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.target_dir)
    }
}

/// Builder for blueprints.
///
/// Paths are accepted as strings and checked in `build()`, so a static
/// definition reads as a flat list of declarations.
pub struct BlueprintBuilder {
    name: String,
    target_dir: Option<String>,
    language: String,
    package: Option<String>,
    manifest: Option<(String, TemplateContent, TemplateContent)>,
    dependencies: Vec<Dependency>,
    files: Vec<(String, TemplateContent, bool)>,
    docs: Documentation,
    params: RenderParams,
}

impl BlueprintBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_dir: None,
            language: "java".into(),
            package: None,
            manifest: None,
            dependencies: Vec::new(),
            files: Vec::new(),
            docs: Documentation::default(),
            params: RenderParams::new(),
        }
    }

    /// Override the target directory (defaults to the blueprint name).
    pub fn target_dir(mut self, dir: impl Into<String>) -> Self {
        self.target_dir = Some(dir.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn manifest(
        mut self,
        path: impl Into<String>,
        document: TemplateContent,
        entry: TemplateContent,
    ) -> Self {
        self.manifest = Some((path.into(), document, entry));
        self
    }

    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Add a file without a license header.
    pub fn file(mut self, path: impl Into<String>, content: TemplateContent) -> Self {
        self.files.push((path.into(), content, false));
        self
    }

    /// Add a file that receives the license header.
    pub fn source(mut self, path: impl Into<String>, content: TemplateContent) -> Self {
        self.files.push((path.into(), content, true));
        self
    }

    pub fn docs(mut self, docs: Documentation) -> Self {
        self.docs = docs;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Consume the builder and construct a validated `Blueprint`.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` if package or manifest is not set
    /// - path errors from `RelativePath`
    /// - any invariant violation from `Blueprint::validate`
    pub fn build(self) -> Result<Blueprint, DomainError> {
        let package = self
            .package
            .ok_or(DomainError::MissingRequiredField { field: "package" })?;
        let (manifest_path, document, entry) = self
            .manifest
            .ok_or(DomainError::MissingRequiredField { field: "manifest" })?;

        let target_dir =
            RelativePath::try_new(self.target_dir.unwrap_or_else(|| self.name.clone()))?;

        let files = self
            .files
            .into_iter()
            .map(|(path, content, header)| {
                let spec = FileSpec::new(RelativePath::try_new(path)?, content);
                Ok(if header { spec.with_license_header() } else { spec })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let blueprint = Blueprint {
            name: self.name,
            target_dir,
            language: self.language,
            package,
            manifest: ManifestSpec::new(RelativePath::try_new(manifest_path)?, document, entry),
            dependencies: self.dependencies,
            files,
            docs: self.docs,
            params: self.params,
        };

        blueprint.validate()?;
        Ok(blueprint)
    }
}
