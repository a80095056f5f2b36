use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{
        blueprint::Blueprint,
        license::LicenseHeader,
        render::{RenderParams, to_pascal_case},
    },
    value_objects::{Platform, TextTool},
};

/// Process-wide configuration resolved once per run.
///
/// Created by the environment validator, read-only afterwards, and passed
/// explicitly to every component that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    java_version: String,
    build_tool_version: String,
    text_tool: TextTool,
    platform: Platform,
    base_dir: PathBuf,
    license_header: LicenseHeader,
}

impl RunContext {
    pub fn new(
        java_version: impl Into<String>,
        build_tool_version: impl Into<String>,
        text_tool: TextTool,
        platform: Platform,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            java_version: java_version.into(),
            build_tool_version: build_tool_version.into(),
            text_tool,
            platform,
            base_dir: base_dir.into(),
            license_header: LicenseHeader::default(),
        }
    }

    pub fn with_license_header(mut self, header: LicenseHeader) -> Self {
        self.license_header = header;
        self
    }

    pub fn java_version(&self) -> &str {
        &self.java_version
    }

    pub fn build_tool_version(&self) -> &str {
        &self.build_tool_version
    }

    pub fn text_tool(&self) -> TextTool {
        self.text_tool
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn license_header(&self) -> &LicenseHeader {
        &self.license_header
    }

    /// Absolute (or base-relative) root of a blueprint's output.
    pub fn project_root(&self, blueprint: &Blueprint) -> PathBuf {
        self.base_dir.join(blueprint.target_dir().as_path())
    }

    /// Parameters every file of `blueprint` is rendered with.
    ///
    /// Standard keys first, then the blueprint's own parameters, which may
    /// override them.
    pub fn params_for(&self, blueprint: &Blueprint) -> RenderParams {
        RenderParams::new()
            .with("PROJECT_NAME", blueprint.name())
            .with("PROJECT_NAME_PASCAL", to_pascal_case(blueprint.name()))
            .with("PACKAGE", blueprint.package())
            .with("PACKAGE_PATH", blueprint.package_path())
            .with("DESCRIPTION", blueprint.docs().purpose.as_str())
            .with("JAVA_VERSION", self.java_version.as_str())
            .with("BUILD_TOOL_VERSION", self.build_tool_version.as_str())
            .with("TEXT_TOOL", self.text_tool.command())
            .merged(blueprint.params())
    }
}
