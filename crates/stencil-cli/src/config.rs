//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the `EnvironmentRequest`
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--base-dir`, `--log-file`)
//! 2. Environment variables (`STENCIL_JAVA_VERSION`, `STENCIL_BASE_DIR`, ...)
//! 3. Config file (`--config FILE`, or the per-user config path if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stencil_core::domain::{EnvironmentRequest, ToolRequirement};

use crate::cli::GlobalArgs;

/// Name of the log file placed beside the base directory.
pub const LOG_FILE_NAME: &str = "stencil.log";

/// Effective configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Required Java major version.
    pub java_version: String,
    /// Maven version recorded in generated docs.
    pub build_tool_version: String,
    /// Runtime command, probed first; its version is compared.
    pub runtime_tool: String,
    pub build_tool: String,
    pub base_dir: PathBuf,
    pub log_file: PathBuf,
    /// Extra TOML blueprint manifests, generated after the built-ins.
    pub blueprints_dir: Option<PathBuf>,
}

/// Shape of the merged sources before derived defaults are filled in.
#[derive(Debug, Deserialize)]
struct RawConfig {
    java_version: String,
    build_tool_version: String,
    runtime_tool: String,
    build_tool: String,
    base_dir: PathBuf,
    log_file: Option<PathBuf>,
    blueprints_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from every source, most specific last.
    pub fn load(args: &GlobalArgs) -> Result<Self, config::ConfigError> {
        let file = match &args.config {
            Some(path) => File::from(path.as_path()).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path().as_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let raw: RawConfig = Config::builder()
            .set_default("java_version", "17")?
            .set_default("build_tool_version", "3.9.6")?
            .set_default("runtime_tool", "java")?
            .set_default("build_tool", "mvn")?
            .set_default("base_dir", default_base_dir().to_string_lossy().into_owned())?
            .add_source(file)
            .add_source(Environment::with_prefix("STENCIL"))
            .set_override_option(
                "base_dir",
                args.base_dir.as_ref().map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option(
                "log_file",
                args.log_file.as_ref().map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()?;

        Ok(raw.into())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }

    /// Tool checks for this configuration, runtime first.
    pub fn environment_request(&self) -> EnvironmentRequest {
        let tools = vec![
            ToolRequirement::new(&self.runtime_tool, version_args(&self.runtime_tool)),
            ToolRequirement::new(&self.build_tool, version_args(&self.build_tool)),
        ];
        EnvironmentRequest::java(
            self.java_version.as_str(),
            self.build_tool_version.as_str(),
            self.base_dir.clone(),
        )
        .with_tools(tools, self.runtime_tool.as_str())
    }

    /// Value of one top-level key, as shown by `stencil config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = |p: &Path| p.display().to_string();
        match key {
            "java_version" => Some(self.java_version.clone()),
            "build_tool_version" => Some(self.build_tool_version.clone()),
            "runtime_tool" => Some(self.runtime_tool.clone()),
            "build_tool" => Some(self.build_tool.clone()),
            "base_dir" => Some(path(&self.base_dir)),
            "log_file" => Some(path(&self.log_file)),
            "blueprints_dir" => Some(self.blueprints_dir.as_deref().map(path).unwrap_or_default()),
            _ => None,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let log_file = raw.log_file.unwrap_or_else(|| log_file_beside(&raw.base_dir));
        Self {
            java_version: raw.java_version,
            build_tool_version: raw.build_tool_version,
            runtime_tool: raw.runtime_tool,
            build_tool: raw.build_tool,
            base_dir: raw.base_dir,
            log_file,
            blueprints_dir: raw.blueprints_dir,
        }
    }
}

/// `<directory of the executable>/generated`.
pub fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("generated")
}

/// `stencil.log` in the base directory's parent.
pub fn log_file_beside(base_dir: &Path) -> PathBuf {
    match base_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(LOG_FILE_NAME),
        _ => PathBuf::from(LOG_FILE_NAME),
    }
}

/// Version flag understood by well-known tools.
fn version_args(tool: &str) -> Vec<&'static str> {
    let name = Path::new(tool)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(tool);
    match name {
        "java" => vec!["-version"],
        "mvn" | "mvnw" => vec!["-v"],
        _ => vec!["--version"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(base_dir: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            base_dir: base_dir.map(PathBuf::from),
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::load(&args(Some("/srv/out/generated"))).unwrap();
        assert_eq!(cfg.java_version, "17");
        assert_eq!(cfg.build_tool, "mvn");
        assert_eq!(cfg.base_dir, PathBuf::from("/srv/out/generated"));
        assert_eq!(cfg.log_file, PathBuf::from("/srv/out/stencil.log"));
        assert_eq!(cfg.blueprints_dir, None);
    }

    #[test]
    fn explicit_file_is_merged_and_flags_win() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("stencil.toml");
        std::fs::write(
            &file,
            "java_version = \"21\"\nbase_dir = \"/from/file\"\nblueprints_dir = \"/bp\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(&GlobalArgs {
            config: Some(file),
            base_dir: Some(PathBuf::from("/from/flag/gen")),
            ..GlobalArgs::default()
        })
        .unwrap();

        assert_eq!(cfg.java_version, "21");
        assert_eq!(cfg.base_dir, PathBuf::from("/from/flag/gen"));
        assert_eq!(cfg.blueprints_dir, Some(PathBuf::from("/bp")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(&GlobalArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..GlobalArgs::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn default_base_dir_is_named_generated() {
        assert!(default_base_dir().ends_with("generated"));
    }

    #[test]
    fn log_file_for_relative_base() {
        assert_eq!(log_file_beside(Path::new("generated")), PathBuf::from("stencil.log"));
        assert_eq!(log_file_beside(Path::new("out/generated")), PathBuf::from("out/stencil.log"));
    }

    #[test]
    fn version_args_by_tool_name() {
        assert_eq!(version_args("java"), ["-version"]);
        assert_eq!(version_args("/usr/bin/mvn"), ["-v"]);
        assert_eq!(version_args("gradle"), ["--version"]);
    }

    #[test]
    fn environment_request_checks_runtime_then_build_tool() {
        let cfg = AppConfig::load(&args(Some("/gen"))).unwrap();
        let request = cfg.environment_request();
        let names: Vec<_> = request.tools.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["java", "mvn"]);
        assert_eq!(request.runtime_tool, "java");
        assert_eq!(request.tools[0].version_args(), ["-version"]);
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::load(&args(Some("/gen"))).unwrap();
        assert_eq!(cfg.get("runtime_tool").as_deref(), Some("java"));
        assert_eq!(cfg.get("blueprints_dir").as_deref(), Some(""));
        assert_eq!(cfg.get("nope"), None);
    }
}
