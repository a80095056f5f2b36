//! Environment requirements and version checks.
//!
//! Pure data and string logic; probing the host lives behind the
//! `ToolProbe` port in the application layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{entities::license::LicenseHeader, value_objects::Platform};

/// An external tool that must be invocable before generation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    name: String,
    version_args: Vec<String>,
}

impl ToolRequirement {
    pub fn new<I, S>(name: impl Into<String>, version_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            version_args: version_args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments that make the tool print its version and exit 0.
    pub fn version_args(&self) -> &[String] {
        &self.version_args
    }
}

/// Everything the environment validator needs to build a `RunContext`.
#[derive(Debug, Clone)]
pub struct EnvironmentRequest {
    /// Tools checked in order; the first missing one aborts.
    pub tools: Vec<ToolRequirement>,
    /// Which of `tools` is the language runtime whose version is compared.
    pub runtime_tool: String,
    /// Expected runtime major version, e.g. `"17"`.
    pub java_version: String,
    pub build_tool_version: String,
    pub platform: Platform,
    pub base_dir: PathBuf,
    pub license_header: LicenseHeader,
}

impl EnvironmentRequest {
    /// Java runtime + Maven checks for the current platform.
    pub fn java(
        java_version: impl Into<String>,
        build_tool_version: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tools: vec![
                ToolRequirement::new("java", ["-version"]),
                ToolRequirement::new("mvn", ["-v"]),
            ],
            runtime_tool: "java".into(),
            java_version: java_version.into(),
            build_tool_version: build_tool_version.into(),
            platform: Platform::current(),
            base_dir: base_dir.into(),
            license_header: LicenseHeader::default(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolRequirement>, runtime_tool: impl Into<String>) -> Self {
        self.tools = tools;
        self.runtime_tool = runtime_tool.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_license_header(mut self, header: LicenseHeader) -> Self {
        self.license_header = header;
        self
    }
}

/// Non-fatal findings. Logged at WARN; the run proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentWarning {
    #[error("{tool} reports version '{found}', expected {expected}.x")]
    RuntimeVersionMismatch {
        tool: String,
        expected: String,
        found: String,
    },

    #[error("'{preferred}' not found on {platform}; falling back to '{fallback}'")]
    TextToolFallback {
        platform: Platform,
        preferred: String,
        fallback: String,
    },
}

/// Pull a version string out of a tool's `--version` output.
///
/// Prefers the first double-quoted token (`openjdk version "17.0.2"`), then
/// the first whitespace token that starts with a digit
/// (`Apache Maven 3.9.6 (...)`).
pub fn extract_version(output: &str) -> Option<&str> {
    if let Some(start) = output.find('"') {
        let rest = &output[start + 1..];
        if let Some(end) = rest.find('"') {
            let quoted = rest[..end].trim();
            if !quoted.is_empty() {
                return Some(quoted);
            }
        }
    }

    output
        .split_whitespace()
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .map(|token| token.trim_end_matches([',', ';', ')']))
}

/// Prefix match on the major version.
///
/// `17`, `17.0.2`, `17-ea` and the legacy `1.17.x` scheme all match major
/// `17`; `170` and `1.7` do not.
pub fn version_matches(found: &str, major: &str) -> bool {
    let major = major.trim();
    if major.is_empty() {
        return true;
    }

    let matches_prefix = |candidate: &str| {
        candidate
            .strip_prefix(major)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_digit()))
    };

    matches_prefix(found) || found.strip_prefix("1.").is_some_and(matches_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_quoted_java_version() {
        let out = "openjdk version \"17.0.2\" 2022-01-18\nOpenJDK Runtime Environment";
        assert_eq!(extract_version(out), Some("17.0.2"));
    }

    #[test]
    fn extracts_first_numeric_token() {
        let out = "Apache Maven 3.9.6 (bc0240f3c744dd6b6ec2920b3cd08dcc295161ae)";
        assert_eq!(extract_version(out), Some("3.9.6"));
    }

    #[test]
    fn extract_version_none_when_absent() {
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    fn version_prefix_rules() {
        assert!(version_matches("17", "17"));
        assert!(version_matches("17.0.2", "17"));
        assert!(version_matches("17-ea", "17"));
        assert!(version_matches("1.8.0_392", "8"));
        assert!(!version_matches("170.1", "17"));
        assert!(!version_matches("21.0.1", "17"));
        assert!(!version_matches("1.7.0", "17"));
    }

    #[test]
    fn warning_messages_are_readable() {
        let w = EnvironmentWarning::RuntimeVersionMismatch {
            tool: "java".into(),
            expected: "17".into(),
            found: "21.0.1".into(),
        };
        assert_eq!(w.to_string(), "java reports version '21.0.1', expected 17.x");
    }
}
