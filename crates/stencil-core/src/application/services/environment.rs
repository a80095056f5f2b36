//! Environment Validator - the gate in front of every run.
//!
//! Checks, in order:
//! 1. Each required tool is locatable
//! 2. Each required tool answers its version probe
//! 3. The runtime's major version matches the expected one (warning only)
//! 4. Which text-processing tool generated scripts should use
//!
//! Nothing is written to disk here. A `RunContext` only exists once every
//! check has passed.

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ToolProbe},
    domain::{
        EnvironmentRequest, EnvironmentWarning, RunContext, TextTool, extract_version,
        version_matches,
    },
    error::StencilResult,
};

/// Result of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEnvironment {
    pub context: RunContext,
    pub warnings: Vec<EnvironmentWarning>,
}

/// Confirms the host can build what gets generated.
pub struct EnvironmentValidator {
    probe: Box<dyn ToolProbe>,
}

impl EnvironmentValidator {
    pub fn new(probe: Box<dyn ToolProbe>) -> Self {
        Self { probe }
    }

    /// Run every check and build the run context.
    ///
    /// The first missing or broken tool aborts with
    /// [`ApplicationError::PrerequisiteMissing`] or
    /// [`ApplicationError::ToolNotFunctional`]. A runtime version mismatch is
    /// logged at WARN and returned in `warnings`; it never fails the run.
    #[instrument(skip_all, fields(platform = %request.platform))]
    pub fn validate(&self, request: &EnvironmentRequest) -> StencilResult<ValidatedEnvironment> {
        let mut warnings = Vec::new();
        let mut runtime_output = None;

        for tool in &request.tools {
            let name = tool.name();

            let Some(path) = self.probe.locate(name) else {
                error!(tool = name, "Required tool not found");
                return Err(ApplicationError::PrerequisiteMissing { tool: name.into() }.into());
            };

            let output = self
                .probe
                .version(name, tool.version_args())
                .map_err(|reason| {
                    error!(tool = name, %reason, "Tool is not functional");
                    ApplicationError::ToolNotFunctional {
                        tool: name.into(),
                        reason,
                    }
                })?;

            let version = extract_version(&output).unwrap_or("unknown");
            info!(
                tool = name,
                path = %path.display(),
                version,
                "Tool available"
            );

            if name == request.runtime_tool {
                runtime_output = Some(output);
            }
        }

        match runtime_output {
            Some(output) => {
                let found = extract_version(&output).unwrap_or("unknown");
                if version_matches(found, &request.java_version) {
                    info!(
                        expected = %request.java_version,
                        found,
                        "Runtime version matches"
                    );
                } else {
                    let warning = EnvironmentWarning::RuntimeVersionMismatch {
                        tool: request.runtime_tool.clone(),
                        expected: request.java_version.clone(),
                        found: found.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
            None => debug!(
                runtime = %request.runtime_tool,
                "Runtime tool not among required tools; version check skipped"
            ),
        }

        let (text_tool, fallback) =
            TextTool::resolve(request.platform, |name| self.probe.locate(name).is_some());
        if let Some(warning) = fallback {
            warn!("{}", warning);
            warnings.push(warning);
        }
        info!(text_tool = %text_tool, "Text tool resolved");

        let context = RunContext::new(
            request.java_version.as_str(),
            request.build_tool_version.as_str(),
            text_tool,
            request.platform,
            request.base_dir.clone(),
        )
        .with_license_header(request.license_header.clone());

        Ok(ValidatedEnvironment { context, warnings })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        application::ports::output::MockToolProbe,
        domain::{Platform, ToolRequirement},
        error::StencilError,
    };

    fn request() -> EnvironmentRequest {
        EnvironmentRequest::java("17", "3.9.6", "/out").with_platform(Platform::Linux)
    }

    fn located(name: &str) -> Option<PathBuf> {
        Some(PathBuf::from(format!("/usr/bin/{name}")))
    }

    #[test]
    fn all_tools_present_builds_context() {
        let mut probe = MockToolProbe::new();
        probe.expect_locate().returning(located);
        probe
            .expect_version()
            .withf(|name, _| name == "java")
            .returning(|_, _| Ok("openjdk version \"17.0.9\" 2023-10-17".into()));
        probe
            .expect_version()
            .withf(|name, _| name == "mvn")
            .returning(|_, _| Ok("Apache Maven 3.9.6 (bc0240f3)".into()));

        let validated = EnvironmentValidator::new(Box::new(probe))
            .validate(&request())
            .unwrap();

        assert!(validated.warnings.is_empty());
        assert_eq!(validated.context.java_version(), "17");
        assert_eq!(validated.context.text_tool(), TextTool::Sed);
        assert_eq!(validated.context.base_dir(), std::path::Path::new("/out"));
    }

    #[test]
    fn missing_tool_is_prerequisite_missing() {
        let mut probe = MockToolProbe::new();
        probe
            .expect_locate()
            .returning(|name| if name == "mvn" { None } else { located(name) });
        probe
            .expect_version()
            .returning(|_, _| Ok("openjdk version \"17\"".into()));

        let err = EnvironmentValidator::new(Box::new(probe))
            .validate(&request())
            .unwrap_err();

        assert_eq!(
            err,
            StencilError::Application(ApplicationError::PrerequisiteMissing {
                tool: "mvn".into()
            })
        );
    }

    #[test]
    fn first_missing_tool_stops_probing() {
        let mut probe = MockToolProbe::new();
        probe.expect_locate().times(1).returning(|_| None);
        probe.expect_version().never();

        let err = EnvironmentValidator::new(Box::new(probe))
            .validate(&request())
            .unwrap_err();

        assert!(err.is_environment());
    }

    #[test]
    fn failing_version_probe_is_not_functional() {
        let mut probe = MockToolProbe::new();
        probe.expect_locate().returning(located);
        probe
            .expect_version()
            .returning(|_, _| Err("exited with status 1".into()));

        let err = EnvironmentValidator::new(Box::new(probe))
            .validate(&request())
            .unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::ToolNotFunctional { ref tool, .. })
                if tool == "java"
        ));
    }

    #[test]
    fn version_mismatch_is_only_a_warning() {
        let mut probe = MockToolProbe::new();
        probe.expect_locate().returning(located);
        probe
            .expect_version()
            .returning(|_, _| Ok("openjdk version \"21.0.1\" 2023-10-17".into()));

        let validated = EnvironmentValidator::new(Box::new(probe))
            .validate(&request())
            .unwrap();

        assert_eq!(
            validated.warnings,
            vec![EnvironmentWarning::RuntimeVersionMismatch {
                tool: "java".into(),
                expected: "17".into(),
                found: "21.0.1".into(),
            }]
        );
    }

    #[test]
    fn macos_without_gsed_falls_back() {
        let mut probe = MockToolProbe::new();
        probe
            .expect_locate()
            .returning(|name| if name == "gsed" { None } else { located(name) });
        probe
            .expect_version()
            .returning(|_, _| Ok("openjdk version \"17.0.2\"".into()));

        let validated = EnvironmentValidator::new(Box::new(probe))
            .validate(&request().with_platform(Platform::MacOs))
            .unwrap();

        assert_eq!(validated.context.text_tool(), TextTool::Sed);
        assert!(matches!(
            validated.warnings.as_slice(),
            [EnvironmentWarning::TextToolFallback { .. }]
        ));
    }

    #[test]
    fn macos_with_gsed_uses_it() {
        let mut probe = MockToolProbe::new();
        probe.expect_locate().returning(located);
        probe
            .expect_version()
            .returning(|_, _| Ok("openjdk version \"17.0.2\"".into()));

        let validated = EnvironmentValidator::new(Box::new(probe))
            .validate(&request().with_platform(Platform::MacOs))
            .unwrap();

        assert_eq!(validated.context.text_tool(), TextTool::GnuSed);
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn custom_tool_list_without_runtime_skips_version_check() {
        let mut probe = MockToolProbe::new();
        probe.expect_locate().returning(located);
        probe
            .expect_version()
            .returning(|_, _| Ok("gradle 8.5".into()));

        let request = request().with_tools(vec![ToolRequirement::new("gradle", ["-v"])], "java");
        let validated = EnvironmentValidator::new(Box::new(probe))
            .validate(&request)
            .unwrap();

        assert!(validated.warnings.is_empty());
    }
}
