//! `stencil check`: run the environment checks without generating.

use tracing::instrument;

use stencil_adapters::SystemToolProbe;
use stencil_core::application::EnvironmentValidator;

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let request = config.environment_request();
    let validator = EnvironmentValidator::new(Box::new(SystemToolProbe::new()));

    let validated = validator.validate(&request)?;

    for tool in &request.tools {
        output.success(&format!("{} is installed", tool.name()))?;
    }
    for warning in &validated.warnings {
        output.warning(&warning.to_string())?;
    }
    output.info(&format!(
        "Text tool for generated scripts: {}",
        validated.context.text_tool()
    ))?;

    Ok(())
}
