//! Simple variable substitution renderer.

use std::fmt::{self, Write as _};

use stencil_core::{
    application::{ApplicationError, ports::BlueprintRenderer},
    domain::{Blueprint, DomainValidator as validator, RenderedProject, RunContext},
    error::StencilResult,
};
use tracing::{debug, instrument, warn};

/// Renderer using flat `{{KEY}}` substitution.
///
/// Produces, relative to the blueprint root: the standard layout
/// directories, the build manifest, every declared file, and `README.md`.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(blueprint = %blueprint.name()))]
    fn render(&self, blueprint: &Blueprint, context: &RunContext) -> StencilResult<RenderedProject> {
        let params = context.params_for(blueprint);
        debug!(params = %params, "Render parameters");

        if let Err(e) = validator::validate_placeholders(blueprint, &params) {
            warn!(error = %e, "Blueprint has unresolved placeholders; they are written as-is");
        }

        let mut project = RenderedProject::new(blueprint.name(), context.project_root(blueprint));

        for dir in blueprint.layout() {
            project.add_directory(dir);
        }

        let manifest = blueprint.manifest();
        project.add_file(
            manifest.path().as_path(),
            manifest.render(&params, blueprint.dependencies()),
            false,
        );

        for file in blueprint.files() {
            project.add_file(
                file.path().as_path(),
                file.content().render(&params),
                file.license_header(),
            );
        }

        let overview = overview(blueprint, context).map_err(|e| ApplicationError::RenderingFailed {
            blueprint: blueprint.name().to_string(),
            reason: format!("overview: {e}"),
        })?;
        project.add_file(Blueprint::OVERVIEW_FILE, overview, false);

        validator::validate_rendered(&project)?;

        debug!(
            files = project.file_count(),
            directories = project.directory_count(),
            "Blueprint rendered"
        );
        Ok(project)
    }
}

/// The human-readable overview document.
///
/// The "Tech Stack" section lists technologies and then every dependency
/// exactly as declared.
fn overview(blueprint: &Blueprint, context: &RunContext) -> Result<String, fmt::Error> {
    let docs = blueprint.docs();
    let mut out = String::new();

    writeln!(out, "# {}", blueprint.name())?;
    writeln!(out)?;
    if !docs.purpose.is_empty() {
        writeln!(out, "{}", docs.purpose)?;
        writeln!(out)?;
    }

    if !docs.features.is_empty() {
        writeln!(out, "## Features")?;
        writeln!(out)?;
        for feature in &docs.features {
            writeln!(out, "- {feature}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Tech Stack")?;
    writeln!(out)?;
    writeln!(out, "- Java {}", context.java_version())?;
    writeln!(out, "- Maven {}", context.build_tool_version())?;
    for tech in &docs.tech_stack {
        writeln!(out, "- {tech}")?;
    }
    if !blueprint.dependencies().is_empty() {
        writeln!(out)?;
        writeln!(out, "### Dependencies")?;
        writeln!(out)?;
        for dependency in blueprint.dependencies() {
            writeln!(out, "- `{dependency}`")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Layout")?;
    writeln!(out)?;
    writeln!(out, "```text")?;
    writeln!(out, "{}/", blueprint.target_dir())?;
    writeln!(out, "├── {}", blueprint.manifest().path())?;
    for dir in blueprint.layout() {
        writeln!(out, "├── {dir}/")?;
    }
    writeln!(out, "└── {}", Blueprint::OVERVIEW_FILE)?;
    writeln!(out, "```")?;
    writeln!(out)?;

    writeln!(out, "## Build")?;
    writeln!(out)?;
    writeln!(out, "```sh")?;
    writeln!(out, "mvn clean verify")?;
    writeln!(out, "```")?;
    writeln!(out)?;
    writeln!(out, "To move the code to another package:")?;
    writeln!(out)?;
    writeln!(out, "```sh")?;
    writeln!(
        out,
        "grep -rl '{pkg}' src | xargs {tool} -i 's/{pkg}/com.acme.renamed/g'",
        pkg = blueprint.package(),
        tool = context.text_tool().command()
    )?;
    writeln!(out, "```")?;

    Ok(out)
}
