//! Implementation of the `stencil generate` command.
//!
//! Wires the production adapters into an [`Orchestrator`], runs it, and
//! prints a summary. All sequencing and failure handling live in the core.

use chrono::Utc;
use tracing::{info, instrument};

use stencil_adapters::{LocalFilesystem, SimpleRenderer, SystemToolProbe};
use stencil_core::{
    application::{Orchestrator, RunReport, RunRequest},
    domain::RenderedProject,
};

use crate::{cli::GenerateArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = super::load_catalog(config)?;
    let orchestrator = Orchestrator::new(
        Box::new(catalog),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(SystemToolProbe::new()),
    );
    let request = RunRequest::new(config.environment_request());
    let started = Utc::now();

    if args.dry_run {
        let projects = orchestrator.plan(&request)?;
        return print_plan(&projects, &output);
    }

    output.header(&format!("Generating into {}", config.base_dir.display()))?;
    let spinner = output.spinner("Generating blueprints");
    let result = orchestrator.run(&request);
    spinner.finish_and_clear();

    let report = result?;
    let elapsed = Utc::now() - started;
    info!(
        run_id = %report.run_id,
        elapsed_ms = elapsed.num_milliseconds(),
        log_file = %config.log_file.display(),
        "Stencil completed successfully"
    );
    print_report(&report, elapsed.num_milliseconds(), &output)?;
    Ok(())
}

fn print_plan(projects: &[RenderedProject], output: &OutputManager) -> CliResult<()> {
    output.info("Dry run: nothing will be written")?;
    for (i, project) in projects.iter().enumerate() {
        output.print(&format!(
            "  {}. {} -> {} ({} files, {} directories)",
            i + 1,
            project.name(),
            project.root().display(),
            project.file_count(),
            project.directory_count(),
        ))?;
    }
    Ok(())
}

fn print_report(report: &RunReport, elapsed_ms: i64, output: &OutputManager) -> CliResult<()> {
    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }
    for bp in &report.blueprints {
        output.success(&format!(
            "{} ({} files) at {}",
            bp.blueprint,
            bp.files_written,
            bp.root.display()
        ))?;
    }
    output.print("")?;
    output.print(&format!(
        "Generated {} blueprints, {} files in {} ms (run {})",
        report.blueprints.len(),
        report.files_written(),
        elapsed_ms,
        report.run_id,
    ))?;
    Ok(())
}
