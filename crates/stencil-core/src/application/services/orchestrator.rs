//! Orchestrator - main application entry point.
//!
//! Sequences one run:
//! 1. Validate the environment (once, before anything else)
//! 2. Load and validate the blueprint set
//! 3. For each blueprint, in order: render, then materialize
//!
//! The first failure halts the run. Blueprints already materialized stay on
//! disk and are listed in the failure.

use std::fmt;

use thiserror::Error;
use tracing::{error, info, info_span, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ports::{BlueprintCatalog, BlueprintRenderer, Filesystem, ToolProbe},
        services::{
            environment::EnvironmentValidator,
            materializer::{MaterializeReport, Materializer},
        },
    },
    domain::{
        Blueprint, DomainValidator as validator, EnvironmentRequest, EnvironmentWarning,
        RenderedProject, RunContext,
    },
    error::{StencilError, StencilResult},
};

/// Input for a single run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub run_id: Uuid,
    pub environment: EnvironmentRequest,
}

impl RunRequest {
    pub fn new(environment: EnvironmentRequest) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            environment,
        }
    }
}

/// Where a run is in its lifecycle.
///
/// `Start → Validating → Materializing(0) → … → Materializing(n-1) → Done`,
/// with any step able to move to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Start,
    Validating,
    Materializing { index: usize, blueprint: String },
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Validating => f.write_str("validating"),
            Self::Materializing { index, blueprint } => {
                write!(f, "materializing[{}] {}", index, blueprint)
            }
            Self::Done => f.write_str("done"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// The step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStep {
    ValidatingEnvironment,
    LoadingBlueprints,
    Rendering { index: usize, blueprint: String },
    Materializing { index: usize, blueprint: String },
}

impl RunStep {
    /// Name of the blueprint being processed, if any.
    pub fn blueprint(&self) -> Option<&str> {
        match self {
            Self::Rendering { blueprint, .. } | Self::Materializing { blueprint, .. } => {
                Some(blueprint)
            }
            _ => None,
        }
    }
}

impl fmt::Display for RunStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidatingEnvironment => f.write_str("environment validation"),
            Self::LoadingBlueprints => f.write_str("blueprint loading"),
            Self::Rendering { index, blueprint } => {
                write!(f, "rendering blueprint #{} '{}'", index + 1, blueprint)
            }
            Self::Materializing { index, blueprint } => {
                write!(f, "materializing blueprint #{} '{}'", index + 1, blueprint)
            }
        }
    }
}

/// Successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub warnings: Vec<EnvironmentWarning>,
    pub blueprints: Vec<MaterializeReport>,
    /// Every state the run passed through, ending in `Done`.
    pub states: Vec<RunState>,
}

impl RunReport {
    pub fn files_written(&self) -> usize {
        self.blueprints.iter().map(|b| b.files_written).sum()
    }
}

/// Halted run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Run failed during {step}: {error}")]
pub struct RunFailure {
    pub run_id: Uuid,
    pub step: RunStep,
    #[source]
    pub error: StencilError,
    pub warnings: Vec<EnvironmentWarning>,
    /// Blueprints fully materialized before the failure.
    pub completed: Vec<MaterializeReport>,
    /// Every state the run passed through, ending in `Failed`.
    pub states: Vec<RunState>,
}

/// Single owner of run sequencing.
pub struct Orchestrator {
    catalog: Box<dyn BlueprintCatalog>,
    renderer: Box<dyn BlueprintRenderer>,
    validator: EnvironmentValidator,
    materializer: Materializer,
}

/// Mutable bookkeeping for one run.
struct Progress {
    run_id: Uuid,
    states: Vec<RunState>,
    warnings: Vec<EnvironmentWarning>,
    completed: Vec<MaterializeReport>,
}

impl Progress {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            states: vec![RunState::Start],
            warnings: Vec::new(),
            completed: Vec::new(),
        }
    }

    fn enter(&mut self, state: RunState) {
        info!(state = %state, "Run state changed");
        self.states.push(state);
    }

    fn fail(mut self, step: RunStep, error: StencilError) -> RunFailure {
        error!(step = %step, error = %error, "Run halted");
        self.states.push(RunState::Failed);
        RunFailure {
            run_id: self.run_id,
            step,
            error,
            warnings: self.warnings,
            completed: self.completed,
            states: self.states,
        }
    }
}

impl Orchestrator {
    pub fn new(
        catalog: Box<dyn BlueprintCatalog>,
        renderer: Box<dyn BlueprintRenderer>,
        filesystem: Box<dyn Filesystem>,
        probe: Box<dyn ToolProbe>,
    ) -> Self {
        Self {
            catalog,
            renderer,
            validator: EnvironmentValidator::new(probe),
            materializer: Materializer::new(filesystem),
        }
    }

    /// Execute a full run.
    pub fn run(&self, request: &RunRequest) -> Result<RunReport, RunFailure> {
        let span = info_span!("run", run_id = %request.run_id);
        let _guard = span.enter();

        info!(base_dir = %request.environment.base_dir.display(), "Run started");
        let mut progress = Progress::new(request.run_id);

        let (context, blueprints) = match self.prepare(request, &mut progress) {
            Ok(prepared) => prepared,
            Err((step, error)) => return Err(progress.fail(step, error)),
        };

        let total = blueprints.len();
        for (index, blueprint) in blueprints.iter().enumerate() {
            progress.enter(RunState::Materializing {
                index,
                blueprint: blueprint.name().to_string(),
            });
            info!(
                blueprint = blueprint.name(),
                "[{}/{}] Generating '{}'",
                index + 1,
                total,
                blueprint.name()
            );

            let project = match self.renderer.render(blueprint, &context) {
                Ok(project) => project,
                Err(e) => {
                    let step = RunStep::Rendering {
                        index,
                        blueprint: blueprint.name().to_string(),
                    };
                    return Err(progress.fail(step, e));
                }
            };

            match self.materializer.materialize(&project, context.license_header()) {
                Ok(report) => progress.completed.push(report),
                Err(e) => {
                    let step = RunStep::Materializing {
                        index,
                        blueprint: blueprint.name().to_string(),
                    };
                    return Err(progress.fail(step, e));
                }
            }
        }

        progress.enter(RunState::Done);
        let report = RunReport {
            run_id: progress.run_id,
            warnings: progress.warnings,
            blueprints: progress.completed,
            states: progress.states,
        };
        info!(
            blueprints = report.blueprints.len(),
            files = report.files_written(),
            warnings = report.warnings.len(),
            "Run completed"
        );
        Ok(report)
    }

    /// Validate and render everything without writing.
    #[instrument(skip_all, fields(run_id = %request.run_id))]
    pub fn plan(&self, request: &RunRequest) -> Result<Vec<RenderedProject>, RunFailure> {
        let mut progress = Progress::new(request.run_id);

        let (context, blueprints) = match self.prepare(request, &mut progress) {
            Ok(prepared) => prepared,
            Err((step, error)) => return Err(progress.fail(step, error)),
        };

        let mut projects = Vec::with_capacity(blueprints.len());
        for (index, blueprint) in blueprints.iter().enumerate() {
            let rendered = self
                .renderer
                .render(blueprint, &context)
                .and_then(|project| {
                    validator::validate_rendered(&project)?;
                    validator::validate_headers(&project, context.license_header())?;
                    Ok(project)
                });
            match rendered {
                Ok(project) => projects.push(project),
                Err(e) => {
                    let step = RunStep::Rendering {
                        index,
                        blueprint: blueprint.name().to_string(),
                    };
                    return Err(progress.fail(step, e));
                }
            }
        }

        info!(blueprints = projects.len(), "Plan ready");
        Ok(projects)
    }

    /// Environment first, then the blueprint set. Nothing is rendered or
    /// written unless both pass.
    fn prepare(
        &self,
        request: &RunRequest,
        progress: &mut Progress,
    ) -> Result<(RunContext, Vec<Blueprint>), (RunStep, StencilError)> {
        progress.enter(RunState::Validating);

        let validated = self
            .validator
            .validate(&request.environment)
            .map_err(|e| (RunStep::ValidatingEnvironment, e))?;
        progress.warnings = validated.warnings;

        let blueprints = self
            .load_blueprints()
            .map_err(|e| (RunStep::LoadingBlueprints, e))?;

        Ok((validated.context, blueprints))
    }

    fn load_blueprints(&self) -> StencilResult<Vec<Blueprint>> {
        let blueprints = self.catalog.list()?;
        validator::validate_blueprint_set(&blueprints)?;
        info!(count = blueprints.len(), "Blueprints loaded");
        Ok(blueprints)
    }
}
