pub mod blueprint;
pub mod common;
pub mod license;
pub mod render;
pub mod rendered_project;
pub mod run_context;

pub use crate::domain::DomainError;
pub use blueprint::Blueprint;
pub use rendered_project::RenderedProject;
pub use run_context::RunContext;
