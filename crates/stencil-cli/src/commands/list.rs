//! Implementation of the `stencil list` command.

use stencil_core::application::{BlueprintInfo, CatalogService};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = super::load_catalog(config)?;
    let service = CatalogService::new(Box::new(catalog));
    let blueprints = service.list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Blueprints:")?;
            for line in table(&blueprints) {
                output.print(&line)?;
            }
        }
        ListFormat::Json => {
            // Straight to stdout so pipes get valid JSON even with --quiet.
            let json = serde_json::to_string_pretty(&blueprints).map_err(|e| {
                CliError::Core(stencil_core::error::StencilError::Internal {
                    message: format!("failed to serialise blueprint list: {e}"),
                })
            })?;
            println!("{json}");
        }
        ListFormat::List => {
            for bp in &blueprints {
                println!("{}", bp.name);
            }
        }
    }

    Ok(())
}

fn table(blueprints: &[BlueprintInfo]) -> Vec<String> {
    let width = blueprints.iter().map(|b| b.name.len()).max().unwrap_or(0);
    blueprints
        .iter()
        .enumerate()
        .map(|(i, bp)| {
            format!(
                "  {}. {:<width$}  {} ({} files, {} deps)",
                i + 1,
                bp.name,
                bp.purpose,
                bp.files,
                bp.dependencies.len(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, purpose: &str) -> BlueprintInfo {
        BlueprintInfo {
            name: name.into(),
            target_dir: name.into(),
            language: "java".into(),
            package: "com.example".into(),
            purpose: purpose.into(),
            features: vec![],
            tech_stack: vec![],
            dependencies: vec!["a:b:1".into()],
            files: 7,
        }
    }

    #[test]
    fn table_aligns_names_and_keeps_order() {
        let lines = table(&[info("api-gateway", "Routes"), info("crypto-vault", "Keys")]);
        assert_eq!(lines[0], "  1. api-gateway   Routes (7 files, 1 deps)");
        assert_eq!(lines[1], "  2. crypto-vault  Keys (7 files, 1 deps)");
    }
}
