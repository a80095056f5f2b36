//! `stencil config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value:?}"))?;
        }

        ConfigCommands::Show => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;
    use std::path::PathBuf;

    fn config() -> AppConfig {
        AppConfig::load(&GlobalArgs {
            base_dir: Some(PathBuf::from("/gen")),
            ..GlobalArgs::default()
        })
        .unwrap()
    }

    #[test]
    fn get_known_key() {
        assert_eq!(get_config_value(&config(), "build_tool").unwrap(), "mvn");
    }

    #[test]
    fn get_unknown_key_is_error() {
        assert!(matches!(
            get_config_value(&config(), "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn show_serialises_as_toml() {
        let text = toml::to_string_pretty(&config()).unwrap();
        assert!(text.contains("java_version = \"17\""));
        assert!(text.contains("base_dir = \"/gen\""));
    }
}
