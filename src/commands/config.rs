//! Config command: read and change scalar settings

use std::path::Path;

use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::AppConfig;
use crate::{MetaRenameError, Result};

/// Execute a config subcommand against the default config file
///
/// # Errors
/// Returns an error for a malformed setting, an unknown key, or a failed save.
pub fn execute(config: &mut AppConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    execute_at(&path, config, command, quiet)
}

fn execute_at(
    path: &Path,
    config: &mut AppConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting)?;
            config.set_value(key, value)?;
            config.save_to(path)?;
            if !quiet {
                println!("{} Set {} = {}", "✓".green().bold(), key.cyan(), value);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get_value(key)?);
        }
    }
    Ok(())
}

fn parse_setting(setting: &str) -> Result<(&str, &str)> {
    let mut parts = setting.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(key), Some(value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(MetaRenameError::InvalidInput(format!(
            "Invalid setting '{setting}'. Use KEY=VALUE (e.g., quiet=true)"
        ))),
    }
}
