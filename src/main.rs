//! Metarename CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Title every mp3 after its file name, tidied up
//! metarename apply "*.mp3" --replace _ " " --trim --case title
//!
//! # Skip one file and keep going past failures
//! metarename apply "*.mp3" --uncheck intro.mp3 --prefix "Live: " --continue-on-error -y
//!
//! # Inspect the current titles
//! metarename show "*.mp3"
//! metarename show "*.mp3" --json
//!
//! # Configuration
//! metarename config set failure_policy=continue-on-error
//! metarename config get surface_errors
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/metarename/config.toml` on Linux). Default rules listed there are applied
//! before any rules given on the command line.

use std::process::ExitCode;

use colored::Colorize;
use metarename::{
    MetaRenameError, Result,
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // A broken config is an error, never replaced by defaults
    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let path = AppConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            eprintln!("{} {e} ({path})", "Error:".red().bold());
            return ExitCode::FAILURE;
        }
    };
    let quiet = cli.quiet || config.quiet;

    let _log_guard = match init_logging(&config, quiet) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {e}; continuing without a log file", "Warning:".yellow().bold());
            None
        }
    };

    match run(cli.command, &mut config, quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &AppConfig, quiet: bool) -> Result<logging::LogGuard> {
    let path = config.log_path().map_err(MetaRenameError::from)?;
    logging::init(&path, quiet)
}

fn run(command: Commands, config: &mut AppConfig, quiet: bool) -> Result<()> {
    match command {
        Commands::Apply {
            files,
            uncheck,
            rules,
            continue_on_error,
            yes,
        } => commands::apply(config, &files, &uncheck, &rules, continue_on_error, yes, quiet),
        Commands::Show { files, json } => commands::show(config, &files, json, quiet),
        Commands::Config { command } => commands::config(config, &command, quiet),
    }
}
