//! Configuration module for metarename
//!
//! Holds the default rename rules, the failure policy and output preferences.
//! Configuration is stored in the user's config directory
//! (`~/.config/metarename/config.toml` on Linux).

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::pipeline::FailurePolicy;
use crate::rules::RuleSet;

/// Keys accepted by `config get` / `config set`
pub const SCALAR_KEYS: &[&str] = &["quiet", "failure_policy", "surface_errors", "log_file"];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Whether a failed tag write ends the batch
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Show per-file add failures to the operator, not only in the log
    #[serde(default = "default_surface_errors")]
    pub surface_errors: bool,

    /// Log file location; defaults to the user's local data directory
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Rules used when the command line supplies none
    #[serde(default)]
    pub rules: RuleSet,
}

const fn default_surface_errors() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            failure_policy: FailurePolicy::default(),
            surface_errors: default_surface_errors(),
            log_file: None,
            rules: RuleSet::default(),
        }
    }
}

impl AppConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("metarename").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolved log file location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no log file is configured and the data directory
    /// cannot be determined.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("metarename").join("metarename.log"))
    }

    /// Read a scalar setting as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "quiet" => Ok(self.quiet.to_string()),
            "surface_errors" => Ok(self.surface_errors.to_string()),
            "failure_policy" => Ok(policy_name(self.failure_policy).to_string()),
            "log_file" => Ok(self
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a scalar setting from text (does not save)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value of the wrong shape.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "quiet" => self.quiet = parse_bool(key, value)?,
            "surface_errors" => self.surface_errors = parse_bool(key, value)?,
            "failure_policy" => {
                self.failure_policy = match value {
                    "abort-on-first" => FailurePolicy::AbortOnFirst,
                    "continue-on-error" => FailurePolicy::ContinueOnError,
                    _ => {
                        return Err(ConfigError::Message(format!(
                            "Invalid value for failure_policy: '{value}'. Use 'abort-on-first' or 'continue-on-error'"
                        )));
                    }
                }
            }
            "log_file" => {
                self.log_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

const fn policy_name(policy: FailurePolicy) -> &'static str {
    match policy {
        FailurePolicy::AbortOnFirst => "abort-on-first",
        FailurePolicy::ContinueOnError => "continue-on-error",
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| {
        ConfigError::Message(format!(
            "Invalid value for {key}: '{value}'. Use 'true' or 'false'"
        ))
    })
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        SCALAR_KEYS.join(", ")
    ))
}
