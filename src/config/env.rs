//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::logging::LogLevel;
use crate::models::settings::{ENV_COLOR, ENV_LENIENT, ENV_LOG, ENV_PATH, ENV_REQUIRED};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `path` into the process environment if it exists.
    ///
    /// Variables already set in the environment are not overridden.
    /// Returns whether a file was loaded.
    pub fn load_env_file(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;
        Ok(true)
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            ENV_PATH => {
                if value.trim().is_empty() {
                    return Err(AppError::config(format!("{} cannot be empty", ENV_PATH)));
                }
            }
            ENV_REQUIRED => {
                if let Some(bad) = value.split(',').map(str::trim).find(|k| k.contains('=')) {
                    return Err(AppError::config(format!("Invalid {} entry '{}': keys cannot contain '='", ENV_REQUIRED, bad)));
                }
            }
            ENV_LENIENT | ENV_COLOR => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
            }
            ENV_LOG => {
                value.parse::<LogLevel>()?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (ENV_PATH, "Config file to operate on", "/etc/app.conf"),
            (ENV_REQUIRED, "Comma-separated list of required keys", "name,age"),
            (ENV_LENIENT, "Tolerate missing file or keys", "false"),
            (ENV_COLOR, "Enable colored output", "true"),
            (ENV_LOG, "Diagnostic log level", "warn"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<18} {}\n", var, description));
            help.push_str(&format!("  {:<18} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::validate_vars(|name| std::env::var(name).ok())
    }

    /// Every problem among the supported variables visible through `lookup`
    pub fn validate_vars<F>(lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Some(value) = lookup(var_name) {
                match Self::validate_env_var(var_name, &value) {
                    Ok(()) => {}
                    Err(AppError::Config(message)) => problems.push(message),
                    Err(e) => problems.push(e.to_string()),
                }
            }
        }

        problems
    }
}
