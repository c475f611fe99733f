//! Runtime settings model and environment merging

use crate::error::{AppError, Result};
use crate::logging::LogLevel;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const ENV_PATH: &str = "CONFFILE_PATH";
/// Comma-separated required keys
pub const ENV_REQUIRED: &str = "CONFFILE_REQUIRED";
/// `true` to tolerate a missing file or missing required keys
pub const ENV_LENIENT: &str = "CONFFILE_LENIENT";
/// `false` to disable colored output
pub const ENV_COLOR: &str = "CONFFILE_COLOR";
/// Log level name (`trace`, `debug`, `info`, `warn`, `error`)
pub const ENV_LOG: &str = "CONFFILE_LOG";

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Config file to operate on
    pub path: Option<PathBuf>,

    /// Keys that must be present after load
    pub required: Vec<String>,

    /// Fail on a missing file or missing required key
    pub strict: bool,

    /// Enable colored terminal output
    pub enable_color: bool,

    /// Minimum level of diagnostics written to stderr
    pub log_level: LogLevel,

    /// `.env` file that was loaded while resolving, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: None,
            required: Vec::new(),
            strict: crate::defaults::DEFAULT_STRICT,
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
            log_level: LogLevel::default(),
            env_file: None,
        }
    }
}

impl Settings {
    /// The config file path, which must have been provided by some source
    pub fn file_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or_else(|| {
            AppError::config(format!("No config file given; use --file or set {}", ENV_PATH))
        })
    }

    /// Merge `CONFFILE_*` variables obtained through `lookup`
    pub fn merge_from_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_PATH) {
            let path = path.trim();
            if !path.is_empty() {
                self.path = Some(PathBuf::from(path));
            }
        }

        if let Some(required) = lookup(ENV_REQUIRED) {
            self.required = split_list(&required);
        }

        if let Some(lenient) = lookup(ENV_LENIENT) {
            let lenient: bool = lenient.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_LENIENT, lenient, e)))?;
            self.strict = !lenient;
        }

        if let Some(color) = lookup(ENV_COLOR) {
            self.enable_color = color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_COLOR, color, e)))?;
        }

        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level.parse()?;
        }

        Ok(())
    }

    /// Compact JSON form for diagnostics
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate the settings and return any errors
    pub fn validate(&self) -> Result<()> {
        let path = self.file_path()?;
        if path.as_os_str().is_empty() {
            return Err(AppError::config("Config file path cannot be empty"));
        }

        for key in &self.required {
            if key.trim().is_empty() {
                return Err(AppError::config("Required key names cannot be empty"));
            }
            if key.contains('=') {
                return Err(AppError::config(format!("Required key '{}' cannot contain '='", key)));
            }
        }

        Ok(())
    }
}

/// Split a comma-separated list, dropping empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.path.is_none());
        assert!(settings.required.is_empty());
        assert!(settings.strict);
        assert!(settings.enable_color);
        assert_eq!(settings.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_merge_from_vars() {
        let mut settings = Settings::default();
        settings.merge_from_vars(lookup(&[
            (ENV_PATH, "/etc/app.conf"),
            (ENV_REQUIRED, "name, age,,"),
            (ENV_LENIENT, "true"),
            (ENV_COLOR, "false"),
            (ENV_LOG, "debug"),
        ])).unwrap();

        assert_eq!(settings.path, Some(PathBuf::from("/etc/app.conf")));
        assert_eq!(settings.required, vec!["name", "age"]);
        assert!(!settings.strict);
        assert!(!settings.enable_color);
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_merge_rejects_bad_booleans() {
        let mut settings = Settings::default();
        let err = settings.merge_from_vars(lookup(&[(ENV_LENIENT, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_LENIENT));
    }

    #[test]
    fn test_validate_requires_path() {
        let settings = Settings::default();
        assert!(settings.validate().is_err());

        let settings = Settings { path: Some(PathBuf::from("app.conf")), ..Settings::default() };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_required_names() {
        let mut settings = Settings { path: Some(PathBuf::from("app.conf")), ..Settings::default() };
        settings.required = vec!["a=b".to_string()];
        assert!(settings.validate().is_err());

        settings.required = vec!["  ".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_to_json() {
        let settings = Settings {
            path: Some(PathBuf::from("x.conf")),
            required: vec!["name".to_string()],
            ..Settings::default()
        };
        let value: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();

        assert_eq!(value["path"], "x.conf");
        assert_eq!(value["required"][0], "name");
        assert_eq!(value["strict"], true);
        assert_eq!(value["log_level"], "warn");
        assert!(value.get("env_file").is_none());
    }
}
