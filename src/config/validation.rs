//! Validation of config files against settings, plus line-level lint

use crate::{
    conf::{parse_str, ConfFile, ParsedLine},
    error::{AppError, Result},
    models::Settings,
};
use colored::Colorize;
use std::collections::HashMap;
use std::fs;

/// Config file validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check the file named by `settings`: required keys plus lint.
    ///
    /// A missing file is `NotFound` in strict mode and an empty file
    /// otherwise. Missing required keys are reported as `Error` warnings
    /// rather than failing, so all of them show up at once.
    pub fn validate_file(settings: &Settings) -> Result<Vec<ValidationWarning>> {
        let path = settings.file_path()?;

        let text = if path.is_file() {
            fs::read_to_string(path).map_err(|e| AppError::io(path, e))?
        } else if settings.strict {
            return Err(AppError::not_found(path));
        } else {
            String::new()
        };

        let conf = ConfFile::from_text(path, &text);
        let mut warnings = Self::validate_required(&conf, &settings.required);
        warnings.extend(Self::lint_text(&text));
        Ok(warnings)
    }

    /// One `Error` warning per required key absent from `conf`
    pub fn validate_required(conf: &ConfFile, required: &[String]) -> Vec<ValidationWarning> {
        conf.missing_required(required)
            .into_iter()
            .map(|key| {
                ValidationWarning::new(
                    ValidationLevel::Error,
                    format!("required key '{}' not specified in {}", key, conf.path().display()),
                )
            })
            .collect()
    }

    /// Line-level findings that do not stop the file from loading
    pub fn lint_text(text: &str) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for line in parse_str(text) {
            let ParsedLine::Entry { line_no, key, has_separator, .. } = line else {
                continue;
            };

            if key.is_empty() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("line {}: entry has an empty key", line_no),
                ));
            } else if key.chars().any(char::is_whitespace) {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("line {}: key '{}' contains whitespace", line_no, key),
                ));
            }

            if !has_separator {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("line {}: no '=' found, '{}' is set to an empty value", line_no, key),
                ));
            }

            if let Some(previous) = first_seen.get(&key) {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("line {}: '{}' overrides the value from line {}", line_no, key, previous),
                ));
            } else {
                first_seen.insert(key, line_no);
            }
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Config file validation warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = self.level.as_str();
        let tag = if use_color {
            match self.level {
                ValidationLevel::Info => tag.blue().to_string(),
                ValidationLevel::Warning => tag.yellow().to_string(),
                ValidationLevel::Error => tag.red().bold().to_string(),
            }
        } else {
            tag.to_string()
        };
        format!("[{}] {}", tag, self.message)
    }
}

/// Convenience function for validating the file named by `settings`
pub fn validate_config(settings: &Settings) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_file(settings)
}
