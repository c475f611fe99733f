//! Command dispatch for the binary

use crate::{
    cli::Command,
    conf::ConfFile,
    config::{validate_config, ValidationLevel},
    error::{AppError, Result},
    models::Settings,
    output::{FormattingOptions, OutputFormatter, OutputFormatterFactory},
};
use std::fs;
use std::path::Path;

/// What a command printed and how the process should exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

impl Outcome {
    fn success(output: String) -> Self {
        Self { output, exit_code: 0 }
    }

    fn failure(output: String, exit_code: i32) -> Self {
        Self { output, exit_code }
    }
}

/// Main application struct that coordinates all components
pub struct App {
    command: Command,
    settings: Settings,
}

impl App {
    /// Create a new application instance for one command
    pub fn new(command: Command, settings: Settings) -> Self {
        Self { command, settings }
    }

    /// Run the command against the configured file
    pub fn run(&self) -> Result<Outcome> {
        let path = self.settings.file_path()?;
        tracing::debug!(command = ?self.command, path = %path.display(), "running command");

        match &self.command {
            Command::Get { key, json } => self.get(path, key, *json),
            Command::Set { key, value } => self.set(path, key, value),
            Command::Unset { key } => self.unset(path, key),
            Command::List { json, unsorted } => self.list(path, *json, !*unsorted),
            Command::Check { json } => self.check(path, *json),
            Command::Fmt { check } => self.fmt(path, *check),
        }
    }

    fn formatter(&self, json: bool) -> Box<dyn OutputFormatter> {
        OutputFormatterFactory::create_formatter(FormattingOptions {
            enable_color: self.settings.enable_color,
            json,
        })
    }

    fn open(&self, path: &Path) -> Result<ConfFile> {
        ConfFile::open(path, self.settings.required.iter().cloned(), self.settings.strict)
    }

    fn get(&self, path: &Path, key: &str, json: bool) -> Result<Outcome> {
        let conf = self.open(path)?;
        let value = conf.get(key)?;
        Ok(Outcome::success(self.formatter(json).format_value(value)?))
    }

    fn set(&self, path: &Path, key: &str, value: &str) -> Result<Outcome> {
        let mut conf = ConfFile::load(path, self.settings.strict)?;
        let previous = conf.set(key, value);
        conf.validate_required(&self.settings.required, self.settings.strict)?;
        conf.write()?;

        tracing::info!(key, replaced = previous.is_some(), path = %path.display(), "set key");
        Ok(Outcome::success(String::new()))
    }

    fn unset(&self, path: &Path, key: &str) -> Result<Outcome> {
        let mut conf = ConfFile::load(path, self.settings.strict)?;
        conf.delete(key)?;
        conf.validate_required(&self.settings.required, self.settings.strict)?;
        conf.write()?;

        tracing::info!(key, path = %path.display(), "removed key");
        Ok(Outcome::success(String::new()))
    }

    fn list(&self, path: &Path, json: bool, sorted: bool) -> Result<Outcome> {
        let conf = self.open(path)?;
        Ok(Outcome::success(self.formatter(json).format_entries(&conf, sorted)?))
    }

    fn check(&self, path: &Path, json: bool) -> Result<Outcome> {
        let warnings = validate_config(&self.settings)?;
        let formatter = self.formatter(json);

        if warnings.is_empty() {
            return Ok(Outcome::success(
                formatter.format_success(&format!("{}: OK", path.display()))?,
            ));
        }

        let output = formatter.format_warnings(&warnings)?;
        if warnings.iter().any(|w| w.level == ValidationLevel::Error) {
            Ok(Outcome::failure(output, 2))
        } else {
            Ok(Outcome::success(output))
        }
    }

    fn fmt(&self, path: &Path, check_only: bool) -> Result<Outcome> {
        let conf = ConfFile::load(path, self.settings.strict)?;
        let current = if path.is_file() {
            fs::read_to_string(path).map_err(|e| AppError::io(path, e))?
        } else {
            String::new()
        };

        let formatter = self.formatter(false);
        if conf.render() == current {
            return Ok(Outcome::success(
                formatter.format_success(&format!("{} is already formatted", path.display()))?,
            ));
        }

        if check_only {
            return Ok(Outcome::failure(format!("would reformat {}\n", path.display()), 1));
        }

        conf.write()?;
        Ok(Outcome::success(
            formatter.format_success(&format!("reformatted {}", path.display()))?,
        ))
    }
}
