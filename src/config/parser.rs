//! Settings resolution from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    logging::LogLevel,
    models::Settings,
};
use std::path::Path;

/// Settings parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new settings parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete settings.
    ///
    /// Loads `./.env` first. Every invalid `CONFFILE_*` variable is reported
    /// in a single error.
    pub fn parse(&self) -> Result<Settings> {
        let env_file = Path::new(crate::defaults::DEFAULT_ENV_FILE);
        let loaded = EnvManager::load_env_file(env_file)?;

        let problems = EnvManager::validate_current_env();
        if !problems.is_empty() {
            return Err(AppError::config(problems.join("; ")));
        }

        let mut settings = self.parse_with_vars(|name| std::env::var(name).ok())?;
        if loaded {
            settings.env_file = Some(env_file.to_path_buf());
        }
        Ok(settings)
    }

    /// Build settings from defaults, `lookup` and the CLI, without touching
    /// the process environment
    pub fn parse_with_vars<F>(&self, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with default settings
        let mut settings = Settings::default();

        // Merge environment variables into settings
        settings.merge_from_vars(lookup)?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut settings);

        settings.validate()?;

        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&self, settings: &mut Settings) {
        if let Some(ref path) = self.cli.file {
            settings.path = Some(path.clone());
        }

        if !self.cli.required.is_empty() {
            settings.required = self.cli.required.clone();
        }

        if self.cli.lenient {
            settings.strict = false;
        }

        if self.cli.no_color {
            settings.enable_color = false;
        }

        if self.cli.debug {
            settings.log_level = LogLevel::Debug;
        } else if self.cli.verbose {
            settings.log_level = LogLevel::Info;
        }
    }
}

/// Convenience function to load complete settings from CLI arguments
pub fn load_settings(cli: Cli) -> Result<Settings> {
    ConfigParser::new(cli).parse()
}
