//! Error handling for conffile

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading, querying or persisting a config file
#[derive(Error, Debug)]
pub enum AppError {
    /// Backing file is absent and strict mode was requested
    #[error("Conf file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// A required key is absent after parsing and strict mode was requested
    #[error("'{key}' not specified in {}", path.display())]
    MissingRequiredKey { key: String, path: PathBuf },

    /// Lookup or removal of a key that is not in the mapping
    #[error("Key not found: '{key}'")]
    KeyNotFound { key: String },

    /// Underlying filesystem failure
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command-line or environment settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a new not-found error for `path`
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new missing-required-key error
    pub fn missing_required_key<S: Into<String>>(key: S, path: impl AsRef<Path>) -> Self {
        Self::MissingRequiredKey {
            key: key.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new key-not-found error
    pub fn key_not_found<S: Into<String>>(key: S) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MissingRequiredKey { .. } => "REQUIRED",
            Self::KeyNotFound { .. } => "KEY",
            Self::Io { .. } => "IO",
            Self::Config(_) => "CONFIG",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { path } => {
                format!("No config file at {}\n\nSuggestion: Check the --file path, or pass --lenient to start from an empty file.", path.display())
            }
            Self::MissingRequiredKey { key, path } => {
                format!("{} has no '{}' entry\n\nSuggestion: Add a line '{}=<value>' to the file.", path.display(), key, key.to_uppercase())
            }
            Self::KeyNotFound { key } => {
                format!("No entry named '{}'\n\nSuggestion: Run 'conffile list' to see the keys that are set.", key)
            }
            Self::Io { path, source } => {
                format!("File operation on {} failed: {}\n\nSuggestion: Check file permissions and that the parent directory exists.", path.display(), source)
            }
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file, CONFFILE_* variables or command line arguments.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::KeyNotFound { .. } => 1,
            Self::NotFound { .. } | Self::MissingRequiredKey { .. } => 2,
            Self::Io { .. } => 5,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::KeyNotFound { .. } => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::NotFound { .. } | Self::MissingRequiredKey { .. } => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io { .. } => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::config(format!("JSON encode error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::config(error.to_string())
    }
}

/// Custom Result type for the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for user feedback on stderr
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error the way `report_error` prints it
    pub fn render(&self, error: &AppError) -> String {
        let mut out = error.format_for_console(self.use_color);

        if let Some(source) = std::error::Error::source(error) {
            out.push_str(&format!("\nCaused by: {}", source));
        }

        if self.verbose {
            out.push_str("\n\n");
            out.push_str(&error.user_friendly_message());
        }

        out
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}
