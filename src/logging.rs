//! Diagnostic logging for the command-line front end
//!
//! The library reports through `tracing` events; the binary installs a
//! stderr subscriber whose level comes from `--debug`, `--verbose` or
//! `CONFFILE_LOG`. `RUST_LOG`, when set, takes precedence.

use crate::error::{AppError, Result};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace,
    /// Debug level - parse and write details
    Debug,
    /// Info level - general information
    Info,
    /// Warning level - lenient fallbacks and lint findings
    #[default]
    Warn,
    /// Error level - failures only
    Error,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Filter directive scoping this level to the crate
    pub fn directive(&self) -> String {
        format!("{}={},warn", crate::PKG_NAME, self.as_str().to_lowercase())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::config(format!("Invalid log level: {}", s))),
        }
    }
}

/// Install the stderr subscriber; a second call is a no-op
pub fn init_logging(level: LogLevel, use_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_color)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
