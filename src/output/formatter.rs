//! Core formatting trait and the plain text implementation

use crate::{
    config::ValidationWarning,
    conf::{parser::format_entry, KeyValueStore},
    error::Result,
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format every entry of `store`, sorted by key unless `sorted` is false
    fn format_entries(&self, store: &dyn KeyValueStore, sorted: bool) -> Result<String>;

    /// Format a single looked-up value
    fn format_value(&self, value: &str) -> Result<String>;

    /// Format validation warnings, one per line
    fn format_warnings(&self, warnings: &[ValidationWarning]) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone, Default)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Emit JSON for entry listings
    pub json: bool,
}

/// Collect entries in display order
pub(crate) fn ordered_entries(store: &dyn KeyValueStore, sorted: bool) -> Vec<(&str, &str)> {
    if sorted {
        store.sorted_entries()
    } else {
        store.entries().collect()
    }
}

/// Plain text formatter implementation
#[derive(Debug, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    /// Create a new plain formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_entries(&self, store: &dyn KeyValueStore, sorted: bool) -> Result<String> {
        let mut output = String::new();
        for (key, value) in ordered_entries(store, sorted) {
            let _ = writeln!(output, "{}", format_entry(key, value));
        }
        Ok(output)
    }

    fn format_value(&self, value: &str) -> Result<String> {
        Ok(format!("{}\n", value))
    }

    fn format_warnings(&self, warnings: &[ValidationWarning]) -> Result<String> {
        let mut output = String::new();
        for warning in warnings {
            let _ = writeln!(output, "{}", warning.format(false));
        }
        Ok(output)
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("{}\n", message))
    }
}
