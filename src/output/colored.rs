//! Colored formatter implementation with terminal color support

use crate::{
    config::ValidationWarning,
    conf::KeyValueStore,
    error::Result,
};
use super::formatter::{ordered_entries, OutputFormatter};
use colored::*;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub key: Color,
    pub separator: Color,
    pub value: Color,
    pub success: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            key: Color::Cyan,
            separator: Color::BrightBlack,
            value: Color::White,
            success: Color::Green,
        }
    }
}

/// Formatter that colors keys, values and warning tags
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColoredFormatter {
    /// Create a new colored formatter with the default scheme
    pub fn new() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
        }
    }

    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        text.color(color)
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_entries(&self, store: &dyn KeyValueStore, sorted: bool) -> Result<String> {
        let mut output = String::new();
        for (key, value) in ordered_entries(store, sorted) {
            let _ = writeln!(
                output,
                "{}{}{}",
                self.colorize(&key.to_uppercase(), self.color_scheme.key).bold(),
                self.colorize("=", self.color_scheme.separator),
                self.colorize(value, self.color_scheme.value),
            );
        }
        Ok(output)
    }

    fn format_value(&self, value: &str) -> Result<String> {
        Ok(format!("{}\n", self.colorize(value, self.color_scheme.value)))
    }

    fn format_warnings(&self, warnings: &[ValidationWarning]) -> Result<String> {
        let mut output = String::new();
        for warning in warnings {
            let _ = writeln!(output, "{}", warning.format(true));
        }
        Ok(output)
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("{}\n", self.colorize(message, self.color_scheme.success)))
    }
}
