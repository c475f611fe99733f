//! Output formatting for listings, values and warnings
//!
//! Plain text is the `KEY=value` file syntax itself, so `list` output can be
//! redirected into a new config file.

mod colored;
mod formatter;
mod json;

pub use self::colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter};
pub use json::JsonFormatter;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(options: FormattingOptions) -> Box<dyn OutputFormatter> {
        if options.json {
            Box::new(JsonFormatter)
        } else if options.enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}
