//! conffile
//!
//! A minimalist reader/writer for simple shell-style configuration files:
//! `NAME=value` lines and `#` comments. A file is loaded into an in-memory
//! mapping, required keys are checked, values can be read and changed, and
//! the mapping is written back sorted with upper-cased keys.
//!
//! ```no_run
//! use conffile::ConfFile;
//!
//! let mut conf = ConfFile::open("/etc/app.conf", ["name"], true)?;
//! println!("{}", conf.get("name")?);
//! conf.set("age", "29");
//! conf.write()?;
//! # Ok::<(), conffile::AppError>(())
//! ```

pub mod app;
pub mod cli;
pub mod conf;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use conf::{ConfFile, KeyValueStore, ParsedLine};
pub use error::{AppError, Result};
pub use models::Settings;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default settings values
pub mod defaults {
    /// Environment file consulted before reading `CONFFILE_*` variables
    pub const DEFAULT_ENV_FILE: &str = ".env";
    pub const DEFAULT_STRICT: bool = true;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
