//! Command-line interface definition

use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// conffile - read and edit shell-style NAME=value configuration files
#[derive(Parser, Debug, Clone)]
#[command(name = "conffile")]
#[command(version, about, long_about = None)]
#[command(after_help = crate::config::EnvManager::display_env_help())]
pub struct Cli {
    /// Config file to operate on (or CONFFILE_PATH)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Key that must be present (can be used multiple times)
    #[arg(short = 'r', long = "require", value_name = "KEY", action = ArgAction::Append, global = true)]
    pub required: Vec<String>,

    /// Tolerate a missing file or missing required keys
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations on the config file
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the value of KEY
    Get {
        key: String,

        /// Print the value as a JSON string
        #[arg(long)]
        json: bool,
    },

    /// Assign VALUE to KEY and write the file
    Set {
        key: String,
        value: String,
    },

    /// Remove KEY and write the file
    Unset {
        key: String,
    },

    /// List all entries
    List {
        /// Print a JSON object instead of KEY=value lines
        #[arg(long)]
        json: bool,

        /// Keep file order instead of sorting by key
        #[arg(long)]
        unsorted: bool,
    },

    /// Report missing required keys and suspicious lines
    Check {
        /// Print findings as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Rewrite the file in canonical sorted form
    Fmt {
        /// Only report whether the file is already canonical
        #[arg(long)]
        check: bool,
    },
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.debug {
            return Err("Cannot specify both --verbose and --debug".to_string());
        }

        match &self.command {
            Command::Get { key, .. } | Command::Unset { key } | Command::Set { key, .. } => {
                if key.trim().is_empty() {
                    return Err("Key cannot be empty".to_string());
                }
                if key.contains('=') {
                    return Err(format!("Key '{}' cannot contain '='", key));
                }
            }
            _ => {}
        }

        if let Command::Set { value, .. } = &self.command {
            if value.contains('\n') {
                return Err("Values cannot span multiple lines".to_string());
            }
        }

        Ok(())
    }
}

/// Whether stdout can take ANSI colors
pub fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    std::io::stdout().is_terminal()
}
