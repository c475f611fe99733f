//! Data models for the command-line front end

pub mod settings;

pub use settings::Settings;
