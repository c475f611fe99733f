//! conffile - command-line front end for shell-style NAME=value config files

use clap::Parser;
use conffile::{
    app::App,
    cli::{supports_color, Cli},
    config::load_settings,
    error::ErrorReporter,
    logging::init_logging,
    PKG_NAME, VERSION,
};
use std::io::Write;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    let verbose = cli.verbose || cli.debug;
    let command = cli.command.clone();

    let mut settings = match load_settings(cli) {
        Ok(settings) => settings,
        Err(e) => {
            ErrorReporter::new(false, verbose).report_error(&e);
            process::exit(e.exit_code());
        }
    };

    settings.enable_color = settings.enable_color && supports_color();
    colored::control::set_override(settings.enable_color);
    init_logging(settings.log_level, settings.enable_color);

    tracing::debug!("{} v{}", PKG_NAME, VERSION);
    if let Some(env_file) = &settings.env_file {
        tracing::debug!(path = %env_file.display(), "loaded env file");
    }
    match settings.to_json() {
        Ok(json) => tracing::debug!(settings = %json, "resolved settings"),
        Err(e) => tracing::debug!(error = %e, "settings could not be serialized"),
    }

    let reporter = ErrorReporter::new(settings.enable_color, verbose);
    match App::new(command, settings).run() {
        Ok(outcome) => {
            print!("{}", outcome.output);
            let _ = std::io::stdout().flush();
            process::exit(outcome.exit_code);
        }
        Err(e) => {
            reporter.report_error(&e);
            process::exit(e.exit_code());
        }
    }
}
