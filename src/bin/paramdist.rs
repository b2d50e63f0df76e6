//! Paramdist CLI Binary
//!
//! Build-step entry point: load the definitions document, merge the dist
//! template with the existing parameters file, write the result.

use clap::Parser;
use owo_colors::OwoColorize;
use paramdist::cli::Cli;
use paramdist::console::TermConsole;
use paramdist::logging::{init_logging, LoggingConfig};
use paramdist::processor::Processor;
use paramdist::resolve::ProcessEnv;
use paramdist::settings::Settings;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let settings = match Settings::load(&cli.to_options()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Error loading settings: {}", e);
            eprintln!("{}", e.to_string().red());
            process::exit(1);
        }
    };

    let console = TermConsole::new(cli.no_interaction);
    let mut processor = Processor::new(settings, console, ProcessEnv);

    match processor.run() {
        Ok(summary) => {
            info!(
                file = %summary.path.display(),
                created = summary.created,
                resolved = summary.resolved,
                "merge completed"
            );
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            eprintln!("{}", e.to_string().red());
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args.
/// Precedence: explicit flags override verbose override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
