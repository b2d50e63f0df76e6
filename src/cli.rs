//! CLI definitions: clap types plus the mapping onto run options.

use crate::settings::{Options, DEFAULT_DEFINITIONS_FILE};
use clap::Parser;
use std::path::PathBuf;

/// Paramdist CLI - merge dist parameter templates into parameter files
#[derive(Parser)]
#[command(name = "paramdist")]
#[command(about = "Build-time parameter file merging with per-parameter schema validation")]
pub struct Cli {
    /// Definitions file declaring the expected parameters
    #[arg(long, default_value = DEFAULT_DEFINITIONS_FILE)]
    pub definitions_file: PathBuf,

    /// Parameters file to create or update (overrides the definitions file)
    #[arg(long)]
    pub parameters_file: Option<PathBuf>,

    /// Dist template file (overrides the definitions file; defaults to the
    /// parameters file plus ".dist")
    #[arg(long)]
    pub parameters_dist_file: Option<PathBuf>,

    /// Top-level key holding the parameter mapping
    #[arg(long)]
    pub parameter_key: Option<String>,

    /// Fail on dist parameters without a definition instead of treating
    /// them as plain strings
    #[arg(long)]
    pub strict_unknown: bool,

    /// Never prompt, even on a terminal
    #[arg(long)]
    pub no_interaction: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

impl Cli {
    /// Translate the parsed flags into run options. Flags left at their
    /// defaults stay unset so the definitions document decides.
    pub fn to_options(&self) -> Options {
        Options {
            definitions_file: self.definitions_file.clone(),
            parameters_file: self.parameters_file.clone(),
            parameters_dist_file: self.parameters_dist_file.clone(),
            parameter_key: self.parameter_key.clone(),
            ignore_unknown_parameters: if self.strict_unknown { Some(false) } else { None },
            parameters: Default::default(),
        }
    }
}
