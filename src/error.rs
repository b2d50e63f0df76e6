//! Error types for parameter merging and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and validation errors.
///
/// Every failure aborts the entire run; there is no recoverable class.
/// The output file is only written after all parameters resolved, so a
/// failing run never leaves a partial write behind.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("The definitions file \"{0}\" does not exist. Check your definitions-file setting or create it.")]
    MissingDefinitionsFile(PathBuf),

    #[error("The parameters-file setting is required.")]
    MissingParametersFile,

    #[error("The parameters dist file \"{0}\" does not exist.")]
    MissingDistFile(PathBuf),

    #[error("The top-level key \"{key}\" is missing from \"{}\".", .path.display())]
    MissingParameterKey { key: String, path: PathBuf },

    #[error("The existing \"{0}\" file does not contain a mapping.")]
    NotAMapping(PathBuf),

    #[error("Missing required parameter type for \"{0}\"")]
    MissingType(String),

    #[error("Invalid parameter type \"{kind}\" for \"{name}\"")]
    InvalidType { name: String, kind: String },

    #[error("Unknown constraint definition for \"{0}\"")]
    UnknownConstraint(String),

    #[error("Constraint requires at least one of min or max")]
    EmptyBounds,

    #[error("Invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Missing required parameter definition for \"{0}\"")]
    UnknownParameter(String),

    #[error("Parameter {name} failed validation: {reason}")]
    Validation { name: String, reason: String },

    #[error("Malformed document \"{}\": {source}", .path.display())]
    Document {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
