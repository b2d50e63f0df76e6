//! Invocation options and the definitions document.
//!
//! The definitions document is the single YAML file declaring where the
//! parameters live, how unknown names are treated, and the per-parameter
//! specs. Invocation options carry the document's location plus optional
//! overrides; an option passed explicitly wins over the document value.

use crate::error::ParamError;
use crate::registry::{ParameterRegistry, RawParameterSpec};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_DEFINITIONS_FILE: &str = "parameters.yml";
pub const DEFAULT_PARAMETER_KEY: &str = "parameters";
const DIST_SUFFIX: &str = ".dist";

/// The key-value block a caller hands to a run.
#[derive(Debug, Clone)]
pub struct Options {
    pub definitions_file: PathBuf,
    pub parameters_file: Option<PathBuf>,
    pub parameters_dist_file: Option<PathBuf>,
    pub parameter_key: Option<String>,
    pub ignore_unknown_parameters: Option<bool>,
    /// Inline parameter specs merged over the document's, keyed by name.
    pub parameters: BTreeMap<String, RawParameterSpec>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            definitions_file: PathBuf::from(DEFAULT_DEFINITIONS_FILE),
            parameters_file: None,
            parameters_dist_file: None,
            parameter_key: None,
            ignore_unknown_parameters: None,
            parameters: BTreeMap::new(),
        }
    }
}

/// Raw shape of the definitions document.
#[derive(Debug, Clone, Default, Deserialize)]
struct DefinitionsDoc {
    #[serde(rename = "parameters-file")]
    parameters_file: Option<PathBuf>,
    #[serde(rename = "parameters-dist-file")]
    parameters_dist_file: Option<PathBuf>,
    #[serde(rename = "parameter-key")]
    parameter_key: Option<String>,
    #[serde(rename = "ignore-unknown-parameters")]
    ignore_unknown_parameters: Option<bool>,
    #[serde(default)]
    parameters: BTreeMap<String, RawParameterSpec>,
}

/// Fully resolved run settings: file locations, tolerance flag, and the
/// parameter registry. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Settings {
    pub parameters_file: PathBuf,
    pub parameters_dist_file: PathBuf,
    pub parameter_key: String,
    pub ignore_unknown_parameters: bool,
    pub registry: ParameterRegistry,
}

impl Settings {
    /// Load the definitions document and resolve every setting to its
    /// final value, applying defaults for the optional ones.
    pub fn load(options: &Options) -> Result<Self, ParamError> {
        if !options.definitions_file.is_file() {
            return Err(ParamError::MissingDefinitionsFile(
                options.definitions_file.clone(),
            ));
        }

        let text = fs::read_to_string(&options.definitions_file)?;
        // An empty document is tolerated; the parameters-file check below
        // reports the actionable error.
        let value: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|source| ParamError::Document {
                path: options.definitions_file.clone(),
                source,
            })?;
        let doc: DefinitionsDoc = if value.is_null() {
            DefinitionsDoc::default()
        } else {
            serde_yaml::from_value(value).map_err(|source| ParamError::Document {
                path: options.definitions_file.clone(),
                source,
            })?
        };

        let parameters_file = options
            .parameters_file
            .clone()
            .or(doc.parameters_file)
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(ParamError::MissingParametersFile)?;

        let parameters_dist_file = options
            .parameters_dist_file
            .clone()
            .or(doc.parameters_dist_file)
            .unwrap_or_else(|| {
                PathBuf::from(format!("{}{}", parameters_file.display(), DIST_SUFFIX))
            });

        let parameter_key = options
            .parameter_key
            .clone()
            .or(doc.parameter_key)
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_PARAMETER_KEY.to_string());

        let ignore_unknown_parameters = options
            .ignore_unknown_parameters
            .or(doc.ignore_unknown_parameters)
            .unwrap_or(true);

        // Inline invocation specs override document specs of the same name.
        let mut specs = doc.parameters;
        for (name, spec) in &options.parameters {
            specs.insert(name.clone(), spec.clone());
        }
        let registry = ParameterRegistry::from_specs(&specs)?;

        Ok(Self {
            parameters_file,
            parameters_dist_file,
            parameter_key,
            ignore_unknown_parameters,
            registry,
        })
    }
}
