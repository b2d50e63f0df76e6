//! Merge orchestrator: drives one run from dist template to rewritten
//! parameters file.

use crate::console::Console;
use crate::error::ParamError;
use crate::parameter::ParameterDefinition;
use crate::resolve::{Environment, Resolver};
use crate::settings::Settings;
use crate::store;
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub created: bool,
    pub resolved: usize,
}

/// One merge run over one parameters file.
///
/// Reads the dist and existing documents once, resolves every expected
/// parameter, and writes the merged document once. Nothing is written
/// until every parameter has resolved and validated.
pub struct Processor<C: Console, E: Environment> {
    settings: Settings,
    console: C,
    env: E,
}

impl<C: Console, E: Environment> Processor<C, E> {
    pub fn new(settings: Settings, console: C, env: E) -> Self {
        Self {
            settings,
            console,
            env,
        }
    }

    /// The console in use; lets callers inspect a scripted console after
    /// a run.
    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn run(&mut self) -> Result<RunSummary, ParamError> {
        let parameters_file = self.settings.parameters_file.clone();
        let dist_file = self.settings.parameters_dist_file.clone();
        let key = self.settings.parameter_key.clone();

        let exists = store::exists(&parameters_file);
        let action = if exists { "Updating" } else { "Creating" };
        self.console
            .status(&format!("{} the \"{}\" file", action, parameters_file.display()));
        info!(
            file = %parameters_file.display(),
            dist = %dist_file.display(),
            exists,
            "merging parameters"
        );

        if !store::exists(&dist_file) {
            return Err(ParamError::MissingDistFile(dist_file));
        }

        let dist_doc = store::read_document(&dist_file)?;
        let expected = match dist_doc.get(key.as_str()) {
            Some(Value::Mapping(mapping)) => mapping.clone(),
            Some(Value::Null) | None => {
                return Err(ParamError::MissingParameterKey {
                    key,
                    path: dist_file,
                })
            }
            Some(_) => return Err(ParamError::NotAMapping(dist_file)),
        };

        // Output starts as the dist document with its parameter section
        // emptied; an existing file's top-level keys overlay the dist ones.
        let mut output = dist_doc;
        output.insert(
            Value::String(key.clone()),
            Value::Mapping(Mapping::new()),
        );
        if exists {
            let existing = store::read_document(&parameters_file)?;
            for (k, v) in existing {
                output.insert(k, v);
            }
        }

        let persisted = match output.get(key.as_str()) {
            Some(Value::Mapping(mapping)) => mapping.clone(),
            _ => Mapping::new(),
        };

        let resolved = self.resolve_all(&expected, &persisted)?;
        let count = resolved.len();
        output.insert(Value::String(key), Value::Mapping(resolved));

        store::write_document(&parameters_file, &output)?;
        info!(file = %parameters_file.display(), count, "parameters file written");

        Ok(RunSummary {
            path: parameters_file,
            created: !exists,
            resolved: count,
        })
    }

    /// Resolve every expected parameter, in dist order. Persisted keys
    /// absent from the expected set are dropped here: only expected keys
    /// are ever read out of `persisted`.
    fn resolve_all(
        &mut self,
        expected: &Mapping,
        persisted: &Mapping,
    ) -> Result<Mapping, ParamError> {
        let mut resolver = Resolver::new(&self.env);
        let mut resolved = Mapping::new();

        for (name_key, default) in expected {
            let name = match name_key {
                Value::String(s) => s.clone(),
                other => crate::scalar::dump(other),
            };

            let fallback;
            let definition = match self.settings.registry.get(&name) {
                Some(definition) => definition,
                None => {
                    if !self.settings.ignore_unknown_parameters {
                        return Err(ParamError::UnknownParameter(name));
                    }
                    debug!(parameter = name.as_str(), "no definition, tolerating as plain string");
                    fallback = ParameterDefinition::fallback(&name);
                    &fallback
                }
            };

            let value = resolver.resolve(
                &mut self.console,
                &name,
                default,
                persisted.get(name_key).cloned(),
                definition,
            )?;
            resolved.insert(name_key.clone(), value);
        }

        Ok(resolved)
    }
}
