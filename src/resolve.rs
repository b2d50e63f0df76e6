//! Per-parameter resolution: precedence computation and validation.
//!
//! The precedence is environment variable > persisted value >
//! (interactive prompt | dist default). Non-interactive runs therefore
//! always succeed deterministically, while interactive runs walk the
//! operator through the missing values.

use crate::console::Console;
use crate::error::ParamError;
use crate::parameter::ParameterDefinition;
use crate::scalar;
use serde_yaml::Value;
use std::collections::HashMap;
use tracing::debug;

/// Read access to environment variables.
pub trait Environment {
    fn get(&self, name: &str) -> Option<String>;
}

/// Process environment.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory environment for tests and embeddings.
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Resolves one parameter at a time for a single run.
///
/// Owns the first-prompt latch: the introductory notice is printed once
/// before the first question of a run, then never again.
pub struct Resolver<'a, E: Environment> {
    env: &'a E,
    greeted: bool,
}

impl<'a, E: Environment> Resolver<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self { env, greeted: false }
    }

    /// Compute and validate the final value for one parameter.
    ///
    /// `persisted` is the previously stored value, if any; `default` is
    /// the dist value. A `Value::Null` persisted value counts as absent.
    pub fn resolve(
        &mut self,
        console: &mut dyn Console,
        name: &str,
        default: &Value,
        persisted: Option<Value>,
        definition: &ParameterDefinition,
    ) -> Result<Value, ParamError> {
        let mut persisted = persisted.filter(|v| !v.is_null());

        // An environment binding overrides the persisted value
        // unconditionally, interactive or not. An empty variable counts
        // as unset, and so does a value parsing to a null literal.
        if let Some(variable) = &definition.variable {
            if let Some(text) = self.env.get(variable).filter(|t| !t.is_empty()) {
                debug!(parameter = name, variable = variable.as_str(), "environment override");
                persisted = Some(scalar::parse(&text)).filter(|v| !v.is_null());
            }
        }

        let value = if !console.is_interactive() {
            persisted.unwrap_or_else(|| default.clone())
        } else if let Some(value) = persisted {
            value
        } else {
            self.ask(console, name, default)?
        };

        definition
            .validate(&value)
            .map_err(|reason| ParamError::Validation {
                name: name.to_string(),
                reason,
            })?;

        Ok(value)
    }

    fn ask(
        &mut self,
        console: &mut dyn Console,
        name: &str,
        default: &Value,
    ) -> Result<Value, ParamError> {
        if !self.greeted {
            self.greeted = true;
            console.status("Some parameters are missing. Please provide them.");
        }

        let suggested = scalar::dump(default);
        let answer = console.ask(name, &suggested)?;
        Ok(scalar::parse(&answer))
    }
}
