//! Builds [`ParameterDefinition`]s from the declarative `parameters:`
//! section of the definitions document.

use crate::constraint::{Constraint, ConstraintSet};
use crate::error::ParamError;
use crate::parameter::{ParamType, ParameterDefinition};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Raw `length:`/`range:` bounds as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One entry of a parameter's `constraints:` list. Exactly one of the
/// fields is expected; an entry setting none of them is a configuration
/// error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConstraint {
    pub length: Option<RawBounds>,
    pub range: Option<RawBounds>,
    pub allowed_values: Option<Vec<Value>>,
    pub allowed_pattern: Option<String>,
}

/// One parameter's raw spec from the definitions document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParameterSpec {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub variable: Option<String>,
    #[serde(default)]
    pub constraints: Vec<RawConstraint>,
}

/// Mapping from parameter name to its definition. Built once from the
/// definitions document, read-only during resolution.
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    definitions: BTreeMap<String, ParameterDefinition>,
}

impl ParameterRegistry {
    /// Build the registry from raw specs, applying defaults for missing
    /// fields.
    pub fn from_specs(
        specs: &BTreeMap<String, RawParameterSpec>,
    ) -> Result<Self, ParamError> {
        let mut definitions = BTreeMap::new();
        for (name, spec) in specs {
            definitions.insert(name.clone(), build_definition(name, spec)?);
        }
        Ok(Self { definitions })
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn build_definition(
    name: &str,
    spec: &RawParameterSpec,
) -> Result<ParameterDefinition, ParamError> {
    let kind_name = spec
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ParamError::MissingType(name.to_string()))?;

    let kind = ParamType::from_name(kind_name).ok_or_else(|| ParamError::InvalidType {
        name: name.to_string(),
        kind: kind_name.to_string(),
    })?;

    let constraints = build_constraints(name, &spec.constraints)?;

    Ok(ParameterDefinition::new(
        name,
        kind,
        spec.required,
        spec.variable.clone(),
        constraints,
    ))
}

fn build_constraints(
    name: &str,
    raw: &[RawConstraint],
) -> Result<ConstraintSet, ParamError> {
    let mut constraints = Vec::with_capacity(raw.len());
    for entry in raw {
        constraints.push(build_constraint(name, entry)?);
    }
    Ok(ConstraintSet::new(constraints))
}

fn build_constraint(name: &str, entry: &RawConstraint) -> Result<Constraint, ParamError> {
    if let Some(bounds) = &entry.length {
        Constraint::length(
            bounds.min.map(|v| v as usize),
            bounds.max.map(|v| v as usize),
        )
    } else if let Some(bounds) = &entry.range {
        Constraint::range(bounds.min, bounds.max)
    } else if let Some(values) = &entry.allowed_values {
        Ok(Constraint::allowed_values(values.clone()))
    } else if let Some(pattern) = &entry.allowed_pattern {
        Constraint::allowed_pattern(pattern)
    } else {
        Err(ParamError::UnknownConstraint(name.to_string()))
    }
}
