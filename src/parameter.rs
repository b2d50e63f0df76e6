//! Per-parameter schema: expected type, required-ness, optional
//! environment-variable binding, and the constraint set.

use crate::constraint::ConstraintSet;
use serde_yaml::Value;

/// The four recognized parameter kinds.
///
/// A closed set: adding a kind forces every match below to be extended,
/// so a new type cannot silently skip its checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Boolean,
    Number,
    List,
}

impl ParamType {
    /// Map a definitions-document type name onto a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ParamType::String),
            "boolean" => Some(ParamType::Boolean),
            "number" => Some(ParamType::Number),
            "list" => Some(ParamType::List),
            _ => None,
        }
    }

    /// Type-check a value, returning a type-specific reason on mismatch.
    /// Numbers accept numeric strings.
    fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            ParamType::String => match value {
                Value::String(_) => Ok(()),
                _ => Err("Value needs to be a string".to_string()),
            },
            ParamType::Boolean => match value {
                Value::Bool(_) => Ok(()),
                _ => Err("Value needs to be a boolean".to_string()),
            },
            ParamType::Number => match value {
                Value::Number(_) => Ok(()),
                // "inf" and "NaN" parse as f64 but are not numbers here.
                Value::String(s)
                    if s.trim().parse::<f64>().map_or(false, |n| n.is_finite()) =>
                {
                    Ok(())
                }
                _ => Err("Value needs to be a number".to_string()),
            },
            ParamType::List => match value {
                Value::Sequence(_) => Ok(()),
                _ => Err("Value needs to be a list".to_string()),
            },
        }
    }
}

/// Immutable description of one expected parameter.
#[derive(Debug, Clone)]
pub struct ParameterDefinition {
    pub name: String,
    pub kind: ParamType,
    pub required: bool,
    /// Environment variable that overrides the persisted value when set.
    pub variable: Option<String>,
    pub constraints: ConstraintSet,
}

impl ParameterDefinition {
    pub fn new(
        name: &str,
        kind: ParamType,
        required: bool,
        variable: Option<String>,
        constraints: ConstraintSet,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
            variable,
            constraints,
        }
    }

    /// Definition used for names present in the dist file but absent from
    /// the definitions document, when unknown parameters are tolerated:
    /// an optional, unconstrained string.
    pub fn fallback(name: &str) -> Self {
        Self::new(name, ParamType::String, false, None, ConstraintSet::empty())
    }

    /// Validate a resolved value against this definition.
    ///
    /// `Value::Null` is the absent marker: required parameters reject it,
    /// optional parameters accept it without running the type check or
    /// constraints.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            return if self.required {
                Err("Value is required".to_string())
            } else {
                Ok(())
            };
        }

        self.kind.check(value)?;
        self.constraints.evaluate(value)
    }
}
