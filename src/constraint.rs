//! Single-rule validators applied to resolved parameter values.
//!
//! A constraint is a pass/fail rule beyond the basic type check: textual
//! length, numeric range, a fixed set of allowed values, or a regex
//! pattern. Constraints are grouped into an ordered [`ConstraintSet`]
//! evaluated conjunctively, stopping at the first failure so error
//! messages stay deterministic.

use crate::error::ParamError;
use crate::scalar;
use regex::Regex;
use serde_yaml::Value;

/// A single validation rule over a scalar or list value.
#[derive(Debug, Clone)]
pub enum Constraint {
    Length { min: Option<usize>, max: Option<usize> },
    Range { min: Option<f64>, max: Option<f64> },
    AllowedValues(Vec<Value>),
    AllowedPattern { pattern: String, regex: Regex },
}

impl Constraint {
    /// Textual-length rule. At least one bound is required.
    pub fn length(min: Option<usize>, max: Option<usize>) -> Result<Self, ParamError> {
        if min.is_none() && max.is_none() {
            return Err(ParamError::EmptyBounds);
        }
        Ok(Constraint::Length { min, max })
    }

    /// Numeric-range rule. At least one bound is required.
    pub fn range(min: Option<f64>, max: Option<f64>) -> Result<Self, ParamError> {
        if min.is_none() && max.is_none() {
            return Err(ParamError::EmptyBounds);
        }
        Ok(Constraint::Range { min, max })
    }

    /// Fixed-set membership rule.
    pub fn allowed_values(values: Vec<Value>) -> Self {
        Constraint::AllowedValues(values)
    }

    /// Regex pattern rule. The pattern is compiled here so a bad pattern
    /// surfaces as a configuration error at load time, not at match time.
    pub fn allowed_pattern(pattern: &str) -> Result<Self, ParamError> {
        let regex = Regex::new(pattern).map_err(|e| ParamError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Constraint::AllowedPattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Evaluate the rule against a value. Returns the human-readable
    /// failure reason on violation; never mutates the value.
    pub fn evaluate(&self, value: &Value) -> Result<(), String> {
        match self {
            Constraint::Length { min, max } => {
                let len = textual_form(value).chars().count();
                if let Some(min) = min {
                    if len < *min {
                        return Err(format!("Value is too short (min: {})", min));
                    }
                }
                if let Some(max) = max {
                    if len > *max {
                        return Err(format!("Value is too long (max: {})", max));
                    }
                }
                Ok(())
            }
            Constraint::Range { min, max } => {
                let number = numeric_form(value)
                    .ok_or_else(|| "Value needs to be a number".to_string())?;
                if let Some(min) = min {
                    if number < *min {
                        return Err(format!("Value is too low (min: {})", min));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(format!("Value is too high (max: {})", max));
                    }
                }
                Ok(())
            }
            Constraint::AllowedValues(allowed) => {
                if allowed.contains(value) {
                    Ok(())
                } else {
                    let rendered: Vec<String> = allowed.iter().map(scalar::dump).collect();
                    Err(format!("Value needs to be one of: {}", rendered.join(", ")))
                }
            }
            Constraint::AllowedPattern { pattern, regex } => {
                if regex.is_match(&textual_form(value)) {
                    Ok(())
                } else {
                    Err(format!("Value needs to match this pattern: {}", pattern))
                }
            }
        }
    }
}

/// An ordered set of constraints evaluated conjunctively against one value.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    /// An empty set; every value passes vacuously.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluate all constraints in stored order, returning the first
    /// failure reason.
    pub fn evaluate(&self, value: &Value) -> Result<(), String> {
        for constraint in &self.constraints {
            constraint.evaluate(value)?;
        }
        Ok(())
    }
}

/// Textual form used for length and pattern checks: strings as-is,
/// everything else through the scalar dumper.
fn textual_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => scalar::dump(other),
    }
}

/// Numeric form used for range checks: numbers directly, numeric strings
/// parsed. Strings parsing to non-finite floats do not count.
fn numeric_form(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
        _ => None,
    }
}
