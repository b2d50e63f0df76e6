//! Inline scalar literal parsing and dumping.
//!
//! Environment-variable values and interactive answers arrive as text but
//! carry typed meaning ("5432" is a number, "true" is a boolean, "[a, b]"
//! is a sequence). These helpers translate between the textual form and
//! `serde_yaml::Value` in both directions.

use serde_yaml::Value;

/// Parse a short textual literal into a typed value.
///
/// Text that is not valid YAML (for example an unquoted `{`) is kept as a
/// plain string rather than rejected; operator answers should never abort
/// the run at the parsing stage.
pub fn parse(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Dump a value to its inline textual form, without the trailing newline
/// the serializer appends.
pub fn dump(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().to_string())
        .unwrap_or_default()
}
