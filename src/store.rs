//! YAML document store: reading and writing the dist, definitions, and
//! parameters files as top-level mappings.

use crate::error::ParamError;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Header prefixed to every generated parameters file.
const GENERATED_HEADER: &str = "# This file is auto-generated during the build. Do not edit it.\n";

pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Read a document as a top-level mapping.
///
/// An empty or all-comments file reads as an empty mapping; any other
/// non-mapping top level is a structural error.
pub fn read_document(path: &Path) -> Result<Mapping, ParamError> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&text).map_err(|source| ParamError::Document {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ParamError::NotAMapping(path.to_path_buf())),
    }
}

/// Write a document, creating parent directories as needed and prefixing
/// the auto-generated header comment.
pub fn write_document(path: &Path, document: &Mapping) -> Result<(), ParamError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let body = serde_yaml::to_string(document).map_err(|source| ParamError::Document {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, format!("{}{}", GENERATED_HEADER, body))?;
    Ok(())
}
