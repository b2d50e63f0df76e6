//! Paramdist: Build-Time Parameter File Merging
//!
//! Merges a dist template of expected parameters with an existing
//! parameters file, validating each value against a per-parameter schema
//! (type plus constraints), pulling overrides from environment variables,
//! and prompting the operator for missing values on interactive runs.

pub mod cli;
pub mod console;
pub mod constraint;
pub mod error;
pub mod logging;
pub mod parameter;
pub mod processor;
pub mod registry;
pub mod resolve;
pub mod scalar;
pub mod settings;
pub mod store;
