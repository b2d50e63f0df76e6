//! End-to-end merge runs: dist template to rewritten parameters file.

use super::test_utils::Workspace;
use paramdist::console::ScriptedConsole;
use paramdist::error::ParamError;
use paramdist::processor::Processor;
use paramdist::resolve::MapEnv;
use paramdist::settings::Settings;
use serde_yaml::Value;

fn run_non_interactive(workspace: &Workspace) -> Result<(), ParamError> {
    run_with_env(workspace, MapEnv::new())
}

fn run_with_env(workspace: &Workspace, env: MapEnv) -> Result<(), ParamError> {
    let settings = Settings::load(&workspace.options)?;
    let mut processor = Processor::new(settings, ScriptedConsole::non_interactive(), env);
    processor.run().map(|_| ())
}

#[test]
fn test_fresh_run_uses_dist_defaults() {
    let workspace = Workspace::new(
        r#"
parameters:
  db_host: { type: string, required: true }
  db_port: { type: number }
"#,
        "parameters:\n  db_host: localhost\n  db_port: 5432\n",
    );

    run_non_interactive(&workspace).unwrap();

    let params = workspace.read_output_parameters();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("db_host"), Some(&Value::String("localhost".into())));
    assert_eq!(params.get("db_port"), Some(&Value::Number(5432.into())));

    let text = std::fs::read_to_string(workspace.parameters_file()).unwrap();
    assert!(
        text.starts_with("# This file is auto-generated"),
        "output must carry the generated-file header"
    );
}

#[test]
fn test_persisted_values_survive_and_missing_keys_fill_in() {
    let workspace = Workspace::new(
        r#"
parameters:
  db_host: { type: string, required: true }
  db_port: { type: number }
"#,
        "parameters:\n  db_host: localhost\n  db_port: 5432\n",
    );
    workspace.write_existing("parameters:\n  db_host: prod-db\n");

    run_non_interactive(&workspace).unwrap();

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_host"), Some(&Value::String("prod-db".into())));
    assert_eq!(params.get("db_port"), Some(&Value::Number(5432.into())));
}

#[test]
fn test_stale_keys_pruned_and_order_follows_dist() {
    let workspace = Workspace::new(
        "parameters: {}\n",
        "parameters:\n  first: 1\n  second: 2\n",
    );
    workspace.write_existing("parameters:\n  second: 22\n  retired: gone\n");

    run_non_interactive(&workspace).unwrap();

    let params = workspace.read_output_parameters();
    let keys: Vec<&str> = params.keys().map(|k| k.as_str().unwrap()).collect();
    assert_eq!(keys, vec!["first", "second"]);
    assert_eq!(params.get("second"), Some(&Value::Number(22.into())));
}

#[test]
fn test_strict_unknown_fails_before_any_write() {
    let workspace = Workspace::new(
        "ignore-unknown-parameters: false\nparameters: {}\n",
        "parameters:\n  mystery: 42\n",
    );

    let err = run_non_interactive(&workspace).unwrap_err();
    assert!(matches!(err, ParamError::UnknownParameter(name) if name == "mystery"));
    assert!(!workspace.parameters_file().exists());
}

#[test]
fn test_environment_variable_beats_persisted_value() {
    let workspace = Workspace::new(
        "parameters:\n  db_host: { type: string, variable: DB_HOST }\n",
        "parameters:\n  db_host: localhost\n",
    );
    workspace.write_existing("parameters:\n  db_host: prod-db\n");

    run_with_env(&workspace, MapEnv::new().set("DB_HOST", "env-db")).unwrap();

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_host"), Some(&Value::String("env-db".into())));
}

#[test]
fn test_environment_value_is_typed() {
    let workspace = Workspace::new(
        r#"
parameters:
  db_port:
    type: number
    variable: DB_PORT
    constraints:
      - range: { min: 1, max: 65535 }
"#,
        "parameters:\n  db_port: 5432\n",
    );

    run_with_env(&workspace, MapEnv::new().set("DB_PORT", "6543")).unwrap();

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_port"), Some(&Value::Number(6543.into())));
}

#[test]
fn test_null_environment_literal_falls_back_to_default() {
    let workspace = Workspace::new(
        "parameters:\n  db_host: { type: string, required: true, variable: DB_HOST }\n",
        "parameters:\n  db_host: localhost\n",
    );

    run_with_env(&workspace, MapEnv::new().set("DB_HOST", "~")).unwrap();

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_host"), Some(&Value::String("localhost".into())));
}

#[test]
fn test_environment_value_is_still_validated() {
    let workspace = Workspace::new(
        r#"
parameters:
  db_port:
    type: number
    variable: DB_PORT
    constraints:
      - range: { min: 1, max: 65535 }
"#,
        "parameters:\n  db_port: 5432\n",
    );

    let err = run_with_env(&workspace, MapEnv::new().set("DB_PORT", "99999")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter db_port failed validation: Value is too high (max: 65535)"
    );
    assert!(!workspace.parameters_file().exists());
}

#[test]
fn test_non_parameter_sections_are_carried_over() {
    let workspace = Workspace::new(
        "parameters: {}\n",
        r#"
imports:
  - shared.yml
parameters:
  db_host: localhost
"#,
    );

    run_non_interactive(&workspace).unwrap();

    let output = workspace.read_output();
    let imports = output.get("imports").unwrap().as_sequence().unwrap();
    assert_eq!(imports[0], Value::String("shared.yml".into()));
}

#[test]
fn test_custom_parameter_key() {
    let workspace = Workspace::new(
        "parameter-key: settings\nparameters:\n  db_host: { type: string }\n",
        "settings:\n  db_host: localhost\n",
    );

    run_non_interactive(&workspace).unwrap();

    let output = workspace.read_output();
    let settings = output.get("settings").unwrap().as_mapping().unwrap();
    assert_eq!(
        settings.get("db_host"),
        Some(&Value::String("localhost".into()))
    );
}

#[test]
fn test_required_parameter_without_any_value_fails() {
    let workspace = Workspace::new(
        "parameters:\n  api_secret: { type: string, required: true }\n",
        "parameters:\n  api_secret: null\n",
    );

    let err = run_non_interactive(&workspace).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter api_secret failed validation: Value is required"
    );
}

#[test]
fn test_list_parameter_round_trip() {
    let workspace = Workspace::new(
        "parameters:\n  trusted_hosts: { type: list }\n",
        "parameters:\n  trusted_hosts:\n    - localhost\n    - 127.0.0.1\n",
    );

    run_non_interactive(&workspace).unwrap();

    let params = workspace.read_output_parameters();
    let hosts = params.get("trusted_hosts").unwrap().as_sequence().unwrap();
    assert_eq!(hosts.len(), 2);
}

#[test]
fn test_second_run_is_idempotent() {
    let workspace = Workspace::new(
        "parameters:\n  db_host: { type: string }\n",
        "parameters:\n  db_host: localhost\n",
    );

    run_non_interactive(&workspace).unwrap();
    let first = std::fs::read_to_string(workspace.parameters_file()).unwrap();

    run_non_interactive(&workspace).unwrap();
    let second = std::fs::read_to_string(workspace.parameters_file()).unwrap();

    assert_eq!(first, second);
}
