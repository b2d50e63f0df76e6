//! Interactive runs: prompting for missing values through a scripted
//! console.

use super::test_utils::Workspace;
use paramdist::console::ScriptedConsole;
use paramdist::processor::Processor;
use paramdist::resolve::MapEnv;
use paramdist::settings::Settings;
use serde_yaml::Value;

fn run_interactive(
    workspace: &Workspace,
    answers: Vec<&str>,
) -> Processor<ScriptedConsole, MapEnv> {
    let settings = Settings::load(&workspace.options).unwrap();
    let mut processor = Processor::new(
        settings,
        ScriptedConsole::with_answers(answers),
        MapEnv::new(),
    );
    processor.run().unwrap();
    processor
}

#[test]
fn test_prompts_only_for_missing_parameters() {
    let workspace = Workspace::new(
        r#"
parameters:
  db_host: { type: string }
  db_port: { type: number }
"#,
        "parameters:\n  db_host: localhost\n  db_port: 5432\n",
    );
    workspace.write_existing("parameters:\n  db_host: prod-db\n");

    let processor = run_interactive(&workspace, vec!["6543"]);
    assert_eq!(
        processor.console().asked,
        vec!["db_port"],
        "persisted parameters must not be asked again"
    );

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_host"), Some(&Value::String("prod-db".into())));
    assert_eq!(params.get("db_port"), Some(&Value::Number(6543.into())));
}

#[test]
fn test_empty_answer_accepts_dist_default() {
    let workspace = Workspace::new(
        "parameters:\n  db_host: { type: string }\n",
        "parameters:\n  db_host: localhost\n",
    );

    run_interactive(&workspace, vec![""]);

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_host"), Some(&Value::String("localhost".into())));
}

#[test]
fn test_missing_notice_appears_once() {
    let workspace = Workspace::new(
        r#"
parameters:
  a: { type: number }
  b: { type: number }
  c: { type: number }
"#,
        "parameters:\n  a: 1\n  b: 2\n  c: 3\n",
    );

    let processor = run_interactive(&workspace, vec!["10", "20", "30"]);
    let notices = processor
        .console()
        .lines
        .iter()
        .filter(|line| line.contains("Some parameters are missing"))
        .count();
    assert_eq!(notices, 1);
}

#[test]
fn test_answers_are_parsed_as_literals() {
    let workspace = Workspace::new(
        r#"
parameters:
  debug: { type: boolean }
  workers: { type: number }
"#,
        "parameters:\n  debug: false\n  workers: 4\n",
    );

    run_interactive(&workspace, vec!["true", "8"]);

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("debug"), Some(&Value::Bool(true)));
    assert_eq!(params.get("workers"), Some(&Value::Number(8.into())));
}

#[test]
fn test_invalid_answer_fails_the_run() {
    let workspace = Workspace::new(
        r#"
parameters:
  env:
    type: string
    constraints:
      - allowed_values: [dev, prod]
"#,
        "parameters:\n  env: dev\n",
    );

    let settings = Settings::load(&workspace.options).unwrap();
    let mut processor = Processor::new(
        settings,
        ScriptedConsole::with_answers(vec!["staging"]),
        MapEnv::new(),
    );
    let err = processor.run().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter env failed validation: Value needs to be one of: dev, prod"
    );
    assert!(!workspace.parameters_file().exists());
}

#[test]
fn test_environment_override_suppresses_the_prompt() {
    let workspace = Workspace::new(
        "parameters:\n  db_host: { type: string, variable: DB_HOST }\n",
        "parameters:\n  db_host: localhost\n",
    );

    let settings = Settings::load(&workspace.options).unwrap();
    let mut processor = Processor::new(
        settings,
        ScriptedConsole::with_answers(vec![]),
        MapEnv::new().set("DB_HOST", "env-db"),
    );
    processor.run().unwrap();
    assert!(processor.console().asked.is_empty());

    let params = workspace.read_output_parameters();
    assert_eq!(params.get("db_host"), Some(&Value::String("env-db".into())));
}
