// tests/config_loading.rs
mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use actrun::config::{load_and_validate, load_from_path, parse_actions};
use actrun::errors::ActrunError;
use actrun::types::Action;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

#[test]
fn parses_all_fields_and_defaults() -> TestResult {
    init_tracing();

    let actions = parse_actions(
        r#"
[
  { "name": "build", "shell": "sh", "commands": ["make", "make install"], "cancel-on-failure": true },
  { "shell": "bash", "commands": ["echo hi"] },
  { "commands": [] }
]
"#,
    )?;

    assert_eq!(actions.len(), 3);

    assert_eq!(
        actions[0],
        Action {
            name: Some("build".to_string()),
            shell: "sh".to_string(),
            commands: vec!["make".to_string(), "make install".to_string()],
            cancel_on_failure: true,
        }
    );

    assert_eq!(actions[1].name, None);
    assert!(!actions[1].cancel_on_failure, "cancel-on-failure defaults to false");

    // Missing shell stays empty here and is resolved (with a warning) at run time.
    assert_eq!(actions[2].shell, "");
    assert!(actions[2].commands.is_empty());

    Ok(())
}

#[test]
fn top_level_must_be_an_array() {
    let result = parse_actions(r#"{ "shell": "bash", "commands": [] }"#);
    assert!(matches!(result, Err(ActrunError::JsonError(_))));
}

#[test]
fn invalid_json_returns_json_error() -> TestResult {
    let file = write_config("[ { \"shell\": \"bash\", ")?;

    match load_from_path(file.path()) {
        Err(ActrunError::JsonError(_)) => Ok(()),
        Err(e) => panic!("Expected JsonError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_file_returns_io_error() {
    let result = load_and_validate("definitely/not/here/action.json");
    assert!(matches!(result, Err(ActrunError::IoError(_))));
}

#[test]
fn empty_action_list_is_a_config_error() -> TestResult {
    let file = write_config("[]")?;

    match load_and_validate(file.path()) {
        Err(ActrunError::ConfigError(msg)) => {
            assert!(msg.contains("at least one action"));
            Ok(())
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn duplicate_names_are_a_config_error() -> TestResult {
    let file = write_config(
        r#"
[
  { "name": "test", "shell": "bash", "commands": ["true"] },
  { "name": "other", "shell": "bash", "commands": ["true"] },
  { "name": "test", "shell": "bash", "commands": ["false"] }
]
"#,
    )?;

    match load_and_validate(file.path()) {
        Err(ActrunError::ConfigError(msg)) => {
            assert!(msg.contains("'test'"));
            assert!(msg.contains("#3"));
            Ok(())
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unnamed_actions_do_not_clash() -> TestResult {
    let file = write_config(
        r#"
[
  { "shell": "bash", "commands": ["true"] },
  { "name": "", "shell": "bash", "commands": ["true"] },
  { "shell": "bash", "commands": ["true"] }
]
"#,
    )?;

    let actions = load_and_validate(file.path())?;
    assert_eq!(actions.len(), 3);
    Ok(())
}

#[test]
fn demo_configs_are_valid() -> TestResult {
    init_tracing();

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let actions = load_and_validate(manifest_dir.join("demos/action.json"))?;
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].name.as_deref(), Some("lint"));
    assert_eq!(actions[1].name, None);
    assert_eq!(actions[2].shell, "zsh");
    assert!(actions[2].cancel_on_failure);

    let critical = load_and_validate(manifest_dir.join("demos/critical.json"))?;
    assert_eq!(critical.len(), 2);
    assert!(critical[0].cancel_on_failure);
    assert!(!critical[1].cancel_on_failure);

    Ok(())
}
