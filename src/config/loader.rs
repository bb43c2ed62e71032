// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::validate::validate_actions;
use crate::errors::Result;
use crate::types::Action;

/// Parse an action list from a JSON document.
///
/// The top level must be an array of action objects. This only performs
/// deserialization; use [`load_and_validate`] for the full check.
pub fn parse_actions(contents: &str) -> Result<Vec<Action>> {
    let actions: Vec<Action> = serde_json::from_str(contents)?;
    Ok(actions)
}

/// Load an action list from a given path without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Action>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let actions = parse_actions(&contents)?;

    debug!(path = %path.display(), actions = actions.len(), "loaded action list");
    Ok(actions)
}

/// Load an action list from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads JSON.
/// - Applies defaults (handled by `serde`): missing `name` stays unnamed,
///   missing `shell` becomes an empty (invalid) shell, missing
///   `cancel-on-failure` is `false`.
/// - Checks that the list is non-empty and explicit names are unique.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Vec<Action>> {
    let actions = load_from_path(&path)?;
    validate_actions(&actions)?;
    Ok(actions)
}

/// Default config path: `action.json` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("action.json")
}
