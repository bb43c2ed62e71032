// src/config/validate.rs

use std::collections::HashSet;

use crate::errors::{ActrunError, Result};
use crate::types::Action;

/// Check the invariants the engine relies on for readable output.
///
/// Empty `commands` lists are legal (the action trivially succeeds), and the
/// shell is not checked here: an unknown shell degrades to the default with a
/// warning at run time.
pub fn validate_actions(actions: &[Action]) -> Result<()> {
    ensure_has_actions(actions)?;
    validate_unique_names(actions)?;
    Ok(())
}

fn ensure_has_actions(actions: &[Action]) -> Result<()> {
    if actions.is_empty() {
        return Err(ActrunError::ConfigError(
            "config must contain at least one action".to_string(),
        ));
    }
    Ok(())
}

fn validate_unique_names(actions: &[Action]) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, action) in actions.iter().enumerate() {
        let Some(name) = action.name.as_deref().map(str::trim) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            return Err(ActrunError::ConfigError(format!(
                "action #{} reuses the name '{}'; names must be unique",
                idx + 1,
                name
            )));
        }
    }
    Ok(())
}
