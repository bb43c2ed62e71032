// src/exec/shell.rs

//! Shell resolution: map the interpreter an action asks for onto the
//! allow-list, falling back to the default shell.

use tracing::warn;

use crate::types::Shell;

/// Resolve the shell requested by an action.
///
/// Never fails: an unknown (or empty) shell name logs a warning tagged with
/// the action's namespace and resolves to [`Shell::default`].
pub fn resolve(namespace: &str, requested: &str) -> Shell {
    match requested.parse::<Shell>() {
        Ok(shell) => shell,
        Err(_) => {
            let fallback = Shell::default();
            warn!(
                namespace,
                requested,
                fallback = %fallback,
                "Invalid shell type '{requested}'. Defaulting to '{fallback}'"
            );
            fallback
        }
    }
}
