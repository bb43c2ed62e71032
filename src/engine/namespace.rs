// src/engine/namespace.rs

//! Namespace assignment pre-pass.

use crate::types::{Action, NamedAction};

/// Prefix of synthetic namespaces, followed by the 1-based input position.
pub const SYNTHETIC_NAMESPACE_PREFIX: &str = "Action-";

/// Resolve the namespace of every action, in input order.
///
/// Actions without a name (or with a blank one) are labelled
/// `Action-<n>`, where `n` is their 1-based position in the full list. This
/// needs the whole ordered list, so it runs once before fan-out rather than
/// inside each concurrent runner.
pub fn assign_namespaces(actions: Vec<Action>) -> Vec<NamedAction> {
    actions
        .into_iter()
        .enumerate()
        .map(|(idx, action)| {
            let namespace = match action.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("{SYNTHETIC_NAMESPACE_PREFIX}{}", idx + 1),
            };

            NamedAction {
                namespace,
                shell: action.shell,
                commands: action.commands,
                cancel_on_failure: action.cancel_on_failure,
            }
        })
        .collect()
}
