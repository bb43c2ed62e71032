// tests/shell_and_namespace.rs
mod common;
use crate::common::builders::ActionBuilder;
use crate::common::init_tracing;

use actrun::engine::assign_namespaces;
use actrun::exec::shell::resolve;
use actrun::types::Shell;

#[test]
fn allowed_shells_resolve_to_themselves() {
    init_tracing();

    assert_eq!(resolve("ns", "bash"), Shell::Bash);
    assert_eq!(resolve("ns", "sh"), Shell::Sh);
}

#[test]
fn unknown_shells_fall_back_to_bash() {
    init_tracing();

    for requested in ["zsh", "fish", "", "BASH", " sh", "/bin/bash"] {
        assert_eq!(
            resolve("ns", requested),
            Shell::Bash,
            "'{requested}' should fall back to bash"
        );
    }
}

#[test]
fn shell_display_matches_program_name() {
    assert_eq!(Shell::Bash.to_string(), "bash");
    assert_eq!(Shell::Sh.to_string(), "sh");
    assert_eq!(Shell::default(), Shell::Bash);
}

#[test]
fn only_the_unnamed_actions_get_synthetic_names() {
    let actions = vec![
        ActionBuilder::new().command("echo 1").build(),
        ActionBuilder::named("second").command("echo 2").build(),
        ActionBuilder::new().command("echo 3").build(),
    ];

    let named = assign_namespaces(actions);
    let namespaces: Vec<_> = named.iter().map(|a| a.namespace.as_str()).collect();

    assert_eq!(namespaces, vec!["Action-1", "second", "Action-3"]);
    assert_eq!(named[1].commands, vec!["echo 2".to_string()]);
}

#[test]
fn blank_names_count_as_missing() {
    let actions = vec![
        ActionBuilder::named("   ").build(),
        ActionBuilder::named("").build(),
        ActionBuilder::named(" padded ").build(),
    ];

    let named = assign_namespaces(actions);
    let namespaces: Vec<_> = named.iter().map(|a| a.namespace.as_str()).collect();

    assert_eq!(namespaces, vec!["Action-1", "Action-2", "padded"]);
}

#[test]
fn assignment_keeps_every_other_field() {
    let action = ActionBuilder::named("x")
        .shell("sh")
        .commands(&["a", "b"])
        .cancel_on_failure(true)
        .build();

    let named = assign_namespaces(vec![action]);
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].shell, "sh");
    assert_eq!(named[0].commands, vec!["a".to_string(), "b".to_string()]);
    assert!(named[0].cancel_on_failure);
}
