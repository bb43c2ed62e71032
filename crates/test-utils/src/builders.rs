#![allow(dead_code)]

use actrun::types::{Action, NamedAction};

/// Builder for `Action` to simplify test setup.
pub struct ActionBuilder {
    action: Action,
}

impl ActionBuilder {
    /// Unnamed `bash` action with no commands.
    pub fn new() -> Self {
        Self {
            action: Action {
                name: None,
                shell: "bash".to_string(),
                commands: vec![],
                cancel_on_failure: false,
            },
        }
    }

    /// Named `bash` action with no commands.
    pub fn named(name: &str) -> Self {
        Self::new().name(name)
    }

    pub fn name(mut self, name: &str) -> Self {
        self.action.name = Some(name.to_string());
        self
    }

    pub fn shell(mut self, shell: &str) -> Self {
        self.action.shell = shell.to_string();
        self
    }

    pub fn command(mut self, cmd: &str) -> Self {
        self.action.commands.push(cmd.to_string());
        self
    }

    pub fn commands(mut self, cmds: &[&str]) -> Self {
        self.action
            .commands
            .extend(cmds.iter().map(|c| c.to_string()));
        self
    }

    pub fn cancel_on_failure(mut self, val: bool) -> Self {
        self.action.cancel_on_failure = val;
        self
    }

    pub fn build(self) -> Action {
        self.action
    }

    /// Build a `NamedAction` directly, for driving the action runner without
    /// the supervisor's namespace pass. Unnamed actions become `Action-1`.
    pub fn build_named(self) -> NamedAction {
        let mut named = actrun::engine::assign_namespaces(vec![self.action]);
        named.remove(0)
    }
}

impl Default for ActionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
