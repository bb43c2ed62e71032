// src/types.rs

//! Data model shared by the config layer, the executor and the supervisor.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Reserved exit codes for outcomes that have no real process exit code.
///
/// Real exit codes are always `>= 0` on the platforms we target, so every
/// sentinel here is negative.
pub mod exit_codes {
    /// The process died without an exit code (signal), waiting on it failed,
    /// or the action runner itself crashed.
    pub const WAIT_FAILED: i32 = -1;
    /// stdout/stderr of the child could not be captured.
    pub const STREAM_SETUP_FAILED: i32 = -2;
    /// The shell process could not be started.
    pub const SPAWN_FAILED: i32 = -3;
    /// Skipped because the run was cancelled before this command started.
    pub const CANCELLED: i32 = -4;
}

/// Human readable reason for an exit code, used in the final summary.
pub fn describe_exit_code(code: i32) -> String {
    match code {
        exit_codes::WAIT_FAILED => "terminated abnormally".to_string(),
        exit_codes::STREAM_SETUP_FAILED => "failed to create an output stream".to_string(),
        exit_codes::SPAWN_FAILED => "failed to start".to_string(),
        exit_codes::CANCELLED => "skipped: run was cancelled".to_string(),
        other => format!("exited with code {other}"),
    }
}

/// One action as written in the configuration file.
///
/// ```json
/// { "name": "lint", "shell": "bash", "commands": ["cargo fmt --check"], "cancel-on-failure": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Action {
    /// Display label. Actions without one get `Action-<n>` at fan-out time.
    #[serde(default)]
    pub name: Option<String>,

    /// Requested interpreter. Validated against the allow-list, never trusted.
    #[serde(default)]
    pub shell: String,

    /// Command lines, executed strictly in order.
    #[serde(default)]
    pub commands: Vec<String>,

    /// Critical action: a failing command aborts the rest of this action and
    /// cancels every other action in the run.
    #[serde(default, rename = "cancel-on-failure")]
    pub cancel_on_failure: bool,
}

/// An [`Action`] whose namespace has been resolved.
///
/// Produced by [`crate::engine::assign_namespaces`]; this is the only form the
/// action runner accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAction {
    pub namespace: String,
    pub shell: String,
    pub commands: Vec<String>,
    pub cancel_on_failure: bool,
}

/// Outcome of attempting one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub namespace: String,
    /// The literal command text attempted.
    pub command: String,
    pub success: bool,
    /// Real exit code, or one of [`exit_codes`].
    pub exit_code: i32,
}

impl CommandResult {
    /// Result for a process that exited with a real exit code.
    pub fn from_exit_code(
        namespace: impl Into<String>,
        command: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            command: command.into(),
            success: exit_code == 0,
            exit_code,
        }
    }

    /// Failed result carrying a sentinel exit code.
    pub fn failed(namespace: impl Into<String>, command: impl Into<String>, sentinel: i32) -> Self {
        Self {
            namespace: namespace.into(),
            command: command.into(),
            success: false,
            exit_code: sentinel,
        }
    }

    /// Result for a command that was never started because the run was cancelled.
    pub fn cancelled(namespace: impl Into<String>, command: impl Into<String>) -> Self {
        Self::failed(namespace, command, exit_codes::CANCELLED)
    }

    pub fn is_cancelled(&self) -> bool {
        self.exit_code == exit_codes::CANCELLED
    }
}

/// Interpreters an action may request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Shell {
    #[default]
    Bash,
    Sh,
}

impl Shell {
    /// Every shell in the allow-list.
    pub const ALLOWED: [Shell; 2] = [Shell::Bash, Shell::Sh];

    /// Program name, looked up on `PATH`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Sh => "sh",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shell {
    type Err = String;

    /// Exact, case-sensitive match against [`Shell::ALLOWED`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shell::ALLOWED
            .into_iter()
            .find(|shell| shell.as_str() == s)
            .ok_or_else(|| format!("unsupported shell: {s:?} (expected \"bash\" or \"sh\")"))
    }
}
