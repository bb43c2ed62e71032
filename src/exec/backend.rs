// src/exec/backend.rs

//! Pluggable command executor abstraction.
//!
//! The action runner talks to a `CommandExecutor` instead of spawning
//! processes itself. This makes it easy to swap in a fake executor in tests
//! while keeping the production implementation in [`super::process`].
//!
//! - `ProcessExecutor` is the default implementation used by `actrun`.
//! - Tests can provide their own `CommandExecutor` that, for example, records
//!   which commands were attempted and returns scripted results.

use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::types::{CommandResult, Shell};

/// Everything needed to run one command of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRequest<'a> {
    /// Namespace of the owning action, used to prefix output.
    pub namespace: &'a str,
    /// Already-resolved interpreter.
    pub shell: Shell,
    /// Command line passed to `<shell> -c`.
    pub command: &'a str,
}

/// Trait abstracting how a single command is executed.
///
/// Implementations never fail: every outcome, including "could not start"
/// and "run was cancelled", is expressed as a [`CommandResult`].
pub trait CommandExecutor: Send + Sync {
    /// Run one command to completion.
    ///
    /// Implementations must check `cancel` immediately before starting work
    /// and return [`CommandResult::cancelled`] if it is already set.
    fn run_command<'a>(
        &'a self,
        request: CommandRequest<'a>,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>>;
}
