// src/exec/runner.rs

//! Per-action sequential command runner.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::exec::backend::{CommandExecutor, CommandRequest};
use crate::exec::shell;
use crate::types::{CommandResult, NamedAction};

/// Run the commands of one action in order.
///
/// - The shell is resolved once for the whole action.
/// - Before each command the cancellation token is checked. Once it is set,
///   a single cancelled result is recorded for the command that would have
///   run next and the remaining commands produce no results.
/// - A failing command in a `cancel_on_failure` action stops this action and
///   cancels the whole run.
/// - A failing command in any other action is recorded and the action moves
///   on to its next command.
///
/// Returns one result per command attempted, in command order.
pub async fn run_action<E>(
    executor: &E,
    action: &NamedAction,
    cancel: &CancellationToken,
) -> Vec<CommandResult>
where
    E: CommandExecutor + ?Sized,
{
    let namespace = action.namespace.as_str();
    let shell = shell::resolve(namespace, &action.shell);
    let total = action.commands.len();
    let mut results = Vec::with_capacity(total);

    info!(
        namespace,
        %shell,
        commands = total,
        cancel_on_failure = action.cancel_on_failure,
        "action started"
    );

    for (idx, command) in action.commands.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                namespace,
                command = %command,
                skipped = total - idx,
                "run cancelled; skipping remaining commands"
            );
            results.push(CommandResult::cancelled(namespace, command.as_str()));
            break;
        }

        let request = CommandRequest {
            namespace,
            shell,
            command,
        };
        let result = executor.run_command(request, cancel).await;
        let failed = !result.success;
        let cancelled = result.is_cancelled();
        results.push(result);

        if cancelled {
            debug!(namespace, command = %command, "command skipped by cancellation");
            break;
        }

        if failed {
            if action.cancel_on_failure {
                warn!(
                    namespace,
                    command = %command,
                    "Critical action failed; cancelling all remaining work"
                );
                cancel.cancel();
                break;
            }
            debug!(namespace, command = %command, "command failed; continuing with next command");
        }
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    info!(
        namespace,
        attempted = results.len(),
        succeeded,
        "action finished"
    );

    results
}
