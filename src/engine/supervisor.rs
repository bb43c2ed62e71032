// src/engine/supervisor.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::task::{Id, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::exec::{CommandExecutor, run_action};
use crate::types::{Action, CommandResult, exit_codes};

use super::namespace::assign_namespaces;
use super::report::RunReport;

/// Command text recorded when an action runner task dies before returning.
pub const RUNNER_CRASH_COMMAND: &str = "action runner";

/// Fans actions out as concurrent tasks and fans their results back in.
///
/// Each run gets one [`CancellationToken`] shared by every action of that
/// run and by every process spawn. It is the only state the concurrent
/// runners share.
pub struct Supervisor<E: CommandExecutor + 'static> {
    executor: Arc<E>,
}

impl<E: CommandExecutor + 'static> fmt::Debug for Supervisor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor").finish_non_exhaustive()
    }
}

impl<E: CommandExecutor + 'static> Supervisor<E> {
    pub fn new(executor: E) -> Self {
        Self::from_arc(Arc::new(executor))
    }

    pub fn from_arc(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Run every action with a fresh cancellation token.
    pub async fn execute(&self, actions: Vec<Action>) -> RunReport {
        self.execute_with_cancel(actions, CancellationToken::new())
            .await
    }

    /// Run every action, using `cancel` as this run's cancellation token.
    ///
    /// The caller may cancel the token itself (e.g. on Ctrl-C); that has the
    /// same cooperative effect as a critical action failing. The token must
    /// not be reused for another run.
    ///
    /// Waits for every launched action before returning, even after
    /// cancellation. Results from one action keep their command order;
    /// actions are appended in the order they finish.
    pub async fn execute_with_cancel(
        &self,
        actions: Vec<Action>,
        cancel: CancellationToken,
    ) -> RunReport {
        let actions = assign_namespaces(actions);
        info!(actions = actions.len(), "starting run");

        let mut set = JoinSet::new();
        let mut launched: HashMap<Id, (String, bool)> = HashMap::with_capacity(actions.len());

        for action in actions {
            let executor = Arc::clone(&self.executor);
            let cancel = cancel.clone();
            let meta = (action.namespace.clone(), action.cancel_on_failure);

            let handle = set.spawn(async move { run_action(executor.as_ref(), &action, &cancel).await });
            launched.insert(handle.id(), meta);
        }

        let mut results = Vec::new();
        while let Some(joined) = set.join_next_with_id().await {
            match joined {
                Ok((id, action_results)) => {
                    let namespace = launched.remove(&id).map(|(ns, _)| ns);
                    debug!(
                        namespace = namespace.as_deref().unwrap_or("?"),
                        results = action_results.len(),
                        "collected action results"
                    );
                    results.extend(action_results);
                }
                Err(err) => {
                    let (namespace, critical) = launched
                        .remove(&err.id())
                        .unwrap_or_else(|| ("?".to_string(), false));
                    error!(namespace = %namespace, error = %err, "action runner crashed");
                    if critical {
                        cancel.cancel();
                    }
                    results.push(CommandResult::failed(
                        namespace,
                        RUNNER_CRASH_COMMAND,
                        exit_codes::WAIT_FAILED,
                    ));
                }
            }
        }

        let report = RunReport::new(results);
        info!(
            success = report.success(),
            results = report.results().len(),
            failures = report.failure_count(),
            cancelled = cancel.is_cancelled(),
            "run finished"
        );
        report
    }
}
