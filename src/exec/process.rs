// src/exec/process.rs

//! Single-command process runner.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::exec::backend::{CommandExecutor, CommandRequest};
use crate::exec::output::{ConsoleSink, OutputSink, StreamKind, forward_lines};
use crate::types::{CommandResult, Shell, exit_codes};

/// How long output forwarders may keep draining once the shell has exited.
///
/// Output the shell itself wrote is already buffered in the pipe and drains
/// well within this window. A background process started by the command can
/// hold the pipe open indefinitely; its output past this point is dropped.
pub const OUTPUT_DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Runs commands as `<shell> -c <command>` child processes.
///
/// Output is forwarded line by line to the configured [`OutputSink`]
/// (the parent's stdout/stderr in production).
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    sink: Arc<dyn OutputSink>,
    programs: HashMap<Shell, String>,
}

impl ProcessExecutor {
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink,
            programs: HashMap::new(),
        }
    }

    /// Executor forwarding output to the parent's own stdout/stderr.
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink))
    }

    /// Run `shell` from an explicit program path instead of looking its
    /// name up on `PATH`.
    pub fn with_program(mut self, shell: Shell, program: impl Into<String>) -> Self {
        self.programs.insert(shell, program.into());
        self
    }

    fn program_for(&self, shell: Shell) -> &str {
        self.programs
            .get(&shell)
            .map(String::as_str)
            .unwrap_or_else(|| shell.as_str())
    }

    /// Run one command to completion and classify its outcome.
    ///
    /// - The cancellation token is checked right before spawning; a cancelled
    ///   run never starts a new process.
    /// - Cancellation does **not** reach a process that is already running:
    ///   it runs to completion and its real result is reported.
    /// - Both output forwarders are joined before the result is returned. Once
    ///   the shell has exited they get [`OUTPUT_DRAIN_GRACE`] to reach EOF and
    ///   are aborted after that, so no task outlives the command.
    pub async fn run(
        &self,
        request: CommandRequest<'_>,
        cancel: &CancellationToken,
    ) -> CommandResult {
        let CommandRequest {
            namespace,
            shell,
            command,
        } = request;

        if cancel.is_cancelled() {
            debug!(namespace, command, "run cancelled; not starting command");
            return CommandResult::cancelled(namespace, command);
        }

        let program = self.program_for(shell);
        info!(namespace, %shell, program, command, "starting command");

        let mut child = match build_command(program, command).spawn() {
            Ok(child) => child,
            Err(err) => {
                error!(namespace, program, command, error = %err, "error starting command");
                return CommandResult::failed(namespace, command, exit_codes::SPAWN_FAILED);
            }
        };

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                error!(namespace, command, "error capturing command output; stopping process");
                if let Err(err) = child.start_kill() {
                    warn!(namespace, command, error = %err, "failed to stop process");
                }
                if let Err(err) = child.wait().await {
                    warn!(namespace, command, error = %err, "failed to reap process");
                }
                return CommandResult::failed(namespace, command, exit_codes::STREAM_SETUP_FAILED);
            }
        };

        let stdout_task = tokio::spawn(forward_lines(
            stdout,
            StreamKind::Stdout,
            namespace.to_string(),
            Arc::clone(&self.sink),
        ));
        let stderr_task = tokio::spawn(forward_lines(
            stderr,
            StreamKind::Stderr,
            namespace.to_string(),
            Arc::clone(&self.sink),
        ));

        let status = child.wait().await;

        for (stream, mut task) in [
            (StreamKind::Stdout, stdout_task),
            (StreamKind::Stderr, stderr_task),
        ] {
            match timeout(OUTPUT_DRAIN_GRACE, &mut task).await {
                Ok(Ok(lines)) => debug!(namespace, ?stream, lines, "output forwarder finished"),
                Ok(Err(err)) => warn!(namespace, ?stream, error = %err, "output forwarder failed"),
                Err(_) => {
                    debug!(
                        namespace,
                        ?stream,
                        "stream still open after the shell exited (background process?); detaching"
                    );
                    task.abort();
                    let _ = task.await;
                }
            }
        }

        classify_exit(namespace, command, status)
    }
}

/// Build `<program> -c <command>` with piped output and no stdin.
fn build_command(program: &str, command: &str) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

impl CommandExecutor for ProcessExecutor {
    fn run_command<'a>(
        &'a self,
        request: CommandRequest<'a>,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>> {
        Box::pin(self.run(request, cancel))
    }
}

/// Turn the result of `wait()` into a [`CommandResult`].
fn classify_exit(namespace: &str, command: &str, status: io::Result<ExitStatus>) -> CommandResult {
    match status {
        Ok(status) => match status.code() {
            Some(code) => {
                if code == 0 {
                    info!(namespace, command, exit_code = code, "command succeeded");
                } else {
                    warn!(namespace, command, exit_code = code, "command failed with exit code {code}");
                }
                CommandResult::from_exit_code(namespace, command, code)
            }
            None => {
                warn!(
                    namespace,
                    command,
                    signal = ?terminating_signal(&status),
                    "command terminated without an exit code"
                );
                CommandResult::failed(namespace, command, exit_codes::WAIT_FAILED)
            }
        },
        Err(err) => {
            error!(namespace, command, error = %err, "error waiting for command");
            CommandResult::failed(namespace, command, exit_codes::WAIT_FAILED)
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
