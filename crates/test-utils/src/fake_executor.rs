use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actrun::exec::{CommandExecutor, CommandRequest, OutputSink, StreamKind};
use actrun::types::{CommandResult, Shell};
use tokio_util::sync::CancellationToken;

/// One command as seen by [`ScriptedExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub namespace: String,
    pub shell: Shell,
    pub command: String,
}

/// A fake executor that:
/// - records every command it actually "runs" (cancelled ones are not recorded)
/// - returns exit code 0 unless a different code was scripted for the command
/// - optionally sleeps before completing, to shape interleavings
/// - optionally panics, to exercise crash handling in the supervisor
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    exit_codes: HashMap<String, i32>,
    delays: HashMap<String, Duration>,
    panics: HashSet<String>,
    attempts: Arc<Mutex<Vec<Attempt>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the exit code for a command text. Negative codes are returned
    /// as sentinel failures.
    pub fn exit_code(mut self, command: &str, code: i32) -> Self {
        self.exit_codes.insert(command.to_string(), code);
        self
    }

    pub fn fail(self, command: &str) -> Self {
        self.exit_code(command, 1)
    }

    pub fn delay(mut self, command: &str, delay: Duration) -> Self {
        self.delays.insert(command.to_string(), delay);
        self
    }

    pub fn panic_on(mut self, command: &str) -> Self {
        self.panics.insert(command.to_string());
        self
    }

    /// Shared handle to the recorded attempts, in the order they started.
    pub fn attempts(&self) -> Arc<Mutex<Vec<Attempt>>> {
        Arc::clone(&self.attempts)
    }

    /// Commands attempted for one namespace, in order.
    pub fn attempted_commands(&self, namespace: &str) -> Vec<String> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.namespace == namespace)
            .map(|a| a.command.clone())
            .collect()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run_command<'a>(
        &'a self,
        request: CommandRequest<'a>,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>> {
        Box::pin(async move {
            if cancel.is_cancelled() {
                return CommandResult::cancelled(request.namespace, request.command);
            }

            {
                let mut guard = self.attempts.lock().unwrap();
                guard.push(Attempt {
                    namespace: request.namespace.to_string(),
                    shell: request.shell,
                    command: request.command.to_string(),
                });
            }

            if let Some(delay) = self.delays.get(request.command) {
                tokio::time::sleep(*delay).await;
            }

            if self.panics.contains(request.command) {
                panic!("scripted panic for command '{}'", request.command);
            }

            let code = self.exit_codes.get(request.command).copied().unwrap_or(0);
            if code < 0 {
                CommandResult::failed(request.namespace, request.command, code)
            } else {
                CommandResult::from_exit_code(request.namespace, request.command, code)
            }
        })
    }
}

/// An output sink that records every forwarded line instead of printing it.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<(StreamKind, String, String)>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured `(stream, namespace, line)`, in arrival order.
    pub fn lines(&self) -> Vec<(StreamKind, String, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines captured for one namespace on one stream, in arrival order.
    pub fn lines_for(&self, stream: StreamKind, namespace: &str) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, ns, _)| *s == stream && ns == namespace)
            .map(|(_, _, line)| line.clone())
            .collect()
    }
}

impl OutputSink for CaptureSink {
    fn write_line(&self, stream: StreamKind, namespace: &str, line: &str) {
        let mut guard = self.lines.lock().unwrap();
        guard.push((stream, namespace.to_string(), line.to_string()));
    }
}
