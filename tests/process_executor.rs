// tests/process_executor.rs
//
// These tests spawn real `bash` / `sh` processes.
mod common;
use crate::common::fake_executor::CaptureSink;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tempfile::tempdir;

use actrun::engine::CancellationToken;
use actrun::exec::output::format_line;
use actrun::exec::{CommandRequest, ProcessExecutor, StreamKind};
use actrun::types::{Shell, exit_codes};

type TestResult = Result<(), Box<dyn Error>>;

fn executor() -> (ProcessExecutor, CaptureSink) {
    let sink = CaptureSink::new();
    (ProcessExecutor::new(Arc::new(sink.clone())), sink)
}

fn request<'a>(namespace: &'a str, shell: Shell, command: &'a str) -> CommandRequest<'a> {
    CommandRequest {
        namespace,
        shell,
        command,
    }
}

#[tokio::test]
async fn real_exit_codes_are_preserved() {
    init_tracing();

    let (exec, _sink) = executor();
    let cancel = CancellationToken::new();

    let failed = with_timeout(exec.run(request("ns", Shell::Bash, "exit 7"), &cancel)).await;
    assert_eq!(failed.exit_code, 7);
    assert!(!failed.success);
    assert_eq!(failed.namespace, "ns");
    assert_eq!(failed.command, "exit 7");

    let ok = with_timeout(exec.run(request("ns", Shell::Bash, "exit 0"), &cancel)).await;
    assert_eq!(ok.exit_code, 0);
    assert!(ok.success);

    let sh = with_timeout(exec.run(request("ns", Shell::Sh, "false"), &cancel)).await;
    assert_eq!(sh.exit_code, 1);
    assert!(!sh.success);
}

#[tokio::test]
async fn output_is_forwarded_with_namespace_per_stream() {
    init_tracing();

    let (exec, sink) = executor();
    let cancel = CancellationToken::new();

    let result = with_timeout(exec.run(
        request(
            "build",
            Shell::Bash,
            "echo one; echo oops >&2; echo two; printf 'no newline'",
        ),
        &cancel,
    ))
    .await;

    assert!(result.success);
    assert_eq!(
        sink.lines_for(StreamKind::Stdout, "build"),
        vec!["one", "two", "no newline"]
    );
    assert_eq!(sink.lines_for(StreamKind::Stderr, "build"), vec!["oops"]);
}

#[tokio::test]
async fn output_of_a_failing_command_is_still_drained() {
    init_tracing();

    let (exec, sink) = executor();
    let cancel = CancellationToken::new();

    // Enough output to fill a pipe buffer several times over.
    let result = with_timeout(exec.run(
        request("chatty", Shell::Sh, "seq 1 20000; exit 4"),
        &cancel,
    ))
    .await;

    assert_eq!(result.exit_code, 4);
    let lines = sink.lines_for(StreamKind::Stdout, "chatty");
    assert_eq!(lines.len(), 20000);
    assert_eq!(lines.first().map(String::as_str), Some("1"));
    assert_eq!(lines.last().map(String::as_str), Some("20000"));
}

#[tokio::test]
async fn cancelled_token_prevents_spawning() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let marker = dir.path().join("ran");
    let command = format!("touch '{}'", marker.display());

    let (exec, _sink) = executor();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = with_timeout(exec.run(request("ns", Shell::Bash, &command), &cancel)).await;

    assert!(!result.success);
    assert_eq!(result.exit_code, exit_codes::CANCELLED);
    assert!(!marker.exists(), "command must not run once cancelled");
    Ok(())
}

#[tokio::test]
async fn signal_death_uses_the_generic_sentinel() {
    init_tracing();

    let (exec, _sink) = executor();
    let cancel = CancellationToken::new();

    let result = with_timeout(exec.run(request("ns", Shell::Bash, "kill -9 $$"), &cancel)).await;

    assert!(!result.success);
    assert_eq!(result.exit_code, exit_codes::WAIT_FAILED);
}

#[tokio::test]
async fn running_process_is_not_killed_by_cancellation() {
    init_tracing();

    let (exec, sink) = executor();
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        })
    };

    let result = with_timeout(exec.run(
        request("ns", Shell::Sh, "sleep 0.4; echo finished"),
        &cancel,
    ))
    .await;
    canceller.await.ok();

    assert!(cancel.is_cancelled());
    assert!(result.success);
    assert_eq!(sink.lines_for(StreamKind::Stdout, "ns"), vec!["finished"]);
}

#[tokio::test]
async fn missing_interpreter_reports_spawn_failure() {
    init_tracing();

    let sink = CaptureSink::new();
    let exec = ProcessExecutor::new(Arc::new(sink.clone()))
        .with_program(Shell::Bash, "/nonexistent/actrun-missing-bash");
    let cancel = CancellationToken::new();

    let result = with_timeout(exec.run(request("ns", Shell::Bash, "echo hi"), &cancel)).await;

    assert!(!result.success);
    assert_eq!(result.exit_code, exit_codes::SPAWN_FAILED);
    assert_eq!(result.command, "echo hi");
    assert!(sink.lines().is_empty());

    // Other shells keep using their own program.
    let sh = with_timeout(exec.run(request("ns", Shell::Sh, "exit 0"), &cancel)).await;
    assert!(sh.success);
}

#[tokio::test]
async fn background_children_do_not_hold_the_command_open() {
    init_tracing();

    let (exec, sink) = executor();
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let result = with_timeout(exec.run(
        request("ns", Shell::Bash, "sleep 3 & echo started"),
        &cancel,
    ))
    .await;
    let elapsed = started.elapsed();

    assert!(result.success);
    assert_eq!(result.exit_code, 0);
    assert!(
        elapsed < Duration::from_secs(2),
        "command returned after {elapsed:?}"
    );
    assert_eq!(sink.lines_for(StreamKind::Stdout, "ns"), vec!["started"]);
}

#[test]
fn forwarded_lines_are_prefixed() {
    assert_eq!(format_line("lint", "all good"), "[lint] all good\n");
    assert_eq!(format_line("Action-2", ""), "[Action-2] \n");
}
