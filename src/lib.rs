// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::engine::{Supervisor, assign_namespaces};
use crate::exec::ProcessExecutor;
use crate::exec::shell;
use crate::types::Action;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the supervisor and the real process executor
/// - Ctrl-C handling
/// - the final summary
///
/// Returns the overall verdict: `true` iff every command of every action
/// succeeded. A config that cannot be loaded is an error and nothing runs.
pub async fn run(args: CliArgs) -> Result<bool> {
    let actions = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&actions);
        return Ok(true);
    }

    let cancel = CancellationToken::new();

    // Ctrl-C → cooperative cancellation. Running commands finish, nothing new
    // starts.
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            warn!("Ctrl-C received; cancelling commands that have not started");
            cancel.cancel();
        });
    }

    info!(config = %args.config, actions = actions.len(), "running actions");

    let supervisor = Supervisor::new(ProcessExecutor::console());
    let report = supervisor.execute_with_cancel(actions, cancel).await;

    report.print_summary();
    Ok(report.success())
}

/// Simple dry-run output: print each action with its resolved namespace and
/// shell, and its commands.
fn print_dry_run(actions: &[Action]) {
    let named = assign_namespaces(actions.to_vec());

    println!("actrun dry-run");
    println!();
    println!("actions ({}):", named.len());
    for action in &named {
        let shell = shell::resolve(&action.namespace, &action.shell);
        println!("  - {}", action.namespace);
        println!("      shell: {shell}");
        if action.cancel_on_failure {
            println!("      cancel-on-failure: true");
        }
        for command in &action.commands {
            println!("      cmd: {command}");
        }
    }

    debug!("dry-run complete (no execution)");
}
