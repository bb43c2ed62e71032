// src/engine/report.rs

//! Aggregated outcome of a run and the final failure summary.

use std::fmt::Write as _;

use crate::types::{CommandResult, describe_exit_code};

/// All results collected from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    success: bool,
    results: Vec<CommandResult>,
}

impl RunReport {
    pub fn new(results: Vec<CommandResult>) -> Self {
        let success = results.iter().all(|r| r.success);
        Self { success, results }
    }

    /// True iff every collected result succeeded (vacuously true for an
    /// empty run).
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn results(&self) -> &[CommandResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<CommandResult> {
        self.results
    }

    /// Every failed result, including commands skipped by cancellation.
    pub fn failures(&self) -> impl Iterator<Item = &CommandResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn cancelled_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_cancelled()).count()
    }

    /// Results belonging to one namespace, in command order.
    pub fn for_namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a CommandResult> + 'a {
        self.results.iter().filter(move |r| r.namespace == namespace)
    }

    /// Render the final summary printed after a run.
    ///
    /// ```text
    /// Failed commands (2):
    ///   [build] cargo build (exit code 101: exited with code 101)
    ///   [test] cargo test (exit code -4: skipped: run was cancelled)
    /// Some actions failed.
    /// ```
    pub fn render_summary(&self) -> String {
        let mut out = String::new();

        if self.success {
            let _ = writeln!(out, "All actions executed successfully.");
            return out;
        }

        let _ = writeln!(out, "Failed commands ({}):", self.failure_count());
        for failure in self.failures() {
            let _ = writeln!(
                out,
                "  [{}] {} (exit code {}: {})",
                failure.namespace,
                failure.command,
                failure.exit_code,
                describe_exit_code(failure.exit_code)
            );
        }
        let _ = writeln!(out, "Some actions failed.");
        out
    }

    pub fn print_summary(&self) {
        print!("{}", self.render_summary());
    }
}
