// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the commands defined in
//! the actions, using `tokio::process::Command`.
//!
//! - [`shell`] validates the interpreter requested by an action.
//! - [`output`] forwards namespace-prefixed child output to the parent.
//! - [`process`] runs one command to completion and classifies the outcome.
//! - [`runner`] drives one action's command sequence.
//! - [`backend`] provides the `CommandExecutor` trait that the runner uses in
//!   production via [`ProcessExecutor`], and which tests can replace with a
//!   fake implementation.

pub mod backend;
pub mod output;
pub mod process;
pub mod runner;
pub mod shell;

pub use backend::{CommandExecutor, CommandRequest};
pub use output::{ConsoleSink, OutputSink, StreamKind};
pub use process::ProcessExecutor;
pub use runner::run_action;
