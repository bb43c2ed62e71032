// src/engine/mod.rs

//! Orchestration engine for actrun.
//!
//! This module ties together:
//! - the namespace pre-pass over the configured actions
//! - the supervisor that runs every action concurrently, shares one
//!   cancellation token across them, and collects their results
//! - the run report used for the final verdict and summary

pub mod namespace;
pub mod report;
pub mod supervisor;

pub use namespace::assign_namespaces;
pub use report::RunReport;
pub use supervisor::Supervisor;
pub use tokio_util::sync::CancellationToken;
