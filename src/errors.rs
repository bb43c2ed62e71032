// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Only run-level failures live here. A command that fails is reported as a
//! [`crate::types::CommandResult`], never as an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ActrunError>;
