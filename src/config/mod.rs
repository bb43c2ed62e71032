// src/config/mod.rs

//! Configuration loading and validation for actrun.
//!
//! Responsibilities:
//! - Load the JSON action list from disk (`loader.rs`).
//! - Validate basic invariants like unique action names (`validate.rs`).
//!
//! The data model itself ([`Action`]) lives in [`crate::types`] because the
//! engine consumes it directly.

pub mod loader;
pub mod validate;

pub use crate::types::Action;
pub use loader::{default_config_path, load_and_validate, load_from_path, parse_actions};
pub use validate::validate_actions;
