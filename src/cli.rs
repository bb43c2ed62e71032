// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `actrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "actrun",
    version,
    about = "Run groups of shell commands in parallel and report one verdict.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the JSON action list.
    ///
    /// Default: `action.json` in the current working directory.
    #[arg(short = 'i', long = "input", value_name = "PATH", default_value = "action.json")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ACTRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the actions, but don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
