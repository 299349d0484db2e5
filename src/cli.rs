// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `clusterplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "clusterplan",
    version,
    about = "Plan a cluster job into ordered stages of per-node tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    ///
    /// Default: `Clusterplan.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Clusterplan.toml")]
    pub config: String,

    /// Print the graph levels as-is, without splitting stages per node.
    #[arg(long)]
    pub raw: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CLUSTERPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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
