// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// The task graph could not be linearized. The whole job is unplannable.
    #[error("Cycle detected in task graph: {0}")]
    GraphCycle(String),

    /// More than one service on the cluster provides the same capability.
    #[error("Capability '{capability}' is provided by more than one service: {providers:?}")]
    AmbiguousProvider {
        capability: String,
        providers: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PlanError>;
