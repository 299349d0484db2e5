// src/config/mod.rs

//! Plan-file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a plan file from disk (`loader.rs`).
//! - Validate it and convert it into planner inputs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ActionConfig, JobSection, NodeConfig, PlanFile, RawPlanFile, ServiceConfig, StageConfig,
};
