// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::Result;

/// Load a plan file from a given path and return the raw `RawPlanFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawPlanFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a plan file from path, validate it, and convert it into planner
/// inputs.
///
/// Checks for:
/// - at least one node,
/// - nodes referencing undefined services,
/// - unknown action names and repeated actions in order overrides.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    PlanFile::try_from(raw)
}

