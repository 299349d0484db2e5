// src/dag/mod.rs

//! Task graph representation and linearization.
//!
//! - [`task_item`] holds the atomic (node, action, service) work item.
//! - [`graph`] holds the dependency graph between items and turns it into
//!   ordered stages of concurrently runnable work.

pub mod graph;
pub mod task_item;

pub use graph::TaskGraph;
pub use task_item::{Stage, TaskItem};
