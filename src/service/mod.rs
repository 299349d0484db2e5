// src/service/mod.rs

//! Service definitions and dependency resolution.

pub mod model;
pub mod resolver;

pub use model::{Service, ServiceAction, ServiceDependencies, StageDependencies};
pub use resolver::{ActionOnService, ServiceDependencyResolver};
