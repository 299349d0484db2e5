// src/lib.rs

//! Cluster job planning engine.
//!
//! Given a cluster-level job (create, stop services, ...) and a snapshot of
//! the cluster's nodes and services, [`planner::JobPlanner`] produces
//! ordered stages of per-node tasks: tasks inside a stage may run in
//! parallel, stages run strictly one after another, and no node is handed
//! two tasks in the same stage.

pub mod actions;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod planner;
pub mod service;
pub mod types;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::planner::JobPlanner;

pub use crate::actions::ActionOrderTable;
pub use crate::cluster::{JobDescriptor, Node, NodeProperties};
pub use crate::dag::{Stage, TaskGraph, TaskItem};
pub use crate::errors::PlanError;
pub use crate::planner::JobPlan;
pub use crate::service::{Service, ServiceDependencyResolver};
pub use crate::types::{ClusterAction, ProvisionerAction};

/// High-level entry point used by `main.rs`: load the plan file, plan the
/// job, print the stages.
pub fn run(args: CliArgs) -> Result<()> {
    let plan_file = load_and_validate(&args.config)?;
    let (table, job, nodes) = plan_file.into_inputs();
    debug!(job = %job.job_id, nodes = nodes.len(), "loaded plan file");

    let planner = JobPlanner::new(table);
    let plan = if args.raw {
        planner.plan_raw(&job, &nodes)?
    } else {
        planner.plan(&job, &nodes)?
    };

    print!("{plan}");
    Ok(())
}
