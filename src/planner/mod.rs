// src/planner/mod.rs

//! Turns a cluster-level job into ordered stages of per-node tasks.
//!
//! Pipeline for one call:
//! 1. [`layout`] indexes the node snapshot.
//! 2. [`expand`] grows the requested service set along runtime dependencies.
//! 3. [`builder`] fills a [`TaskGraph`] from the action order table and the
//!    service dependency resolver.
//! 4. The graph is linearized into stages.
//! 5. [`dedup`] splits stages so each node runs one task at a time.
//!
//! Every call owns its own graph and maps; a [`JobPlanner`] can be shared
//! between threads freely.

pub mod builder;
pub mod dedup;
pub mod expand;
pub mod layout;

use std::collections::BTreeSet;
use std::fmt;

use tracing::{info, warn};

use crate::actions::ActionOrderTable;
use crate::cluster::{JobDescriptor, Node};
use crate::dag::{Stage, TaskGraph, TaskItem};
use crate::errors::Result;
use crate::service::ServiceDependencyResolver;
use crate::types::ClusterAction;

pub use builder::GraphBuilder;
pub use dedup::deduplicate_per_node;
pub use expand::expand_services;
pub use layout::ClusterLayout;

/// Ordered stages for one job.
///
/// Every task of stage `i` must be reported finished before any task of
/// stage `i + 1` is dispatched. Tasks within a stage may run in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPlan {
    pub job_id: String,
    pub cluster_action: ClusterAction,
    pub stages: Vec<Stage>,
}

impl JobPlan {
    pub fn task_count(&self) -> usize {
        self.stages.iter().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Index of the stage containing `item`.
    pub fn stage_of(&self, item: &TaskItem) -> Option<usize> {
        self.stages.iter().position(|s| s.contains(item))
    }
}

impl fmt::Display for JobPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "job {} ({}): {} stage(s), {} task(s)",
            self.job_id,
            self.cluster_action,
            self.stages.len(),
            self.task_count()
        )?;
        for (i, stage) in self.stages.iter().enumerate() {
            writeln!(f, "  stage {}:", i + 1)?;
            for task in stage {
                writeln!(f, "    - {task}")?;
            }
        }
        Ok(())
    }
}

/// Stateless planner configured with an action order table.
#[derive(Debug, Clone, Default)]
pub struct JobPlanner {
    table: ActionOrderTable,
}

impl JobPlanner {
    pub fn new(table: ActionOrderTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ActionOrderTable {
        &self.table
    }

    /// Plan `job` against the given nodes, one task per node per stage.
    pub fn plan(&self, job: &JobDescriptor, nodes: &[Node]) -> Result<JobPlan> {
        let mut plan = self.plan_raw(job, nodes)?;
        let raw_stages = plan.stages.len();
        plan.stages = deduplicate_per_node(plan.stages);

        info!(
            job = %plan.job_id,
            action = %plan.cluster_action,
            stages = plan.stages.len(),
            raw_stages,
            tasks = plan.task_count(),
            "planned job"
        );
        Ok(plan)
    }

    /// Plan `job` without the per-node split: stages follow the task graph
    /// levels exactly.
    pub fn plan_raw(&self, job: &JobDescriptor, nodes: &[Node]) -> Result<JobPlan> {
        let layout = ClusterLayout::from_nodes(nodes);
        warn_unmatched_filters(job, &layout);

        let resolver = ServiceDependencyResolver::new(layout.services())?;
        let targets = self.expand_services(job, &layout, &resolver);
        let graph = self.build_task_graph(job, &layout, &resolver, &targets);
        let stages = graph.linearize()?;

        Ok(JobPlan {
            job_id: job.job_id.clone(),
            cluster_action: job.cluster_action,
            stages,
        })
    }

    /// Services the job acts on after dependency expansion.
    pub fn expand_services(
        &self,
        job: &JobDescriptor,
        layout: &ClusterLayout,
        resolver: &ServiceDependencyResolver<'_>,
    ) -> BTreeSet<String> {
        expand_services(
            job.cluster_action.expansion(),
            job.planned_services.as_ref(),
            layout,
            resolver,
        )
    }

    pub fn build_task_graph(
        &self,
        job: &JobDescriptor,
        layout: &ClusterLayout,
        resolver: &ServiceDependencyResolver<'_>,
        targets: &BTreeSet<String>,
    ) -> TaskGraph {
        let actions = self.table.actions_for(job.cluster_action);
        GraphBuilder::new(actions, job, layout, resolver, targets).build()
    }
}

/// Filters naming nothing on the cluster contribute no tasks; say so.
fn warn_unmatched_filters(job: &JobDescriptor, layout: &ClusterLayout) {
    if let Some(nodes) = &job.planned_node_ids {
        for node in nodes.iter().filter(|n| !layout.has_node(n)) {
            warn!(job = %job.job_id, node = %node, "planned node not in cluster");
        }
    }
    if let Some(services) = &job.planned_services {
        for svc in services.iter().filter(|s| layout.service(s).is_none()) {
            warn!(job = %job.job_id, service = %svc, "planned service not in cluster");
        }
    }
}
