// src/planner/builder.rs

//! Populates a [`TaskGraph`] for one job.

use std::collections::BTreeSet;

use tracing::debug;

use crate::cluster::JobDescriptor;
use crate::dag::{TaskGraph, TaskItem};
use crate::planner::layout::ClusterLayout;
use crate::service::{Service, ServiceDependencyResolver};
use crate::types::ProvisionerAction;

/// Walks every (node, service) pair in scope and records its action chain
/// plus the cross-service edges the resolver asks for.
pub struct GraphBuilder<'a> {
    actions: &'a [ProvisionerAction],
    job: &'a JobDescriptor,
    layout: &'a ClusterLayout,
    resolver: &'a ServiceDependencyResolver<'a>,
    targets: &'a BTreeSet<String>,
    graph: TaskGraph,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        actions: &'a [ProvisionerAction],
        job: &'a JobDescriptor,
        layout: &'a ClusterLayout,
        resolver: &'a ServiceDependencyResolver<'a>,
        targets: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            actions,
            job,
            layout,
            resolver,
            targets,
            graph: TaskGraph::new(),
        }
    }

    pub fn build(mut self) -> TaskGraph {
        let layout = self.layout;

        for node_id in layout.node_ids() {
            if !self.job.includes_node(node_id) {
                continue;
            }
            for service in layout.services_on(node_id) {
                if self.targets.contains(&service.name) {
                    self.add_service_chain(node_id, service);
                }
            }
        }

        self.graph
    }

    fn add_service_chain(&mut self, node_id: &str, service: &Service) {
        let mut prev: Option<TaskItem> = None;

        for &action in self.actions {
            let current = if action.is_hardware_action() {
                TaskItem::hardware(node_id, action)
            } else if service.defines(action) {
                TaskItem::new(node_id, action, service.name.as_str())
            } else {
                continue;
            };

            match prev.take() {
                Some(p) => self.graph.add_dependency(p, current.clone()),
                None => self.graph.add_item(current.clone()),
            }

            self.add_cross_service_edges(service, action, &current);
            prev = Some(current);
        }
    }

    fn add_cross_service_edges(
        &mut self,
        service: &Service,
        action: ProvisionerAction,
        current: &TaskItem,
    ) {
        for dep in self.resolver.direct_dependent_actions(&service.name, action) {
            // Outside the job, install-time prerequisites are already in
            // place on the running cluster.
            if action.is_install_time_action() && !self.targets.contains(&dep.service) {
                debug!(
                    task = %current,
                    dependency = %dep,
                    "dependency outside job scope; assuming already satisfied"
                );
                continue;
            }

            for dep_node in self.layout.nodes_hosting(&dep.service) {
                let from = TaskItem::new(dep_node, dep.action, dep.service.as_str());
                debug!(from = %from, to = %current, "adding cross-service dependency");
                self.graph.add_dependency(from, current.clone());
            }
        }
    }
}
