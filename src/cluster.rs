// src/cluster.rs

//! Planning inputs: the requested job and the cluster's nodes.

use std::collections::{BTreeMap, BTreeSet};

use crate::service::Service;
use crate::types::ClusterAction;

/// Descriptive node data passed through to task executors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeProperties {
    pub hostname: Option<String>,
    pub extra: BTreeMap<String, String>,
}

/// A machine in the cluster and the services placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub services: Vec<Service>,
    pub properties: NodeProperties,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            services: Vec::new(),
            properties: NodeProperties::default(),
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }
}

/// The operation requested for a cluster.
///
/// `planned_node_ids` and `planned_services` only ever narrow the scope;
/// `None` means "everything on the cluster".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub job_id: String,
    pub cluster_action: ClusterAction,
    pub planned_node_ids: Option<BTreeSet<String>>,
    pub planned_services: Option<BTreeSet<String>>,
}

impl JobDescriptor {
    pub fn new(job_id: impl Into<String>, cluster_action: ClusterAction) -> Self {
        Self {
            job_id: job_id.into(),
            cluster_action,
            planned_node_ids: None,
            planned_services: None,
        }
    }

    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.planned_node_ids = Some(nodes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.planned_services = Some(services.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `node_id` passes the optional node filter.
    pub fn includes_node(&self, node_id: &str) -> bool {
        self.planned_node_ids
            .as_ref()
            .is_none_or(|nodes| nodes.contains(node_id))
    }
}
