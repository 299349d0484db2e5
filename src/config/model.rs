// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::actions::ActionOrderTable;
use crate::cluster::{JobDescriptor, Node};
use crate::types::{ClusterAction, ProvisionerAction};

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [job]
/// id = "job-42"
/// action = "start_services"
/// services = ["hbase-master"]
///
/// [actions]
/// restart_services = ["stop", "start"]
///
/// [service.hbase-master]
/// runtime = { requires = ["zookeeper"] }
/// [service.hbase-master.actions.start]
/// type = "shell"
/// fields = { script = "hbase-daemon.sh start master" }
///
/// [node.host-a]
/// services = ["hbase-master"]
/// hostname = "host-a.example.com"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlanFile {
    pub job: JobSection,

    /// Overrides for the standard action order, keyed by cluster action.
    #[serde(default)]
    pub actions: BTreeMap<String, Vec<ProvisionerAction>>,

    /// Service definitions from `[service.<name>]`.
    #[serde(default)]
    pub service: BTreeMap<String, ServiceConfig>,

    /// Nodes from `[node.<id>]`.
    #[serde(default)]
    pub node: BTreeMap<String, NodeConfig>,
}

/// `[job]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSection {
    pub id: String,
    pub action: ClusterAction,

    /// Optional target-node subset; absent means every node.
    #[serde(default)]
    pub nodes: Option<Vec<String>>,

    /// Optional target-service subset; absent means every service.
    #[serde(default)]
    pub services: Option<Vec<String>>,
}

/// `[service.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub provides: Vec<String>,

    #[serde(default)]
    pub conflicts: Vec<String>,

    #[serde(default)]
    pub install: StageConfig,

    #[serde(default)]
    pub runtime: StageConfig,

    /// Keyed by provisioner action name (`install`, `start`, ...).
    #[serde(default)]
    pub actions: BTreeMap<String, ActionConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageConfig {
    #[serde(default)]
    pub requires: Vec<String>,

    #[serde(default)]
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionConfig {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// `[node.<id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    /// Names of `[service.<name>]` entries placed on this node.
    #[serde(default)]
    pub services: Vec<String>,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Validated plan file, already converted into planner inputs.
///
/// Only constructible through `TryFrom<RawPlanFile>`.
#[derive(Debug, Clone)]
pub struct PlanFile {
    table: ActionOrderTable,
    job: JobDescriptor,
    nodes: Vec<Node>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(table: ActionOrderTable, job: JobDescriptor, nodes: Vec<Node>) -> Self {
        Self { table, job, nodes }
    }

    pub fn table(&self) -> &ActionOrderTable {
        &self.table
    }

    pub fn job(&self) -> &JobDescriptor {
        &self.job
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_inputs(self) -> (ActionOrderTable, JobDescriptor, Vec<Node>) {
        (self.table, self.job, self.nodes)
    }
}
