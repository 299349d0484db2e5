// src/config/validate.rs

use std::collections::BTreeMap;

use tracing::warn;

use crate::actions::ActionOrderTable;
use crate::cluster::{JobDescriptor, Node, NodeProperties};
use crate::config::model::{JobSection, NodeConfig, PlanFile, RawPlanFile, ServiceConfig};
use crate::errors::{PlanError, Result};
use crate::service::{Service, ServiceAction, ServiceDependencies, StageDependencies};
use crate::types::{ClusterAction, ProvisionerAction};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = PlanError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_nodes(&raw)?;
        validate_node_services(&raw)?;

        let table = build_action_table(&raw.actions)?;
        let services = build_services(&raw.service)?;
        let nodes = build_nodes(&raw.node, &services);
        warn_unknown_job_filters(&raw);
        let job = build_job(&raw.job);

        Ok(PlanFile::new_unchecked(table, job, nodes))
    }
}

fn ensure_has_nodes(raw: &RawPlanFile) -> Result<()> {
    if raw.node.is_empty() {
        return Err(PlanError::ConfigError(
            "plan file must contain at least one [node.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_node_services(raw: &RawPlanFile) -> Result<()> {
    for (id, node) in raw.node.iter() {
        for svc in node.services.iter() {
            if !raw.service.contains_key(svc) {
                return Err(PlanError::ConfigError(format!(
                    "node '{}' references unknown service '{}'",
                    id, svc
                )));
            }
        }
    }
    Ok(())
}

fn build_action_table(
    overrides: &BTreeMap<String, Vec<ProvisionerAction>>,
) -> Result<ActionOrderTable> {
    let mut table = ActionOrderTable::standard();
    for (name, actions) in overrides.iter() {
        let cluster_action: ClusterAction = name.parse().map_err(|e| {
            PlanError::ConfigError(format!("[actions] has unknown key '{name}': {e}"))
        })?;
        table = table.with_order(cluster_action, actions.clone())?;
    }
    Ok(table)
}

fn build_services(defs: &BTreeMap<String, ServiceConfig>) -> Result<BTreeMap<String, Service>> {
    let mut services = BTreeMap::new();

    for (name, cfg) in defs.iter() {
        let mut actions = BTreeMap::new();
        for (action_name, action_cfg) in cfg.actions.iter() {
            let action: ProvisionerAction = action_name.parse().map_err(|e| {
                PlanError::ConfigError(format!(
                    "service '{name}' defines unknown action '{action_name}': {e}"
                ))
            })?;
            if action.is_hardware_action() {
                return Err(PlanError::ConfigError(format!(
                    "service '{name}' cannot define node-level action '{action}'"
                )));
            }
            actions.insert(
                action,
                ServiceAction {
                    kind: action_cfg.kind.clone(),
                    fields: action_cfg.fields.clone(),
                },
            );
        }

        let dependencies = ServiceDependencies {
            provides: cfg.provides.iter().cloned().collect(),
            conflicts: cfg.conflicts.iter().cloned().collect(),
            install: StageDependencies {
                requires: cfg.install.requires.iter().cloned().collect(),
                conflicts: cfg.install.conflicts.iter().cloned().collect(),
            },
            runtime: StageDependencies {
                requires: cfg.runtime.requires.iter().cloned().collect(),
                conflicts: cfg.runtime.conflicts.iter().cloned().collect(),
            },
        };

        services.insert(
            name.clone(),
            Service {
                name: name.clone(),
                dependencies,
                actions,
            },
        );
    }

    Ok(services)
}

/// Assumes every referenced service exists (checked by `validate_node_services`).
fn build_nodes(defs: &BTreeMap<String, NodeConfig>, services: &BTreeMap<String, Service>) -> Vec<Node> {
    defs.iter()
        .map(|(id, cfg)| Node {
            id: id.clone(),
            services: cfg
                .services
                .iter()
                .filter_map(|name| services.get(name).cloned())
                .collect(),
            properties: NodeProperties {
                hostname: cfg.hostname.clone(),
                extra: cfg.properties.clone(),
            },
        })
        .collect()
}

fn warn_unknown_job_filters(raw: &RawPlanFile) {
    for node in raw.job.nodes.iter().flatten() {
        if !raw.node.contains_key(node) {
            warn!(node = %node, "[job].nodes names a node that is not defined");
        }
    }
    for svc in raw.job.services.iter().flatten() {
        if !raw.service.contains_key(svc) {
            warn!(service = %svc, "[job].services names a service that is not defined");
        }
    }
}

fn build_job(section: &JobSection) -> JobDescriptor {
    let mut job = JobDescriptor::new(section.id.clone(), section.action);
    if let Some(nodes) = &section.nodes {
        job = job.with_nodes(nodes.iter().cloned());
    }
    if let Some(services) = &section.services {
        job = job.with_services(services.iter().cloned());
    }
    job
}
