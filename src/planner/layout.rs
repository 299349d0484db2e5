// src/planner/layout.rs

//! Per-call index over the cluster's nodes and services.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::cluster::Node;
use crate::service::Service;

/// Lookup tables built once per planning call.
///
/// Ordered maps keep every traversal (and therefore every plan) stable for
/// identical inputs.
#[derive(Debug, Clone, Default)]
pub struct ClusterLayout {
    node_services: BTreeMap<String, BTreeSet<String>>,
    services: BTreeMap<String, Service>,
    service_nodes: BTreeMap<String, BTreeSet<String>>,
}

impl ClusterLayout {
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut layout = Self::default();

        for node in nodes {
            let placed = layout.node_services.entry(node.id.clone()).or_default();

            for svc in &node.services {
                placed.insert(svc.name.clone());
                layout
                    .service_nodes
                    .entry(svc.name.clone())
                    .or_default()
                    .insert(node.id.clone());

                match layout.services.get(&svc.name) {
                    Some(existing) if existing != svc => {
                        warn!(
                            service = %svc.name,
                            node = %node.id,
                            "service defined differently on another node; keeping first definition"
                        );
                    }
                    Some(_) => {}
                    None => {
                        layout.services.insert(svc.name.clone(), svc.clone());
                    }
                }
            }
        }

        layout
    }

    /// Every distinct service on the cluster, keyed by name.
    pub fn services(&self) -> &BTreeMap<String, Service> {
        &self.services
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_services.keys().map(|s| s.as_str())
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.node_services.contains_key(node_id)
    }

    /// Services placed on `node_id`, by name.
    pub fn services_on(&self, node_id: &str) -> impl Iterator<Item = &Service> {
        self.node_services
            .get(node_id)
            .into_iter()
            .flatten()
            .filter_map(|name| self.services.get(name))
    }

    /// Nodes hosting `service`.
    pub fn nodes_hosting(&self, service: &str) -> impl Iterator<Item = &str> {
        self.service_nodes
            .get(service)
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_services_in_both_directions() {
        let nodes = vec![
            Node::new("host-b")
                .with_service(Service::new("datanode"))
                .with_service(Service::new("datanode")),
            Node::new("host-a")
                .with_service(Service::new("namenode"))
                .with_service(Service::new("datanode")),
            Node::new("host-c"),
        ];
        let layout = ClusterLayout::from_nodes(&nodes);

        assert_eq!(
            layout.node_ids().collect::<Vec<_>>(),
            vec!["host-a", "host-b", "host-c"]
        );
        assert_eq!(
            layout.nodes_hosting("datanode").collect::<Vec<_>>(),
            vec!["host-a", "host-b"]
        );
        assert_eq!(layout.services_on("host-b").count(), 1);
        assert_eq!(layout.services_on("host-c").count(), 0);
        assert_eq!(layout.services_on("missing").count(), 0);
        assert_eq!(layout.services().len(), 2);
        assert!(layout.has_node("host-c"));
    }
}
