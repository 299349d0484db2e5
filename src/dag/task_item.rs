// src/dag/task_item.rs

//! Atomic unit of provisioning work.

use std::collections::BTreeSet;
use std::fmt;

use crate::types::ProvisionerAction;

/// One action on one node, optionally scoped to a service.
///
/// Identity is the full triple. Hardware actions use an empty service name,
/// so every service on a node shares the same hardware items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskItem {
    pub node_id: String,
    pub action: ProvisionerAction,
    pub service: String,
}

impl TaskItem {
    pub fn new(
        node_id: impl Into<String>,
        action: ProvisionerAction,
        service: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            action,
            service: service.into(),
        }
    }

    /// Node-scoped item (empty service name).
    pub fn hardware(node_id: impl Into<String>, action: ProvisionerAction) -> Self {
        Self::new(node_id, action, String::new())
    }

    pub fn is_node_scoped(&self) -> bool {
        self.service.is_empty()
    }
}

impl fmt::Display for TaskItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.service.is_empty() {
            write!(f, "{}:{}", self.node_id, self.action)
        } else {
            write!(f, "{}:{}:{}", self.node_id, self.action, self.service)
        }
    }
}

/// Items with no ordering requirement among themselves.
///
/// Kept as an ordered set so stage membership (and anything derived from
/// iterating a stage) does not depend on hash order.
pub type Stage = BTreeSet<TaskItem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_full_triple() {
        let a = TaskItem::new("host-a", ProvisionerAction::Install, "datanode");
        let b = TaskItem::new("host-a", ProvisionerAction::Install, "datanode");
        let c = TaskItem::new("host-a", ProvisionerAction::Install, "namenode");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let stage: Stage = [a, b, c].into_iter().collect();
        assert_eq!(stage.len(), 2);
    }

    #[test]
    fn hardware_items_render_without_service() {
        let item = TaskItem::hardware("host-a", ProvisionerAction::Bootstrap);
        assert!(item.is_node_scoped());
        assert_eq!(item.to_string(), "host-a:bootstrap");
        assert_eq!(
            TaskItem::new("host-b", ProvisionerAction::Start, "zk").to_string(),
            "host-b:start:zk"
        );
    }
}
