#![allow(dead_code)]

use std::collections::HashSet;

use clusterplan::dag::{Stage, TaskGraph, TaskItem};
use clusterplan::types::ProvisionerAction;

pub fn item(node: &str, action: ProvisionerAction, service: &str) -> TaskItem {
    TaskItem::new(node, action, service)
}

pub fn hw(node: &str, action: ProvisionerAction) -> TaskItem {
    TaskItem::hardware(node, action)
}

pub fn stage(items: &[TaskItem]) -> Stage {
    items.iter().cloned().collect()
}

pub fn stage_index(stages: &[Stage], item: &TaskItem) -> usize {
    stages
        .iter()
        .position(|s| s.contains(item))
        .unwrap_or_else(|| panic!("{item} not found in any stage"))
}

/// Every edge of `graph` goes strictly forward in `stages`.
pub fn assert_edges_respected(graph: &TaskGraph, stages: &[Stage]) {
    for (from, to) in graph.dependencies() {
        assert!(
            stage_index(stages, from) < stage_index(stages, to),
            "edge {from} -> {to} not respected"
        );
    }
}

/// No stage holds two tasks for the same node.
pub fn assert_one_task_per_node(stages: &[Stage]) {
    for (i, s) in stages.iter().enumerate() {
        let mut seen = HashSet::new();
        for task in s {
            assert!(
                seen.insert(task.node_id.as_str()),
                "stage {i} has two tasks for node {}",
                task.node_id
            );
        }
    }
}
