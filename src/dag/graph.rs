// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use crate::dag::task_item::{Stage, TaskItem};
use crate::errors::{PlanError, Result};

/// Dependency graph between task items for a single job.
///
/// Items are interned by value: adding the same (node, action, service)
/// triple twice yields the same graph node, and repeated edges collapse.
/// Edge direction is `from -> to`, meaning `from` must finish before `to`.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    graph: DiGraph<TaskItem, ()>,
    index: HashMap<TaskItem, NodeIndex>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item with no dependencies (no-op if already present).
    pub fn add_item(&mut self, item: TaskItem) {
        self.intern(item);
    }

    /// Require `from` to complete before `to` starts. Registers both ends.
    pub fn add_dependency(&mut self, from: TaskItem, to: TaskItem) {
        let a = self.intern(from);
        let b = self.intern(to);
        self.graph.update_edge(a, b, ());
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, item: &TaskItem) -> bool {
        self.index.contains_key(item)
    }

    /// All registered items, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &TaskItem> {
        self.graph.node_weights()
    }

    /// All edges as `(from, to)` pairs.
    pub fn dependencies(&self) -> impl Iterator<Item = (&TaskItem, &TaskItem)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// Immediate predecessors of `item`.
    pub fn dependencies_of(&self, item: &TaskItem) -> Vec<&TaskItem> {
        self.neighbors(item, Direction::Incoming)
    }

    /// Immediate successors of `item`.
    pub fn dependents_of(&self, item: &TaskItem) -> Vec<&TaskItem> {
        self.neighbors(item, Direction::Outgoing)
    }

    /// Level the graph into stages (Kahn's algorithm).
    ///
    /// Each stage holds every item whose predecessors were all emitted in
    /// earlier stages, so the stage index strictly increases along every
    /// edge. Fails with [`PlanError::GraphCycle`] if some items can never
    /// become ready; no partial result is returned in that case.
    pub fn linearize(&self) -> Result<Vec<Stage>> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .collect();

        let mut stages = Vec::new();
        let mut emitted = 0usize;

        while !ready.is_empty() {
            let mut stage = Stage::new();
            let mut next = Vec::new();

            for &idx in &ready {
                stage.insert(self.graph[idx].clone());

                for succ in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                    let deg = &mut in_degree[succ.index()];
                    *deg -= 1;
                    if *deg == 0 {
                        next.push(succ);
                    }
                }
            }

            emitted += ready.len();
            debug!(stage = stages.len(), tasks = stage.len(), "linearized stage");
            stages.push(stage);
            ready = next;
        }

        if emitted < self.graph.node_count() {
            let blocked = self.graph.node_count() - emitted;
            let detail = self.describe_cycle();
            warn!(blocked, %detail, "task graph has a cycle");
            return Err(PlanError::GraphCycle(format!(
                "{blocked} task(s) can never become ready; {detail}"
            )));
        }

        Ok(stages)
    }

    /// Names the members of one cycle (smallest strongly connected
    /// component that loops back on itself).
    fn describe_cycle(&self) -> String {
        let cycle = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .min_by_key(|scc| scc.len());

        match cycle {
            Some(scc) => {
                let mut members: Vec<String> =
                    scc.iter().map(|&idx| self.graph[idx].to_string()).collect();
                members.sort();
                format!("cycle involves {}", members.join(", "))
            }
            None => "no cycle members identified".to_string(),
        }
    }

    fn neighbors(&self, item: &TaskItem, dir: Direction) -> Vec<&TaskItem> {
        match self.index.get(item) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, dir)
                .map(|n| &self.graph[n])
                .collect(),
            None => Vec::new(),
        }
    }

    fn intern(&mut self, item: TaskItem) -> NodeIndex {
        if let Some(&idx) = self.index.get(&item) {
            return idx;
        }
        let idx = self.graph.add_node(item.clone());
        self.index.insert(item, idx);
        idx
    }
}
