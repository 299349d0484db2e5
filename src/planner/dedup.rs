// src/planner/dedup.rs

//! Splits stages so that no node receives two tasks at once.

use std::collections::HashSet;

use tracing::debug;

use crate::dag::Stage;

/// Greedily repartition each stage into sub-stages with at most one task per
/// node.
///
/// Each task goes into the first sub-stage that has no task for its node
/// yet, opening a new sub-stage when none qualifies. Sub-stages replace
/// their original stage in creation order; the order between original
/// stages is untouched.
pub fn deduplicate_per_node(stages: Vec<Stage>) -> Vec<Stage> {
    let mut out = Vec::with_capacity(stages.len());

    for (index, stage) in stages.into_iter().enumerate() {
        let mut subs: Vec<(HashSet<String>, Stage)> = Vec::new();

        for task in stage {
            match subs
                .iter_mut()
                .find(|(nodes, _)| !nodes.contains(&task.node_id))
            {
                Some((nodes, sub)) => {
                    nodes.insert(task.node_id.clone());
                    sub.insert(task);
                }
                None => {
                    let nodes = HashSet::from([task.node_id.clone()]);
                    subs.push((nodes, Stage::from([task])));
                }
            }
        }

        if subs.len() > 1 {
            debug!(stage = index, parts = subs.len(), "split stage to serialize per-node work");
        }
        out.extend(subs.into_iter().map(|(_, sub)| sub));
    }

    out
}
