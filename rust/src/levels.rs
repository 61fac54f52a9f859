//! Topological levels for layout consumers.
//!
//! `level(t) = 0` when `t` has no valid predecessors, otherwise
//! `1 + max(level(p))` over its predecessors. A predecessor that is already on
//! the current DFS path (a cycle) contributes 0 instead of being revisited.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::EngineConfig;
use crate::graph::GraphIndex;
use crate::interner::NodeId;
use crate::log_debug;
use crate::models::{Dependency, Task};

/// Tasks bucketed by topological level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelResult {
    /// `levels[i]` holds the ids at level `i`, in input order.
    pub levels: Vec<Vec<String>>,
    pub task_level: FxHashMap<String, usize>,
}

impl LevelResult {
    pub fn level_of(&self, task_id: &str) -> Option<usize> {
        self.task_level.get(task_id).copied()
    }
}

/// DFS frame standing in for one recursive `level(node)` call.
struct Frame {
    node: NodeId,
    predecessors: Vec<NodeId>,
    next: usize,
    deepest: Option<usize>,
}

impl Frame {
    fn new(node: NodeId, graph: &GraphIndex<'_>) -> Self {
        Self {
            node,
            predecessors: graph.incoming(node).map(|edge| edge.predecessor).collect(),
            next: 0,
            deepest: None,
        }
    }

    fn absorb(&mut self, level: usize) {
        self.deepest = Some(self.deepest.map_or(level, |d| d.max(level)));
    }
}

/// Level of every node, indexed by node id.
pub(crate) fn assign_levels(graph: &GraphIndex<'_>) -> Vec<usize> {
    let mut memo: Vec<Option<usize>> = vec![None; graph.len()];
    let mut on_path: FxHashSet<NodeId> = FxHashSet::default();

    for root in graph.nodes() {
        if memo[root as usize].is_some() {
            continue;
        }

        on_path.insert(root);
        let mut stack = vec![Frame::new(root, graph)];

        while let Some(frame) = stack.last_mut() {
            if let Some(&pred) = frame.predecessors.get(frame.next) {
                frame.next += 1;
                match memo[pred as usize] {
                    Some(level) => frame.absorb(level),
                    None if on_path.contains(&pred) => frame.absorb(0),
                    None => {
                        on_path.insert(pred);
                        stack.push(Frame::new(pred, graph));
                    }
                }
                continue;
            }

            let node = frame.node;
            let level = frame.deepest.map_or(0, |d| d + 1);
            stack.pop();
            on_path.remove(&node);
            memo[node as usize] = Some(level);
            if let Some(parent) = stack.last_mut() {
                parent.absorb(level);
            }
        }
    }

    memo.into_iter().map(Option::unwrap_or_default).collect()
}

/// Compute topological levels for the network-diagram layout.
///
/// Never fails: dangling dependencies are ignored and cycles terminate.
pub fn compute_levels(
    tasks: &[Task],
    dependencies: &[Dependency],
    config: &EngineConfig,
) -> LevelResult {
    let graph = GraphIndex::build(tasks, dependencies, config);
    let node_levels = assign_levels(&graph);

    let depth = node_levels.iter().max().map_or(0, |&max| max + 1);
    let mut levels: Vec<Vec<String>> = vec![Vec::new(); depth];
    let mut task_level =
        FxHashMap::with_capacity_and_hasher(graph.len(), Default::default());

    for node in graph.nodes() {
        let id = graph.task_id(node);
        let level = node_levels[node as usize];
        log_debug!(config.verbosity, "Level {}: {}", level, id);
        levels[level].push(id.to_string());
        task_level.insert(id.to_string(), level);
    }

    LevelResult { levels, task_level }
}
