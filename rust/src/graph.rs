//! Graph index over a task/dependency snapshot.
//!
//! Converts the flat task and dependency lists into predecessor/successor
//! adjacency lists keyed by dense node ids. Building is total: dependencies
//! that reference an unknown task are dropped, never reported as errors.

use crate::config::EngineConfig;
use crate::interner::{NodeId, TaskIdInterner};
use crate::log_checks;
use crate::models::{Dependency, Task};

/// A dependency whose endpoints both resolved to tasks.
#[derive(Clone, Copy, Debug)]
pub struct Edge<'a> {
    pub dependency: &'a Dependency,
    pub predecessor: NodeId,
    pub successor: NodeId,
}

/// Adjacency structures for one snapshot. Rebuilt on every engine call.
#[derive(Debug, Clone)]
pub struct GraphIndex<'a> {
    index: TaskIdInterner<'a>,
    /// Effective durations (after the duration policy) indexed by node.
    durations: Vec<i64>,
    edges: Vec<Edge<'a>>,
    /// Incoming edge indices per node, in dependency-list order.
    predecessors: Vec<Vec<usize>>,
    /// Outgoing edge indices per node, in dependency-list order.
    successors: Vec<Vec<usize>>,
}

impl<'a> GraphIndex<'a> {
    /// Build the index. Duplicate task ids keep their first occurrence.
    pub fn build(
        tasks: &'a [Task],
        dependencies: &'a [Dependency],
        config: &EngineConfig,
    ) -> Self {
        let mut index = TaskIdInterner::with_capacity(tasks.len());
        let mut durations = Vec::with_capacity(tasks.len());

        for task in tasks {
            if index.insert(&task.id).is_some() {
                durations.push(config.duration_policy.resolve(task.duration));
            } else {
                log_checks!(config.verbosity, "Ignoring duplicate task id {:?}", task.id);
            }
        }

        let n = index.len();
        let mut edges = Vec::with_capacity(dependencies.len());
        let mut predecessors = vec![Vec::new(); n];
        let mut successors = vec![Vec::new(); n];

        for dependency in dependencies {
            let (Some(predecessor), Some(successor)) = (
                index.get(&dependency.predecessor_id),
                index.get(&dependency.successor_id),
            ) else {
                log_checks!(
                    config.verbosity,
                    "Dropping dependency {:?}: {:?} -> {:?} references an unknown task",
                    dependency.id,
                    dependency.predecessor_id,
                    dependency.successor_id
                );
                continue;
            };

            let edge_idx = edges.len();
            edges.push(Edge {
                dependency,
                predecessor,
                successor,
            });
            predecessors[successor as usize].push(edge_idx);
            successors[predecessor as usize].push(edge_idx);
        }

        Self {
            index,
            durations,
            edges,
            predecessors,
            successors,
        }
    }

    /// Number of distinct tasks.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of dependencies that survived construction.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node ids in input order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.len() as NodeId
    }

    pub fn node(&self, task_id: &str) -> Option<NodeId> {
        self.index.get(task_id)
    }

    pub fn task_id(&self, node: NodeId) -> &'a str {
        self.index.resolve(node)
    }

    /// Effective duration of a node in days.
    #[inline]
    pub fn duration(&self, node: NodeId) -> i64 {
        self.durations[node as usize]
    }

    /// Edges whose successor is `node`.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.predecessors[node as usize]
            .iter()
            .map(move |&idx| &self.edges[idx])
    }

    /// Edges whose predecessor is `node`.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.successors[node as usize]
            .iter()
            .map(move |&idx| &self.edges[idx])
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.predecessors[node as usize].len()
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.successors[node as usize].len()
    }

    /// In-degree of every node, indexed by node id.
    pub fn in_degrees(&self) -> Vec<usize> {
        self.predecessors.iter().map(Vec::len).collect()
    }

    /// Out-degree of every node, indexed by node id.
    pub fn out_degrees(&self) -> Vec<usize> {
        self.successors.iter().map(Vec::len).collect()
    }

    /// Valid dependencies where `task_id` is the successor.
    pub fn predecessors_of(&self, task_id: &str) -> Vec<&'a Dependency> {
        self.node(task_id)
            .map(|node| self.incoming(node).map(|edge| edge.dependency).collect())
            .unwrap_or_default()
    }

    /// Valid dependencies where `task_id` is the predecessor.
    pub fn successors_of(&self, task_id: &str) -> Vec<&'a Dependency> {
        self.node(task_id)
            .map(|node| self.outgoing(node).map(|edge| edge.dependency).collect())
            .unwrap_or_default()
    }

    /// Whether `to` can be reached from `from` by following valid edges.
    pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut seen = vec![false; self.len()];
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if std::mem::replace(&mut seen[node as usize], true) {
                continue;
            }
            stack.extend(self.outgoing(node).map(|edge| edge.successor));
        }
        false
    }
}
