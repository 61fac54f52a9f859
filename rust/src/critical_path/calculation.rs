//! Critical path calculation using forward and backward passes.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::EngineConfig;
use crate::constraints::Window;
use crate::graph::GraphIndex;
use crate::interner::NodeId;
use crate::models::{Dependency, Task};
use crate::{log_changes, log_checks, log_debug};

use super::types::{CriticalPathResult, TaskTiming};

/// Forward pass: earliest (start, finish) for every node Kahn's algorithm
/// reaches from the roots.
///
/// A node's earliest start is the max of the candidates pushed by its
/// predecessors, or 0 without predecessors. Candidates are not clamped, so a
/// lead or an SF/FF link can produce a negative start.
fn forward_pass(graph: &GraphIndex<'_>) -> Vec<Option<Window>> {
    let mut in_degree = graph.in_degrees();
    let mut candidates: Vec<Option<i64>> = vec![None; graph.len()];
    let mut early: Vec<Option<Window>> = vec![None; graph.len()];

    let mut queue: VecDeque<NodeId> = graph
        .nodes()
        .filter(|&node| in_degree[node as usize] == 0)
        .collect();

    while let Some(node) = queue.pop_front() {
        let earliest_start = candidates[node as usize].unwrap_or(0);
        let window = Window::new(earliest_start, earliest_start + graph.duration(node));
        early[node as usize] = Some(window);

        for edge in graph.outgoing(node) {
            let succ = edge.successor as usize;
            let candidate = edge.dependency.kind.early_start(
                window,
                edge.dependency.lag,
                graph.duration(edge.successor),
            );
            candidates[succ] = Some(candidates[succ].map_or(candidate, |cur| cur.max(candidate)));

            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(edge.successor);
            }
        }
    }

    early
}

/// Backward pass: latest (start, finish) for every node reverse Kahn's
/// algorithm reaches from the sinks.
///
/// Sinks finish at `project_duration`; every other node takes the min of the
/// candidates pushed back by its successors.
fn backward_pass(graph: &GraphIndex<'_>, project_duration: i64) -> Vec<Option<Window>> {
    let mut out_degree = graph.out_degrees();
    let mut candidates: Vec<Option<i64>> = vec![None; graph.len()];
    let mut late: Vec<Option<Window>> = vec![None; graph.len()];

    let mut queue: VecDeque<NodeId> = graph
        .nodes()
        .filter(|&node| out_degree[node as usize] == 0)
        .collect();

    while let Some(node) = queue.pop_front() {
        let latest_finish = candidates[node as usize].unwrap_or(project_duration);
        let window = Window::new(latest_finish - graph.duration(node), latest_finish);
        late[node as usize] = Some(window);

        for edge in graph.incoming(node) {
            let pred = edge.predecessor as usize;
            let candidate = edge.dependency.kind.late_finish(
                window,
                edge.dependency.lag,
                graph.duration(edge.predecessor),
            );
            candidates[pred] = Some(candidates[pred].map_or(candidate, |cur| cur.min(candidate)));

            out_degree[pred] -= 1;
            if out_degree[pred] == 0 {
                queue.push_back(edge.predecessor);
            }
        }
    }

    late
}

/// Calculate the critical path over every task in the snapshot.
///
/// Tasks that a pass cannot reach because of a cycle fall back to
/// `ES = 0, EF = duration` and `LF = project_duration, LS = LF - duration`.
/// Never fails; an empty snapshot yields an empty result with duration 0.
pub fn calculate_critical_path(
    tasks: &[Task],
    dependencies: &[Dependency],
    config: &EngineConfig,
) -> CriticalPathResult {
    let graph = GraphIndex::build(tasks, dependencies, config);
    if graph.is_empty() {
        return CriticalPathResult::default();
    }

    let early: Vec<Window> = forward_pass(&graph)
        .into_iter()
        .zip(graph.nodes())
        .map(|(window, node)| {
            window.unwrap_or_else(|| {
                log_checks!(
                    config.verbosity,
                    "Forward pass did not reach {}, using ES=0",
                    graph.task_id(node)
                );
                Window::new(0, graph.duration(node))
            })
        })
        .collect();

    let project_duration = early.iter().map(|w| w.finish).max().unwrap_or(0);

    let late: Vec<Window> = backward_pass(&graph, project_duration)
        .into_iter()
        .zip(graph.nodes())
        .map(|(window, node)| {
            window.unwrap_or_else(|| {
                log_checks!(
                    config.verbosity,
                    "Backward pass did not reach {}, using LF={}",
                    graph.task_id(node),
                    project_duration
                );
                Window::new(project_duration - graph.duration(node), project_duration)
            })
        })
        .collect();

    let n = graph.len();
    let mut task_timings: FxHashMap<String, TaskTiming> =
        FxHashMap::with_capacity_and_hasher(n, Default::default());
    let mut task_floats: FxHashMap<String, i64> =
        FxHashMap::with_capacity_and_hasher(n, Default::default());
    let mut critical_task_ids: FxHashSet<String> = FxHashSet::default();

    for node in graph.nodes() {
        let id = graph.task_id(node);
        let (e, l) = (early[node as usize], late[node as usize]);
        let timing = TaskTiming::new(e.start, e.finish, l.start, l.finish);
        log_debug!(
            config.verbosity,
            "{}: ES={} EF={} LS={} LF={} float={}",
            id,
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.float
        );

        if timing.is_critical() {
            critical_task_ids.insert(id.to_string());
        }
        task_floats.insert(id.to_string(), timing.float);
        task_timings.insert(id.to_string(), timing);
    }

    log_changes!(
        config.verbosity,
        "Critical path: {} of {} tasks, project duration {} days",
        critical_task_ids.len(),
        n,
        project_duration
    );

    CriticalPathResult {
        critical_task_ids,
        task_floats,
        project_duration,
        task_timings,
    }
}
