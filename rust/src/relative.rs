//! Dependency-only relative schedule.
//!
//! Kahn's algorithm over the graph index: a task is placed once all of its
//! predecessors are placed, at the latest start any incoming link demands,
//! clamped to day 0. Tasks that never become ready (inside or behind a cycle)
//! fall back to day 0 so every task gets a schedule.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::config::EngineConfig;
use crate::constraints::Window;
use crate::graph::GraphIndex;
use crate::interner::NodeId;
use crate::models::{Dependency, Task};
use crate::{log_changes, log_checks, log_debug};

/// Placement of one task on the relative timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub task_id: String,
    pub relative_start: i64,
    pub duration: i64,
    /// Last occupied day: `relative_start + duration - 1`.
    pub relative_end: i64,
}

impl Schedule {
    fn new(task_id: &str, relative_start: i64, duration: i64) -> Self {
        Self {
            task_id: task_id.to_string(),
            relative_start,
            duration,
            relative_end: relative_start + duration - 1,
        }
    }
}

/// Result of [`schedule_relative`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleResult {
    pub schedules: FxHashMap<String, Schedule>,
    pub has_cycle: bool,
    /// Days spanned by the timeline, at least 1.
    pub total_days: i64,
}

impl Default for ScheduleResult {
    fn default() -> Self {
        Self {
            schedules: FxHashMap::default(),
            has_cycle: false,
            total_days: 1,
        }
    }
}

impl ScheduleResult {
    pub fn get(&self, task_id: &str) -> Option<&Schedule> {
        self.schedules.get(task_id)
    }
}

/// Compute the relative schedule for a snapshot.
///
/// Total over arbitrary input: dangling links are ignored, cycles are
/// reported through `has_cycle`, and `schedules` always holds one entry per
/// distinct task id.
pub fn schedule_relative(
    tasks: &[Task],
    dependencies: &[Dependency],
    config: &EngineConfig,
) -> ScheduleResult {
    let graph = GraphIndex::build(tasks, dependencies, config);
    if graph.is_empty() {
        return ScheduleResult::default();
    }

    let placed = place_tasks(&graph, config);
    let processed = placed.iter().filter(|slot| slot.is_some()).count();
    let has_cycle = processed < graph.len();
    if has_cycle {
        log_changes!(
            config.verbosity,
            "Cycle detected: {} of {} tasks could not be ordered",
            graph.len() - processed,
            graph.len()
        );
    }

    let mut schedules =
        FxHashMap::with_capacity_and_hasher(graph.len(), Default::default());
    let mut total_days: i64 = 1;

    for node in graph.nodes() {
        let id = graph.task_id(node);
        let schedule = match placed[node as usize] {
            Some(start) => Schedule::new(id, start, graph.duration(node)),
            None => {
                log_checks!(config.verbosity, "Fallback placement at day 0 for {}", id);
                Schedule::new(id, 0, graph.duration(node))
            }
        };
        total_days = total_days.max(schedule.relative_end + 1);
        schedules.insert(id.to_string(), schedule);
    }

    ScheduleResult {
        schedules,
        has_cycle,
        total_days,
    }
}

/// Kahn's pass. Returns the start day of every node it could order.
fn place_tasks(graph: &GraphIndex<'_>, config: &EngineConfig) -> Vec<Option<i64>> {
    let mut in_degree = graph.in_degrees();
    let mut starts: Vec<Option<i64>> = vec![None; graph.len()];

    let mut queue: VecDeque<NodeId> = graph
        .nodes()
        .filter(|&node| in_degree[node as usize] == 0)
        .collect();

    while let Some(node) = queue.pop_front() {
        let duration = graph.duration(node);

        // Every predecessor is placed once in-degree hits zero.
        let start = graph
            .incoming(node)
            .filter_map(|edge| {
                let pred_start = starts[edge.predecessor as usize]?;
                let pred = Window::new(
                    pred_start,
                    pred_start + graph.duration(edge.predecessor) - 1,
                );
                Some(
                    edge.dependency
                        .kind
                        .relative_start(pred, edge.dependency.lag, duration),
                )
            })
            .fold(0, i64::max);

        log_debug!(
            config.verbosity,
            "Placed {} at day {} for {} days",
            graph.task_id(node),
            start,
            duration
        );
        starts[node as usize] = Some(start);

        for edge in graph.outgoing(node) {
            let degree = &mut in_degree[edge.successor as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(edge.successor);
            }
        }
    }

    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DurationPolicy;
    use crate::models::DependencyType;

    fn make_task(id: &str, duration: Option<i64>) -> Task {
        Task::new(id, duration)
    }

    fn make_dep(pred: &str, succ: &str, kind: DependencyType, lag: i64) -> Dependency {
        Dependency::new(format!("{pred}->{succ}"), pred, succ, kind, lag)
    }

    fn fs(pred: &str, succ: &str) -> Dependency {
        make_dep(pred, succ, DependencyType::FinishToStart, 0)
    }

    fn run(tasks: &[Task], deps: &[Dependency]) -> ScheduleResult {
        schedule_relative(tasks, deps, &EngineConfig::default())
    }

    fn start_of(result: &ScheduleResult, id: &str) -> i64 {
        result.get(id).unwrap().relative_start
    }

    #[test]
    fn test_empty_input() {
        let result = run(&[], &[]);
        assert!(result.schedules.is_empty());
        assert!(!result.has_cycle);
        assert_eq!(result.total_days, 1);
    }

    #[test]
    fn test_single_task() {
        let result = run(&[make_task("A", Some(3))], &[]);
        assert_eq!(
            result.get("A"),
            Some(&Schedule {
                task_id: "A".to_string(),
                relative_start: 0,
                duration: 3,
                relative_end: 2,
            })
        );
        assert_eq!(result.total_days, 3);
    }

    #[test]
    fn test_missing_duration_is_one_day() {
        let result = run(&[make_task("A", None)], &[]);
        let a = result.get("A").unwrap();
        assert_eq!((a.relative_start, a.duration, a.relative_end), (0, 1, 0));
        assert_eq!(result.total_days, 1);
    }

    #[test]
    fn test_finish_to_start_chain() {
        let tasks = vec![
            make_task("A", Some(2)),
            make_task("B", Some(3)),
            make_task("C", Some(1)),
        ];
        let result = run(&tasks, &[fs("A", "B"), fs("B", "C")]);

        assert_eq!(start_of(&result, "A"), 0);
        assert_eq!(start_of(&result, "B"), 2);
        assert_eq!(start_of(&result, "C"), 5);
        assert_eq!(result.total_days, 6);
        assert!(!result.has_cycle);
    }

    #[test]
    fn test_finish_to_start_lag_and_lead() {
        let tasks = vec![make_task("A", Some(4)), make_task("B", Some(2))];

        let lagged = run(
            &tasks,
            &[make_dep("A", "B", DependencyType::FinishToStart, 3)],
        );
        assert_eq!(start_of(&lagged, "B"), 7);

        let lead = run(
            &tasks,
            &[make_dep("A", "B", DependencyType::FinishToStart, -2)],
        );
        assert_eq!(start_of(&lead, "B"), 2);
        assert_eq!(lead.total_days, 4);
    }

    #[test]
    fn test_finish_to_finish_zero_lag() {
        let tasks = vec![make_task("A", Some(5)), make_task("B", Some(3))];
        let result = run(
            &tasks,
            &[make_dep("A", "B", DependencyType::FinishToFinish, 0)],
        );

        assert_eq!(result.get("A").unwrap().relative_end, 4);
        assert_eq!(result.get("B").unwrap().relative_end, 4);
        assert_eq!(start_of(&result, "B"), 2);
    }

    #[test]
    fn test_start_to_start_with_lag() {
        let tasks = vec![make_task("A", Some(5)), make_task("B", Some(2))];
        let result = run(&tasks, &[make_dep("A", "B", DependencyType::StartToStart, 1)]);
        assert_eq!(start_of(&result, "B"), 1);
        assert_eq!(result.total_days, 5);
    }

    #[test]
    fn test_start_to_finish_clamped_to_day_zero() {
        // Raw start = 0 + 0 - 3 + 1 = -2, clamped to 0.
        let tasks = vec![make_task("A", Some(2)), make_task("B", Some(3))];
        let result = run(
            &tasks,
            &[make_dep("A", "B", DependencyType::StartToFinish, 0)],
        );
        let b = result.get("B").unwrap();
        assert_eq!((b.relative_start, b.relative_end), (0, 2));
    }

    #[test]
    fn test_start_to_finish_with_lag() {
        // B's last day pinned to A.start + 6 = 6, so B spans 4..=6.
        let tasks = vec![make_task("A", Some(2)), make_task("B", Some(3))];
        let result = run(
            &tasks,
            &[make_dep("A", "B", DependencyType::StartToFinish, 6)],
        );
        let b = result.get("B").unwrap();
        assert_eq!((b.relative_start, b.relative_end), (4, 6));
        assert_eq!(result.total_days, 7);
    }

    #[test]
    fn test_binding_constraint_is_max() {
        // C waits for the later of A (ends day 1) and B (ends day 4).
        let tasks = vec![
            make_task("A", Some(2)),
            make_task("B", Some(5)),
            make_task("C", Some(1)),
        ];
        let result = run(&tasks, &[fs("A", "C"), fs("B", "C")]);
        assert_eq!(start_of(&result, "C"), 5);
    }

    #[test]
    fn test_roots_start_at_zero() {
        let tasks = vec![
            make_task("A", Some(3)),
            make_task("B", Some(1)),
            make_task("C", Some(2)),
        ];
        let result = run(&tasks, &[fs("A", "C")]);
        assert_eq!(start_of(&result, "A"), 0);
        assert_eq!(start_of(&result, "B"), 0);
    }

    #[test]
    fn test_dangling_dependency_dropped() {
        let tasks = vec![make_task("A", Some(2))];
        let result = run(&tasks, &[fs("ghost", "A"), fs("A", "ghost")]);
        assert_eq!(start_of(&result, "A"), 0);
        assert!(!result.has_cycle);
        assert_eq!(result.schedules.len(), 1);
    }

    #[test]
    fn test_two_task_cycle() {
        let tasks = vec![make_task("A", Some(2)), make_task("B", Some(3))];
        let result = run(&tasks, &[fs("A", "B"), fs("B", "A")]);

        assert!(result.has_cycle);
        assert_eq!(result.schedules.len(), 2);
        assert_eq!(start_of(&result, "A"), 0);
        assert_eq!(result.get("B").unwrap().relative_end, 2);
        assert_eq!(result.total_days, 3);
    }

    #[test]
    fn test_cycle_blocks_downstream_tasks() {
        // R -> A <-> B -> C: R is placed normally, A/B/C fall back to day 0.
        let tasks = vec![
            make_task("R", Some(4)),
            make_task("A", Some(1)),
            make_task("B", Some(1)),
            make_task("C", Some(2)),
        ];
        let deps = vec![fs("R", "A"), fs("A", "B"), fs("B", "A"), fs("B", "C")];
        let result = run(&tasks, &deps);

        assert!(result.has_cycle);
        assert_eq!(result.schedules.len(), 4);
        assert_eq!(start_of(&result, "A"), 0);
        assert_eq!(start_of(&result, "C"), 0);
        assert_eq!(result.total_days, 4);
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let tasks = vec![make_task("A", Some(1))];
        let result = run(&tasks, &[fs("A", "A")]);
        assert!(result.has_cycle);
        assert_eq!(result.schedules.len(), 1);
    }

    #[test]
    fn test_non_positive_duration_policy() {
        let tasks = vec![make_task("A", Some(0)), make_task("B", Some(2))];
        let deps = vec![fs("A", "B")];

        let propagated = run(&tasks, &deps);
        let a = propagated.get("A").unwrap();
        assert_eq!((a.relative_start, a.relative_end), (0, -1));
        assert_eq!(start_of(&propagated, "B"), 0);

        let config = EngineConfig::default().with_duration_policy(DurationPolicy::ClampToOne);
        let clamped = schedule_relative(&tasks, &deps, &config);
        assert_eq!(clamped.get("A").unwrap().relative_end, 0);
        assert_eq!(start_of(&clamped, "B"), 1);
        assert_eq!(clamped.total_days, 3);
    }

    #[test]
    fn test_idempotent() {
        let tasks = vec![
            make_task("A", Some(2)),
            make_task("B", Some(3)),
            make_task("C", None),
        ];
        let deps = vec![
            fs("A", "B"),
            make_dep("A", "C", DependencyType::StartToStart, 1),
        ];
        assert_eq!(run(&tasks, &deps), run(&tasks, &deps));
    }

    #[test]
    fn test_fs_constraint_holds_on_random_dag() {
        // Layered DAG: every edge goes from a lower to a higher index.
        let tasks: Vec<Task> = (0..30)
            .map(|i| make_task(&format!("t{i}"), Some(1 + i % 4)))
            .collect();
        let mut deps = Vec::new();
        for i in 0..30_i64 {
            for j in (i + 1)..30 {
                if (i * 7 + j * 3) % 5 == 0 {
                    deps.push(make_dep(
                        &format!("t{i}"),
                        &format!("t{j}"),
                        DependencyType::FinishToStart,
                        (i + j) % 3 - 1,
                    ));
                }
            }
        }
        let result = run(&tasks, &deps);

        assert!(!result.has_cycle);
        assert_eq!(result.schedules.len(), tasks.len());
        for dep in &deps {
            let pred = result.get(&dep.predecessor_id).unwrap();
            let succ = result.get(&dep.successor_id).unwrap();
            assert!(succ.relative_start >= pred.relative_end + 1 + dep.lag);
        }
        let max_end = result
            .schedules
            .values()
            .map(|s| s.relative_end + 1)
            .max()
            .unwrap();
        assert_eq!(result.total_days, max_end.max(1));
    }
}
