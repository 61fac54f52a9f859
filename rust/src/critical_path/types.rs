//! Types for critical path analysis.

use rustc_hash::{FxHashMap, FxHashSet};

/// Per-task CPM times in day boundaries (`finish = start + duration`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start (forward pass).
    pub earliest_start: i64,
    /// Earliest possible finish (forward pass).
    pub earliest_finish: i64,
    /// Latest allowable start (backward pass).
    pub latest_start: i64,
    /// Latest allowable finish (backward pass).
    pub latest_finish: i64,
    /// Float = latest_start - earliest_start.
    pub float: i64,
}

impl TaskTiming {
    pub fn new(
        earliest_start: i64,
        earliest_finish: i64,
        latest_start: i64,
        latest_finish: i64,
    ) -> Self {
        Self {
            earliest_start,
            earliest_finish,
            latest_start,
            latest_finish,
            float: latest_start - earliest_start,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.float == 0
    }
}

/// Result of a critical path analysis over the whole snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalPathResult {
    /// Tasks with zero float.
    pub critical_task_ids: FxHashSet<String>,
    /// Float for every task.
    pub task_floats: FxHashMap<String, i64>,
    /// Latest earliest-finish over all tasks; 0 for an empty snapshot.
    pub project_duration: i64,
    /// Full ES/EF/LS/LF breakdown for every task.
    pub task_timings: FxHashMap<String, TaskTiming>,
}

impl CriticalPathResult {
    pub fn is_critical(&self, task_id: &str) -> bool {
        self.critical_task_ids.contains(task_id)
    }

    pub fn float_of(&self, task_id: &str) -> Option<i64> {
        self.task_floats.get(task_id).copied()
    }
}
