//! Snapshot cache for repeated analysis.
//!
//! Callers recompute on every change to tasks or dependencies. This cache
//! fingerprints the snapshot and only reruns the engine when the fingerprint
//! changes, so unrelated re-renders reuse the previous results.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::config::EngineConfig;
use crate::critical_path::{calculate_critical_path, CriticalPathResult};
use crate::levels::{compute_levels, LevelResult};
use crate::log_debug;
use crate::models::{Dependency, Task};
use crate::relative::{schedule_relative, ScheduleResult};

/// Everything the chart and network views need from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectAnalysis {
    pub schedule: ScheduleResult,
    pub critical_path: CriticalPathResult,
    pub levels: LevelResult,
}

impl ProjectAnalysis {
    /// Run all three engine components over one snapshot.
    pub fn compute(tasks: &[Task], dependencies: &[Dependency], config: &EngineConfig) -> Self {
        Self {
            schedule: schedule_relative(tasks, dependencies, config),
            critical_path: calculate_critical_path(tasks, dependencies, config),
            levels: compute_levels(tasks, dependencies, config),
        }
    }
}

/// Hash of the values the engine reads from a snapshot.
pub fn snapshot_fingerprint(tasks: &[Task], dependencies: &[Dependency]) -> u64 {
    let mut hasher = FxHasher::default();
    tasks.hash(&mut hasher);
    dependencies.hash(&mut hasher);
    hasher.finish()
}

/// Memoizes [`ProjectAnalysis`] for the most recent snapshot.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    config: EngineConfig,
    entry: Option<(u64, ProjectAnalysis)>,
    hits: usize,
    misses: usize,
}

impl AnalysisCache {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Analysis for this snapshot, recomputed only if it changed.
    pub fn analyze(&mut self, tasks: &[Task], dependencies: &[Dependency]) -> &ProjectAnalysis {
        let fingerprint = snapshot_fingerprint(tasks, dependencies);

        let entry = match self.entry.take() {
            Some((cached, analysis)) if cached == fingerprint => {
                self.hits += 1;
                (cached, analysis)
            }
            _ => {
                log_debug!(
                    self.config.verbosity,
                    "Snapshot {:016x} changed, recomputing",
                    fingerprint
                );
                self.misses += 1;
                let analysis = ProjectAnalysis::compute(tasks, dependencies, &self.config);
                (fingerprint, analysis)
            }
        };

        &self.entry.insert(entry).1
    }

    /// Drop the cached analysis.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
