//! Dependency scheduling and critical path engine for the Gantty project editor.
//!
//! Given a snapshot of tasks and FS/SS/FF/SF dependencies (with lag), this
//! crate computes:
//! 1. A dependency-only relative schedule ([`schedule_relative`])
//! 2. Float, critical tasks and project duration ([`calculate_critical_path`])
//! 3. Topological levels for the network diagram ([`compute_levels`])
//!
//! Every entry point is a pure function over an immutable snapshot. Bad input
//! (dangling edges, cycles, missing durations) is normalized, never rejected.

pub mod cache;
pub mod config;
pub mod constraints;
pub mod critical_path;
pub mod dates;
pub mod graph;
mod interner;
pub mod levels;
pub mod logging;
pub mod models;
pub mod relative;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use cache::{snapshot_fingerprint, AnalysisCache, ProjectAnalysis};
pub use config::{DurationPolicy, EngineConfig};
pub use constraints::Window;
pub use critical_path::{calculate_critical_path, CriticalPathResult, TaskTiming};
pub use dates::{anchor_schedule, anchor_task, project_end_date, DateError, DatedSchedule};
pub use graph::{Edge, GraphIndex};
pub use interner::NodeId;
pub use levels::{compute_levels, LevelResult};
pub use models::{Anchor, Dependency, DependencyType, ParseDependencyTypeError, Task};
pub use relative::{schedule_relative, Schedule, ScheduleResult};
pub use validation::{check_dependency, DependencyError};
