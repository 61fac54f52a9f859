//! Critical path analysis.
//!
//! Forward and backward CPM passes over the whole snapshot, producing float
//! per task, the zero-float (critical) tasks and the project duration.

mod calculation;
mod types;

pub use calculation::calculate_critical_path;
pub use types::{CriticalPathResult, TaskTiming};
