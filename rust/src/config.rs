//! Configuration for the scheduling engine.

/// How durations below one day are treated.
///
/// A missing duration is always one day; this only covers explicit values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DurationPolicy {
    /// Use the value as given. Zero or negative durations yield an inverted
    /// range (`relative_end < relative_start`).
    #[default]
    Propagate,
    /// Treat any duration below one day as one day.
    ClampToOne,
}

impl DurationPolicy {
    /// Effective duration in days for a task's optional duration.
    pub fn resolve(self, duration: Option<i64>) -> i64 {
        let days = duration.unwrap_or(1);
        match self {
            DurationPolicy::Propagate => days,
            DurationPolicy::ClampToOne => days.max(1),
        }
    }
}

/// Configuration shared by every engine entry point.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
    /// Treatment of non-positive durations.
    pub duration_policy: DurationPolicy,
}

impl EngineConfig {
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_duration_policy(mut self, duration_policy: DurationPolicy) -> Self {
        self.duration_policy = duration_policy;
        self
    }
}
