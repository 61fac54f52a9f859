//! Per-link constraint formulas shared by the relative scheduler and the
//! critical path passes.
//!
//! Every formula is derived from [`DependencyType::anchors`]: the side of the
//! predecessor that drives the link and the side of the successor it pins.
//! The two callers use different day conventions:
//!
//! - The relative timeline works in day indices. A task occupies days
//!   `start..=end`, so "after the finish" is `end + 1` and pinning the
//!   successor's finish puts its last day on the target day.
//! - CPM works in boundaries. `finish = start + duration`, so the link target
//!   is used as-is for both sides.

use crate::models::{Anchor, DependencyType};

/// A task's placement as seen by one side of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: i64,
    pub finish: i64,
}

impl Window {
    pub fn new(start: i64, finish: i64) -> Self {
        Self { start, finish }
    }

    fn side(self, anchor: Anchor) -> i64 {
        match anchor {
            Anchor::Start => self.start,
            Anchor::Finish => self.finish,
        }
    }
}

impl DependencyType {
    /// Lowest start day for a successor on the relative timeline.
    ///
    /// `pred.finish` is the predecessor's last occupied day. The result is not
    /// clamped; the scheduler clamps the task start after taking the max.
    pub fn relative_start(self, pred: Window, lag: i64, successor_duration: i64) -> i64 {
        let (from, to) = self.anchors();
        match (from, to) {
            (Anchor::Finish, Anchor::Start) => pred.finish + 1 + lag,
            (Anchor::Start, Anchor::Start) => pred.start + lag,
            (_, Anchor::Finish) => pred.side(from) + lag - successor_duration + 1,
        }
    }

    /// Earliest-start candidate for a successor in the CPM forward pass.
    pub fn early_start(self, pred: Window, lag: i64, successor_duration: i64) -> i64 {
        let (from, to) = self.anchors();
        let target = pred.side(from) + lag;
        match to {
            Anchor::Start => target,
            Anchor::Finish => target - successor_duration,
        }
    }

    /// Latest-finish candidate for a predecessor in the CPM backward pass.
    ///
    /// Mirror of [`DependencyType::early_start`].
    pub fn late_finish(self, succ: Window, lag: i64, predecessor_duration: i64) -> i64 {
        let (from, to) = self.anchors();
        let target = succ.side(to) - lag;
        match from {
            Anchor::Start => target + predecessor_duration,
            Anchor::Finish => target,
        }
    }
}
