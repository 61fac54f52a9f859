//! Core data types for the dependency scheduling engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Side of a task a dependency attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    Start,
    Finish,
}

/// The four project-management link types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DependencyType {
    /// Successor starts after the predecessor finishes.
    #[default]
    FinishToStart,
    /// Successor starts with the predecessor.
    StartToStart,
    /// Successor finishes with the predecessor.
    FinishToFinish,
    /// Successor finishes when the predecessor starts.
    StartToFinish,
}

impl DependencyType {
    pub const ALL: [DependencyType; 4] = [
        DependencyType::FinishToStart,
        DependencyType::StartToStart,
        DependencyType::FinishToFinish,
        DependencyType::StartToFinish,
    ];

    /// Which side of the predecessor drives which side of the successor.
    pub const fn anchors(self) -> (Anchor, Anchor) {
        match self {
            DependencyType::FinishToStart => (Anchor::Finish, Anchor::Start),
            DependencyType::StartToStart => (Anchor::Start, Anchor::Start),
            DependencyType::FinishToFinish => (Anchor::Finish, Anchor::Finish),
            DependencyType::StartToFinish => (Anchor::Start, Anchor::Finish),
        }
    }

    /// Two-letter code used by the project model ("FS", "SS", "FF", "SF").
    pub const fn code(self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "FS",
            DependencyType::StartToStart => "SS",
            DependencyType::FinishToFinish => "FF",
            DependencyType::StartToFinish => "SF",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a dependency type code is not one of FS/SS/FF/SF.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dependency type: {0:?} (expected FS, SS, FF or SF)")]
pub struct ParseDependencyTypeError(pub String);

impl FromStr for DependencyType {
    type Err = ParseDependencyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencyType::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDependencyTypeError(s.to_string()))
    }
}

/// A task in the project snapshot. Only the fields the engine reads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Task {
    pub id: String,
    /// Duration in days; `None` is scheduled as one day.
    pub duration: Option<i64>,
}

impl Task {
    pub fn new(id: impl Into<String>, duration: Option<i64>) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }
}

/// A directed temporal link between two tasks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub id: String,
    pub predecessor_id: String,
    pub successor_id: String,
    pub kind: DependencyType,
    /// Signed day offset; negative values are leads.
    pub lag: i64,
}

impl Dependency {
    pub fn new(
        id: impl Into<String>,
        predecessor_id: impl Into<String>,
        successor_id: impl Into<String>,
        kind: DependencyType,
        lag: i64,
    ) -> Self {
        Self {
            id: id.into(),
            predecessor_id: predecessor_id.into(),
            successor_id: successor_id.into(),
            kind,
            lag,
        }
    }
}
