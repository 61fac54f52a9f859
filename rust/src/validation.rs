//! Dependency validation for the project store.
//!
//! The engine itself accepts any edge list. These checks are what a store
//! runs before accepting a new dependency into the project model:
//! - Both endpoints exist
//! - No self-loops
//! - No duplicate (predecessor, successor) pair
//! - The edge does not close a cycle over the existing valid edges

use thiserror::Error;

use crate::config::EngineConfig;
use crate::graph::GraphIndex;
use crate::models::{Dependency, Task};

/// Reasons a dependency is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Task not found: {0}")]
    UnknownTask(String),
    #[error("Task {0} cannot depend on itself")]
    SelfLoop(String),
    #[error("Dependency from {predecessor} to {successor} already exists")]
    Duplicate {
        predecessor: String,
        successor: String,
    },
    #[error("Dependency from {predecessor} to {successor} would create a cycle")]
    WouldCreateCycle {
        predecessor: String,
        successor: String,
    },
}

/// Check whether `candidate` may be added to `existing`.
pub fn check_dependency(
    tasks: &[Task],
    existing: &[Dependency],
    candidate: &Dependency,
) -> Result<(), DependencyError> {
    let graph = GraphIndex::build(tasks, existing, &EngineConfig::default());

    let predecessor = graph
        .node(&candidate.predecessor_id)
        .ok_or_else(|| DependencyError::UnknownTask(candidate.predecessor_id.clone()))?;
    let successor = graph
        .node(&candidate.successor_id)
        .ok_or_else(|| DependencyError::UnknownTask(candidate.successor_id.clone()))?;

    if predecessor == successor {
        return Err(DependencyError::SelfLoop(candidate.predecessor_id.clone()));
    }

    if graph
        .outgoing(predecessor)
        .any(|edge| edge.successor == successor)
    {
        return Err(DependencyError::Duplicate {
            predecessor: candidate.predecessor_id.clone(),
            successor: candidate.successor_id.clone(),
        });
    }

    if graph.reaches(successor, predecessor) {
        return Err(DependencyError::WouldCreateCycle {
            predecessor: candidate.predecessor_id.clone(),
            successor: candidate.successor_id.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DependencyType;

    fn tasks() -> Vec<Task> {
        ["a", "b", "c"]
            .into_iter()
            .map(|id| Task::new(id, Some(1)))
            .collect()
    }

    fn make_dep(pred: &str, succ: &str, kind: DependencyType) -> Dependency {
        Dependency::new(format!("{pred}->{succ}"), pred, succ, kind, 0)
    }

    #[test]
    fn test_valid_dependency() {
        let existing = vec![make_dep("a", "b", DependencyType::FinishToStart)];
        let candidate = make_dep("b", "c", DependencyType::StartToStart);
        assert_eq!(check_dependency(&tasks(), &existing, &candidate), Ok(()));
    }

    #[test]
    fn test_unknown_task() {
        let candidate = make_dep("a", "ghost", DependencyType::FinishToStart);
        assert_eq!(
            check_dependency(&tasks(), &[], &candidate),
            Err(DependencyError::UnknownTask("ghost".to_string()))
        );
    }

    #[test]
    fn test_self_loop() {
        let candidate = make_dep("b", "b", DependencyType::FinishToStart);
        assert_eq!(
            check_dependency(&tasks(), &[], &candidate),
            Err(DependencyError::SelfLoop("b".to_string()))
        );
    }

    #[test]
    fn test_duplicate_pair_regardless_of_type() {
        let existing = vec![make_dep("a", "b", DependencyType::FinishToStart)];
        let candidate = make_dep("a", "b", DependencyType::FinishToFinish);
        let err = check_dependency(&tasks(), &existing, &candidate).unwrap_err();
        assert!(matches!(err, DependencyError::Duplicate { .. }));
        assert_eq!(
            err.to_string(),
            "Dependency from a to b already exists"
        );
    }

    #[test]
    fn test_would_create_cycle() {
        let existing = vec![
            make_dep("a", "b", DependencyType::FinishToStart),
            make_dep("b", "c", DependencyType::FinishToStart),
        ];
        let candidate = make_dep("c", "a", DependencyType::FinishToStart);
        assert!(matches!(
            check_dependency(&tasks(), &existing, &candidate),
            Err(DependencyError::WouldCreateCycle { .. })
        ));
    }

    #[test]
    fn test_reverse_pair_is_a_cycle_not_a_duplicate() {
        let existing = vec![make_dep("a", "b", DependencyType::FinishToStart)];
        let candidate = make_dep("b", "a", DependencyType::FinishToStart);
        assert!(matches!(
            check_dependency(&tasks(), &existing, &candidate),
            Err(DependencyError::WouldCreateCycle { .. })
        ));
    }
}
