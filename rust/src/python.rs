//! PyO3 bindings for the engine.
//!
//! Wrapper classes convert to the engine's own models at the boundary; maps
//! are returned as std `HashMap`/`HashSet` for PyO3 interface compatibility.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::config::{DurationPolicy, EngineConfig};
use crate::models::{Dependency, DependencyType, Task};
use crate::{calculate_critical_path, check_dependency, compute_levels, schedule_relative};

/// A task snapshot entry (PyO3 wrapper).
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub duration: Option<i64>,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (id, duration=None))]
    fn new(id: String, duration: Option<i64>) -> Self {
        Self { id, duration }
    }

    fn __repr__(&self) -> String {
        format!("Task(id={:?}, duration={:?})", self.id, self.duration)
    }
}

impl From<&PyTask> for Task {
    fn from(task: &PyTask) -> Self {
        Task::new(task.id.clone(), task.duration)
    }
}

/// A dependency edge (PyO3 wrapper). `kind` is one of "FS", "SS", "FF", "SF".
#[pyclass(name = "Dependency")]
#[derive(Clone, Debug)]
pub struct PyDependency {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub predecessor_id: String,
    #[pyo3(get, set)]
    pub successor_id: String,
    #[pyo3(get, set)]
    pub kind: String,
    #[pyo3(get, set)]
    pub lag: i64,
}

#[pymethods]
impl PyDependency {
    #[new]
    #[pyo3(signature = (id, predecessor_id, successor_id, kind="FS".to_string(), lag=0))]
    fn new(
        id: String,
        predecessor_id: String,
        successor_id: String,
        kind: String,
        lag: i64,
    ) -> PyResult<Self> {
        // Reject bad codes at construction rather than at scheduling time
        kind.parse::<DependencyType>()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            id,
            predecessor_id,
            successor_id,
            kind,
            lag,
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "Dependency(id={:?}, {:?} -{}-> {:?}, lag={})",
            self.id, self.predecessor_id, self.kind, self.successor_id, self.lag
        )
    }
}

impl TryFrom<&PyDependency> for Dependency {
    type Error = PyErr;

    fn try_from(dep: &PyDependency) -> PyResult<Self> {
        let kind = dep
            .kind
            .parse::<DependencyType>()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(Dependency::new(
            dep.id.clone(),
            dep.predecessor_id.clone(),
            dep.successor_id.clone(),
            kind,
            dep.lag,
        ))
    }
}

/// Relative schedule result (PyO3 wrapper).
#[pyclass(name = "ScheduleResult")]
#[derive(Clone, Debug, Default)]
pub struct PyScheduleResult {
    /// task_id -> (relative_start, duration, relative_end)
    #[pyo3(get)]
    pub schedules: HashMap<String, (i64, i64, i64)>,
    #[pyo3(get)]
    pub has_cycle: bool,
    #[pyo3(get)]
    pub total_days: i64,
}

#[pymethods]
impl PyScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(schedules={}, has_cycle={}, total_days={})",
            self.schedules.len(),
            self.has_cycle,
            self.total_days
        )
    }
}

/// Critical path result (PyO3 wrapper).
#[pyclass(name = "CriticalPathResult")]
#[derive(Clone, Debug, Default)]
pub struct PyCriticalPathResult {
    #[pyo3(get)]
    pub critical_task_ids: HashSet<String>,
    #[pyo3(get)]
    pub task_floats: HashMap<String, i64>,
    #[pyo3(get)]
    pub project_duration: i64,
}

#[pymethods]
impl PyCriticalPathResult {
    fn __repr__(&self) -> String {
        format!(
            "CriticalPathResult(critical={}, project_duration={})",
            self.critical_task_ids.len(),
            self.project_duration
        )
    }
}

fn convert_inputs(
    tasks: &[PyTask],
    dependencies: &[PyDependency],
) -> PyResult<(Vec<Task>, Vec<Dependency>)> {
    let tasks = tasks.iter().map(Task::from).collect();
    let dependencies = dependencies
        .iter()
        .map(Dependency::try_from)
        .collect::<PyResult<Vec<_>>>()?;
    Ok((tasks, dependencies))
}

fn make_config(verbosity: u8, clamp_durations: bool) -> EngineConfig {
    let policy = if clamp_durations {
        DurationPolicy::ClampToOne
    } else {
        DurationPolicy::Propagate
    };
    EngineConfig::default()
        .with_verbosity(verbosity)
        .with_duration_policy(policy)
}

/// Compute the dependency-only relative schedule.
#[pyfunction]
#[pyo3(signature = (tasks, dependencies, verbosity=0, clamp_durations=false))]
fn compute_relative_schedule(
    tasks: Vec<PyTask>,
    dependencies: Vec<PyDependency>,
    verbosity: u8,
    clamp_durations: bool,
) -> PyResult<PyScheduleResult> {
    let (tasks, dependencies) = convert_inputs(&tasks, &dependencies)?;
    let result = schedule_relative(&tasks, &dependencies, &make_config(verbosity, clamp_durations));

    Ok(PyScheduleResult {
        schedules: result
            .schedules
            .into_iter()
            .map(|(id, s)| (id, (s.relative_start, s.duration, s.relative_end)))
            .collect(),
        has_cycle: result.has_cycle,
        total_days: result.total_days,
    })
}

/// Compute float, critical tasks and project duration.
#[pyfunction]
#[pyo3(signature = (tasks, dependencies, verbosity=0, clamp_durations=false))]
fn compute_critical_path(
    tasks: Vec<PyTask>,
    dependencies: Vec<PyDependency>,
    verbosity: u8,
    clamp_durations: bool,
) -> PyResult<PyCriticalPathResult> {
    let (tasks, dependencies) = convert_inputs(&tasks, &dependencies)?;
    let result =
        calculate_critical_path(&tasks, &dependencies, &make_config(verbosity, clamp_durations));

    Ok(PyCriticalPathResult {
        critical_task_ids: result.critical_task_ids.into_iter().collect(),
        task_floats: result.task_floats.into_iter().collect(),
        project_duration: result.project_duration,
    })
}

/// Compute topological levels. Returns (levels, task_level).
#[pyfunction]
#[pyo3(name = "compute_levels")]
fn py_compute_levels(
    tasks: Vec<PyTask>,
    dependencies: Vec<PyDependency>,
) -> PyResult<(Vec<Vec<String>>, HashMap<String, usize>)> {
    let (tasks, dependencies) = convert_inputs(&tasks, &dependencies)?;
    let result = compute_levels(&tasks, &dependencies, &EngineConfig::default());
    Ok((result.levels, result.task_level.into_iter().collect()))
}

/// Validate a new dependency against the snapshot.
///
/// # Raises
/// * ValueError if the dependency is rejected
#[pyfunction]
#[pyo3(name = "check_dependency")]
fn py_check_dependency(
    tasks: Vec<PyTask>,
    dependencies: Vec<PyDependency>,
    candidate: PyDependency,
) -> PyResult<()> {
    let (tasks, dependencies) = convert_inputs(&tasks, &dependencies)?;
    let candidate = Dependency::try_from(&candidate)?;
    check_dependency(&tasks, &dependencies, &candidate)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The gantty_engine Python module.
#[pymodule]
fn gantty_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PyDependency>()?;
    m.add_class::<PyScheduleResult>()?;
    m.add_class::<PyCriticalPathResult>()?;

    m.add_function(wrap_pyfunction!(compute_relative_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(compute_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_levels, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_dependency, m)?)?;

    Ok(())
}
