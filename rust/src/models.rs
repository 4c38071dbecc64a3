//! Core data types for the CPM engine.

use pyo3::prelude::*;

use crate::config::CpmConfig;

/// An activity in a project: an id, a duration in days and the ids it depends on.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub duration_days: f64,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
}

impl Activity {
    pub fn new(id: impl Into<String>, duration_days: f64) -> Self {
        Self {
            id: id.into(),
            duration_days,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this activity can start at project time zero.
    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (id, duration_days, dependencies=None))]
    fn py_new(id: String, duration_days: f64, dependencies: Option<Vec<String>>) -> Self {
        Self {
            id,
            duration_days,
            dependencies: dependencies.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={:?}, duration_days={}, deps={:?})",
            self.id, self.duration_days, self.dependencies
        )
    }
}

/// A loosely-typed input row, as read from an editable table or CSV file.
///
/// Every cell is optional text; `rows::parse_rows` turns these into [`Activity`] values.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityRow {
    #[pyo3(get, set)]
    pub activity: Option<String>,
    #[pyo3(get, set)]
    pub duration: Option<String>,
    #[pyo3(get, set)]
    pub dependencies: Option<String>,
}

impl ActivityRow {
    pub fn new(activity: &str, duration: &str, dependencies: &str) -> Self {
        Self {
            activity: Some(activity.to_string()),
            duration: Some(duration.to_string()),
            dependencies: Some(dependencies.to_string()),
        }
    }
}

#[pymethods]
impl ActivityRow {
    #[new]
    #[pyo3(signature = (activity=None, duration=None, dependencies=None))]
    fn py_new(
        activity: Option<String>,
        duration: Option<String>,
        dependencies: Option<String>,
    ) -> Self {
        Self {
            activity,
            duration,
            dependencies,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ActivityRow(activity={:?}, duration={:?}, dependencies={:?})",
            self.activity, self.duration, self.dependencies
        )
    }
}

/// Scheduling bounds computed for one activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledActivity {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub duration_days: f64,
    #[pyo3(get)]
    pub dependencies: Vec<String>,
    /// Earliest start (forward pass).
    #[pyo3(get)]
    pub earliest_start: f64,
    /// Earliest finish = earliest_start + duration.
    #[pyo3(get)]
    pub earliest_finish: f64,
    /// Latest start (backward pass).
    #[pyo3(get)]
    pub latest_start: f64,
    /// Latest finish = latest_start + duration.
    #[pyo3(get)]
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start; never negative.
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl ScheduledActivity {
    /// Display label used by the results table and timeline legend.
    pub fn status(&self) -> &'static str {
        if self.is_critical {
            "Critical"
        } else {
            "Non-Critical"
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledActivity(id={:?}, es={}, ef={}, ls={}, lf={}, slack={})",
            self.id,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

/// Result of a CPM computation. Recomputed from scratch for every project snapshot.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleResult {
    /// One row per activity, in input order.
    #[pyo3(get)]
    pub activities: Vec<ScheduledActivity>,
    /// Finish time of the last sink to complete.
    #[pyo3(get)]
    pub makespan: f64,
    /// Activity ids in the topological order used for the passes.
    #[pyo3(get)]
    pub topological_order: Vec<String>,
    /// Union of all zero-slack activities, in topological order.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Every root-to-sink chain of critical activities, each listed in order.
    #[pyo3(get)]
    pub critical_chains: Vec<Vec<String>>,
    /// Set when `critical_chains` was cut short by `CpmConfig::max_critical_chains`.
    #[pyo3(get)]
    pub chains_truncated: bool,
    /// Tolerance the schedule was computed with; projections reuse it.
    #[pyo3(get)]
    pub critical_tolerance: f64,
}

impl Default for ScheduleResult {
    fn default() -> Self {
        Self {
            activities: Vec::new(),
            makespan: 0.0,
            topological_order: Vec::new(),
            critical_path: Vec::new(),
            critical_chains: Vec::new(),
            chains_truncated: false,
            critical_tolerance: CpmConfig::default().critical_tolerance,
        }
    }
}

#[pymethods]
impl ScheduleResult {
    /// Look up the row for an activity id.
    pub fn get(&self, id: &str) -> Option<ScheduledActivity> {
        self.activity(id).cloned()
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.activity(id).is_some_and(|a| a.is_critical)
    }

    fn __len__(&self) -> usize {
        self.activities.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(activities={}, makespan={}, critical={})",
            self.activities.len(),
            self.makespan,
            self.critical_path.len()
        )
    }
}

impl ScheduleResult {
    /// Borrowing lookup of an activity row.
    pub fn activity(&self, id: &str) -> Option<&ScheduledActivity> {
        self.activities.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(id: &str, es: f64, duration: f64, slack: f64) -> ScheduledActivity {
        ScheduledActivity {
            id: id.to_string(),
            duration_days: duration,
            dependencies: vec![],
            earliest_start: es,
            earliest_finish: es + duration,
            latest_start: es + slack,
            latest_finish: es + slack + duration,
            slack,
            is_critical: slack == 0.0,
        }
    }

    #[test]
    fn test_activity_builder() {
        let activity = Activity::new("F", 5.0).with_dependencies(["D", "E"]);
        assert_eq!(activity.id, "F");
        assert_eq!(activity.dependencies, vec!["D", "E"]);
        assert!(!activity.is_root());
        assert!(Activity::new("A", 5.0).is_root());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(make_row("A", 0.0, 5.0, 0.0).status(), "Critical");
        assert_eq!(make_row("B", 5.0, 7.0, 1.0).status(), "Non-Critical");
    }

    #[test]
    fn test_result_lookup() {
        let result = ScheduleResult {
            activities: vec![make_row("A", 0.0, 5.0, 0.0), make_row("B", 5.0, 7.0, 1.0)],
            makespan: 12.0,
            ..ScheduleResult::default()
        };
        assert!(result.is_critical("A"));
        assert!(!result.is_critical("B"));
        assert!(!result.is_critical("missing"));
        assert_eq!(result.get("B").map(|b| b.earliest_finish), Some(12.0));
        assert!(result.activity("Z").is_none());
    }
}
