//! Renderer-facing projections of a schedule.
//!
//! A network diagram needs the dependency edges with critical ones marked;
//! a timeline chart needs one bar per activity keyed by ES/EF.

use pyo3::prelude::*;
use rustc_hash::FxHashMap;

use crate::models::{ScheduleResult, ScheduledActivity};

/// A dependency edge in the project network (dependency -> dependent).
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkEdge {
    #[pyo3(get)]
    pub source: String,
    #[pyo3(get)]
    pub target: String,
    /// Both ends are critical and `target` starts the moment `source` finishes.
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl NetworkEdge {
    fn __repr__(&self) -> String {
        format!(
            "NetworkEdge({:?} -> {:?}, critical={})",
            self.source, self.target, self.critical
        )
    }
}

/// One bar of a timeline (Gantt) chart, in project day offsets.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineBar {
    #[pyo3(get)]
    pub activity: String,
    #[pyo3(get)]
    pub start: f64,
    #[pyo3(get)]
    pub finish: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl TimelineBar {
    fn __repr__(&self) -> String {
        format!(
            "TimelineBar({:?}, start={}, finish={}, critical={})",
            self.activity, self.start, self.finish, self.critical
        )
    }
}

/// List every dependency edge of a computed schedule.
///
/// Edges are grouped by dependent in topological order; within a dependent they
/// follow its dependency list. An edge is critical only when it actually carries
/// the critical timing: two critical activities joined by an edge with a gap
/// (possible when both sit on different critical chains) are not highlighted.
/// Tightness is judged with the tolerance the schedule was computed with.
pub fn network_edges(result: &ScheduleResult) -> Vec<NetworkEdge> {
    let tolerance = result.critical_tolerance;
    let rows: FxHashMap<&str, &ScheduledActivity> = result
        .activities
        .iter()
        .map(|a| (a.id.as_str(), a))
        .collect();

    let mut edges = Vec::new();
    for id in &result.topological_order {
        let Some(&dependent) = rows.get(id.as_str()) else {
            continue;
        };
        for dep_id in &dependent.dependencies {
            let Some(&dependency) = rows.get(dep_id.as_str()) else {
                continue;
            };
            let critical = dependency.is_critical
                && dependent.is_critical
                && (dependent.earliest_start - dependency.earliest_finish).abs() <= tolerance;
            edges.push(NetworkEdge {
                source: dependency.id.clone(),
                target: dependent.id.clone(),
                critical,
            });
        }
    }
    edges
}

/// One timeline bar per activity, in input order.
pub fn timeline_bars(result: &ScheduleResult) -> Vec<TimelineBar> {
    result
        .activities
        .iter()
        .map(|a| TimelineBar {
            activity: a.id.clone(),
            start: a.earliest_start,
            finish: a.earliest_finish,
            slack: a.slack,
            critical: a.is_critical,
        })
        .collect()
}
