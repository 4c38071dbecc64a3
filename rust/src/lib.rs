//! Critical Path Method engine for project scheduling.
//!
//! Takes an activity list (id, duration in days, dependencies), validates it,
//! and computes earliest/latest start and finish times, slack and the critical
//! path. Everything is also exposed to Python as the `rust` extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod calendar;
mod config;
pub mod cpm;
mod error;
pub mod interner;
pub mod logging;
mod models;
pub mod network;
pub mod rows;
pub mod topology;
pub mod validation;

pub use calendar::{project_finish_date, schedule_dates, DatedActivity};
pub use config::{CalendarConfig, CpmConfig};
pub use cpm::{compute, compute_with_config};
pub use error::CpmError;
pub use models::{Activity, ActivityRow, ScheduleResult, ScheduledActivity};
pub use network::{network_edges, timeline_bars, NetworkEdge, TimelineBar};
pub use rows::{check_columns, parse_rows, REQUIRED_COLUMNS};

impl From<CpmError> for PyErr {
    fn from(err: CpmError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Compute the critical path schedule for a list of activities.
///
/// # Arguments
/// * `activities` - List of Activity objects
/// * `config` - Optional CpmConfig (tolerance, chain limit, verbosity)
///
/// # Returns
/// * ScheduleResult with one row per activity, the makespan and critical chains
///
/// # Raises
/// * ValueError on empty projects, duplicate ids, invalid durations,
///   unknown dependencies or dependency cycles
#[pyfunction]
#[pyo3(signature = (activities, config=None))]
fn compute_schedule(
    activities: Vec<Activity>,
    config: Option<CpmConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    Ok(compute_with_config(&activities, &config)?)
}

/// Convert loosely-typed table rows into Activity objects.
///
/// # Raises
/// * ValueError if a row has data but no id, or a duration that is not a
///   non-negative number
#[pyfunction]
fn parse_activity_rows(rows: Vec<ActivityRow>) -> PyResult<Vec<Activity>> {
    Ok(parse_rows(&rows)?)
}

/// Check that an imported table header has the required columns.
///
/// # Raises
/// * ValueError naming the missing columns
#[pyfunction]
#[pyo3(name = "check_columns")]
fn py_check_columns(columns: Vec<String>) -> PyResult<()> {
    Ok(check_columns(&columns)?)
}

/// Dependency edges for a network diagram, critical edges flagged.
#[pyfunction]
#[pyo3(name = "network_edges")]
fn py_network_edges(result: ScheduleResult) -> Vec<NetworkEdge> {
    network_edges(&result)
}

/// Bars for a timeline chart, one per activity.
#[pyfunction]
#[pyo3(name = "timeline_bars")]
fn py_timeline_bars(result: ScheduleResult) -> Vec<TimelineBar> {
    timeline_bars(&result)
}

/// Calendar dates for every activity of a schedule.
///
/// # Raises
/// * ValueError if a date falls outside the supported range
#[pyfunction]
#[pyo3(name = "schedule_dates")]
fn py_schedule_dates(
    result: ScheduleResult,
    calendar: CalendarConfig,
) -> PyResult<Vec<DatedActivity>> {
    Ok(schedule_dates(&result, &calendar)?)
}

/// Calendar date on which the project is done.
#[pyfunction]
#[pyo3(name = "project_finish_date")]
fn py_project_finish_date(result: ScheduleResult, calendar: CalendarConfig) -> PyResult<NaiveDate> {
    Ok(project_finish_date(&result, &calendar)?)
}

/// The cpm_scheduler.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Activity>()?;
    m.add_class::<ActivityRow>()?;
    m.add_class::<ScheduledActivity>()?;
    m.add_class::<ScheduleResult>()?;

    // Renderer-facing types
    m.add_class::<NetworkEdge>()?;
    m.add_class::<TimelineBar>()?;
    m.add_class::<DatedActivity>()?;

    // Config types
    m.add_class::<CpmConfig>()?;
    m.add_class::<CalendarConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(parse_activity_rows, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_columns, m)?)?;
    m.add_function(wrap_pyfunction!(py_network_edges, m)?)?;
    m.add_function(wrap_pyfunction!(py_timeline_bars, m)?)?;
    m.add_function(wrap_pyfunction!(py_schedule_dates, m)?)?;
    m.add_function(wrap_pyfunction!(py_project_finish_date, m)?)?;

    m.add("REQUIRED_COLUMNS", REQUIRED_COLUMNS.to_vec())?;

    Ok(())
}
