//! Configuration types for the CPM engine.

use chrono::NaiveDate;
use pyo3::prelude::*;

/// Configuration for a CPM computation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CpmConfig {
    /// Verbosity level: 0=silent, 1=summary, 2=passes, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Absolute tolerance when comparing slack against zero and finish/start times
    #[pyo3(get, set)]
    pub critical_tolerance: f64,
    /// Upper bound on enumerated critical chains (None = unlimited)
    #[pyo3(get, set)]
    pub max_critical_chains: Option<usize>,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            critical_tolerance: 1e-9,
            max_critical_chains: Some(1000),
        }
    }
}

impl CpmConfig {
    /// Whether `value` is zero within the configured tolerance.
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.critical_tolerance
    }
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, critical_tolerance=None, max_critical_chains=1000))]
    fn py_new(
        verbosity: Option<u8>,
        critical_tolerance: Option<f64>,
        max_critical_chains: Option<usize>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            critical_tolerance: critical_tolerance.unwrap_or(defaults.critical_tolerance),
            max_critical_chains,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CpmConfig(verbosity={}, critical_tolerance={}, max_critical_chains={:?})",
            self.verbosity, self.critical_tolerance, self.max_critical_chains
        )
    }
}

/// Configuration for mapping day offsets onto calendar dates.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CalendarConfig {
    /// Calendar date of project day zero
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    /// Report finish dates as the last day worked rather than the day after
    #[pyo3(get, set)]
    pub inclusive_end: bool,
}

impl CalendarConfig {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            inclusive_end: true,
        }
    }
}

#[pymethods]
impl CalendarConfig {
    #[new]
    #[pyo3(signature = (start_date, inclusive_end=true))]
    fn py_new(start_date: NaiveDate, inclusive_end: bool) -> Self {
        Self {
            start_date,
            inclusive_end,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CalendarConfig(start_date={}, inclusive_end={})",
            self.start_date, self.inclusive_end
        )
    }
}
