//! Error types for project validation and CPM computation.

use thiserror::Error;

/// Errors that can occur while validating a project or computing its schedule.
///
/// Every validation failure names the offending activity (or activities) so the
/// caller can point the user at the exact row to fix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CpmError {
    #[error("Activity '{activity}' has an invalid duration: {value:?} (expected a non-negative number of days)")]
    InvalidDuration { activity: String, value: String },

    #[error("Activity '{activity}' depends on unknown activity '{dependency}'")]
    UnknownDependency { activity: String, dependency: String },

    #[error("Circular dependency detected: {}", format_cycle(.activities))]
    Cycle { activities: Vec<String> },

    #[error("Project has no activities")]
    EmptyProject,

    #[error("Duplicate activity ID: '{activity}' (activity IDs must be unique)")]
    DuplicateActivity { activity: String },

    #[error("Row {row} has data but no activity ID")]
    MissingActivityId { row: usize },

    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Dates for activity '{activity}' fall outside the supported calendar range")]
    DateOutOfRange { activity: String },

    #[error("Project finish date falls outside the supported calendar range")]
    ProjectFinishOutOfRange,

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

fn format_cycle(activities: &[String]) -> String {
    match activities.first() {
        // Close the loop so "A -> B -> A" reads as a cycle
        Some(first) => format!("{} -> {}", activities.join(" -> "), first),
        None => "dependency graph is not acyclic".to_string(),
    }
}

impl CpmError {
    /// Activity IDs this error refers to, for highlighting offending rows.
    pub fn activity_ids(&self) -> Vec<&str> {
        match self {
            Self::InvalidDuration { activity, .. }
            | Self::UnknownDependency { activity, .. }
            | Self::DuplicateActivity { activity }
            | Self::DateOutOfRange { activity } => vec![activity.as_str()],
            Self::Cycle { activities } => activities.iter().map(String::as_str).collect(),
            Self::EmptyProject
            | Self::ProjectFinishOutOfRange
            | Self::MissingActivityId { .. }
            | Self::MissingColumns { .. }
            | Self::InvariantViolation(_) => Vec::new(),
        }
    }
}
