//! Project validation.
//!
//! Turns a list of activities into a [`ProjectGraph`] after checking, in order:
//! 1. The project is not empty
//! 2. Activity ids are unique
//! 3. Durations are finite and non-negative
//! 4. Every dependency names an activity in the project
//!
//! Acyclicity is checked by `topology::topological_order`, which needs the graph.

use rustc_hash::FxHashSet;

use crate::error::CpmError;
use crate::interner::{ActivityIdx, ActivityIndex};
use crate::models::Activity;

/// Validated, index-based view of a project.
///
/// All vectors are indexed by [`ActivityIdx`] (input position).
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    pub index: ActivityIndex,
    pub durations: Vec<f64>,
    /// Direct dependencies of each activity, duplicates removed, in listed order.
    pub deps: Vec<Vec<ActivityIdx>>,
    /// Direct dependents of each activity, in input order of the dependent.
    pub dependents: Vec<Vec<ActivityIdx>>,
}

impl ProjectGraph {
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn is_root(&self, idx: ActivityIdx) -> bool {
        self.deps.get(idx).is_some_and(|d| d.is_empty())
    }

    pub fn is_sink(&self, idx: ActivityIdx) -> bool {
        self.dependents.get(idx).is_some_and(|d| d.is_empty())
    }

    pub fn id(&self, idx: ActivityIdx) -> &str {
        self.index.resolve(idx).unwrap_or_default()
    }
}

/// Validate a project and build its dependency graph.
pub fn build_graph(activities: &[Activity]) -> Result<ProjectGraph, CpmError> {
    if activities.is_empty() {
        return Err(CpmError::EmptyProject);
    }

    let mut index = ActivityIndex::with_capacity(activities.len());
    for activity in activities {
        if index.insert(&activity.id).is_none() {
            return Err(CpmError::DuplicateActivity {
                activity: activity.id.clone(),
            });
        }
    }

    let mut durations = Vec::with_capacity(activities.len());
    for activity in activities {
        let duration = activity.duration_days;
        if !duration.is_finite() || duration < 0.0 {
            return Err(CpmError::InvalidDuration {
                activity: activity.id.clone(),
                value: duration.to_string(),
            });
        }
        durations.push(duration);
    }

    let mut deps: Vec<Vec<ActivityIdx>> = vec![Vec::new(); activities.len()];
    let mut dependents: Vec<Vec<ActivityIdx>> = vec![Vec::new(); activities.len()];

    for (idx, activity) in activities.iter().enumerate() {
        let mut seen: FxHashSet<ActivityIdx> = FxHashSet::default();
        for dep_id in &activity.dependencies {
            let Some(dep_idx) = index.get(dep_id) else {
                return Err(CpmError::UnknownDependency {
                    activity: activity.id.clone(),
                    dependency: dep_id.clone(),
                });
            };
            if seen.insert(dep_idx) {
                deps[idx].push(dep_idx);
                dependents[dep_idx].push(idx);
            }
        }
    }

    Ok(ProjectGraph {
        index,
        durations,
        deps,
        dependents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(id: &str, duration: f64, deps: &[&str]) -> Activity {
        Activity::new(id, duration).with_dependencies(deps.iter().copied())
    }

    #[test]
    fn test_builds_adjacency_both_ways() {
        let activities = vec![
            make_activity("A", 5.0, &[]),
            make_activity("B", 7.0, &["A"]),
            make_activity("C", 6.0, &["A"]),
            make_activity("D", 1.0, &["B", "C"]),
        ];
        let graph = build_graph(&activities).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.deps[3], vec![1, 2]);
        assert_eq!(graph.dependents[0], vec![1, 2]);
        assert!(graph.is_root(0));
        assert!(graph.is_sink(3));
        assert!(!graph.is_sink(0));
        assert_eq!(graph.id(2), "C");
    }

    #[test]
    fn test_empty_project() {
        assert_eq!(build_graph(&[]).unwrap_err(), CpmError::EmptyProject);
    }

    #[test]
    fn test_duplicate_activity() {
        let activities = vec![make_activity("A", 1.0, &[]), make_activity("A", 2.0, &[])];
        assert_eq!(
            build_graph(&activities).unwrap_err(),
            CpmError::DuplicateActivity {
                activity: "A".to_string()
            }
        );
    }

    #[test]
    fn test_negative_duration() {
        let activities = vec![make_activity("A", -1.0, &[])];
        assert!(matches!(
            build_graph(&activities),
            Err(CpmError::InvalidDuration { activity, .. }) if activity == "A"
        ));
    }

    #[test]
    fn test_nan_duration() {
        let activities = vec![make_activity("A", 1.0, &[]), make_activity("B", f64::NAN, &[])];
        assert!(matches!(
            build_graph(&activities),
            Err(CpmError::InvalidDuration { activity, .. }) if activity == "B"
        ));
    }

    #[test]
    fn test_zero_duration_allowed() {
        let activities = vec![make_activity("M", 0.0, &[])];
        assert!(build_graph(&activities).is_ok());
    }

    #[test]
    fn test_unknown_dependency() {
        let activities = vec![make_activity("X", 1.0, &["Y"])];
        assert_eq!(
            build_graph(&activities).unwrap_err(),
            CpmError::UnknownDependency {
                activity: "X".to_string(),
                dependency: "Y".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_dependency_collapsed() {
        let activities = vec![make_activity("A", 1.0, &[]), make_activity("B", 1.0, &["A", "A"])];
        let graph = build_graph(&activities).unwrap();
        assert_eq!(graph.deps[1], vec![0]);
        assert_eq!(graph.dependents[0], vec![1]);
    }
}
