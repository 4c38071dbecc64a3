//! Critical Path Method: forward pass, backward pass, slack and critical chains.

use crate::config::CpmConfig;
use crate::error::CpmError;
use crate::interner::ActivityIdx;
use crate::models::{Activity, ScheduleResult, ScheduledActivity};
use crate::topology::topological_order;
use crate::validation::{build_graph, ProjectGraph};
use crate::{log_debug, log_invariant, log_passes, log_summary};

/// Compute the schedule for a project with the default configuration.
pub fn compute(activities: &[Activity]) -> Result<ScheduleResult, CpmError> {
    compute_with_config(activities, &CpmConfig::default())
}

/// Compute earliest/latest times, slack and the critical path for a project.
///
/// The project is validated first; on any validation failure no partial
/// result is produced.
///
/// # Arguments
/// * `activities` - The project, one entry per activity
/// * `config` - Tolerance, chain enumeration bound and verbosity
///
/// # Returns
/// * `Ok(ScheduleResult)` with one row per activity in input order
/// * `Err(CpmError)` naming the offending activities, or `InvariantViolation`
///   if the computed schedule is internally inconsistent
pub fn compute_with_config(
    activities: &[Activity],
    config: &CpmConfig,
) -> Result<ScheduleResult, CpmError> {
    let graph = build_graph(activities)?;
    let order = topological_order(&graph)?;
    log_debug!(
        config.verbosity,
        "cpm: topological order {:?}",
        graph.index.resolve_all(&order)
    );

    let (earliest_start, earliest_finish) = forward_pass(&graph, &order, config);

    let makespan = (0..graph.len())
        .filter(|&idx| graph.is_sink(idx))
        .map(|idx| earliest_finish[idx])
        .fold(0.0_f64, f64::max);

    let (mut latest_start, mut latest_finish) = backward_pass(&graph, &order, makespan, config);

    let mut slack = vec![0.0; graph.len()];
    let mut critical = vec![false; graph.len()];
    for idx in 0..graph.len() {
        let raw = latest_start[idx] - earliest_start[idx];
        if raw < -config.critical_tolerance {
            log_invariant!("activity '{}' has negative slack {}", graph.id(idx), raw);
            return Err(CpmError::InvariantViolation(format!(
                "activity '{}' has negative slack {}",
                graph.id(idx),
                raw
            )));
        }
        // Rounding noise below the tolerance is reported as exact zero, and the
        // latest times of a critical activity are its earliest times
        if config.is_zero(raw) {
            critical[idx] = true;
            latest_start[idx] = earliest_start[idx];
            latest_finish[idx] = earliest_finish[idx];
        } else {
            slack[idx] = raw;
        }
    }

    let (chains, chains_truncated) = critical_chains(
        &graph,
        &critical,
        &earliest_start,
        &earliest_finish,
        config,
    )?;

    let critical_path: Vec<String> = order
        .iter()
        .copied()
        .filter(|&idx| critical[idx])
        .filter_map(|idx| graph.index.resolve(idx))
        .map(str::to_string)
        .collect();

    let rows: Vec<ScheduledActivity> = activities
        .iter()
        .enumerate()
        .map(|(idx, activity)| ScheduledActivity {
            id: activity.id.clone(),
            duration_days: activity.duration_days,
            dependencies: graph.index.resolve_all(&graph.deps[idx]),
            earliest_start: earliest_start[idx],
            earliest_finish: earliest_finish[idx],
            latest_start: latest_start[idx],
            latest_finish: latest_finish[idx],
            slack: slack[idx],
            is_critical: critical[idx],
        })
        .collect();

    log_summary!(
        config.verbosity,
        "cpm: {} activities, makespan {}, {} critical in {} chain(s){}",
        rows.len(),
        makespan,
        critical_path.len(),
        chains.len(),
        if chains_truncated { " (truncated)" } else { "" }
    );

    Ok(ScheduleResult {
        activities: rows,
        makespan,
        topological_order: graph.index.resolve_all(&order),
        critical_path,
        critical_chains: chains
            .iter()
            .map(|chain| graph.index.resolve_all(chain))
            .collect(),
        chains_truncated,
        critical_tolerance: config.critical_tolerance,
    })
}

/// Earliest start/finish for every activity, in topological order.
///
/// Roots start at zero; every other activity starts when its last dependency finishes.
fn forward_pass(
    graph: &ProjectGraph,
    order: &[ActivityIdx],
    config: &CpmConfig,
) -> (Vec<f64>, Vec<f64>) {
    let mut earliest_start = vec![0.0; graph.len()];
    let mut earliest_finish = vec![0.0; graph.len()];

    for &idx in order {
        let start = graph.deps[idx]
            .iter()
            .map(|&dep| earliest_finish[dep])
            .fold(0.0_f64, f64::max);
        earliest_start[idx] = start;
        earliest_finish[idx] = start + graph.durations[idx];

        log_passes!(
            config.verbosity,
            "cpm: forward {} ES={} EF={}",
            graph.id(idx),
            earliest_start[idx],
            earliest_finish[idx]
        );
    }

    (earliest_start, earliest_finish)
}

/// Latest start/finish for every activity, in reverse topological order.
///
/// Sinks must finish by the makespan; every other activity must finish before
/// its earliest-constrained dependent has to start.
fn backward_pass(
    graph: &ProjectGraph,
    order: &[ActivityIdx],
    makespan: f64,
    config: &CpmConfig,
) -> (Vec<f64>, Vec<f64>) {
    let mut latest_start = vec![0.0; graph.len()];
    let mut latest_finish = vec![0.0; graph.len()];

    for &idx in order.iter().rev() {
        let finish = graph.dependents[idx]
            .iter()
            .map(|&dependent| latest_start[dependent])
            .reduce(f64::min)
            .unwrap_or(makespan);
        latest_finish[idx] = finish;
        latest_start[idx] = finish - graph.durations[idx];

        log_passes!(
            config.verbosity,
            "cpm: backward {} LS={} LF={}",
            graph.id(idx),
            latest_start[idx],
            latest_finish[idx]
        );
    }

    (latest_start, latest_finish)
}

/// Enumerate every root-to-sink chain of critical activities.
///
/// A chain follows an edge only when both ends are critical and the dependent
/// starts exactly when the dependency finishes. Roots are visited in input
/// order and dependents in input order, so the result is deterministic.
///
/// Every critical activity lies on some chain and every chain ends at a sink;
/// anything else means the passes disagree and is reported as an invariant
/// violation.
fn critical_chains(
    graph: &ProjectGraph,
    critical: &[bool],
    earliest_start: &[f64],
    earliest_finish: &[f64],
    config: &CpmConfig,
) -> Result<(Vec<Vec<ActivityIdx>>, bool), CpmError> {
    let tight_successors: Vec<Vec<ActivityIdx>> = (0..graph.len())
        .map(|idx| {
            if !critical[idx] {
                return Vec::new();
            }
            graph.dependents[idx]
                .iter()
                .copied()
                .filter(|&next| {
                    critical[next] && config.is_zero(earliest_start[next] - earliest_finish[idx])
                })
                .collect()
        })
        .collect();

    let roots: Vec<ActivityIdx> = (0..graph.len())
        .filter(|&idx| critical[idx] && graph.is_root(idx))
        .collect();

    if roots.is_empty() {
        log_invariant!("no critical root activity");
        return Err(CpmError::InvariantViolation(
            "no critical root activity".to_string(),
        ));
    }

    let mut chains: Vec<Vec<ActivityIdx>> = Vec::new();
    let mut on_chain = vec![false; graph.len()];

    for root in roots {
        let mut path: Vec<ActivityIdx> = vec![root];
        let mut cursors: Vec<usize> = vec![0];

        loop {
            let Some(&node) = path.last() else {
                break;
            };
            let successors = &tight_successors[node];

            if successors.is_empty() {
                if !graph.is_sink(node) {
                    log_invariant!("critical chain stops at non-sink '{}'", graph.id(node));
                    return Err(CpmError::InvariantViolation(format!(
                        "critical chain stops at non-sink activity '{}'",
                        graph.id(node)
                    )));
                }
                if config.max_critical_chains.is_some_and(|max| chains.len() >= max) {
                    log_debug!(
                        config.verbosity,
                        "cpm: critical chain limit {:?} reached",
                        config.max_critical_chains
                    );
                    return Ok((chains, true));
                }
                for &idx in &path {
                    on_chain[idx] = true;
                }
                log_debug!(
                    config.verbosity,
                    "cpm: critical chain {:?}",
                    graph.index.resolve_all(&path)
                );
                chains.push(path.clone());
                path.pop();
                cursors.pop();
                continue;
            }

            let Some(cursor) = cursors.last_mut() else {
                break;
            };
            match successors.get(*cursor).copied() {
                Some(next) => {
                    *cursor += 1;
                    path.push(next);
                    cursors.push(0);
                }
                None => {
                    path.pop();
                    cursors.pop();
                }
            }
        }
    }

    if let Some(idx) = (0..graph.len()).find(|&idx| critical[idx] && !on_chain[idx]) {
        log_invariant!("critical activity '{}' is on no chain", graph.id(idx));
        return Err(CpmError::InvariantViolation(format!(
            "critical activity '{}' is not on any root-to-sink chain",
            graph.id(idx)
        )));
    }

    Ok((chains, false))
}
