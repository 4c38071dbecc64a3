//! Deterministic topological ordering of a project graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::CpmError;
use crate::interner::ActivityIdx;
use crate::validation::ProjectGraph;

/// Order activities so that every dependency precedes its dependents.
///
/// Uses Kahn's algorithm with a min-heap on input position, so among activities
/// that are ready at the same time the one listed first in the input comes first.
/// The order is therefore identical across runs on identical input.
///
/// # Returns
/// * `Ok(order)` containing every activity exactly once
/// * `Err(CpmError::Cycle)` naming the activities of one cycle
pub fn topological_order(graph: &ProjectGraph) -> Result<Vec<ActivityIdx>, CpmError> {
    let n = graph.len();
    let mut in_degree: Vec<usize> = graph.deps.iter().map(Vec::len).collect();

    let mut ready: BinaryHeap<Reverse<ActivityIdx>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(idx, _)| Reverse(idx))
        .collect();

    let mut order = Vec::with_capacity(n);

    while let Some(Reverse(idx)) = ready.pop() {
        order.push(idx);
        for &dependent in &graph.dependents[idx] {
            let degree = &mut in_degree[dependent];
            *degree -= 1;
            if *degree == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() != n {
        let cycle = find_cycle(graph, &in_degree);
        return Err(CpmError::Cycle {
            activities: graph.index.resolve_all(&cycle),
        });
    }

    Ok(order)
}

/// Extract one concrete cycle from the activities Kahn's algorithm could not place.
///
/// Every unplaced activity has at least one unplaced dependency, so walking
/// dependency edges among unplaced activities must revisit a node. The cycle is
/// returned in dependency order (each activity depends on the one before it,
/// the first depends on the last), rotated to start at the lowest input position.
fn find_cycle(graph: &ProjectGraph, in_degree: &[usize]) -> Vec<ActivityIdx> {
    let unplaced = |idx: ActivityIdx| in_degree.get(idx).is_some_and(|&d| d > 0);

    let Some(start) = (0..graph.len()).find(|&idx| unplaced(idx)) else {
        return Vec::new();
    };

    let mut position: Vec<Option<usize>> = vec![None; graph.len()];
    let mut path: Vec<ActivityIdx> = Vec::new();
    let mut current = start;

    loop {
        if let Some(first) = position[current] {
            let mut cycle: Vec<ActivityIdx> = path.split_off(first);
            cycle.reverse();
            if let Some(min_pos) = cycle
                .iter()
                .enumerate()
                .min_by_key(|(_, &idx)| idx)
                .map(|(pos, _)| pos)
            {
                cycle.rotate_left(min_pos);
            }
            return cycle;
        }
        position[current] = Some(path.len());
        path.push(current);

        match graph.deps[current].iter().copied().find(|&d| unplaced(d)) {
            Some(next) => current = next,
            // Unreachable for a graph that failed Kahn's algorithm
            None => return path,
        }
    }
}
