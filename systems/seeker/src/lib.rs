#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic A* planner that steers the seeker toward the goal.
//!
//! The planner is a pure function over a borrowed [`Grid`]. It allocates its
//! scratch buffers per call and keeps no state between invocations, so a
//! result is only valid for the grid and blocked cells it was computed from.

use std::{cmp::Reverse, collections::BinaryHeap};

use maze_chase_core::{Grid, Position};

/// Finds a shortest 4-connected path from `start` to `goal`.
///
/// Every orthogonal step costs one and the Manhattan distance to the goal
/// serves as the heuristic. Cells for which `is_blocked` returns `true` are
/// impassable for this search only; walls are always impassable. Entries in
/// the open set are ordered by `(f, sequence)` where the sequence number is
/// assigned at insertion, so equal-cost alternatives resolve identically on
/// every call.
///
/// Returns the path including both endpoints, `Some(vec![start])` when the
/// endpoints coincide, and `None` when either endpoint lies outside the grid
/// or the goal cannot be reached.
#[must_use]
pub fn find_path<F>(
    grid: &Grid,
    start: Position,
    goal: Position,
    is_blocked: F,
) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    let start_index = grid.index(start)?;
    let goal_index = grid.index(goal)?;

    if start == goal {
        return Some(vec![start]);
    }

    let mut g_scores = vec![u32::MAX; grid.len()];
    let mut came_from: Vec<Option<usize>> = vec![None; grid.len()];
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;

    g_scores[start_index] = 0;
    open.push(Reverse(OpenEntry {
        f: start.manhattan_distance(goal),
        sequence,
        g: 0,
        index: start_index,
    }));

    while let Some(Reverse(entry)) = open.pop() {
        if entry.g != g_scores[entry.index] {
            continue;
        }

        if entry.index == goal_index {
            return Some(reconstruct_path(grid, &came_from, goal_index));
        }

        let Some(current) = grid.position_at(entry.index) else {
            continue;
        };
        let tentative_g = entry.g + 1;

        for neighbor in grid.neighbors4(current) {
            if !grid.is_walkable(neighbor) || is_blocked(neighbor) {
                continue;
            }

            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            if tentative_g >= g_scores[neighbor_index] {
                continue;
            }

            g_scores[neighbor_index] = tentative_g;
            came_from[neighbor_index] = Some(entry.index);
            sequence += 1;
            open.push(Reverse(OpenEntry {
                f: tentative_g + neighbor.manhattan_distance(goal),
                sequence,
                g: tentative_g,
                index: neighbor_index,
            }));
        }
    }

    None
}

/// Open-set entry ordered by f-score, then by insertion sequence.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: u32,
    sequence: u64,
    g: u32,
    index: usize,
}

impl OpenEntry {
    fn rank(&self) -> (u32, u64) {
        (self.f, self.sequence)
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

fn reconstruct_path(grid: &Grid, came_from: &[Option<usize>], goal_index: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_index);

    while let Some(index) = cursor {
        if let Some(position) = grid.position_at(index) {
            path.push(position);
        }
        cursor = came_from.get(index).copied().flatten();
    }

    path.reverse();
    path
}
