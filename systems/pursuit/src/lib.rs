#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first planner that steers pursuers toward the seeker.

use std::collections::VecDeque;

use maze_chase_core::{Grid, Position};

/// Finds a shortest walkable path from `start` to `goal`.
///
/// Only walls block a pursuer: neither the seeker nor other pursuers are
/// obstacles. Each cell is expanded at most once and neighbours are visited
/// in [`Grid::neighbors4`] order, so the result is deterministic.
///
/// Returns the path including both endpoints, `Some(vec![start])` when the
/// endpoints coincide, and `None` when either endpoint lies outside the grid
/// or no walkable path exists.
#[must_use]
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    let start_index = grid.index(start)?;
    let goal_index = grid.index(goal)?;

    if start == goal {
        return Some(vec![start]);
    }

    let mut visited = vec![false; grid.len()];
    let mut came_from: Vec<Option<usize>> = vec![None; grid.len()];
    let mut queue = VecDeque::new();

    visited[start_index] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let Some(current_index) = grid.index(cell) else {
            continue;
        };

        if current_index == goal_index {
            return Some(walk_back(grid, &came_from, goal_index));
        }

        for neighbor in grid.neighbors4(cell) {
            if !grid.is_walkable(neighbor) {
                continue;
            }

            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            if visited[neighbor_index] {
                continue;
            }

            visited[neighbor_index] = true;
            came_from[neighbor_index] = Some(current_index);
            queue.push_back(neighbor);
        }
    }

    None
}

fn walk_back(grid: &Grid, came_from: &[Option<usize>], goal_index: usize) -> Vec<Position> {
    let mut path: Vec<Position> = std::iter::successors(Some(goal_index), |index| {
        came_from.get(*index).copied().flatten()
    })
    .filter_map(|index| grid.position_at(index))
    .collect();
    path.reverse();
    path
}
