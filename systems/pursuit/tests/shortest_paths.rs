use maze_chase_core::{CellKind, Grid, Position};
use maze_chase_system_pursuit::find_path;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn path_is_minimal_and_none_iff_unreachable() {
    for seed in 0..250 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = random_grid(&mut rng, 6, 7);
        let walkable: Vec<Position> = grid
            .cells()
            .filter(|(_, kind)| *kind != CellKind::Wall)
            .map(|(cell, _)| cell)
            .collect();
        if walkable.is_empty() {
            continue;
        }
        let start = walkable[rng.gen_range(0..walkable.len())];
        let goal = walkable[rng.gen_range(0..walkable.len())];

        let expected = reference_distance(&grid, start, goal);
        let path = find_path(&grid, start, goal);

        assert_eq!(
            path.as_ref().map(|path| path.len() - 1),
            expected,
            "seed {seed}: pursuit path length differs from reference"
        );

        if let Some(path) = path {
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            for window in path.windows(2) {
                assert_eq!(window[0].manhattan_distance(window[1]), 1);
                assert!(grid.is_walkable(window[1]));
            }
        }
    }
}

#[test]
fn repeated_calls_return_identical_paths() {
    for seed in 0u64..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(31));
        let grid = random_grid(&mut rng, 8, 8);
        let start = Position::new(rng.gen_range(0..8), rng.gen_range(0..8));
        let goal = Position::new(rng.gen_range(0..8), rng.gen_range(0..8));

        assert_eq!(find_path(&grid, start, goal), find_path(&grid, start, goal));
    }
}

#[test]
fn special_cells_are_walkable_for_pursuers() {
    let mut grid = Grid::new(1, 5);
    let _ = grid.set(Position::new(0, 1), CellKind::Start);
    let _ = grid.set(Position::new(0, 2), CellKind::Reward);
    let _ = grid.set(Position::new(0, 3), CellKind::Goal);

    let path = find_path(&grid, Position::new(0, 0), Position::new(0, 4)).expect("path");

    assert_eq!(path.len(), 5);
}

fn random_grid(rng: &mut ChaCha8Rng, rows: u32, columns: u32) -> Grid {
    let mut grid = Grid::new(rows, columns);
    for row in 0..rows {
        for column in 0..columns {
            if rng.gen_bool(0.35) {
                let _ = grid.set(Position::new(row, column), CellKind::Wall);
            }
        }
    }
    grid
}

/// Brute-force shortest distance by repeated relaxation over every cell.
fn reference_distance(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
    let cells: Vec<Position> = grid.cells().map(|(cell, _)| cell).collect();
    let mut distance = vec![usize::MAX; cells.len()];
    distance[grid.index(start)?] = 0;

    loop {
        let mut changed = false;
        for &cell in &cells {
            let index = grid.index(cell)?;
            if distance[index] == usize::MAX {
                continue;
            }
            for other in &cells {
                if cell.manhattan_distance(*other) != 1 || !grid.is_walkable(*other) {
                    continue;
                }
                let other_index = grid.index(*other)?;
                if distance[index] + 1 < distance[other_index] {
                    distance[other_index] = distance[index] + 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let found = distance[grid.index(goal)?];
    (found != usize::MAX).then_some(found)
}
