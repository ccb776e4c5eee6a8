#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text level loader for Maze Chase.
//!
//! A level file is a block of characters centred inside the simulation grid:
//!
//! | symbol | meaning                                   |
//! |--------|-------------------------------------------|
//! | `#`    | wall                                      |
//! | `S`    | start marker                              |
//! | `G`    | goal marker                               |
//! | `D`    | reward                                    |
//! | `X`    | pursuer spawn on an otherwise empty cell  |
//! | other  | empty floor                               |
//!
//! Blank lines are ignored. Cells that fall outside the grid after centring
//! are dropped.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maze_chase_core::{CellKind, Level, Position};
use thiserror::Error;
use tracing::{debug, warn};

/// Where the layout of a [`LoadedLevel`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    /// The level file was read and parsed.
    Loaded,
    /// The level file does not exist; the layout is empty.
    Missing,
}

/// Outcome of [`load_level`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedLevel {
    /// Parsed layout, or an empty one when the file is missing.
    pub level: Level,
    /// Whether the layout came from disk.
    pub source: LoadSource,
}

/// Errors raised while reading a level file.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The file exists but could not be read.
    #[error("failed to read level file {path}")]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Reads and parses the level stored at `path` for a `rows` by `columns` grid.
///
/// A missing file is not an error: it yields an empty layout tagged with
/// [`LoadSource::Missing`] and logs a warning.
pub fn load_level(path: &Path, rows: u32, columns: u32) -> Result<LoadedLevel, LevelError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let level = parse_level(&text, rows, columns);
            debug!(
                path = %path.display(),
                start = ?level.start,
                goal = ?level.goal,
                rewards = level.rewards.len(),
                pursuers = level.pursuers.len(),
                "level parsed"
            );
            Ok(LoadedLevel {
                level,
                source: LoadSource::Loaded,
            })
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "level file not found, using an empty layout");
            Ok(LoadedLevel {
                level: Level::empty(rows, columns),
                source: LoadSource::Missing,
            })
        }
        Err(source) => Err(LevelError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses level text into a layout centred on a `rows` by `columns` grid.
#[must_use]
pub fn parse_level(text: &str, rows: u32, columns: u32) -> Level {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let mut level = Level::empty(rows, columns);

    let height = lines.len();
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let row_offset = centring_offset(rows, height);
    let column_offset = centring_offset(columns, width);

    for (line_row, line) in (0i64..).zip(&lines) {
        for (line_column, symbol) in (0i64..).zip(line.chars()) {
            let Some(cell) = grid_cell(row_offset + line_row, column_offset + line_column) else {
                continue;
            };
            if !level.grid.contains(cell) {
                continue;
            }
            place_symbol(&mut level, cell, symbol);
        }
    }

    level
}

fn place_symbol(level: &mut Level, cell: Position, symbol: char) {
    match symbol {
        '#' => {
            let _ = level.grid.set(cell, CellKind::Wall);
        }
        'S' => {
            if let Some(previous) = level.start.replace(cell) {
                let _ = level.grid.set(previous, CellKind::Empty);
            }
            let _ = level.grid.set(cell, CellKind::Start);
        }
        'G' => {
            if let Some(previous) = level.goal.replace(cell) {
                let _ = level.grid.set(previous, CellKind::Empty);
            }
            let _ = level.grid.set(cell, CellKind::Goal);
        }
        'D' => {
            let _ = level.grid.set(cell, CellKind::Reward);
            let _ = level.rewards.insert(cell);
        }
        'X' => level.pursuers.push(cell),
        _ => {}
    }
}

/// Floor of half the slack between the grid and the level; negative when the
/// level is larger than the grid.
fn centring_offset(grid: u32, level: usize) -> i64 {
    let level = i64::try_from(level).unwrap_or(i64::MAX);
    (i64::from(grid) - level).div_euclid(2)
}

fn grid_cell(row: i64, column: i64) -> Option<Position> {
    let row = u32::try_from(row).ok()?;
    let column = u32::try_from(column).ok()?;
    Some(Position::new(row, column))
}
