//! Dense cell-kind grid shared by the world and the planners.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open floor.
    #[default]
    Empty,
    /// Impassable wall.
    Wall,
    /// Cell where the seeker enters the maze.
    Start,
    /// Cell the seeker attempts to reach.
    Goal,
    /// Open floor holding a collectible reward.
    Reward,
}

impl CellKind {
    /// Reports whether agents may occupy a cell of this kind.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        match self {
            Self::Wall => false,
            Self::Empty | Self::Start | Self::Goal | Self::Reward => true,
        }
    }
}

/// Fixed-size matrix of cell kinds stored in row-major order.
///
/// The grid enforces bounds only. Marker uniqueness (one start, one goal) and
/// the editing lifecycle are owned by the world, which is the sole mutator of
/// the grid it holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates an all-empty grid with the provided dimensions.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let capacity = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![CellKind::Empty; capacity],
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }

    /// Kind of the cell at the position, or `None` when out of bounds.
    #[must_use]
    pub fn kind(&self, position: Position) -> Option<CellKind> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the position is in bounds and not a wall.
    #[must_use]
    pub fn is_walkable(&self, position: Position) -> bool {
        self.kind(position).is_some_and(CellKind::is_walkable)
    }

    /// In-bounds orthogonal neighbours in the order down, up, right, left.
    ///
    /// Walkability is not filtered; callers apply their own blocking rules.
    #[must_use]
    pub fn neighbors4(&self, position: Position) -> Neighbors {
        let mut neighbors = Neighbors::default();
        if !self.contains(position) {
            return neighbors;
        }

        let (row, column) = (position.row(), position.column());
        if row + 1 < self.rows {
            neighbors.push(Position::new(row + 1, column));
        }
        if row > 0 {
            neighbors.push(Position::new(row - 1, column));
        }
        if column + 1 < self.columns {
            neighbors.push(Position::new(row, column + 1));
        }
        if column > 0 {
            neighbors.push(Position::new(row, column - 1));
        }

        neighbors
    }

    /// Overwrites the kind of an in-bounds cell.
    ///
    /// Returns the previous kind, or `None` when the position is out of
    /// bounds and nothing changed.
    pub fn set(&mut self, position: Position, kind: CellKind) -> Option<CellKind> {
        let index = self.index(position)?;
        let slot = self.cells.get_mut(index)?;
        Some(std::mem::replace(slot, kind))
    }

    /// Iterates over every cell together with its position in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        let columns = self.columns.max(1);
        (0u32..)
            .zip(self.cells.iter().copied())
            .map(move |(offset, kind)| (Position::new(offset / columns, offset % columns), kind))
    }

    /// Dense row-major index of the position, or `None` when out of bounds.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Position stored at the dense row-major index.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<Position> {
        if index >= self.cells.len() || self.columns == 0 {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = u32::try_from(index / width).ok()?;
        let column = u32::try_from(index % width).ok()?;
        Some(Position::new(row, column))
    }
}

/// Fixed-capacity iterator over at most four neighbouring positions.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<Position>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, position: Position) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(position);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
