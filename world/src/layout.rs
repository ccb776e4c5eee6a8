//! Editable layout that seeds every run.

use maze_chase_core::{
    CellKind, Event, Grid, Level, Position, PursuerId, PursuerPlacement, PursuerSnapshot,
    RejectionReason,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Start,
    Goal,
}

impl Marker {
    const fn kind(self) -> CellKind {
        match self {
            Self::Start => CellKind::Start,
            Self::Goal => CellKind::Goal,
        }
    }
}

/// Grid, markers and pursuer spawns as arranged while editing.
///
/// The grid is the single record of walls and rewards. Start and goal cells
/// are mirrored in the grid so adapters can render it directly.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    grid: Grid,
    start: Option<Position>,
    goal: Option<Position>,
    pursuers: Vec<PursuerSnapshot>,
    next_pursuer: u32,
}

impl Layout {
    pub(crate) fn new(rows: u32, columns: u32, placement: PursuerPlacement) -> Self {
        let mut layout = Self {
            grid: Grid::new(rows, columns),
            start: None,
            goal: None,
            pursuers: Vec::new(),
            next_pursuer: 0,
        };
        layout.place_default_pursuers(placement);
        layout
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) const fn start(&self) -> Option<Position> {
        self.start
    }

    pub(crate) const fn goal(&self) -> Option<Position> {
        self.goal
    }

    pub(crate) fn pursuers(&self) -> &[PursuerSnapshot] {
        &self.pursuers
    }

    pub(crate) fn rewards(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid
            .cells()
            .filter(|(_, kind)| *kind == CellKind::Reward)
            .map(|(cell, _)| cell)
    }

    /// Empties every cell and restores the default pursuers.
    pub(crate) fn clear(&mut self, placement: PursuerPlacement) {
        self.grid = Grid::new(self.grid.rows(), self.grid.columns());
        self.start = None;
        self.goal = None;
        self.pursuers.clear();
        self.place_default_pursuers(placement);
    }

    /// Replaces the layout with `level`, adopting its dimensions.
    ///
    /// Only walls are taken from the level grid; markers and rewards come from
    /// the dedicated fields so the two can never disagree.
    pub(crate) fn install(&mut self, level: Level, placement: PursuerPlacement) {
        let Level {
            grid: source,
            start,
            goal,
            rewards,
            pursuers,
        } = level;

        let mut grid = Grid::new(source.rows(), source.columns());
        for (cell, kind) in source.cells() {
            if kind == CellKind::Wall {
                let _ = grid.set(cell, CellKind::Wall);
            }
        }
        for cell in rewards {
            if grid.kind(cell) == Some(CellKind::Empty) {
                let _ = grid.set(cell, CellKind::Reward);
            }
        }

        self.grid = grid;
        self.start = None;
        self.goal = None;
        self.pursuers.clear();

        if let Some(cell) = start.filter(|cell| self.grid.contains(*cell)) {
            let _ = self.grid.set(cell, CellKind::Start);
            self.start = Some(cell);
        }
        let goal = goal.filter(|cell| self.grid.contains(*cell) && self.start != Some(*cell));
        if let Some(cell) = goal {
            let _ = self.grid.set(cell, CellKind::Goal);
            self.goal = Some(cell);
        }

        for cell in pursuers {
            self.spawn_if_free(cell);
        }
        self.place_default_pursuers(placement);
    }

    pub(crate) fn set_start(
        &mut self,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.move_marker(Marker::Start, cell, out_events)
    }

    pub(crate) fn set_goal(
        &mut self,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.move_marker(Marker::Goal, cell, out_events)
    }

    pub(crate) fn place_wall(
        &mut self,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.ensure_contains(cell)?;
        self.ensure_unmarked(cell)?;
        self.write(cell, CellKind::Wall, out_events);
        self.remove_pursuers_at(cell, out_events);
        Ok(())
    }

    pub(crate) fn place_reward(
        &mut self,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.ensure_contains(cell)?;
        self.ensure_unmarked(cell)?;
        self.write(cell, CellKind::Reward, out_events);
        Ok(())
    }

    pub(crate) fn add_pursuer(
        &mut self,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.ensure_contains(cell)?;
        if self.grid.kind(cell) == Some(CellKind::Wall) {
            return Err(RejectionReason::WallOccupied);
        }
        if self.has_pursuer(cell) {
            return Err(RejectionReason::PursuerPresent);
        }

        let pursuer = self.spawn(cell);
        out_events.push(Event::PursuerAdded { pursuer, cell });
        Ok(())
    }

    pub(crate) fn erase(
        &mut self,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.ensure_contains(cell)?;
        if self.start == Some(cell) {
            self.start = None;
        }
        if self.goal == Some(cell) {
            self.goal = None;
        }
        self.write(cell, CellKind::Empty, out_events);
        self.remove_pursuers_at(cell, out_events);
        Ok(())
    }

    fn move_marker(
        &mut self,
        marker: Marker,
        cell: Position,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        self.ensure_contains(cell)?;
        let (current, opposite) = match marker {
            Marker::Start => (self.start, self.goal),
            Marker::Goal => (self.goal, self.start),
        };
        if opposite == Some(cell) {
            return Err(RejectionReason::MarkerOccupied);
        }
        if current == Some(cell) {
            return Ok(());
        }

        if let Some(previous) = current {
            self.write(previous, CellKind::Empty, out_events);
        }
        self.write(cell, marker.kind(), out_events);
        match marker {
            Marker::Start => self.start = Some(cell),
            Marker::Goal => self.goal = Some(cell),
        }
        Ok(())
    }

    fn write(&mut self, cell: Position, kind: CellKind, out_events: &mut Vec<Event>) {
        if self.grid.set(cell, kind) != Some(kind) {
            out_events.push(Event::CellChanged { cell, kind });
        }
    }

    fn remove_pursuers_at(&mut self, cell: Position, out_events: &mut Vec<Event>) {
        self.pursuers.retain(|pursuer| {
            if pursuer.cell != cell {
                return true;
            }
            out_events.push(Event::PursuerRemoved {
                pursuer: pursuer.id,
                cell,
            });
            false
        });
    }

    fn place_default_pursuers(&mut self, placement: PursuerPlacement) {
        for cell in placement.positions(&self.grid) {
            self.spawn_if_free(cell);
        }
    }

    fn spawn_if_free(&mut self, cell: Position) {
        if !self.grid.is_walkable(cell) || self.has_pursuer(cell) {
            return;
        }
        let _ = self.spawn(cell);
    }

    fn spawn(&mut self, cell: Position) -> PursuerId {
        let id = PursuerId::new(self.next_pursuer);
        self.next_pursuer = self.next_pursuer.saturating_add(1);
        self.pursuers.push(PursuerSnapshot { id, cell });
        id
    }

    fn has_pursuer(&self, cell: Position) -> bool {
        self.pursuers.iter().any(|pursuer| pursuer.cell == cell)
    }

    fn ensure_contains(&self, cell: Position) -> Result<(), RejectionReason> {
        if self.grid.contains(cell) {
            Ok(())
        } else {
            Err(RejectionReason::OutOfBounds)
        }
    }

    fn ensure_unmarked(&self, cell: Position) -> Result<(), RejectionReason> {
        if self.start == Some(cell) || self.goal == Some(cell) {
            Err(RejectionReason::MarkerOccupied)
        } else {
            Ok(())
        }
    }
}
