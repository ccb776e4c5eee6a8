#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure planning systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what changed. Planners borrow a [`Grid`] for the duration of a
//! single call and never retain simulation state.

mod grid;

use std::{collections::BTreeSet, time::Duration};

use serde::{Deserialize, Serialize};

pub use grid::{CellKind, Grid, Neighbors};

/// Default number of grid rows.
pub const DEFAULT_ROWS: u32 = 30;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u32 = 30;

/// Default delay between two seeker steps.
pub const DEFAULT_SEEKER_INTERVAL: Duration = Duration::from_millis(120);

/// Default delay between two pursuer steps.
pub const DEFAULT_PURSUER_INTERVAL: Duration = Duration::from_millis(260);

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

/// Unique identifier assigned to a pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PursuerId(u32);

impl PursuerId {
    /// Creates a new pursuer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reason a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalReason {
    /// The seeker reached the goal.
    Win,
    /// A pursuer shared a cell with the seeker.
    Caught,
    /// The seeker had no path to the goal.
    Stuck,
}

/// Lifecycle phase of the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The layout may be edited; no run is active.
    #[default]
    Editing,
    /// A run is in progress and agents move on scheduled ticks.
    Running,
    /// The run ended; agents are frozen until a reset.
    Terminal(TerminalReason),
}

impl GameState {
    /// Reports whether the state ends a run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// Reason attached to a terminal state.
    #[must_use]
    pub const fn terminal_reason(self) -> Option<TerminalReason> {
        match self {
            Self::Terminal(reason) => Some(reason),
            Self::Editing | Self::Running => None,
        }
    }
}

/// Step cadence for the two agent categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovementIntervals {
    /// Minimum clock time between two seeker steps.
    pub seeker: Duration,
    /// Minimum clock time between two pursuer steps.
    pub pursuer: Duration,
}

impl MovementIntervals {
    /// Creates a new interval pair.
    #[must_use]
    pub const fn new(seeker: Duration, pursuer: Duration) -> Self {
        Self { seeker, pursuer }
    }
}

impl Default for MovementIntervals {
    fn default() -> Self {
        Self::new(DEFAULT_SEEKER_INTERVAL, DEFAULT_PURSUER_INTERVAL)
    }
}

/// Placement applied to pursuers when a layout is cleared or loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuerPlacement {
    /// One pursuer in each grid corner that is not a wall.
    #[default]
    Corners,
    /// No default pursuers.
    Disabled,
}

impl PursuerPlacement {
    /// Resolves the placement against a grid, skipping wall cells.
    #[must_use]
    pub fn positions(self, grid: &Grid) -> Vec<Position> {
        match self {
            Self::Disabled => Vec::new(),
            Self::Corners => {
                if grid.is_empty() {
                    return Vec::new();
                }
                let last_row = grid.rows() - 1;
                let last_column = grid.columns() - 1;
                let corners = [
                    Position::new(0, 0),
                    Position::new(0, last_column),
                    Position::new(last_row, 0),
                    Position::new(last_row, last_column),
                ];
                let mut positions = Vec::with_capacity(corners.len());
                for corner in corners {
                    if grid.is_walkable(corner) && !positions.contains(&corner) {
                        positions.push(corner);
                    }
                }
                positions
            }
        }
    }
}

/// Tunables for a simulation, deserialisable from a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Milliseconds between seeker steps.
    pub seeker_interval_ms: u64,
    /// Milliseconds between pursuer steps.
    pub pursuer_interval_ms: u64,
    /// Default pursuer placement used by clears and level loads.
    pub pursuers: PursuerPlacement,
}

impl SimulationConfig {
    /// Step cadence described by the configuration.
    #[must_use]
    pub const fn movement_intervals(&self) -> MovementIntervals {
        MovementIntervals::new(
            Duration::from_millis(self.seeker_interval_ms),
            Duration::from_millis(self.pursuer_interval_ms),
        )
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            seeker_interval_ms: 120,
            pursuer_interval_ms: 260,
            pursuers: PursuerPlacement::Corners,
        }
    }
}

/// Layout produced by a level loader and consumed by the world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Cell kinds of the level, already sized to the simulation grid.
    pub grid: Grid,
    /// Cell where the seeker starts, if any.
    pub start: Option<Position>,
    /// Cell the seeker must reach, if any.
    pub goal: Option<Position>,
    /// Cells holding collectible rewards.
    pub rewards: BTreeSet<Position>,
    /// Pursuer spawn cells in file order.
    pub pursuers: Vec<Position>,
}

impl Level {
    /// Creates an empty level with no markers, rewards or pursuers.
    #[must_use]
    pub fn empty(rows: u32, columns: u32) -> Self {
        Self {
            grid: Grid::new(rows, columns),
            start: None,
            goal: None,
            rewards: BTreeSet::new(),
            pursuers: Vec::new(),
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests a transition from editing to running.
    StartRun,
    /// Discards the active run and returns to editing with the layout intact.
    ResetRun,
    /// Clears the layout and returns to editing with default pursuers.
    ClearLayout,
    /// Replaces the layout with a loaded level.
    LoadLevel {
        /// Level to install.
        level: Level,
    },
    /// Replaces the step cadence used by future runs.
    ConfigureMovement {
        /// New intervals for the seeker and pursuers.
        intervals: MovementIntervals,
    },
    /// Moves the start marker to the provided cell.
    SetStart {
        /// Cell that becomes the start.
        cell: Position,
    },
    /// Moves the goal marker to the provided cell.
    SetGoal {
        /// Cell that becomes the goal.
        cell: Position,
    },
    /// Turns the provided cell into a wall.
    PlaceWall {
        /// Cell that becomes a wall.
        cell: Position,
    },
    /// Places a reward on the provided cell.
    PlaceReward {
        /// Cell that receives the reward.
        cell: Position,
    },
    /// Adds a pursuer spawn on the provided cell.
    AddPursuer {
        /// Cell the pursuer spawns on.
        cell: Position,
    },
    /// Clears walls, markers, rewards and pursuers from the provided cell.
    EraseCell {
        /// Cell to clear.
        cell: Position,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a run started with the seeker on the start cell.
    RunStarted {
        /// Cell the seeker starts on.
        start: Position,
    },
    /// Confirms that the seeker moved between two cells.
    SeekerAdvanced {
        /// Cell the seeker occupied before moving.
        from: Position,
        /// Cell the seeker occupies after moving.
        to: Position,
    },
    /// Reports that the seeker picked up a reward.
    RewardCollected {
        /// Cell that held the reward.
        cell: Position,
        /// Score after the pickup.
        score: u32,
    },
    /// Confirms that a pursuer moved between two cells.
    PursuerAdvanced {
        /// Identifier of the pursuer that moved.
        pursuer: PursuerId,
        /// Cell the pursuer occupied before moving.
        from: Position,
        /// Cell the pursuer occupies after moving.
        to: Position,
    },
    /// Announces that the run entered a terminal state.
    RunEnded {
        /// Why the run ended.
        reason: TerminalReason,
        /// Final score.
        score: u32,
        /// Clock time between the start and the end of the run.
        elapsed: Duration,
    },
    /// Announces that the run was discarded and editing resumed.
    RunReset,
    /// Announces that the layout was cleared.
    LayoutCleared,
    /// Announces that a level replaced the layout.
    LevelLoaded {
        /// Number of pursuers in the new layout.
        pursuers: usize,
        /// Number of rewards in the new layout.
        rewards: usize,
    },
    /// Reports that the kind of a layout cell changed.
    CellChanged {
        /// Cell that changed.
        cell: Position,
        /// Kind the cell holds now.
        kind: CellKind,
    },
    /// Reports that a pursuer spawn was added to the layout.
    PursuerAdded {
        /// Identifier allocated to the pursuer.
        pursuer: PursuerId,
        /// Spawn cell of the pursuer.
        cell: Position,
    },
    /// Reports that a pursuer spawn was removed from the layout.
    PursuerRemoved {
        /// Identifier of the removed pursuer.
        pursuer: PursuerId,
        /// Cell the pursuer occupied.
        cell: Position,
    },
    /// Confirms that the step cadence changed.
    MovementConfigured {
        /// Intervals now in effect.
        intervals: MovementIntervals,
    },
    /// Reports that a command was rejected without changing state.
    CommandRejected {
        /// Specific reason the command failed.
        reason: RejectionReason,
    },
}

/// Reasons a command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The command is only accepted while editing.
    NotEditing,
    /// A run cannot start without a start cell.
    MissingStart,
    /// A run cannot start without a goal cell.
    MissingGoal,
    /// The target cell lies outside the grid.
    OutOfBounds,
    /// The target cell holds the start or goal marker.
    MarkerOccupied,
    /// The target cell is a wall.
    WallOccupied,
    /// The target cell already holds a pursuer.
    PursuerPresent,
    /// The command requires an active or finished run.
    NotRunning,
}

/// Immutable representation of a single pursuer used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PursuerSnapshot {
    /// Identifier assigned to the pursuer.
    pub id: PursuerId,
    /// Cell currently occupied by the pursuer.
    pub cell: Position,
}

/// Per-frame view consumed by presentation adapters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Current lifecycle phase.
    pub state: GameState,
    /// Seeker cell while a run is active.
    pub seeker: Option<Position>,
    /// Pursuers in identifier order.
    pub pursuers: Vec<PursuerSnapshot>,
    /// Rewards still available.
    pub rewards: Vec<Position>,
    /// Rewards collected in the current or last run.
    pub score: u32,
    /// Clock time since the run started, frozen once it ended.
    pub elapsed: Duration,
    /// Why the run ended, when it did.
    pub terminal_reason: Option<TerminalReason>,
}
