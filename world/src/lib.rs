#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.
//!
//! The world owns the editable layout, the simulation clock and the active
//! run. Every mutation flows through [`apply`]; adapters observe the outcome
//! through emitted events and the [`query`] module.

mod layout;
mod run;

use std::time::Duration;

use maze_chase_core::{
    Command, Event, GameState, Level, MovementIntervals, RejectionReason, SimulationConfig,
};
use maze_chase_system_scheduler::MovementScheduler;
use tracing::{debug, info};

use crate::{layout::Layout, run::Run};

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    state: GameState,
    clock: Duration,
    layout: Layout,
    run: Option<Run>,
    scheduler: MovementScheduler,
}

impl World {
    /// Creates a world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a world sized and paced by `config`.
    #[must_use]
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            layout: Layout::new(config.rows, config.columns, config.pursuers),
            scheduler: MovementScheduler::new(config.movement_intervals()),
            state: GameState::Editing,
            clock: Duration::ZERO,
            run: None,
            config,
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        if self.state != GameState::Running {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let Some(reason) = run.advance(&mut self.scheduler, self.clock, out_events) else {
            return;
        };

        run.finish(self.clock);
        self.state = GameState::Terminal(reason);
        let score = run.score();
        let elapsed = run.elapsed(self.clock);
        info!(?reason, score, ?elapsed, "run ended");
        out_events.push(Event::RunEnded {
            reason,
            score,
            elapsed,
        });
    }

    fn start_run(&mut self, out_events: &mut Vec<Event>) -> Result<(), RejectionReason> {
        if self.state != GameState::Editing {
            return Err(RejectionReason::NotEditing);
        }
        let start = self.layout.start().ok_or(RejectionReason::MissingStart)?;
        let goal = self.layout.goal().ok_or(RejectionReason::MissingGoal)?;

        self.scheduler.arm(self.clock);
        let run = Run::begin(&self.layout, start, goal, self.clock);
        info!(
            ?start,
            ?goal,
            pursuers = run.pursuers().len(),
            rewards = run.rewards().count(),
            "run started"
        );
        self.run = Some(run);
        self.state = GameState::Running;
        out_events.push(Event::RunStarted { start });
        Ok(())
    }

    fn reset_run(&mut self, out_events: &mut Vec<Event>) -> Result<(), RejectionReason> {
        if self.state == GameState::Editing {
            return Err(RejectionReason::NotRunning);
        }
        self.return_to_editing();
        info!("run reset");
        out_events.push(Event::RunReset);
        Ok(())
    }

    fn clear_layout(&mut self, out_events: &mut Vec<Event>) {
        self.return_to_editing();
        self.layout.clear(self.config.pursuers);
        info!("layout cleared");
        out_events.push(Event::LayoutCleared);
    }

    fn load_level(&mut self, level: Level, out_events: &mut Vec<Event>) {
        self.return_to_editing();
        self.layout.install(level, self.config.pursuers);
        let pursuers = self.layout.pursuers().len();
        let rewards = self.layout.rewards().count();
        info!(pursuers, rewards, "level loaded");
        out_events.push(Event::LevelLoaded { pursuers, rewards });
    }

    fn configure_movement(
        &mut self,
        intervals: MovementIntervals,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        if self.state != GameState::Editing {
            return Err(RejectionReason::NotEditing);
        }
        self.scheduler.reconfigure(intervals);
        out_events.push(Event::MovementConfigured { intervals });
        Ok(())
    }

    fn edit<F>(&mut self, out_events: &mut Vec<Event>, edit: F) -> Result<(), RejectionReason>
    where
        F: FnOnce(&mut Layout, &mut Vec<Event>) -> Result<(), RejectionReason>,
    {
        if self.state != GameState::Editing {
            return Err(RejectionReason::NotEditing);
        }
        edit(&mut self.layout, out_events)
    }

    fn return_to_editing(&mut self) {
        self.run = None;
        self.state = GameState::Editing;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let outcome = match command {
        Command::Tick { dt } => {
            world.tick(dt, out_events);
            Ok(())
        }
        Command::StartRun => world.start_run(out_events),
        Command::ResetRun => world.reset_run(out_events),
        Command::ClearLayout => {
            world.clear_layout(out_events);
            Ok(())
        }
        Command::LoadLevel { level } => {
            world.load_level(level, out_events);
            Ok(())
        }
        Command::ConfigureMovement { intervals } => world.configure_movement(intervals, out_events),
        Command::SetStart { cell } => {
            world.edit(out_events, |layout, out| layout.set_start(cell, out))
        }
        Command::SetGoal { cell } => {
            world.edit(out_events, |layout, out| layout.set_goal(cell, out))
        }
        Command::PlaceWall { cell } => {
            world.edit(out_events, |layout, out| layout.place_wall(cell, out))
        }
        Command::PlaceReward { cell } => {
            world.edit(out_events, |layout, out| layout.place_reward(cell, out))
        }
        Command::AddPursuer { cell } => {
            world.edit(out_events, |layout, out| layout.add_pursuer(cell, out))
        }
        Command::EraseCell { cell } => {
            world.edit(out_events, |layout, out| layout.erase(cell, out))
        }
    };

    if let Err(reason) = outcome {
        debug!(?reason, "command rejected");
        out_events.push(Event::CommandRejected { reason });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use maze_chase_core::{
        GameState, Grid, MovementIntervals, Position, PursuerSnapshot, SimulationSnapshot,
    };

    /// Current lifecycle phase.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Grid currently in play: the run's working copy, or the layout.
    ///
    /// Rewards collected during a run are absent from the working copy.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        match &world.run {
            Some(run) => run.grid(),
            None => world.layout.grid(),
        }
    }

    /// Start marker of the layout.
    #[must_use]
    pub fn start(world: &World) -> Option<Position> {
        world.layout.start()
    }

    /// Goal marker of the layout.
    #[must_use]
    pub fn goal(world: &World) -> Option<Position> {
        world.layout.goal()
    }

    /// Seeker cell while a run is in progress.
    #[must_use]
    pub fn seeker(world: &World) -> Option<Position> {
        world.run.as_ref().and_then(|run| run.seeker())
    }

    /// Pursuers in identifier order, at their run cells or their spawns.
    #[must_use]
    pub fn pursuers(world: &World) -> &[PursuerSnapshot] {
        match &world.run {
            Some(run) => run.pursuers(),
            None => world.layout.pursuers(),
        }
    }

    /// Rewards that have not been collected, in row-major order.
    #[must_use]
    pub fn rewards(world: &World) -> Vec<Position> {
        match &world.run {
            Some(run) => run.rewards().collect(),
            None => world.layout.rewards().collect(),
        }
    }

    /// Rewards collected in the current or last run.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.run.as_ref().map_or(0, |run| run.score())
    }

    /// Clock time since the run started, frozen once it ended.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world
            .run
            .as_ref()
            .map_or(Duration::ZERO, |run| run.elapsed(world.clock))
    }

    /// Total simulated time the world has been ticked.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Step cadence applied to runs.
    #[must_use]
    pub fn movement_intervals(world: &World) -> MovementIntervals {
        world.scheduler.intervals()
    }

    /// Captures the per-frame view consumed by presentation adapters.
    #[must_use]
    pub fn snapshot(world: &World) -> SimulationSnapshot {
        SimulationSnapshot {
            state: world.state,
            seeker: seeker(world),
            pursuers: pursuers(world).to_vec(),
            rewards: rewards(world),
            score: score(world),
            elapsed: elapsed(world),
            terminal_reason: world.state.terminal_reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Position, PursuerPlacement, TerminalReason};

    fn bare_world(rows: u32, columns: u32) -> World {
        World::with_config(SimulationConfig {
            rows,
            columns,
            pursuers: PursuerPlacement::Disabled,
            ..SimulationConfig::default()
        })
    }

    fn run_commands(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        events
    }

    #[test]
    fn new_world_starts_editing_with_corner_pursuers() {
        let world = World::new();

        assert_eq!(query::game_state(&world), GameState::Editing);
        assert_eq!(query::grid(&world).rows(), 30);
        assert_eq!(query::grid(&world).columns(), 30);
        let corners: Vec<Position> = query::pursuers(&world).iter().map(|p| p.cell).collect();
        assert_eq!(
            corners,
            vec![
                Position::new(0, 0),
                Position::new(0, 29),
                Position::new(29, 0),
                Position::new(29, 29),
            ]
        );
        assert_eq!(query::elapsed(&world), Duration::ZERO);
    }

    #[test]
    fn ticks_while_editing_only_advance_the_clock() {
        let mut world = bare_world(3, 3);

        let events = run_commands(
            &mut world,
            vec![
                Command::Tick {
                    dt: Duration::from_millis(40),
                },
                Command::Tick {
                    dt: Duration::from_millis(60),
                },
            ],
        );

        assert_eq!(query::clock(&world), Duration::from_millis(100));
        assert_eq!(query::game_state(&world), GameState::Editing);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn start_run_requires_goal_after_start() {
        let mut world = bare_world(3, 3);

        let events = run_commands(
            &mut world,
            vec![
                Command::SetStart {
                    cell: Position::new(0, 0),
                },
                Command::StartRun,
            ],
        );

        assert_eq!(
            events.last(),
            Some(&Event::CommandRejected {
                reason: RejectionReason::MissingGoal,
            })
        );
        assert_eq!(query::game_state(&world), GameState::Editing);
    }

    #[test]
    fn movement_cannot_be_reconfigured_mid_run() {
        let mut world = bare_world(1, 3);
        let intervals = MovementIntervals::new(Duration::from_millis(5), Duration::from_millis(5));

        let events = run_commands(
            &mut world,
            vec![
                Command::SetStart {
                    cell: Position::new(0, 0),
                },
                Command::SetGoal {
                    cell: Position::new(0, 2),
                },
                Command::StartRun,
                Command::ConfigureMovement { intervals },
            ],
        );

        assert_eq!(
            events.last(),
            Some(&Event::CommandRejected {
                reason: RejectionReason::NotEditing,
            })
        );
        assert_eq!(
            query::movement_intervals(&world),
            MovementIntervals::default()
        );
    }

    #[test]
    fn elapsed_time_freezes_at_terminal_state() {
        let mut world = bare_world(1, 2);
        let step = Duration::from_millis(120);

        let _ = run_commands(
            &mut world,
            vec![
                Command::Tick { dt: step },
                Command::SetStart {
                    cell: Position::new(0, 0),
                },
                Command::SetGoal {
                    cell: Position::new(0, 1),
                },
                Command::StartRun,
                Command::Tick { dt: step },
            ],
        );
        assert_eq!(
            query::game_state(&world),
            GameState::Terminal(TerminalReason::Win)
        );
        assert_eq!(query::elapsed(&world), step);

        let _ = run_commands(&mut world, vec![Command::Tick { dt: step }]);

        assert_eq!(query::elapsed(&world), step);
        assert_eq!(query::clock(&world), step * 3);
        assert_eq!(query::seeker(&world), None);
    }

    #[test]
    fn snapshot_reports_terminal_reason() {
        let mut world = bare_world(1, 3);

        let _ = run_commands(
            &mut world,
            vec![
                Command::SetStart {
                    cell: Position::new(0, 0),
                },
                Command::PlaceWall {
                    cell: Position::new(0, 1),
                },
                Command::SetGoal {
                    cell: Position::new(0, 2),
                },
                Command::StartRun,
                Command::Tick {
                    dt: Duration::from_millis(120),
                },
            ],
        );

        let snapshot = query::snapshot(&world);
        assert_eq!(snapshot.terminal_reason, Some(TerminalReason::Stuck));
        assert_eq!(snapshot.state, GameState::Terminal(TerminalReason::Stuck));
        assert_eq!(snapshot.score, 0);
    }
}
