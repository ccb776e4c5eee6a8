//! Working copy of the layout while a run is active or finished.

use std::{collections::BTreeSet, time::Duration};

use maze_chase_core::{CellKind, Event, Grid, Position, PursuerSnapshot, TerminalReason};
use maze_chase_system_scheduler::{MovementScheduler, Mover};
use tracing::{debug, trace};

use crate::layout::Layout;

#[derive(Clone, Debug)]
pub(crate) struct Run {
    grid: Grid,
    goal: Position,
    rewards: BTreeSet<Position>,
    seeker: Option<Position>,
    pursuers: Vec<PursuerSnapshot>,
    score: u32,
    started_at: Duration,
    ended_at: Option<Duration>,
}

impl Run {
    pub(crate) fn begin(layout: &Layout, start: Position, goal: Position, now: Duration) -> Self {
        Self {
            grid: layout.grid().clone(),
            goal,
            rewards: layout.rewards().collect(),
            seeker: Some(start),
            pursuers: layout.pursuers().to_vec(),
            score: 0,
            started_at: now,
            ended_at: None,
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) const fn seeker(&self) -> Option<Position> {
        self.seeker
    }

    pub(crate) fn pursuers(&self) -> &[PursuerSnapshot] {
        &self.pursuers
    }

    pub(crate) fn rewards(&self) -> impl Iterator<Item = Position> + '_ {
        self.rewards.iter().copied()
    }

    pub(crate) const fn score(&self) -> u32 {
        self.score
    }

    /// Clock time since the start, frozen at the end of the run.
    pub(crate) fn elapsed(&self, now: Duration) -> Duration {
        self.ended_at.unwrap_or(now).saturating_sub(self.started_at)
    }

    /// Freezes the run: the seeker leaves the board and the end time is fixed.
    pub(crate) fn finish(&mut self, now: Duration) {
        self.seeker = None;
        self.ended_at = Some(now);
    }

    /// Moves every category that is due and reports a terminal outcome.
    pub(crate) fn advance(
        &mut self,
        scheduler: &mut MovementScheduler,
        now: Duration,
        out_events: &mut Vec<Event>,
    ) -> Option<TerminalReason> {
        let seeker = self.seeker?;
        if self.pursuer_at(seeker) {
            return Some(TerminalReason::Caught);
        }

        for mover in Mover::EVALUATION_ORDER {
            if !scheduler.fire(mover, now) {
                continue;
            }
            match mover {
                Mover::Seeker => {
                    if let Some(reason) = self.step_seeker(out_events) {
                        return Some(reason);
                    }
                }
                Mover::Pursuers => self.step_pursuers(out_events),
            }
        }

        let seeker = self.seeker?;
        self.pursuer_at(seeker).then_some(TerminalReason::Caught)
    }

    fn step_seeker(&mut self, out_events: &mut Vec<Event>) -> Option<TerminalReason> {
        let from = self.seeker?;
        let pursuers = &self.pursuers;
        let path = maze_chase_system_seeker::find_path(&self.grid, from, self.goal, |cell| {
            pursuers.iter().any(|pursuer| pursuer.cell == cell)
        });

        let Some(path) = path else {
            debug!(?from, goal = ?self.goal, "seeker has no path to the goal");
            return Some(TerminalReason::Stuck);
        };
        let Some(&to) = path.get(1) else {
            return Some(TerminalReason::Win);
        };

        self.seeker = Some(to);
        trace!(?from, ?to, remaining = path.len() - 2, "seeker advanced");
        out_events.push(Event::SeekerAdvanced { from, to });

        if self.rewards.remove(&to) {
            let _ = self.grid.set(to, CellKind::Empty);
            self.score = self.score.saturating_add(1);
            debug!(cell = ?to, score = self.score, "reward collected");
            out_events.push(Event::RewardCollected {
                cell: to,
                score: self.score,
            });
        }

        (to == self.goal).then_some(TerminalReason::Win)
    }

    fn step_pursuers(&mut self, out_events: &mut Vec<Event>) {
        let Some(target) = self.seeker else {
            return;
        };

        for pursuer in &mut self.pursuers {
            let from = pursuer.cell;
            let Some(path) = maze_chase_system_pursuit::find_path(&self.grid, from, target) else {
                continue;
            };
            let Some(&to) = path.get(1) else {
                continue;
            };

            pursuer.cell = to;
            trace!(pursuer = pursuer.id.get(), ?from, ?to, "pursuer advanced");
            out_events.push(Event::PursuerAdvanced {
                pursuer: pursuer.id,
                from,
                to,
            });
        }
    }

    fn pursuer_at(&self, cell: Position) -> bool {
        self.pursuers.iter().any(|pursuer| pursuer.cell == cell)
    }
}
