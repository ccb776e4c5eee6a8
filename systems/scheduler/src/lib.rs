#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement cadence shared by the seeker and the pursuers.
//!
//! Each agent category is rate-limited independently against the world
//! clock. When a category fires, its last-move timestamp is reset to the
//! current reading rather than to an interval boundary, so a late tick
//! delays the next step instead of producing a burst of catch-up steps.

use std::time::Duration;

use maze_chase_core::MovementIntervals;

/// Agent category driven by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mover {
    /// The single seeker.
    Seeker,
    /// Every pursuer, stepped together.
    Pursuers,
}

impl Mover {
    /// Order in which categories are evaluated within a single tick.
    pub const EVALUATION_ORDER: [Mover; 2] = [Mover::Seeker, Mover::Pursuers];
}

/// Tracks the last step of each category and reports when the next is due.
#[derive(Clone, Debug)]
pub struct MovementScheduler {
    intervals: MovementIntervals,
    last_seeker_step: Duration,
    last_pursuer_step: Duration,
}

impl MovementScheduler {
    /// Creates a scheduler armed at clock reading zero.
    #[must_use]
    pub const fn new(intervals: MovementIntervals) -> Self {
        Self {
            intervals,
            last_seeker_step: Duration::ZERO,
            last_pursuer_step: Duration::ZERO,
        }
    }

    /// Intervals currently in effect.
    #[must_use]
    pub const fn intervals(&self) -> MovementIntervals {
        self.intervals
    }

    /// Replaces the intervals without touching the last-step timestamps.
    pub fn reconfigure(&mut self, intervals: MovementIntervals) {
        self.intervals = intervals;
    }

    /// Restarts both categories from the provided clock reading.
    pub fn arm(&mut self, now: Duration) {
        self.last_seeker_step = now;
        self.last_pursuer_step = now;
    }

    /// Reports whether `mover` is due at `now`, consuming the step if so.
    ///
    /// A category is due once the time since its last step meets or exceeds
    /// its interval. At most one step fires per call.
    pub fn fire(&mut self, mover: Mover, now: Duration) -> bool {
        let (last, interval) = match mover {
            Mover::Seeker => (&mut self.last_seeker_step, self.intervals.seeker),
            Mover::Pursuers => (&mut self.last_pursuer_step, self.intervals.pursuer),
        };

        if now.saturating_sub(*last) < interval {
            return false;
        }

        *last = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(seeker_ms: u64, pursuer_ms: u64) -> MovementScheduler {
        MovementScheduler::new(MovementIntervals::new(
            Duration::from_millis(seeker_ms),
            Duration::from_millis(pursuer_ms),
        ))
    }

    #[test]
    fn fires_when_elapsed_meets_interval() {
        let mut scheduler = scheduler(120, 260);
        scheduler.arm(Duration::from_millis(1_000));

        assert!(!scheduler.fire(Mover::Seeker, Duration::from_millis(1_119)));
        assert!(scheduler.fire(Mover::Seeker, Duration::from_millis(1_120)));
        assert!(!scheduler.fire(Mover::Seeker, Duration::from_millis(1_120)));
    }

    #[test]
    fn late_ticks_reset_to_now_without_catch_up() {
        let mut scheduler = scheduler(100, 1_000);

        assert!(scheduler.fire(Mover::Seeker, Duration::from_millis(350)));
        assert!(!scheduler.fire(Mover::Seeker, Duration::from_millis(400)));
        assert!(!scheduler.fire(Mover::Seeker, Duration::from_millis(449)));
        assert!(scheduler.fire(Mover::Seeker, Duration::from_millis(450)));
    }

    #[test]
    fn categories_are_rate_limited_independently() {
        let mut scheduler = scheduler(120, 260);

        let mut seeker_steps = 0;
        let mut pursuer_steps = 0;
        for tick in 1..=52 {
            let now = Duration::from_millis(tick * 10);
            for mover in Mover::EVALUATION_ORDER {
                if scheduler.fire(mover, now) {
                    match mover {
                        Mover::Seeker => seeker_steps += 1,
                        Mover::Pursuers => pursuer_steps += 1,
                    }
                }
            }
        }

        assert_eq!(seeker_steps, 4);
        assert_eq!(pursuer_steps, 2);
    }

    #[test]
    fn reconfigure_keeps_timestamps() {
        let mut scheduler = scheduler(120, 260);
        scheduler.arm(Duration::from_millis(40));

        scheduler.reconfigure(MovementIntervals::new(
            Duration::from_millis(10),
            Duration::from_millis(10),
        ));

        assert!(!scheduler.fire(Mover::Pursuers, Duration::from_millis(49)));
        assert!(scheduler.fire(Mover::Pursuers, Duration::from_millis(50)));
    }
}
