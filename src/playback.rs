//! Playback scheduling: a cursor state machine over the current trajectory.
//!
//! The scheduler never sleeps itself. `start` and `advance` hand back an
//! epoch-tagged [`Tick`]; the driver waits out the returned delay and calls
//! `advance` with the tick. Every state transition bumps the epoch, so a
//! tick issued before a `pause`/`reset`/`start` is answered with
//! [`Advance::Stale`] and cannot move the cursor. This is what makes the
//! cooperative delay loop cancellable without leaked continuations.

use std::time::Duration;

use crate::{
    error::{SaccadeError, SaccadeResult},
    path::{PathPoint, Trajectory},
    settings::Settings,
};

/// Visual steps assumed per word-equivalent unit of a generated sequence.
/// The baseline delay is `60000 / speed / STEPS_PER_WORD` milliseconds.
pub const STEPS_PER_WORD: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
}

/// Permission to perform one advance step. Valid only until the next
/// state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    epoch: u64,
}

/// Outcome of one advance step.
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// A point was emitted; wait `delay`, then call `advance` with `next`.
    Emitted {
        point: PathPoint,
        delay: Duration,
        next: Tick,
    },
    /// The sequence is exhausted; the scheduler has reset itself to Idle.
    Finished,
    /// The tick was invalidated by a pause/reset/start in the meantime.
    /// No state was touched.
    Stale,
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    cursor: usize,
    phase: Phase,
    epoch: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            phase: Phase::Idle,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Begins (or resumes) playback from the current cursor.
    ///
    /// Fails without a state change when the trajectory is empty. The
    /// returned tick is due immediately.
    pub fn start(&mut self, trajectory: &Trajectory) -> SaccadeResult<Tick> {
        if trajectory.is_empty() {
            return Err(SaccadeError::empty_trajectory(
                "no points to play; load a document or widen the reading region",
            ));
        }

        self.phase = Phase::Playing;
        self.epoch += 1;
        tracing::debug!(cursor = self.cursor, epoch = self.epoch, "playback started");
        Ok(Tick { epoch: self.epoch })
    }

    /// Stops advancing; the cursor stays where it is.
    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
        }
        self.epoch += 1;
        tracing::debug!(cursor = self.cursor, "playback paused");
    }

    /// Pause + cursor to 0 + Idle.
    pub fn reset(&mut self) {
        self.pause();
        self.cursor = 0;
        self.phase = Phase::Idle;
    }

    /// The current trajectory was regenerated. Playing on into a sequence
    /// computed from different settings or a different page would jump
    /// mid-pattern, so replacement always forces a reset.
    pub fn trajectory_replaced(&mut self) {
        self.reset();
    }

    /// One advance step: emit the point under the cursor, move the cursor,
    /// and compute the delay until the next step.
    pub fn advance(
        &mut self,
        tick: Tick,
        trajectory: &Trajectory,
        settings: &Settings,
    ) -> Advance {
        if tick.epoch != self.epoch || self.phase != Phase::Playing {
            tracing::debug!(tick = tick.epoch, epoch = self.epoch, "stale tick dropped");
            return Advance::Stale;
        }

        let Some(point) = trajectory.get(self.cursor).copied() else {
            self.reset();
            return Advance::Finished;
        };

        self.cursor += 1;
        Advance::Emitted {
            point,
            delay: step_delay(&point, settings),
            next: Tick { epoch: self.epoch },
        }
    }
}

/// Delay before the step after `point`.
///
/// An explicit per-point duration overrides the WPM-derived baseline; both
/// are divided by the point-speed multiplier.
pub fn step_delay(point: &PathPoint, settings: &Settings) -> Duration {
    let base_ms = match point.duration_ms {
        Some(ms) => ms,
        None => 60_000.0 / f64::from(settings.speed) / STEPS_PER_WORD,
    };
    Duration::from_secs_f64((base_ms / settings.point_speed).max(0.0) / 1000.0)
}

/// Suspension seam for the cooperative drive loop, injectable in tests.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock suspension via `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
