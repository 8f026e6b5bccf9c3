//! Session timer runner.
//!
//! Drives a routine step by step, one tick per second:
//! - `start` begins at the first incomplete step (or resumes when paused)
//! - each tick counts the active step down, completing it at zero
//! - completion advances to the next incomplete step, or finishes the session
//!
//! The runner works on its own copy of the steps with completion flags and
//! never writes back into the routine. Every control call that changes the
//! state bumps an epoch; ticks scheduled under an older epoch are ignored,
//! so a restarted timer cannot race a stale one.

use crate::state::{record_workout, StateStore};
use crate::{Routine, RoutineStep};
use chrono::{Local, NaiveDate};

/// Lifecycle of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// A routine step plus per-session progress
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStep {
    pub step: RoutineStep,
    pub completed: bool,
}

/// What a tick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Not running, or the tick belonged to an older epoch
    Ignored,
    /// Active step counted down
    Counted { index: usize, remaining: u32 },
    /// Active step finished and the next one started
    Advanced { completed: usize, next: usize },
    /// Last step finished; carries the streak if it was recorded
    Finished { streak: Option<u32> },
}

/// Timer state machine over one routine
pub struct SessionRunner<S: StateStore> {
    steps: Vec<SessionStep>,
    state: RunState,
    active: Option<usize>,
    remaining: u32,
    epoch: u64,
    store: S,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: StateStore> SessionRunner<S> {
    /// Copy the routine's main and cooldown steps into a new idle session
    pub fn new(routine: &Routine, store: S) -> Self {
        let steps = routine
            .all_steps()
            .cloned()
            .map(|step| SessionStep {
                step,
                completed: false,
            })
            .collect();

        Self {
            steps,
            state: RunState::Idle,
            active: None,
            remaining: 0,
            epoch: 0,
            store,
            clock: local_today,
        }
    }

    /// Replace the date source used when recording the streak
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn steps(&self) -> &[SessionStep] {
        &self.steps
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Seconds left on the active step
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current tick epoch; a driver passes it back to `tick_at`
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start, or resume if paused
    ///
    /// From Idle or Completed this begins at the first incomplete step. A
    /// session whose steps are all done starts a fresh round.
    pub fn start(&mut self) {
        match self.state {
            RunState::Running => {}
            RunState::Paused => self.resume(),
            RunState::Idle | RunState::Completed => {
                if !self.steps.is_empty() && self.steps.iter().all(|s| s.completed) {
                    tracing::debug!("All steps done, starting a new round");
                    self.steps.iter_mut().for_each(|s| s.completed = false);
                }

                let Some(first) = self.steps.iter().position(|s| !s.completed) else {
                    tracing::warn!("Routine has no steps, nothing to start");
                    return;
                };

                self.activate(first);
                self.state = RunState::Running;
                self.epoch += 1;
                tracing::info!("Session started at step {}", first + 1);
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            self.epoch += 1;
            tracing::debug!("Session paused with {}s left", self.remaining);
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            self.epoch += 1;
            tracing::debug!("Session resumed");
        }
    }

    /// Stop and return to Idle; completion flags are kept
    pub fn stop(&mut self) {
        if matches!(self.state, RunState::Running | RunState::Paused) {
            self.state = RunState::Idle;
            self.active = None;
            self.remaining = 0;
            self.epoch += 1;
            tracing::info!("Session stopped");
        }
    }

    /// Tick on behalf of a timer scheduled under `epoch`
    pub fn tick_at(&mut self, epoch: u64) -> TickEvent {
        if epoch != self.epoch {
            tracing::trace!("Ignoring tick from stale epoch {}", epoch);
            return TickEvent::Ignored;
        }
        self.tick()
    }

    /// Advance the session by one second
    pub fn tick(&mut self) -> TickEvent {
        if self.state != RunState::Running {
            return TickEvent::Ignored;
        }
        let Some(index) = self.active else {
            self.state = RunState::Idle;
            return TickEvent::Ignored;
        };

        if self.remaining > 1 {
            self.remaining -= 1;
            return TickEvent::Counted {
                index,
                remaining: self.remaining,
            };
        }

        self.steps[index].completed = true;
        tracing::debug!("Completed step {}: {}", index + 1, self.steps[index].step.name);

        match self.next_incomplete(index) {
            Some(next) => {
                self.activate(next);
                TickEvent::Advanced {
                    completed: index,
                    next,
                }
            }
            None => {
                self.state = RunState::Completed;
                self.active = None;
                self.remaining = 0;
                self.epoch += 1;
                TickEvent::Finished {
                    streak: self.record_completion(),
                }
            }
        }
    }

    /// Seconds left: the active countdown plus every other incomplete step
    ///
    /// REPS steps count with their value as seconds, the same way they are
    /// paced, and steps before the active one still run once the later
    /// steps are done.
    pub fn total_remaining(&self) -> u32 {
        let queued: u32 = self
            .steps
            .iter()
            .enumerate()
            .filter(|&(i, s)| !s.completed && self.active != Some(i))
            .map(|(_, s)| s.step.duration_or_reps)
            .sum();

        queued + self.remaining
    }

    /// Progress of a step in percent, for display
    pub fn progress_percent(&self, index: usize) -> u8 {
        let Some(entry) = self.steps.get(index) else {
            return 0;
        };
        if entry.completed {
            return 100;
        }
        let base = entry.step.duration_or_reps;
        if self.active != Some(index) || base == 0 {
            return 0;
        }
        let done = base.saturating_sub(self.remaining);
        ((done * 100 + base / 2) / base).min(100) as u8
    }

    fn activate(&mut self, index: usize) {
        self.active = Some(index);
        // REPS steps are paced using their count as seconds
        self.remaining = self.steps[index].step.duration_or_reps;
    }

    fn next_incomplete(&self, after: usize) -> Option<usize> {
        (after + 1..self.steps.len())
            .chain(0..after)
            .find(|&i| !self.steps[i].completed)
    }

    fn record_completion(&self) -> Option<u32> {
        match record_workout(&self.store, (self.clock)()) {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Failed to record streak: {}", e);
                None
            }
        }
    }
}
