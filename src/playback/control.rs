//! Run flags shared between the controller and its playback thread.
//!
//! The foreground only ever flips flags here; the playback thread observes
//! them at checkpoints (top of each move and before each frame). Pausing
//! parks the thread on a condition variable, and every flag change notifies
//! it, so resume and cancel take effect without polling.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use web_time::{Duration, Instant};

use super::state::RunState;

/// What the playback thread should do after a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Checkpoint {
    /// Keep going. `paused_for` is how long the thread was parked.
    Continue {
        /// Time spent paused at this checkpoint.
        paused_for: Duration,
    },
    /// Stop immediately, leaving the towers as they are.
    Cancelled,
}

#[derive(Debug)]
struct ControlFlags {
    run_state: RunState,
    cancelled: bool,
    speed: Duration,
}

/// Shared flags plus the condition variable the playback thread sleeps on.
#[derive(Debug)]
pub(crate) struct ControlBlock {
    flags: Mutex<ControlFlags>,
    wake: Condvar,
}

impl ControlBlock {
    /// Flags for a run that is starting now.
    pub(crate) fn running(speed: Duration) -> Self {
        Self {
            flags: Mutex::new(ControlFlags {
                run_state: RunState::Running,
                cancelled: false,
                speed,
            }),
            wake: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlFlags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn run_state(&self) -> RunState {
        self.lock().run_state
    }

    /// Flip between Running and Paused. Returns the new state, or `None`
    /// if the run is in neither.
    ///
    /// `on_change` runs with the flags still locked, so anything it posts is
    /// ordered before whatever the playback thread posts next.
    pub(crate) fn toggle_pause(
        &self,
        on_change: impl FnOnce(RunState),
    ) -> Option<RunState> {
        let mut flags = self.lock();
        let next = match flags.run_state {
            RunState::Running if !flags.cancelled => RunState::Paused,
            RunState::Paused if !flags.cancelled => RunState::Running,
            _ => return None,
        };
        flags.run_state = next;
        on_change(next);
        drop(flags);
        self.wake.notify_all();
        Some(next)
    }

    /// Ask the playback thread to stop at its next checkpoint.
    pub(crate) fn cancel(&self) {
        self.lock().cancelled = true;
        self.wake.notify_all();
    }

    /// Speed used by the next move to start.
    pub(crate) fn set_speed(&self, speed: Duration) {
        self.lock().speed = speed;
    }

    pub(crate) fn speed(&self) -> Duration {
        self.lock().speed
    }

    /// Block while paused; report cancellation.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        let flags = self.lock();
        if flags.cancelled {
            return Checkpoint::Cancelled;
        }
        if flags.run_state != RunState::Paused {
            return Checkpoint::Continue {
                paused_for: Duration::ZERO,
            };
        }

        let parked_at = Instant::now();
        log::debug!("playback paused");
        let flags = self
            .wake
            .wait_while(flags, |f| {
                f.run_state == RunState::Paused && !f.cancelled
            })
            .unwrap_or_else(PoisonError::into_inner);
        if flags.cancelled {
            return Checkpoint::Cancelled;
        }
        log::debug!("playback resumed");
        Checkpoint::Continue {
            paused_for: parked_at.elapsed(),
        }
    }

    /// Sleep until `deadline`, waking early only to report cancellation.
    pub(crate) fn sleep_until(&self, deadline: Instant) -> Checkpoint {
        let mut flags = self.lock();
        loop {
            if flags.cancelled {
                return Checkpoint::Cancelled;
            }
            let now = Instant::now();
            if now >= deadline {
                return Checkpoint::Continue {
                    paused_for: Duration::ZERO,
                };
            }
            flags = self
                .wake
                .wait_timeout(flags, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Mark the run Completed unless it was cancelled, waiting out a pause
    /// first. `on_finish` runs under the lock once the state is Completed.
    /// Returns whether the run was marked.
    pub(crate) fn finish(&self, on_finish: impl FnOnce()) -> bool {
        let flags = self.lock();
        let mut flags = self
            .wake
            .wait_while(flags, |f| {
                f.run_state == RunState::Paused && !f.cancelled
            })
            .unwrap_or_else(PoisonError::into_inner);
        if flags.cancelled {
            return false;
        }
        flags.run_state = RunState::Completed;
        on_finish();
        true
    }

    /// Mark a run that stopped on its own (e.g. after an illegal move) as
    /// idle.
    pub(crate) fn abandon(&self) {
        let mut flags = self.lock();
        flags.cancelled = true;
        flags.run_state = RunState::Idle;
    }
}
