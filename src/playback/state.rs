//! Run states and the per-run session record.

use std::fmt;

use web_time::Duration;

use crate::puzzle::Move;

use super::signal::DiskInMotion;

/// Playback state machine.
///
/// ```text
/// Idle ──start──▶ Running ◀──toggle──▶ Paused
///  ▲                 │                    │
///  └──reset/cancel───┴────────────────────┘
///                    │ last move settles
///                    ▼
///                Completed ──start──▶ Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No playback; towers in the initial configuration.
    #[default]
    Idle,
    /// The background loop is stepping through moves.
    Running,
    /// The background loop is parked at a checkpoint.
    Paused,
    /// Every move has been applied.
    Completed,
}

impl RunState {
    /// Whether a background loop exists and has not finished.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Status line text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Running => "Running...",
            Self::Paused => "Paused",
            Self::Completed => "Completed!",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Working record of one run, owned by the background loop.
#[derive(Debug)]
pub(crate) struct PlaybackSession {
    /// The full precomputed solution.
    pub(crate) moves: Vec<Move>,
    /// Index of the move being animated (or next to animate).
    pub(crate) current_move: usize,
    /// Motion duration captured when the current move began.
    pub(crate) speed: Duration,
    /// The disk currently in flight, if any.
    pub(crate) in_motion: Option<DiskInMotion>,
    /// Frame of the current motion last shown.
    pub(crate) motion_frame: usize,
}

impl PlaybackSession {
    pub(crate) fn new(moves: Vec<Move>, speed: Duration) -> Self {
        Self {
            moves,
            current_move: 0,
            speed,
            in_motion: None,
            motion_frame: 0,
        }
    }

    pub(crate) fn total_moves(&self) -> usize {
        self.moves.len()
    }

    pub(crate) fn begin_move(&mut self, index: usize, speed: Duration) {
        self.current_move = index;
        self.speed = speed;
        self.motion_frame = 0;
        self.in_motion = None;
    }

    pub(crate) fn settle(&mut self) {
        self.in_motion = None;
        self.current_move += 1;
    }
}
