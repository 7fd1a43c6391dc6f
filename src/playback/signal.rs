//! Signals the playback loop posts to its rendering collaborator.

use glam::Vec2;

use super::state::RunState;
use crate::puzzle::{Disk, TowerId, TowerState};

/// The disk currently travelling between towers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskInMotion {
    /// Disk being moved.
    pub disk: Disk,
    /// Tower it was lifted from.
    pub source: TowerId,
    /// Tower it will land on.
    pub target: TowerId,
    /// Frame of the motion this position belongs to.
    pub frame_index: usize,
    /// Number of frame intervals in the motion.
    pub frame_count: usize,
    /// Interpolated position (layout units, disk centre / top edge).
    pub position: Vec2,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Settled disks. While a disk is in flight it is absent from its
    /// source tower here and described by `in_motion` instead.
    pub towers: TowerState,
    /// The disk in flight, if any.
    pub in_motion: Option<DiskInMotion>,
}

impl FrameSnapshot {
    /// Frame with no disk in flight.
    #[must_use]
    pub fn settled(towers: TowerState) -> Self {
        Self {
            towers,
            in_motion: None,
        }
    }

    /// Whether the settled disks plus the in-flight disk form a consistent
    /// tower configuration, i.e. no disk is missing or duplicated.
    #[must_use]
    pub fn accounts_for_every_disk(&self) -> bool {
        match self.in_motion {
            None => self.towers.is_consistent(),
            Some(motion) => {
                let mut restored = self.towers.clone();
                restored.restore_top(motion.source, motion.disk)
                    && restored.is_consistent()
            }
        }
    }
}

/// A state change posted from the playback loop (or from a control call)
/// to the foreground.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackSignal {
    /// Redraw with this frame.
    StateChanged(FrameSnapshot),
    /// A move began (`current` is 1-based), or progress was reset to 0.
    MoveProgress {
        /// Number of the move being animated; 0 after a reset.
        current: usize,
        /// Length of the full solution.
        total: usize,
    },
    /// The run state changed.
    RunStateChanged(RunState),
    /// The last move settled. Posted once per run.
    Completed,
}

impl PlaybackSignal {
    /// Deliver this signal to the matching observer callback.
    pub fn dispatch<O: PlaybackObserver + ?Sized>(self, observer: &mut O) {
        match self {
            Self::StateChanged(frame) => observer.on_state_changed(&frame),
            Self::MoveProgress { current, total } => {
                observer.on_move_progress(current, total);
            }
            Self::RunStateChanged(state) => {
                observer.on_run_state_changed(state);
            }
            Self::Completed => observer.on_completed(),
        }
    }
}

/// Receiver side of the rendering boundary.
///
/// Callbacks run on whichever thread drains the signal queue (see
/// [`PlaybackController::pump`](super::PlaybackController::pump)), never on
/// the playback thread.
pub trait PlaybackObserver {
    /// Redraw with the given frame.
    fn on_state_changed(&mut self, frame: &FrameSnapshot);

    /// Update the move counter.
    fn on_move_progress(&mut self, _current: usize, _total: usize) {}

    /// Update status text or control enablement.
    fn on_run_state_changed(&mut self, _state: RunState) {}

    /// Playback finished every move.
    fn on_completed(&mut self) {}
}
