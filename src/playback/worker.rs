//! Background move-by-move playback loop.
//!
//! The loop owns the live [`TowerState`] for the whole run. It posts every
//! visible change as a [`PlaybackSignal`] and mirrors the newest frame into a
//! triple buffer; nothing else reads its working state.

use std::sync::mpsc;
use std::sync::Arc;

use super::control::{Checkpoint, ControlBlock};
use super::signal::{DiskInMotion, FrameSnapshot, PlaybackSignal};
use super::state::{PlaybackSession, RunState};
use crate::animation::MotionPath;
use crate::puzzle::{Move, MoveError, TowerState};
use crate::scene::SceneLayout;
use crate::util::frame_timing::FramePacer;

/// Writer half of the latest-frame handoff.
pub(crate) type FrameInput = triple_buffer::Input<Option<FrameSnapshot>>;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Every move was applied.
    Completed,
    /// Stopped at a checkpoint on request.
    Cancelled,
    /// The tower model rejected a move.
    Failed(MoveError),
}

/// Everything handed back to the controller when the thread exits.
pub(crate) struct WorkerExit {
    /// Towers exactly as the loop left them.
    pub(crate) towers: TowerState,
    /// The frame writer, returned so the controller can keep publishing.
    pub(crate) frames: FrameInput,
    pub(crate) outcome: Outcome,
}

/// Fixed inputs for one run.
pub(crate) struct WorkerContext {
    pub(crate) control: Arc<ControlBlock>,
    pub(crate) signals: mpsc::Sender<PlaybackSignal>,
    pub(crate) frames: FrameInput,
    pub(crate) layout: SceneLayout,
    pub(crate) frame_count: usize,
    pub(crate) arc_height: f32,
}

impl WorkerContext {
    fn post(&self, signal: PlaybackSignal) {
        let _ = self.signals.send(signal);
    }

    fn publish(&mut self, frame: FrameSnapshot) {
        self.frames.write(Some(frame.clone()));
        self.post(PlaybackSignal::StateChanged(frame));
    }

    fn exit(self, towers: TowerState, outcome: Outcome) -> WorkerExit {
        WorkerExit {
            towers,
            frames: self.frames,
            outcome,
        }
    }
}

/// Step through `moves` against `towers`, animating each one.
pub(crate) fn run(
    mut ctx: WorkerContext,
    mut towers: TowerState,
    moves: Vec<Move>,
) -> WorkerExit {
    let mut session = PlaybackSession::new(moves, ctx.control.speed());
    let total = session.total_moves();
    log::info!(
        "playback started: {} disks, {total} moves, {:.2}s per move",
        towers.disk_count(),
        session.speed.as_secs_f32()
    );
    ctx.publish(FrameSnapshot::settled(towers.clone()));

    for index in 0..total {
        if ctx.control.checkpoint() == Checkpoint::Cancelled {
            return cancelled(ctx, towers, &session);
        }

        let mv = session.moves[index];
        session.begin_move(index, ctx.control.speed());
        let disk = match towers.check_move(mv) {
            Ok(disk) => disk,
            Err(e) => return fail(ctx, towers, index, e),
        };
        ctx.post(PlaybackSignal::MoveProgress {
            current: index + 1,
            total,
        });
        log::debug!("move {}/{total}: disk {disk} {mv}", index + 1);

        let view = towers.lifted(mv.source);
        let curve = ctx.layout.motion_curve(&towers, mv, ctx.arc_height);
        let path = MotionPath::sample(&curve, ctx.frame_count);
        let mut pacer = FramePacer::start_now(
            session.speed,
            u32::try_from(ctx.frame_count).unwrap_or(u32::MAX),
        );

        for (frame_index, &position) in path.points().iter().enumerate() {
            match ctx.control.checkpoint() {
                Checkpoint::Cancelled => {
                    return cancelled(ctx, towers, &session);
                }
                Checkpoint::Continue { paused_for } => {
                    pacer.postpone(paused_for);
                }
            }
            if ctx.control.sleep_until(pacer.deadline(frame_index))
                == Checkpoint::Cancelled
            {
                return cancelled(ctx, towers, &session);
            }

            let motion = DiskInMotion {
                disk,
                source: mv.source,
                target: mv.target,
                frame_index,
                frame_count: path.frame_count(),
                position,
            };
            session.motion_frame = frame_index;
            session.in_motion = Some(motion);
            ctx.publish(FrameSnapshot {
                towers: view.clone(),
                in_motion: Some(motion),
            });
        }

        if let Err(e) = towers.apply(mv) {
            return fail(ctx, towers, index, e);
        }
        session.settle();
        ctx.publish(FrameSnapshot::settled(towers.clone()));
    }

    let finished = ctx.control.finish(|| {
        ctx.post(PlaybackSignal::RunStateChanged(RunState::Completed));
        ctx.post(PlaybackSignal::Completed);
    });
    if finished {
        log::info!("playback completed after {total} moves");
        ctx.exit(towers, Outcome::Completed)
    } else {
        ctx.exit(towers, Outcome::Cancelled)
    }
}

fn cancelled(
    ctx: WorkerContext,
    towers: TowerState,
    session: &PlaybackSession,
) -> WorkerExit {
    match session.in_motion {
        Some(motion) => log::info!(
            "playback cancelled during move {} (disk {}, frame {})",
            session.current_move + 1,
            motion.disk,
            session.motion_frame
        ),
        None => log::info!(
            "playback cancelled before move {}",
            session.current_move + 1
        ),
    }
    ctx.exit(towers, Outcome::Cancelled)
}

fn fail(
    ctx: WorkerContext,
    towers: TowerState,
    index: usize,
    error: MoveError,
) -> WorkerExit {
    log::error!("move {} rejected by the tower model: {error}", index + 1);
    ctx.control.abandon();
    ctx.post(PlaybackSignal::RunStateChanged(RunState::Idle));
    ctx.exit(towers, Outcome::Failed(error))
}
