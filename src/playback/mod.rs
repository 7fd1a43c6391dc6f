//! Playback controller: the state machine that turns a move sequence into
//! a timed, interruptible replay.
//!
//! [`PlaybackController`] lives on the foreground thread. Each run spawns a
//! named background thread which owns the live towers and steps through
//! the moves; the foreground only flips shared flags and receives
//! [`PlaybackSignal`]s over a channel. A triple buffer mirrors the newest
//! [`FrameSnapshot`] for renderers that redraw at their own rate.

mod control;
pub mod signal;
pub mod state;
mod worker;

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

pub use signal::{DiskInMotion, FrameSnapshot, PlaybackObserver, PlaybackSignal};
pub use state::RunState;
use web_time::Duration;

use self::control::ControlBlock;
use self::worker::{FrameInput, Outcome, WorkerContext, WorkerExit};
use crate::error::HanoiError;
use crate::options::{
    validate_disk_count, validate_speed, LayoutOptions, Options,
    PlaybackOptions,
};
use crate::puzzle::{generate, move_count, TowerState};
use crate::scene::SceneLayout;

/// Name given to the background playback thread.
const WORKER_THREAD_NAME: &str = "hanoi-playback";

type FrameOutput = triple_buffer::Output<Option<FrameSnapshot>>;

/// A spawned run and the flags it watches.
struct ActiveRun {
    control: Arc<ControlBlock>,
    thread: JoinHandle<WorkerExit>,
}

/// Foreground handle over the playback state machine.
///
/// Every command is total: issuing one in a state where it has no meaning
/// is a no-op, never an error. Only [`configure`](Self::configure) and
/// [`set_speed`](Self::set_speed) reject input.
pub struct PlaybackController {
    playback: PlaybackOptions,
    layout: LayoutOptions,
    /// Towers shown while no run exists.
    towers: TowerState,
    signal_tx: mpsc::Sender<PlaybackSignal>,
    signal_rx: mpsc::Receiver<PlaybackSignal>,
    /// Frame writer, held here whenever no worker owns it.
    frame_input: Option<FrameInput>,
    frame_output: FrameOutput,
    run: Option<ActiveRun>,
}

impl PlaybackController {
    /// Build an idle controller from validated options.
    ///
    /// The initial idle signals (settled frame, zero progress, `Idle`) are
    /// queued immediately.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidConfiguration`] if any option is out
    /// of range.
    pub fn new(options: &Options) -> Result<Self, HanoiError> {
        options.validate()?;
        let (signal_tx, signal_rx) = mpsc::channel();
        let (frame_input, frame_output) = triple_buffer::triple_buffer(&None);
        let mut controller = Self {
            playback: options.playback.clone(),
            layout: options.layout.clone(),
            towers: TowerState::new(options.playback.disk_count),
            signal_tx,
            signal_rx,
            frame_input: Some(frame_input),
            frame_output,
            run: None,
        };
        controller.enter_idle();
        Ok(controller)
    }

    // -- Configuration --

    /// Change the disk count and reset to the initial configuration.
    ///
    /// Any run in progress is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidConfiguration`] if `disk_count` is
    /// outside `1..=10`; nothing changes in that case.
    pub fn configure(&mut self, disk_count: u8) -> Result<(), HanoiError> {
        if let Err(e) = validate_disk_count(disk_count) {
            log::warn!("rejected disk count {disk_count}: {e}");
            return Err(e);
        }
        if self.run_state().is_active() {
            log::info!("disk count changed during playback; resetting");
        }
        self.playback.disk_count = disk_count;
        self.reset();
        Ok(())
    }

    /// Change the motion duration per move.
    ///
    /// Takes effect when the next move begins; a disk already in flight
    /// keeps its pace.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidConfiguration`] if `secs` is not a
    /// positive finite number; nothing changes in that case.
    pub fn set_speed(&mut self, secs: f32) -> Result<(), HanoiError> {
        if let Err(e) = validate_speed(secs) {
            log::warn!("rejected speed {secs}: {e}");
            return Err(e);
        }
        self.playback.speed_secs = secs;
        if let Some(run) = &self.run {
            run.control.set_speed(self.playback.move_duration());
        }
        log::debug!("speed set to {secs:.2}s per move");
        Ok(())
    }

    // -- Commands --

    /// Begin playback from the initial configuration.
    ///
    /// No-op while Running or Paused. From Completed this starts a fresh
    /// run.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::ThreadSpawn`] if the playback thread cannot be
    /// spawned; the controller stays Idle.
    pub fn start(&mut self) -> Result<(), HanoiError> {
        if self.run_state().is_active() {
            log::debug!("start ignored: playback already {}", self.run_state());
            return Ok(());
        }
        let _ = self.stop_worker();
        self.towers = TowerState::new(self.playback.disk_count);

        let control =
            Arc::new(ControlBlock::running(self.playback.move_duration()));
        let frames = self.take_frame_input();
        let ctx = WorkerContext {
            control: Arc::clone(&control),
            signals: self.signal_tx.clone(),
            frames,
            layout: SceneLayout::new(&self.layout, self.playback.disk_count),
            frame_count: self.playback.frame_count as usize,
            arc_height: self.playback.arc_height,
        };
        let towers = self.towers.clone();
        let moves = generate(self.playback.disk_count);

        self.post(PlaybackSignal::RunStateChanged(RunState::Running));
        let spawned = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || worker::run(ctx, towers, moves));
        match spawned {
            Ok(handle) => {
                self.run = Some(ActiveRun {
                    control,
                    thread: handle,
                });
                Ok(())
            }
            Err(e) => {
                log::error!("failed to spawn playback thread: {e}");
                // The frame writer went down with the closure.
                self.rebuild_frames();
                self.enter_idle();
                Err(HanoiError::ThreadSpawn(e))
            }
        }
    }

    /// Pause a running playback or resume a paused one.
    ///
    /// The disk in flight stops at its current frame and resumes from the
    /// next one. No-op when Idle or Completed.
    pub fn toggle_pause(&self) {
        let Some(run) = &self.run else {
            return;
        };
        let signals = &self.signal_tx;
        let toggled = run.control.toggle_pause(|state| {
            let _ = signals.send(PlaybackSignal::RunStateChanged(state));
        });
        match toggled {
            Some(state) => log::debug!("playback {}", state.label()),
            None => log::debug!("toggle ignored: nothing to pause"),
        }
    }

    /// Return to Idle with all disks on the source tower. Valid from any
    /// state.
    pub fn reset(&mut self) {
        if self.run.is_some() {
            log::info!("playback reset");
        }
        let _ = self.stop_worker();
        self.enter_idle();
    }

    /// Stop playback and hand back the towers the worker held when it
    /// stopped, then behave as [`reset`](Self::reset).
    ///
    /// The returned state is always consistent: a disk that was in flight
    /// is reported on its source tower. Returns `None` if no run existed or
    /// the worker could not be joined.
    pub fn cancel(&mut self) -> Option<TowerState> {
        let stopped = self.stop_worker();
        self.enter_idle();
        stopped
    }

    // -- Accessors --

    /// Current run state.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run
            .as_ref()
            .map_or(RunState::Idle, |run| run.control.run_state())
    }

    /// Configured disk count.
    #[must_use]
    pub fn disk_count(&self) -> u8 {
        self.playback.disk_count
    }

    /// Configured motion duration per move, in seconds.
    #[must_use]
    pub fn speed_secs(&self) -> f32 {
        self.playback.speed_secs
    }

    /// Length of the solution for the configured disk count.
    #[must_use]
    pub fn total_moves(&self) -> u64 {
        move_count(self.playback.disk_count)
    }

    /// Geometry for the configured drawing area and disk count.
    #[must_use]
    pub fn layout(&self) -> SceneLayout {
        SceneLayout::new(&self.layout, self.playback.disk_count)
    }

    // -- Signals --

    /// Next queued signal, if any.
    #[must_use]
    pub fn try_recv_signal(&self) -> Option<PlaybackSignal> {
        self.signal_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next signal.
    #[must_use]
    pub fn recv_signal_timeout(
        &self,
        timeout: Duration,
    ) -> Option<PlaybackSignal> {
        self.signal_rx.recv_timeout(timeout).ok()
    }

    /// Drain every queued signal into `observer`. Returns how many were
    /// delivered.
    pub fn pump<O: PlaybackObserver + ?Sized>(
        &self,
        observer: &mut O,
    ) -> usize {
        let mut delivered = 0;
        while let Ok(signal) = self.signal_rx.try_recv() {
            signal.dispatch(observer);
            delivered += 1;
        }
        delivered
    }

    /// Newest frame published, without touching the signal queue.
    pub fn latest_frame(&mut self) -> Option<FrameSnapshot> {
        let _ = self.frame_output.update();
        self.frame_output.output_buffer_mut().clone()
    }

    // -- Internals --

    fn post(&self, signal: PlaybackSignal) {
        let _ = self.signal_tx.send(signal);
    }

    fn take_frame_input(&mut self) -> FrameInput {
        match self.frame_input.take() {
            Some(input) => input,
            None => {
                let (input, output) = triple_buffer::triple_buffer(&None);
                self.frame_output = output;
                input
            }
        }
    }

    /// Replace both halves of the frame handoff.
    fn rebuild_frames(&mut self) {
        let (input, output) = triple_buffer::triple_buffer(&None);
        self.frame_input = Some(input);
        self.frame_output = output;
    }

    /// Cancel and join the current worker, reclaiming the frame writer.
    fn stop_worker(&mut self) -> Option<TowerState> {
        let run = self.run.take()?;
        run.control.cancel();
        match run.thread.join() {
            Ok(exit) => {
                self.frame_input = Some(exit.frames);
                match exit.outcome {
                    Outcome::Cancelled => log::debug!("playback worker stopped"),
                    Outcome::Completed => log::debug!("playback worker joined"),
                    Outcome::Failed(e) => {
                        log::debug!("playback worker joined after failure: {e}");
                    }
                }
                Some(exit.towers)
            }
            Err(_) => {
                log::error!("playback worker panicked");
                self.rebuild_frames();
                None
            }
        }
    }

    /// Restore the initial configuration and announce it.
    fn enter_idle(&mut self) {
        self.towers = TowerState::new(self.playback.disk_count);
        let frame = FrameSnapshot::settled(self.towers.clone());
        if let Some(input) = self.frame_input.as_mut() {
            input.write(Some(frame.clone()));
        }
        self.post(PlaybackSignal::StateChanged(frame));
        self.post(PlaybackSignal::MoveProgress {
            current: 0,
            total: self.towers_total(),
        });
        self.post(PlaybackSignal::RunStateChanged(RunState::Idle));
    }

    fn towers_total(&self) -> usize {
        usize::try_from(self.total_moves()).unwrap_or(usize::MAX)
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let _ = self.stop_worker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Disk, TowerId};

    const WAIT: Duration = Duration::from_secs(5);

    fn controller(disks: u8, speed_secs: f32, frames: u32) -> PlaybackController {
        let mut options = Options::default();
        options.playback.disk_count = disks;
        options.playback.speed_secs = speed_secs;
        options.playback.frame_count = frames;
        let c = PlaybackController::new(&options).unwrap();
        let _ = drain(&c);
        c
    }

    fn drain(c: &PlaybackController) -> Vec<PlaybackSignal> {
        std::iter::from_fn(|| c.try_recv_signal()).collect()
    }

    /// Collect signals until `stop` matches one, failing after `WAIT`.
    fn collect_until(
        c: &PlaybackController,
        stop: impl Fn(&PlaybackSignal) -> bool,
    ) -> Vec<PlaybackSignal> {
        let mut seen = Vec::new();
        loop {
            let signal = c
                .recv_signal_timeout(WAIT)
                .expect("timed out waiting for a playback signal");
            let done = stop(&signal);
            seen.push(signal);
            if done {
                return seen;
            }
        }
    }

    fn motion_frame(signal: &PlaybackSignal) -> Option<DiskInMotion> {
        match signal {
            PlaybackSignal::StateChanged(frame) => frame.in_motion,
            _ => None,
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        progress: Vec<usize>,
        states: Vec<RunState>,
        completed: usize,
    }

    impl PlaybackObserver for Recorder {
        fn on_state_changed(&mut self, _frame: &FrameSnapshot) {
            self.frames += 1;
        }

        fn on_move_progress(&mut self, current: usize, _total: usize) {
            self.progress.push(current);
        }

        fn on_run_state_changed(&mut self, state: RunState) {
            self.states.push(state);
        }

        fn on_completed(&mut self) {
            self.completed += 1;
        }
    }

    #[test]
    fn new_announces_the_idle_state() {
        let c = PlaybackController::new(&Options::default()).unwrap();
        let signals = drain(&c);
        assert_eq!(
            signals,
            vec![
                PlaybackSignal::StateChanged(FrameSnapshot::settled(
                    TowerState::new(3)
                )),
                PlaybackSignal::MoveProgress {
                    current: 0,
                    total: 7
                },
                PlaybackSignal::RunStateChanged(RunState::Idle),
            ]
        );
        assert_eq!(c.run_state(), RunState::Idle);
    }

    #[test]
    fn new_rejects_invalid_options() {
        let mut options = Options::default();
        options.playback.disk_count = 0;
        assert!(matches!(
            PlaybackController::new(&options),
            Err(HanoiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn out_of_range_configuration_is_rejected_without_change() {
        let mut c = controller(4, 0.5, 10);
        assert!(matches!(
            c.configure(0),
            Err(HanoiError::InvalidConfiguration(_))
        ));
        assert!(c.configure(11).is_err());
        assert!(c.set_speed(0.0).is_err());
        assert!(c.set_speed(-0.5).is_err());
        assert!(c.set_speed(f32::NAN).is_err());
        assert_eq!(c.disk_count(), 4);
        assert_eq!(c.speed_secs(), 0.5);
        assert!(drain(&c).is_empty());
    }

    #[test]
    fn unrepresentable_speed_is_rejected_without_change() {
        let mut c = controller(2, 0.01, 1);
        assert!(matches!(
            c.set_speed(1e20),
            Err(HanoiError::InvalidConfiguration(_))
        ));
        assert_eq!(c.speed_secs(), 0.01);

        c.start().unwrap();
        assert!(c.set_speed(f32::MAX).is_err());
        let _ = collect_until(&c, |s| *s == PlaybackSignal::Completed);

        let mut options = Options::default();
        options.playback.speed_secs = 1e20;
        assert!(matches!(
            PlaybackController::new(&options),
            Err(HanoiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn configure_resets_to_the_new_disk_count() {
        let mut c = controller(3, 0.5, 10);
        c.configure(5).unwrap();
        assert_eq!(c.total_moves(), 31);
        let signals = drain(&c);
        assert!(signals.contains(&PlaybackSignal::StateChanged(
            FrameSnapshot::settled(TowerState::new(5))
        )));
        assert!(signals.contains(&PlaybackSignal::MoveProgress {
            current: 0,
            total: 31
        }));
    }

    #[test]
    fn toggle_pause_is_a_no_op_when_idle() {
        let c = controller(3, 0.5, 10);
        c.toggle_pause();
        assert_eq!(c.run_state(), RunState::Idle);
        assert!(drain(&c).is_empty());
    }

    #[test]
    fn full_run_completes_once() {
        let mut c = controller(3, 0.01, 2);
        c.start().unwrap();
        let signals =
            collect_until(&c, |s| *s == PlaybackSignal::Completed);
        assert_eq!(c.run_state(), RunState::Completed);
        assert_eq!(
            signals.first(),
            Some(&PlaybackSignal::RunStateChanged(RunState::Running))
        );

        let progress: Vec<usize> = signals
            .iter()
            .filter_map(|s| match s {
                PlaybackSignal::MoveProgress { current, .. } => Some(*current),
                _ => None,
            })
            .collect();
        assert_eq!(progress, (1..=7).collect::<Vec<_>>());
        assert!(signals
            .iter()
            .filter_map(|s| match s {
                PlaybackSignal::StateChanged(frame) => Some(frame),
                _ => None,
            })
            .all(FrameSnapshot::accounts_for_every_disk));

        // No further signals once complete.
        assert!(c
            .recv_signal_timeout(Duration::from_millis(50))
            .is_none());
        c.toggle_pause();
        assert_eq!(c.run_state(), RunState::Completed);

        let latest = c.latest_frame().unwrap();
        assert!(latest.in_motion.is_none());
        assert!(latest.towers.is_solved());
        assert_eq!(
            latest.towers.stack(TowerId::Target),
            &[Disk::new(3), Disk::new(2), Disk::new(1)]
        );
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let mut c = controller(3, 0.2, 4);
        c.start().unwrap();
        c.start().unwrap();
        assert_eq!(c.run_state(), RunState::Running);
        c.reset();
        let running = drain(&c)
            .into_iter()
            .filter(|s| *s == PlaybackSignal::RunStateChanged(RunState::Running))
            .count();
        assert_eq!(running, 1);
    }

    #[test]
    fn start_after_completion_replays() {
        let mut c = controller(1, 0.01, 1);
        c.start().unwrap();
        let _ = collect_until(&c, |s| *s == PlaybackSignal::Completed);
        c.start().unwrap();
        let replay = collect_until(&c, |s| *s == PlaybackSignal::Completed);
        assert!(replay.contains(&PlaybackSignal::StateChanged(
            FrameSnapshot::settled(TowerState::new(1))
        )));
        assert!(replay.contains(&PlaybackSignal::MoveProgress {
            current: 1,
            total: 1
        }));
    }

    #[test]
    fn reset_from_paused_and_completed_returns_to_idle() {
        let initial = FrameSnapshot::settled(TowerState::new(2));
        let mut c = controller(2, 0.3, 6);
        c.start().unwrap();
        let _ = collect_until(&c, |s| motion_frame(s).is_some());
        c.toggle_pause();
        assert_eq!(c.run_state(), RunState::Paused);
        c.reset();
        c.reset();
        assert_eq!(c.run_state(), RunState::Idle);
        assert_eq!(c.latest_frame(), Some(initial.clone()));
        assert_eq!(
            drain(&c).last(),
            Some(&PlaybackSignal::RunStateChanged(RunState::Idle))
        );

        c.set_speed(0.01).unwrap();
        c.start().unwrap();
        let _ = collect_until(&c, |s| *s == PlaybackSignal::Completed);
        assert_eq!(c.run_state(), RunState::Completed);
        c.reset();
        c.reset();
        assert_eq!(c.run_state(), RunState::Idle);
        assert_eq!(c.latest_frame(), Some(initial));
        let tail = drain(&c);
        assert!(tail.contains(&PlaybackSignal::MoveProgress {
            current: 0,
            total: 3
        }));
        assert_eq!(
            tail.last(),
            Some(&PlaybackSignal::RunStateChanged(RunState::Idle))
        );
        assert!(c
            .recv_signal_timeout(Duration::from_millis(100))
            .is_none());
    }

    #[test]
    fn reset_is_idempotent_from_any_state() {
        let mut c = controller(3, 0.2, 4);
        c.reset();
        c.reset();
        assert_eq!(c.latest_frame().unwrap().towers, TowerState::new(3));

        c.start().unwrap();
        let _ = collect_until(&c, |s| motion_frame(s).is_some());
        c.reset();
        c.reset();
        assert_eq!(c.run_state(), RunState::Idle);
        assert_eq!(
            c.latest_frame(),
            Some(FrameSnapshot::settled(TowerState::new(3)))
        );

        let tail = drain(&c);
        assert_eq!(
            tail.last(),
            Some(&PlaybackSignal::RunStateChanged(RunState::Idle))
        );
        // Nothing from the stopped worker arrives later.
        assert!(c
            .recv_signal_timeout(Duration::from_millis(100))
            .is_none());
    }

    #[test]
    fn pause_resumes_at_the_next_frame_of_the_same_move() {
        // 100ms per frame, so the pause lands well inside the first move.
        let mut c = controller(3, 1.0, 10);
        c.start().unwrap();
        let mut last = collect_until(&c, |s| {
            motion_frame(s).is_some_and(|m| m.frame_index == 2)
        })
        .last()
        .and_then(motion_frame);

        c.toggle_pause();
        assert_eq!(c.run_state(), RunState::Paused);
        // Let the worker reach its checkpoint, then drain what it emitted.
        while let Some(signal) =
            c.recv_signal_timeout(Duration::from_millis(300))
        {
            if let Some(motion) = motion_frame(&signal) {
                last = Some(motion);
            }
        }
        assert!(c
            .recv_signal_timeout(Duration::from_millis(200))
            .is_none());
        let before = last.expect("a frame in motion before the pause");
        assert!(before.frame_index < before.frame_count);

        c.toggle_pause();
        assert_eq!(c.run_state(), RunState::Running);
        let resumed = collect_until(&c, |s| {
            matches!(s, PlaybackSignal::StateChanged(_))
        });
        assert_eq!(
            resumed.first(),
            Some(&PlaybackSignal::RunStateChanged(RunState::Running))
        );
        let after = resumed
            .last()
            .and_then(motion_frame)
            .expect("resumed frame should be in motion");
        assert_eq!(after.disk, before.disk);
        assert_eq!(after.source, before.source);
        assert_eq!(after.frame_index, before.frame_index + 1);
        c.reset();
    }

    #[test]
    fn paused_time_is_not_taken_from_the_move() {
        let frame = Duration::from_millis(100);
        let mut c = controller(2, 1.0, 10);
        c.start().unwrap();
        let mut last_index = collect_until(&c, |s| {
            motion_frame(s).is_some_and(|m| m.frame_index == 2)
        })
        .last()
        .and_then(motion_frame)
        .map_or(0, |m| m.frame_index);

        c.toggle_pause();
        std::thread::sleep(Duration::from_millis(600));
        for signal in drain(&c) {
            if let Some(motion) = motion_frame(&signal) {
                last_index = motion.frame_index;
            }
        }

        c.toggle_pause();
        let resumed = web_time::Instant::now();
        let tail = collect_until(&c, |s| {
            matches!(s, PlaybackSignal::StateChanged(f) if f.in_motion.is_none())
        });
        let elapsed = resumed.elapsed();

        // Every frame left in the move still gets its full interval.
        let left = u32::try_from(10 - last_index).unwrap();
        assert!(
            elapsed + Duration::from_millis(50) >= frame * left,
            "move finished {elapsed:?} after resume with {left} frames left"
        );
        let indices: Vec<usize> =
            tail.iter().filter_map(motion_frame).map(|m| m.frame_index).collect();
        assert_eq!(indices, ((last_index + 1)..=10).collect::<Vec<_>>());
        c.reset();
    }

    #[test]
    fn speed_change_applies_to_the_next_move() {
        let mut c = controller(2, 0.3, 3);
        c.start().unwrap();
        let _ = collect_until(&c, |s| motion_frame(s).is_some());
        c.set_speed(0.01).unwrap();
        assert_eq!(c.speed_secs(), 0.01);
        let started = web_time::Instant::now();
        let _ = collect_until(&c, |s| *s == PlaybackSignal::Completed);
        // The in-flight move still takes most of its 0.3s; the rest are fast.
        assert!(started.elapsed() >= Duration::from_millis(150));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn cancel_mid_move_leaves_a_consistent_model() {
        let mut c = controller(4, 0.4, 8);
        c.start().unwrap();
        let _ = collect_until(&c, |s| {
            matches!(s, PlaybackSignal::MoveProgress { current: 2, .. })
        });
        let _ = collect_until(&c, |s| motion_frame(s).is_some());

        let stopped = c.cancel().unwrap();
        assert!(stopped.is_consistent());
        // Move 1 settled on the auxiliary tower; move 2's disk is on its
        // source or its target, never missing.
        assert_eq!(stopped.height(TowerId::Auxiliary), 1);
        assert_eq!(
            stopped.height(TowerId::Source) + stopped.height(TowerId::Target),
            3
        );
        assert_eq!(c.run_state(), RunState::Idle);
        assert_eq!(c.cancel(), None);
    }

    #[test]
    fn cancel_while_paused_unblocks_the_worker() {
        let mut c = controller(3, 0.3, 6);
        c.start().unwrap();
        let _ = collect_until(&c, |s| motion_frame(s).is_some());
        c.toggle_pause();
        let stopped = c.cancel().unwrap();
        assert!(stopped.is_consistent());
        assert_eq!(c.run_state(), RunState::Idle);
    }

    #[test]
    fn pump_dispatches_to_the_observer() {
        let mut c = controller(1, 0.01, 1);
        c.start().unwrap();
        let signals = collect_until(&c, |s| *s == PlaybackSignal::Completed);
        let count = signals.len();
        for signal in signals {
            c.post(signal);
        }

        let mut recorder = Recorder::default();
        assert_eq!(c.pump(&mut recorder), count);
        assert_eq!(recorder.progress, vec![1]);
        assert_eq!(
            recorder.states,
            vec![RunState::Running, RunState::Completed]
        );
        assert_eq!(recorder.completed, 1);
        // initial + 2 motion frames + settled
        assert_eq!(recorder.frames, 4);
        assert_eq!(c.pump(&mut recorder), 0);
    }
}
