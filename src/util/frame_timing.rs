//! Frame deadline pacing.

use web_time::{Duration, Instant};

/// Stand-in offset for deadlines past what [`Instant`] can represent.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Wall-clock pacing for the frames of one disk motion.
///
/// Frame `i` of `frame_count` is due at `start + i × (duration /
/// frame_count)`, so the last frame lands exactly `duration` after the
/// first regardless of resolution. Time spent paused is pushed onto the
/// start rather than eaten from the budget.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    /// When frame 0 is due.
    start: Instant,
    /// Total motion duration from frame 0 to the last frame.
    duration: Duration,
    /// Number of frame intervals (one less than the number of frames).
    frame_count: u32,
}

impl FramePacer {
    /// Pacer for a motion starting at `start`.
    ///
    /// A `frame_count` of 0 is treated as 1.
    #[must_use]
    pub fn new(start: Instant, duration: Duration, frame_count: u32) -> Self {
        Self {
            start,
            duration,
            frame_count: frame_count.max(1),
        }
    }

    /// Pacer for a motion starting now.
    #[must_use]
    pub fn start_now(duration: Duration, frame_count: u32) -> Self {
        Self::new(Instant::now(), duration, frame_count)
    }

    /// When frame `frame_index` is due.
    ///
    /// Saturates about a century out for durations whose deadline would
    /// overflow the clock.
    #[must_use]
    pub fn deadline(&self, frame_index: usize) -> Instant {
        let index = u32::try_from(frame_index).unwrap_or(u32::MAX);
        let offset = self.duration.saturating_mul(index) / self.frame_count;
        self.start
            .checked_add(offset)
            .or_else(|| self.start.checked_add(FAR_FUTURE))
            .unwrap_or(self.start)
    }

    /// Shift every remaining deadline later by `paused`.
    pub fn postpone(&mut self, paused: Duration) {
        if let Some(start) = self.start.checked_add(paused) {
            self.start = start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadlines_span_the_full_duration() {
        let start = Instant::now();
        let pacer = FramePacer::new(start, Duration::from_millis(300), 30);
        assert_eq!(pacer.deadline(0), start);
        assert_eq!(pacer.deadline(30), start + Duration::from_millis(300));
        assert_eq!(pacer.deadline(15), start + Duration::from_millis(150));
        assert_eq!(
            pacer.deadline(2) - pacer.deadline(1),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn postpone_shifts_remaining_frames() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(start, Duration::from_millis(100), 4);
        pacer.postpone(Duration::from_millis(40));
        assert_eq!(pacer.deadline(0), start + Duration::from_millis(40));
        assert_eq!(pacer.deadline(4), start + Duration::from_millis(140));
        assert_eq!(
            pacer.deadline(4) - pacer.deadline(0),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn overflowing_deadlines_saturate() {
        let start = Instant::now();
        let pacer = FramePacer::new(start, Duration::MAX, 2);
        assert!(pacer.deadline(2) > start + Duration::from_secs(3600));
        assert!(pacer.deadline(0) == start);
    }

    #[test]
    fn zero_frames_is_one_interval() {
        let start = Instant::now();
        let pacer = FramePacer::new(start, Duration::from_millis(80), 0);
        assert_eq!(pacer.deadline(1), start + Duration::from_millis(80));
    }
}
