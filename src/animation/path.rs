//! Quadratic Bézier motion paths.
//!
//! Positions are in scene layout units with y growing downward, so "above"
//! the towers means a smaller y.

use glam::Vec2;

/// A quadratic Bézier arc from `start` to `end` bending toward `control`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCurve {
    /// Position at t = 0.
    pub start: Vec2,
    /// Control point the curve bends toward.
    pub control: Vec2,
    /// Position at t = 1.
    pub end: Vec2,
}

impl ArcCurve {
    /// Arc whose control point sits midway between the endpoints
    /// horizontally and `control_height` above the higher endpoint.
    ///
    /// Coincident endpoints give a stationary curve.
    #[must_use]
    pub fn lifted(start: Vec2, end: Vec2, control_height: f32) -> Self {
        if start == end {
            return Self::with_control(start, start, end);
        }
        let control = Vec2::new(
            (start.x + end.x) * 0.5,
            start.y.min(end.y) - control_height,
        );
        Self {
            start,
            control,
            end,
        }
    }

    /// Arc with an explicit control point.
    #[must_use]
    pub fn with_control(start: Vec2, control: Vec2, end: Vec2) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// `P(t) = (1−t)²·start + 2(1−t)t·control + t²·end`, with `t` clamped to
    /// `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let omt = 1.0 - t;
        omt * omt * self.start + 2.0 * omt * t * self.control + t * t * self.end
    }
}

/// The discrete frames of one disk motion.
///
/// Holds `frame_count + 1` positions sampled at `t = i / frame_count`, so
/// the first is the start and the last is exactly the end.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPath {
    points: Vec<Vec2>,
}

impl MotionPath {
    /// Sample `curve` at `frame_count` even intervals.
    ///
    /// With `frame_count == 0` the path is the single end position.
    #[must_use]
    pub fn sample(curve: &ArcCurve, frame_count: usize) -> Self {
        if frame_count == 0 {
            return Self {
                points: vec![curve.end],
            };
        }
        let points = (0..=frame_count)
            .map(|i| {
                if i == frame_count {
                    curve.end
                } else {
                    curve.evaluate(i as f32 / frame_count as f32)
                }
            })
            .collect();
        Self { points }
    }

    /// Path from `source` to `target` arcing `control_height` above the
    /// higher of the two.
    #[must_use]
    pub fn between(
        source: Vec2,
        target: Vec2,
        control_height: f32,
        frame_count: usize,
    ) -> Self {
        Self::sample(
            &ArcCurve::lifted(source, target, control_height),
            frame_count,
        )
    }

    /// All positions in frame order.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Position at a frame index.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Number of positions (`frame_count + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no positions. Never true for sampled paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of frame intervals.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}
