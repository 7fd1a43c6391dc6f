use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::HanoiError;

/// Smallest disk count the controller accepts.
pub const MIN_DISKS: u8 = 1;
/// Largest disk count the controller accepts.
pub const MAX_DISKS: u8 = 10;
/// Lower end of the speed control offered to users, in seconds per move.
pub const MIN_UI_SPEED_SECS: f32 = 0.1;
/// Upper end of the speed control offered to users, in seconds per move.
pub const MAX_UI_SPEED_SECS: f32 = 2.0;
/// Increment of the user-facing speed control.
pub const SPEED_STEP_SECS: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Solve and animation parameters.
pub struct PlaybackOptions {
    /// Number of disks stacked on the source tower.
    #[schemars(title = "Disks", range(min = 1, max = 10))]
    pub disk_count: u8,
    /// Wall-clock duration of one disk's motion, in seconds.
    #[schemars(title = "Seconds per Move", range(min = 0.1, max = 2.0), extend("step" = 0.1))]
    pub speed_secs: f32,
    /// Animation resolution: a move is drawn over `frame_count + 1`
    /// positions.
    #[schemars(skip)]
    pub frame_count: u32,
    /// How far above the higher endpoint the arc's control point sits.
    #[schemars(skip)]
    pub arc_height: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            disk_count: 3,
            speed_secs: 0.5,
            frame_count: 30,
            arc_height: 100.0,
        }
    }
}

impl PlaybackOptions {
    /// Check every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidConfiguration`] naming the first field
    /// out of range.
    pub fn validate(&self) -> Result<(), HanoiError> {
        validate_disk_count(self.disk_count)?;
        validate_speed(self.speed_secs)?;
        if self.frame_count == 0 {
            return Err(HanoiError::InvalidConfiguration(
                "frame_count must be at least 1".into(),
            ));
        }
        if !self.arc_height.is_finite() || self.arc_height < 0.0 {
            return Err(HanoiError::InvalidConfiguration(format!(
                "arc_height must be a non-negative number, got {}",
                self.arc_height
            )));
        }
        Ok(())
    }

    /// Move duration as a [`Duration`].
    ///
    /// Speeds that fail [`validate_speed`] map to [`Duration::ZERO`].
    #[must_use]
    pub fn move_duration(&self) -> Duration {
        speed_duration(self.speed_secs).unwrap_or(Duration::ZERO)
    }
}

/// Reject disk counts outside `MIN_DISKS..=MAX_DISKS`.
///
/// # Errors
///
/// Returns [`HanoiError::InvalidConfiguration`] if out of range.
pub fn validate_disk_count(disk_count: u8) -> Result<(), HanoiError> {
    if (MIN_DISKS..=MAX_DISKS).contains(&disk_count) {
        Ok(())
    } else {
        Err(HanoiError::InvalidConfiguration(format!(
            "disk count must be between {MIN_DISKS} and {MAX_DISKS}, got \
             {disk_count}"
        )))
    }
}

/// Reject speeds that are not positive or too long to represent as a
/// [`Duration`].
///
/// # Errors
///
/// Returns [`HanoiError::InvalidConfiguration`] if `secs <= 0`, not
/// finite, or beyond [`Duration::MAX`].
pub fn validate_speed(secs: f32) -> Result<(), HanoiError> {
    speed_duration(secs).map(|_| ())
}

/// Checked conversion of a speed in seconds to a move duration.
///
/// # Errors
///
/// Same conditions as [`validate_speed`].
pub fn speed_duration(secs: f32) -> Result<Duration, HanoiError> {
    match Duration::try_from_secs_f32(secs) {
        Ok(duration) if secs > 0.0 && !duration.is_zero() => Ok(duration),
        _ => Err(HanoiError::InvalidConfiguration(format!(
            "speed must be a positive number of seconds, got {secs}"
        ))),
    }
}

/// Move `secs` by `steps` increments of [`SPEED_STEP_SECS`], snapped to
/// the step grid and clamped to the user-facing range.
#[must_use]
pub fn step_speed(secs: f32, steps: i32) -> f32 {
    let snapped = (secs / SPEED_STEP_SECS).round() + steps as f32;
    (snapped * SPEED_STEP_SECS).clamp(MIN_UI_SPEED_SECS, MAX_UI_SPEED_SECS)
}
