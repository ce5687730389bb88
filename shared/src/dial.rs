//! Dial geometry - bidirectional mapping between durations and dial angles
//!
//! Angles are measured in radians from the twelve o'clock position,
//! increasing clockwise, so that a full turn of the dial spans the full
//! settable duration. Pointer samples arrive in dial-local device
//! coordinates: origin at the dial center, y-axis pointing down.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use crate::DialError;

/// Maps durations in `[0, max_duration]` onto the dial arc and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialMapper {
    max_duration: Duration,
}

impl DialMapper {
    /// Create a mapper for a dial spanning `[0, max_duration]`.
    pub fn new(max_duration: Duration) -> Result<Self, DialError> {
        if max_duration.is_zero() {
            return Err(DialError::InvalidConfiguration);
        }
        Ok(Self { max_duration })
    }

    /// Upper bound of the settable duration.
    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// Map a duration to its dial angle: `2π · d / max`.
    ///
    /// Input is clamped to `[0, max_duration]`. The result lies in
    /// `[0, 2π]`, reaching the full turn only at `d == max_duration`.
    pub fn duration_to_angle(&self, d: Duration) -> f64 {
        let d = d.min(self.max_duration);
        TAU * d.as_secs_f64() / self.max_duration.as_secs_f64()
    }

    /// Inverse of [`duration_to_angle`](Self::duration_to_angle).
    ///
    /// Input is clamped to `[0, 2π]`.
    pub fn angle_to_duration(&self, angle: f64) -> Duration {
        let angle = angle.clamp(0.0, TAU);
        Duration::from_secs_f64(self.max_duration.as_secs_f64() * angle / TAU)
    }

    /// Convert a pointer sample to the duration under the pointer.
    ///
    /// `atan2` measures counter-clockwise from the positive x-axis, while
    /// the dial's zero sits at twelve o'clock with durations increasing
    /// clockwise. With the y-axis pointing down, adding π/2 and wrapping
    /// negative results by a full turn reconciles the two conventions:
    /// straight up maps to zero, straight down to half the maximum.
    pub fn position_to_duration(&self, x: f64, y: f64) -> Duration {
        let mut angle = y.atan2(x) + FRAC_PI_2;
        if angle < 0.0 {
            angle += TAU;
        }
        self.angle_to_duration(angle)
    }
}
