//! Frame-rate aware exponential smoothing used by every motion channel.

use crate::constants::{INTERP_SPEED_MAX, INTERP_SPEED_MIN, SMALL_NUMBER};
use crate::response::map_range_clamped;

/// Move `current` toward `target` by a fraction of the remaining distance.
///
/// The fraction is `delta_time * interp_speed` clamped to `[0, 1]`, so a
/// long frame lands exactly on `target` and never overshoots it. A
/// non-positive `interp_speed` snaps straight to `target`; a non-positive
/// or NaN step holds `current`.
#[must_use]
pub fn smooth(current: f64, target: f64, delta_time: f64, interp_speed: f64) -> f64 {
    if interp_speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist * dist < SMALL_NUMBER {
        return target;
    }

    let step = (delta_time * interp_speed).clamp(0.0, 1.0);
    if !(step > 0.0) {
        return current;
    }
    dist.mul_add(step, current)
}

/// Map the user-facing smoothing knob in `[0, 1]` to an interpolation speed.
///
/// Higher knob values converge faster.
#[must_use]
pub fn interp_speed(smoothing: f64) -> f64 {
    map_range_clamped(smoothing, (0.0, 1.0), (INTERP_SPEED_MIN, INTERP_SPEED_MAX))
}

/// Persistent smoothed value for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExponentialSmoother {
    value: f64,
}

impl ExponentialSmoother {
    /// Create a smoother resting at zero
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Advance toward `target` using the channel's smoothing knob
    pub fn apply(&mut self, target: f64, delta_time: f64, smoothing: f64) -> f64 {
        self.value = smooth(self.value, target, delta_time, interp_speed(smoothing));
        self.value
    }

    /// Current smoothed value
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
