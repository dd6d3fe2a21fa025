//! Raw motion deltas derived from consecutive pose samples.
//!
//! The sampler keeps the previous position, forward vector and speed.
//! Each is only advanced when a channel actually consumes it, so a
//! channel that is switched back on measures against the last sample it
//! saw rather than a stale mix.

use crate::config::EffectConfig;
use crate::constants::DIRECTION_EPSILON;
use nalgebra::{Point3, Vector3};

/// Motion observed on one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub position: Point3<f64>,
    pub forward: Vector3<f64>,
    /// Host-reported speed; falls back to the positional speed when absent
    pub speed: Option<f64>,
    pub delta_time: f64,
}

/// Which raw deltas the caller needs this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelUsage {
    pub angular: bool,
    pub velocity: bool,
    pub acceleration: bool,
}

impl ChannelUsage {
    #[must_use]
    pub const fn from_config(config: &EffectConfig) -> Self {
        Self {
            angular: config.angular.enabled,
            velocity: config.velocity.enabled,
            acceleration: config.acceleration.enabled,
        }
    }

    /// Velocity and acceleration share the position sample
    #[must_use]
    pub const fn needs_position(&self) -> bool {
        self.velocity || self.acceleration
    }
}

/// Unsmoothed per-second rates for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawDeltas {
    /// Degrees per second
    pub angular_rate: f64,
    /// Metres per second
    pub velocity: f64,
    /// Metres per second squared
    pub acceleration: f64,
}

/// Previous-tick motion state
#[derive(Debug, Clone, Default)]
pub struct MotionSampler {
    last_position: Option<Point3<f64>>,
    last_forward: Option<Vector3<f64>>,
    last_speed: Option<f64>,
}

impl MotionSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute raw deltas for the channels in `usage`.
    ///
    /// A non-positive (or NaN) `delta_time` means no motion: every delta
    /// is zero and the stored samples are left untouched. The first sample
    /// a channel sees only primes its history. Non-finite input is not
    /// stored and yields a NaN delta, which the channels ignore.
    pub fn sample(&mut self, sample: &MotionSample, usage: ChannelUsage) -> RawDeltas {
        let dt = sample.delta_time;
        let mut raw = RawDeltas::default();

        if !(dt > 0.0) {
            return raw;
        }

        if usage.angular {
            raw.angular_rate = self.sample_forward(sample.forward, dt);
        }

        if usage.needs_position() {
            let velocity = self.sample_position(sample.position, dt);
            if usage.velocity {
                raw.velocity = velocity;
            }
            if usage.acceleration {
                raw.acceleration = self.sample_speed(sample.speed.unwrap_or(velocity), dt);
            }
        }

        raw
    }

    /// Unit vector from the stored position toward `position`.
    ///
    /// Zero when there is no history or the displacement is negligible.
    #[must_use]
    pub fn motion_direction(&self, position: &Point3<f64>) -> Vector3<f64> {
        self.last_position
            .and_then(|last| (*position - last).try_normalize(DIRECTION_EPSILON))
            .filter(|direction| is_finite(direction.iter()))
            .unwrap_or_else(Vector3::zeros)
    }

    #[must_use]
    pub const fn last_position(&self) -> Option<Point3<f64>> {
        self.last_position
    }

    #[must_use]
    pub const fn last_forward(&self) -> Option<Vector3<f64>> {
        self.last_forward
    }

    #[must_use]
    pub const fn last_speed(&self) -> Option<f64> {
        self.last_speed
    }

    /// Forget all history
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn sample_forward(&mut self, forward: Vector3<f64>, dt: f64) -> f64 {
        if !is_finite(forward.iter()) {
            return f64::NAN;
        }
        let rate = self
            .last_forward
            .map_or(0.0, |last| angle_between_degrees(&last, &forward) / dt);
        self.last_forward = Some(forward);
        rate
    }

    fn sample_position(&mut self, position: Point3<f64>, dt: f64) -> f64 {
        if !is_finite(position.coords.iter()) {
            return f64::NAN;
        }
        let rate = self
            .last_position
            .map_or(0.0, |last| nalgebra::distance(&last, &position) / dt);
        self.last_position = Some(position);
        rate
    }

    fn sample_speed(&mut self, speed: f64, dt: f64) -> f64 {
        if !speed.is_finite() {
            return f64::NAN;
        }
        let rate = self.last_speed.map_or(0.0, |last| (speed - last).abs() / dt);
        self.last_speed = Some(speed);
        rate
    }
}

fn is_finite<'a>(mut values: impl Iterator<Item = &'a f64>) -> bool {
    values.all(|v| v.is_finite())
}

/// Angle between two vectors in degrees; zero if either is degenerate
#[must_use]
pub fn angle_between_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}
