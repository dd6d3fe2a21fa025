//! Scripted locomotion for driving the engine without a headset.

use crate::config::SimulationConfig;
use crate::pose::{FrameClock, PoseSample, PoseSource};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Motion script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Standing still
    Idle,
    /// Constant forward walk
    Walk,
    /// Turning on the spot
    Turn,
    /// Constant sideways motion
    Strafe,
    /// Accelerating run up to a top speed
    Sprint,
    /// Wandering walk with head turns, pitch and strafing
    #[default]
    Mixed,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Turn => "turn",
            Self::Strafe => "strafe",
            Self::Sprint => "sprint",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

const WALK_SPEED: f64 = 1.4;
const STRAFE_SPEED: f64 = 1.0;
const TURN_RATE: f64 = 1.5;
const SPRINT_ACCELERATION: f64 = 2.0;
const SPRINT_TOP_SPEED: f64 = 6.0;

impl Scenario {
    /// Yaw, pitch (radians) and body-frame velocity at time `t`
    fn motion(self, t: f64) -> (f64, f64, Vector3<f64>) {
        match self {
            Self::Idle => (0.0, 0.0, Vector3::zeros()),
            Self::Walk => (0.0, 0.0, Vector3::new(WALK_SPEED, 0.0, 0.0)),
            Self::Turn => (TURN_RATE * t, 0.0, Vector3::zeros()),
            Self::Strafe => (0.0, 0.0, Vector3::new(0.0, STRAFE_SPEED, 0.0)),
            Self::Sprint => {
                let speed = (SPRINT_ACCELERATION * t).min(SPRINT_TOP_SPEED);
                (0.0, 0.0, Vector3::new(speed, 0.0, 0.0))
            }
            Self::Mixed => (
                0.8 * (0.5 * t).sin(),
                0.25 * (0.3 * t).sin(),
                Vector3::new(1.5f64.mul_add((0.4 * t).sin(), 1.5), 0.5 * (0.7 * t).sin(), 0.0),
            ),
        }
    }
}

/// Pose source that plays back a [`Scenario`] one frame per poll
pub struct ScriptedPoseSource {
    scenario: Scenario,
    delta_time: f64,
    frame: u64,
    position: Point3<f64>,
    jitter: f64,
    dropout_every: usize,
    rng: StdRng,
}

impl ScriptedPoseSource {
    #[must_use]
    pub fn new(scenario: Scenario, fps: f64) -> Self {
        Self {
            scenario,
            delta_time: 1.0 / fps,
            frame: 0,
            position: Point3::origin(),
            jitter: 0.0,
            dropout_every: 0,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Build from the simulation section of a config file
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.scenario, config.target_fps)
            .with_jitter(config.jitter, config.seed)
            .with_dropouts(config.tracking_dropout_every)
    }

    /// Add uniform positional noise of the given amplitude
    #[must_use]
    pub fn with_jitter(mut self, amplitude: f64, seed: u64) -> Self {
        self.jitter = amplitude.max(0.0);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Report lost tracking on every `every`-th frame (0 disables)
    #[must_use]
    pub fn with_dropouts(mut self, every: usize) -> Self {
        self.dropout_every = every;
        self
    }

    /// Frames produced so far
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    fn dropped(&self) -> bool {
        self.dropout_every > 0 && self.frame % self.dropout_every as u64 == self.dropout_every as u64 - 1
    }

    fn noise(&mut self) -> Vector3<f64> {
        if self.jitter <= 0.0 {
            return Vector3::zeros();
        }
        let j = self.jitter;
        Vector3::new(
            self.rng.gen_range(-j..=j),
            self.rng.gen_range(-j..=j),
            self.rng.gen_range(-j..=j),
        )
    }
}

impl PoseSource for ScriptedPoseSource {
    fn current_pose(&mut self) -> PoseSample {
        let t = self.frame as f64 * self.delta_time;
        let (yaw, pitch, body_velocity) = self.scenario.motion(t);

        let heading = UnitQuaternion::from_euler_angles(0.0, 0.0, yaw);
        let orientation = UnitQuaternion::from_euler_angles(0.0, pitch, yaw);
        if self.frame > 0 {
            self.position += heading * body_velocity * self.delta_time;
        }

        let dropped = self.dropped();
        self.frame += 1;
        if dropped {
            return PoseSample::lost();
        }

        let reported = self.position + self.noise();
        PoseSample::tracked(reported, orientation).with_speed(body_velocity.norm())
    }
}

/// Clock that reports a constant frame time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    delta_time: f64,
}

impl FixedClock {
    #[must_use]
    pub fn from_fps(fps: f64) -> Self {
        Self { delta_time: 1.0 / fps }
    }

    #[must_use]
    pub const fn new(delta_time: f64) -> Self {
        Self { delta_time }
    }
}

impl FrameClock for FixedClock {
    fn delta_time(&mut self) -> f64 {
        self.delta_time
    }
}
