//! Tracking and scheduling collaborators the core polls each frame.
//!
//! Axis convention: +X forward, +Y right, +Z up.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// One poll of the tracking system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    /// Tracked position in metres
    pub position: Point3<f64>,

    /// Tracked orientation
    pub orientation: UnitQuaternion<f64>,

    /// Locomotion speed reported by the host, if it has one.
    ///
    /// When absent, the speed implied by the position delta is used.
    pub speed: Option<f64>,

    /// The tracker produced a usable pose this frame
    pub tracking_valid: bool,
}

impl PoseSample {
    /// A valid pose without a host-reported speed
    #[must_use]
    pub const fn tracked(position: Point3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
            speed: None,
            tracking_valid: true,
        }
    }

    /// A pose marked as lost
    #[must_use]
    pub fn lost() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            speed: None,
            tracking_valid: false,
        }
    }

    /// Attach a host-reported locomotion speed
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Orthonormal view basis for this orientation
    #[must_use]
    pub fn basis(&self) -> ViewBasis {
        ViewBasis::from_orientation(&self.orientation)
    }
}

/// Forward/right/up unit vectors of the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub forward: Vector3<f64>,
    pub right: Vector3<f64>,
    pub up: Vector3<f64>,
}

impl ViewBasis {
    #[must_use]
    pub fn from_orientation(orientation: &UnitQuaternion<f64>) -> Self {
        Self {
            forward: orientation * Vector3::x(),
            right: orientation * Vector3::y(),
            up: orientation * Vector3::z(),
        }
    }
}

impl Default for ViewBasis {
    fn default() -> Self {
        Self::from_orientation(&UnitQuaternion::identity())
    }
}

/// Source of tracked poses, pollable at any rate
pub trait PoseSource {
    /// Current pose; `tracking_valid == false` when nothing usable is available
    fn current_pose(&mut self) -> PoseSample;
}

/// Source of frame durations
pub trait FrameClock {
    /// Seconds elapsed since the previous frame
    fn delta_time(&mut self) -> f64;
}
