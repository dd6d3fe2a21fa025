//! Constants used throughout the vignette pipeline

/// Radius published when no channel contributes (effect fully open)
pub const PASSTHROUGH_RADIUS: f64 = 1.5;

/// Radius published in forced mode (maximum tunnelling)
pub const FORCED_RADIUS: f64 = 0.3;

/// Ranges narrower than this disable their channel
pub const DEGENERATE_RANGE_TOLERANCE: f64 = 0.001;

/// Interpolation speed at smoothing knob 0.0
pub const INTERP_SPEED_MIN: f64 = 1.0;

/// Interpolation speed at smoothing knob 1.0
pub const INTERP_SPEED_MAX: f64 = 20.0;

/// Angular contribution is weighted at half its configured strength
pub const ANGULAR_STRENGTH_SCALE: f64 = 0.5;

/// Squared distance below which interpolation snaps to target
pub const SMALL_NUMBER: f64 = 1e-8;

/// Motion vectors shorter than this carry no direction
pub const DIRECTION_EPSILON: f64 = 1e-4;

/// Default headset refresh rate assumption
pub const DEFAULT_FPS: f64 = 90.0;

/// Default snapshot channel capacity
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 4;

/// Default effect parameters
pub const DEFAULT_COVERAGE: f64 = 0.75;
pub const DEFAULT_FEATHER: f64 = 0.1;
pub const DEFAULT_SMOOTHING: f64 = 0.5;
pub const DEFAULT_ANGULAR_MAX: f64 = 180.0;
pub const DEFAULT_VELOCITY_MAX: f64 = 5.0;
pub const DEFAULT_ACCELERATION_MAX: f64 = 10.0;
