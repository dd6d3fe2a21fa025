//! Motion-driven comfort vignette for VR locomotion.
//!
//! The engine reads the viewer's head pose once per frame and narrows a
//! peripheral vignette when motion is likely to cause discomfort. Three
//! signals can drive the aperture:
//! - angular rate of the view direction
//! - linear speed
//! - linear acceleration
//!
//! Each enabled signal is normalized into a configured range, smoothed,
//! weighted and summed. The sum is remapped to a radius between a fully
//! open 1.5 and a coverage-dependent minimum. Optionally the aperture is
//! shifted toward the direction of travel.
//!
//! # Examples
//!
//! ## Driving the engine directly
//!
//! ```no_run
//! use comfort_vignette::engine::MotionVignetteEngine;
//! use comfort_vignette::pose::PoseSample;
//! use nalgebra::{Point3, UnitQuaternion};
//!
//! let mut engine = MotionVignetteEngine::default();
//! let pose = PoseSample::tracked(Point3::new(0.0, 0.0, 1.7), UnitQuaternion::identity());
//! if let Some(output) = engine.tick(1.0 / 90.0, &pose) {
//!     println!("radius {:.3}", output.radius);
//! }
//! ```
//!
//! ## Host loop with a render-thread receiver
//!
//! ```no_run
//! use comfort_vignette::engine::MotionVignetteEngine;
//! use comfort_vignette::host::VignetteHost;
//! use comfort_vignette::publish::snapshot_channel;
//! use comfort_vignette::simulation::{FixedClock, Scenario, ScriptedPoseSource};
//!
//! let (publisher, mut receiver) = snapshot_channel(4);
//! let mut host = VignetteHost::new(
//!     MotionVignetteEngine::default(),
//!     ScriptedPoseSource::new(Scenario::Walk, 90.0),
//!     FixedClock::from_fps(90.0),
//! );
//! host.attach_sink(Box::new(publisher));
//! host.run(90);
//!
//! if let Some(snapshot) = receiver.latest() {
//!     println!("frame {} radius {:.3}", snapshot.frame, snapshot.output.radius);
//! }
//! ```
//!
//! ## Presets
//!
//! ```no_run
//! use comfort_vignette::config::Config;
//! use comfort_vignette::engine::MotionVignetteEngine;
//!
//! # fn main() -> comfort_vignette::Result<()> {
//! let config = Config::from_file("vignette.yaml")?;
//! let mut engine = MotionVignetteEngine::new(config.effect.clone());
//! engine.apply_preset(&config.preset("strong")?);
//! // ...
//! engine.clear_preset();
//! # Ok(())
//! # }
//! ```

/// Per-signal normalize, smooth and weight stage
pub mod channel;

/// Channel summation and radius remapping
pub mod composer;

/// Configuration management
pub mod config;

/// Constants used throughout the crate
pub mod constants;

/// Aperture shift toward the direction of travel
pub mod direction;

/// Per-frame engine tying sampling, composition and presets together
pub mod engine;

/// Error types and result handling
pub mod error;

/// Frame loop driving the engine from collaborators
pub mod host;

/// Head pose samples and the collaborator traits that supply them
pub mod pose;

/// Reversible preset swapping
pub mod preset;

/// Hand-off of vignette parameters to the renderer
pub mod publish;

/// Range normalization helpers
pub mod response;

/// Frame-to-frame motion deltas
pub mod sampler;

/// Scripted pose sources for running without a headset
pub mod simulation;

/// Frame-rate aware exponential smoothing
pub mod smoothing;

pub use engine::MotionVignetteEngine;
pub use error::{Error, Result};
pub use publish::{FrameSnapshot, VignetteOutput, VignetteSink};
