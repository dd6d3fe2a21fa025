//! Host loop: polls the collaborators, ticks the engine, publishes results.

use crate::engine::MotionVignetteEngine;
use crate::pose::{FrameClock, PoseSource};
use crate::preset::Preset;
use crate::publish::{FrameSnapshot, VignetteSink};
use log::{debug, info, trace, warn};

/// Counters for one host session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Calls to [`VignetteHost::step`]
    pub ticks: u64,
    /// Frames handed to the sink
    pub published: u64,
    /// Ticks skipped because no sink was attached
    pub skipped_no_sink: u64,
    /// Ticks skipped because tracking was lost
    pub skipped_untracked: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackingState {
    Unknown,
    Tracked,
    Lost,
}

/// Drives a [`MotionVignetteEngine`] from a pose source and frame clock.
///
/// A missing sink or an untracked pose turns that frame into a no-op;
/// the next frame with both available picks up where it left off.
pub struct VignetteHost<P: PoseSource, C: FrameClock> {
    engine: MotionVignetteEngine,
    pose_source: P,
    clock: C,
    sink: Option<Box<dyn VignetteSink>>,
    frame: u64,
    tracking: TrackingState,
    stats: HostStats,
    stale_history: bool,
}

impl<P: PoseSource, C: FrameClock> VignetteHost<P, C> {
    #[must_use]
    pub fn new(engine: MotionVignetteEngine, pose_source: P, clock: C) -> Self {
        Self {
            engine,
            pose_source,
            clock,
            sink: None,
            frame: 0,
            tracking: TrackingState::Unknown,
            stats: HostStats::default(),
            stale_history: false,
        }
    }

    /// Attach a sink and push the current appearance to it.
    ///
    /// If frames were skipped while detached, the next tracked frame only
    /// primes motion history.
    pub fn attach_sink(&mut self, mut sink: Box<dyn VignetteSink>) {
        info!("Vignette sink attached");
        if self.stale_history {
            self.engine.reprime();
            self.stale_history = false;
        }
        sink.apply_appearance(&self.engine.config().appearance);
        self.sink = Some(sink);
    }

    /// Detach the sink; subsequent frames are skipped until one is attached
    pub fn detach_sink(&mut self) -> Option<Box<dyn VignetteSink>> {
        if self.sink.is_some() {
            info!("Vignette sink detached");
        }
        self.sink.take()
    }

    #[must_use]
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Run one frame. Returns the published snapshot, if any.
    pub fn step(&mut self) -> Option<FrameSnapshot> {
        self.stats.ticks += 1;

        if self.sink.is_none() {
            trace!("No vignette sink; skipping frame");
            self.stats.skipped_no_sink += 1;
            self.stale_history = true;
            return None;
        }

        let delta_time = self.clock.delta_time();
        let pose = self.pose_source.current_pose();
        self.note_tracking(pose.tracking_valid);

        let Some(output) = self.engine.tick(delta_time, &pose) else {
            self.stats.skipped_untracked += 1;
            return None;
        };

        let snapshot = FrameSnapshot {
            frame: self.frame,
            output,
            basis: self.engine.last_basis(),
        };
        self.frame += 1;

        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&snapshot);
            self.stats.published += 1;
        }
        trace!(
            "frame {} radius {:.3} shift ({:.3}, {:.3})",
            snapshot.frame,
            output.radius,
            output.horizontal_shift,
            output.vertical_shift
        );

        Some(snapshot)
    }

    /// Run `frames` frames and return the session counters
    pub fn run(&mut self, frames: usize) -> HostStats {
        debug!("Running vignette host for {frames} frames");
        for _ in 0..frames {
            self.step();
        }
        info!(
            "Vignette host finished: {} ticks, {} published, {} without sink, {} untracked",
            self.stats.ticks, self.stats.published, self.stats.skipped_no_sink, self.stats.skipped_untracked
        );
        self.stats
    }

    /// Apply a preset and push its appearance to the sink
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.engine.apply_preset(preset);
        self.push_appearance();
    }

    /// Clear the loaded preset; `false` if none was loaded
    pub fn clear_preset(&mut self) -> bool {
        let cleared = self.engine.clear_preset();
        if cleared {
            self.push_appearance();
        }
        cleared
    }

    #[must_use]
    pub const fn engine(&self) -> &MotionVignetteEngine {
        &self.engine
    }

    /// Mutable engine access for runtime setters
    pub fn engine_mut(&mut self) -> &mut MotionVignetteEngine {
        &mut self.engine
    }

    #[must_use]
    pub const fn stats(&self) -> HostStats {
        self.stats
    }

    fn push_appearance(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.apply_appearance(&self.engine.config().appearance);
        }
    }

    fn note_tracking(&mut self, valid: bool) {
        let next = if valid { TrackingState::Tracked } else { TrackingState::Lost };
        match (self.tracking, next) {
            (TrackingState::Tracked | TrackingState::Unknown, TrackingState::Lost) => {
                warn!("Tracking lost; holding vignette state");
            }
            (TrackingState::Lost, TrackingState::Tracked) => info!("Tracking regained"),
            _ => {}
        }
        self.tracking = next;
    }
}
