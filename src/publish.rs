//! Publication of vignette parameters to the rendering side.
//!
//! Frames are handed across threads as immutable snapshots over a bounded
//! crossbeam channel. The publisher never blocks the simulation thread:
//! when the render side falls behind, the oldest queued snapshot is
//! dropped. Tearing down either end is safe; the render side keeps the
//! last snapshot it received.

use crate::config::Appearance;
use crate::pose::ViewBasis;
use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};

/// Renderable vignette parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteOutput {
    /// Aperture radius; 1.5 is fully open
    pub radius: f64,
    pub horizontal_shift: f64,
    pub vertical_shift: f64,
}

impl Default for VignetteOutput {
    fn default() -> Self {
        Self {
            radius: crate::constants::PASSTHROUGH_RADIUS,
            horizontal_shift: 0.0,
            vertical_shift: 0.0,
        }
    }
}

impl VignetteOutput {
    /// Named scalar shader parameters for this output
    #[must_use]
    pub const fn scalar_parameters(&self) -> [(&'static str, f64); 3] {
        [
            ("Radius", self.radius),
            ("XShift", self.horizontal_shift),
            ("YShift", self.vertical_shift),
        ]
    }
}

/// Everything the renderer needs from one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    /// Monotonic count of published frames
    pub frame: u64,
    pub output: VignetteOutput,
    /// Viewer basis for skybox cube-map lookup
    pub basis: ViewBasis,
}

/// Receiver of published vignette parameters. Fire-and-forget.
pub trait VignetteSink: Send {
    /// Per-frame parameters
    fn publish(&mut self, snapshot: &FrameSnapshot);

    /// Appearance changed (sink attached, preset applied or cleared)
    fn apply_appearance(&mut self, _appearance: &Appearance) {}
}

/// Create a connected publisher/receiver pair
#[must_use]
pub fn snapshot_channel(capacity: usize) -> (SnapshotPublisher, SnapshotReceiver) {
    let capacity = capacity.max(1);
    let (frame_tx, frame_rx) = bounded(capacity);
    let (appearance_tx, appearance_rx) = bounded(capacity);

    let publisher = SnapshotPublisher {
        frame_tx,
        frame_overflow: frame_rx.clone(),
        appearance_tx,
        appearance_overflow: appearance_rx.clone(),
    };
    let receiver = SnapshotReceiver {
        frame_rx,
        appearance_rx,
        latest: None,
        appearance: None,
    };
    (publisher, receiver)
}

/// Simulation-thread end of the snapshot channel
pub struct SnapshotPublisher {
    frame_tx: Sender<FrameSnapshot>,
    frame_overflow: Receiver<FrameSnapshot>,
    appearance_tx: Sender<Appearance>,
    appearance_overflow: Receiver<Appearance>,
}

impl VignetteSink for SnapshotPublisher {
    fn publish(&mut self, snapshot: &FrameSnapshot) {
        push_latest(&self.frame_tx, &self.frame_overflow, *snapshot);
    }

    fn apply_appearance(&mut self, appearance: &Appearance) {
        push_latest(&self.appearance_tx, &self.appearance_overflow, *appearance);
    }
}

/// Render-thread end of the snapshot channel
pub struct SnapshotReceiver {
    frame_rx: Receiver<FrameSnapshot>,
    appearance_rx: Receiver<Appearance>,
    latest: Option<FrameSnapshot>,
    appearance: Option<Appearance>,
}

impl SnapshotReceiver {
    /// Newest frame published so far
    pub fn latest(&mut self) -> Option<FrameSnapshot> {
        if let Some(snapshot) = self.frame_rx.try_iter().last() {
            self.latest = Some(snapshot);
        }
        self.latest
    }

    /// Newest appearance published so far
    pub fn latest_appearance(&mut self) -> Option<Appearance> {
        if let Some(appearance) = self.appearance_rx.try_iter().last() {
            self.appearance = Some(appearance);
        }
        self.appearance
    }
}

fn push_latest<T>(tx: &Sender<T>, overflow: &Receiver<T>, mut value: T) {
    loop {
        match tx.try_send(value) {
            Ok(()) => return,
            Err(TrySendError::Full(rejected)) => {
                // Make room by discarding the oldest entry
                let _ = overflow.try_recv();
                value = rejected;
            }
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}
