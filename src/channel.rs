//! Motion channels: the three independent signal paths feeding the radius.

use crate::config::ChannelConfig;
use crate::constants::ANGULAR_STRENGTH_SCALE;
use crate::response::{is_degenerate_range, normalize, normalize_unclamped};
use crate::smoothing::ExponentialSmoother;
use std::fmt;

/// Identifies a motion channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Head turning rate
    Angular,
    /// Linear speed
    Velocity,
    /// Change in speed
    Acceleration,
}

impl ChannelKind {
    /// All channels in evaluation order
    pub const ALL: [Self; 3] = [Self::Angular, Self::Velocity, Self::Acceleration];

    /// Multiplier applied on top of the configured strength
    #[must_use]
    pub const fn strength_scale(self) -> f64 {
        match self {
            Self::Angular => ANGULAR_STRENGTH_SCALE,
            Self::Velocity | Self::Acceleration => 1.0,
        }
    }

    /// Normalize a raw delta with this channel's response curve.
    ///
    /// Angular input is left unclamped ahead of smoothing; the linear
    /// channels are clamped into `[0, 1]`.
    #[must_use]
    pub fn normalize(self, raw: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Angular => normalize_unclamped(raw, min, max),
            Self::Velocity | Self::Acceleration => normalize(raw, min, max),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Angular => "Angular",
            Self::Velocity => "Velocity",
            Self::Acceleration => "Acceleration",
        };
        f.write_str(name)
    }
}

/// Runtime state of one channel, persisted across ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    kind: ChannelKind,
    last_raw: f64,
    last_normalized: f64,
    smoother: ExponentialSmoother,
}

impl ChannelState {
    #[must_use]
    pub const fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            last_raw: 0.0,
            last_normalized: 0.0,
            smoother: ExponentialSmoother::new(),
        }
    }

    /// Run normalize -> smooth -> weight for this tick.
    ///
    /// Returns the channel's contribution to the radius target. A
    /// degenerate range contributes exactly zero and drops any smoothed
    /// history.
    pub fn update(&mut self, config: &ChannelConfig, raw: f64, delta_time: f64) -> f64 {
        self.last_raw = raw;

        if is_degenerate_range(config.min, config.max) {
            self.last_normalized = 0.0;
            self.smoother.reset();
            return 0.0;
        }

        self.last_normalized = self.kind.normalize(raw, config.min, config.max);
        // Non-finite input holds the smoothed value
        let smoothed = if self.last_normalized.is_finite() {
            self.smoother.apply(self.last_normalized, delta_time, config.smoothing)
        } else {
            self.smoother.value()
        };
        smoothed * config.strength * self.kind.strength_scale()
    }

    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Raw delta seen on the last update
    #[must_use]
    pub const fn last_raw(&self) -> f64 {
        self.last_raw
    }

    /// Normalized input fed to the smoother on the last update
    #[must_use]
    pub const fn last_normalized(&self) -> f64 {
        self.last_normalized
    }

    /// Smoothed value carried into the next tick
    #[must_use]
    pub const fn smoothed(&self) -> f64 {
        self.smoother.value()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}
