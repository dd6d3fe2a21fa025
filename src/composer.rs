//! Combines the motion channels into a single vignette radius.

use crate::channel::{ChannelKind, ChannelState};
use crate::config::EffectConfig;
use crate::constants::{FORCED_RADIUS, PASSTHROUGH_RADIUS};
use crate::response::map_range_clamped;
use crate::sampler::RawDeltas;
use log::trace;

/// How the radius is chosen this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMode {
    /// Pinned to maximum constriction; channels are not evaluated
    Forced,
    /// Driven by measured motion
    Measured,
}

impl ComposeMode {
    #[must_use]
    pub const fn from_config(config: &EffectConfig) -> Self {
        if config.force_effect {
            Self::Forced
        } else {
            Self::Measured
        }
    }
}

/// Owns the per-channel state and produces the composed radius
#[derive(Debug, Clone)]
pub struct VignetteComposer {
    channels: [ChannelState; 3],
    radius_target: f64,
}

impl Default for VignetteComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl VignetteComposer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channels: [
                ChannelState::new(ChannelKind::Angular),
                ChannelState::new(ChannelKind::Velocity),
                ChannelState::new(ChannelKind::Acceleration),
            ],
            radius_target: 0.0,
        }
    }

    /// Radius used in forced mode
    #[must_use]
    pub const fn forced_radius() -> f64 {
        FORCED_RADIUS
    }

    /// Measured-mode radius for this tick.
    ///
    /// Each enabled channel is updated and its weighted contribution summed
    /// into the radius target, which is then remapped from `[0, 1]` onto
    /// `[1.5, 1 - coverage]`. With every channel off the radius is fully open.
    pub fn compose(&mut self, config: &EffectConfig, raw: &RawDeltas, delta_time: f64) -> f64 {
        if !config.any_channel_enabled() {
            self.radius_target = 0.0;
            return PASSTHROUGH_RADIUS;
        }

        let mut target = 0.0;
        for state in &mut self.channels {
            let kind = state.kind();
            let channel = config.channel(kind);
            if channel.enabled {
                target += state.update(channel, raw_for(kind, raw), delta_time);
            }
        }
        self.radius_target = target;

        let radius = remap_radius(target, config.coverage);
        trace!("radius target {target:.4} -> radius {radius:.4}");
        radius
    }

    /// Unremapped weighted sum from the last measured tick
    #[must_use]
    pub const fn radius_target(&self) -> f64 {
        self.radius_target
    }

    #[must_use]
    pub fn channel(&self, kind: ChannelKind) -> &ChannelState {
        match kind {
            ChannelKind::Angular => &self.channels[0],
            ChannelKind::Velocity => &self.channels[1],
            ChannelKind::Acceleration => &self.channels[2],
        }
    }

    /// Drop all smoothed history
    pub fn reset(&mut self) {
        for state in &mut self.channels {
            state.reset();
        }
        self.radius_target = 0.0;
    }
}

/// Map a radius target in `[0, 1]` onto `[1.5, 1 - coverage]`, clamped.
///
/// The closed end `1 - coverage` is not bounded below, so coverage above
/// 0.5 closes tighter than the lower half of the range and coverage above
/// 1.0 flips its sign. Tuned presets depend on this curve; do not clamp it.
#[must_use]
pub fn remap_radius(radius_target: f64, coverage: f64) -> f64 {
    map_range_clamped(radius_target, (0.0, 1.0), (PASSTHROUGH_RADIUS, 1.0 - coverage))
}

const fn raw_for(kind: ChannelKind, raw: &RawDeltas) -> f64 {
    match kind {
        ChannelKind::Angular => raw.angular_rate,
        ChannelKind::Velocity => raw.velocity,
        ChannelKind::Acceleration => raw.acceleration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelConfig;

    fn velocity_only() -> EffectConfig {
        EffectConfig {
            angular: ChannelConfig::default(),
            velocity: ChannelConfig {
                enabled: true,
                strength: 1.0,
                min: 0.0,
                max: 2.0,
                smoothing: 0.5,
            },
            ..EffectConfig::default()
        }
    }

    #[test]
    fn test_mode_selection() {
        let mut config = EffectConfig::default();
        assert_eq!(ComposeMode::from_config(&config), ComposeMode::Measured);
        config.force_effect = true;
        assert_eq!(ComposeMode::from_config(&config), ComposeMode::Forced);
        assert_eq!(VignetteComposer::forced_radius(), 0.3);
    }

    #[test]
    fn test_no_channels_is_passthrough() {
        let mut config = EffectConfig::default();
        config.angular.enabled = false;
        let raw = RawDeltas {
            angular_rate: 1000.0,
            velocity: 1000.0,
            acceleration: 1000.0,
        };
        let mut composer = VignetteComposer::new();
        assert_eq!(composer.compose(&config, &raw, 0.016), 1.5);
    }

    #[test]
    fn test_velocity_scenario() {
        let config = velocity_only();
        let raw = RawDeltas {
            velocity: 62.5,
            ..RawDeltas::default()
        };
        let mut composer = VignetteComposer::new();
        let radius = composer.compose(&config, &raw, 0.016);

        let expected_target = 0.016 * 10.5;
        assert!((composer.radius_target() - expected_target).abs() < 1e-12);
        let expected = 1.5 + (1.0 - config.coverage - 1.5) * expected_target;
        assert!((radius - expected).abs() < 1e-12);
    }

    #[test]
    fn test_radius_stays_in_range() {
        let mut config = velocity_only();
        config.velocity.strength = 10.0;
        let raw = RawDeltas {
            velocity: 100.0,
            ..RawDeltas::default()
        };
        let mut composer = VignetteComposer::new();
        for _ in 0..100 {
            let radius = composer.compose(&config, &raw, 0.05);
            assert!(radius <= 1.5);
            assert!(radius >= 1.0 - config.coverage);
        }
        assert!((composer.compose(&config, &raw, 0.05) - (1.0 - config.coverage)).abs() < 1e-12);
    }

    #[test]
    fn test_disabled_channel_state_untouched() {
        let config = velocity_only();
        let raw = RawDeltas {
            angular_rate: 500.0,
            velocity: 1.0,
            acceleration: 500.0,
        };
        let mut composer = VignetteComposer::new();
        composer.compose(&config, &raw, 0.016);
        assert_eq!(composer.channel(ChannelKind::Angular).smoothed(), 0.0);
        assert_eq!(composer.channel(ChannelKind::Acceleration).smoothed(), 0.0);
        assert!(composer.channel(ChannelKind::Velocity).smoothed() > 0.0);

        composer.reset();
        assert_eq!(composer.channel(ChannelKind::Velocity).smoothed(), 0.0);
    }

    #[test]
    fn test_remap_radius_endpoints() {
        assert_eq!(remap_radius(0.0, 0.75), 1.5);
        assert_eq!(remap_radius(1.0, 0.75), 0.25);
        assert_eq!(remap_radius(2.0, 0.75), 0.25);
        assert_eq!(remap_radius(-1.0, 0.75), 1.5);
        assert_eq!(remap_radius(1.0, 0.0), 1.0);
    }
}
