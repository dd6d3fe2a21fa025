//! Per-frame motion-to-vignette computation.

use crate::channel::{ChannelKind, ChannelState};
use crate::composer::{ComposeMode, VignetteComposer};
use crate::config::{Appearance, ChannelConfig, EffectConfig};
use crate::direction::directional_shift;
use crate::pose::{PoseSample, ViewBasis};
use crate::preset::{Preset, PresetSlots};
use crate::publish::VignetteOutput;
use crate::sampler::{ChannelUsage, MotionSample, MotionSampler};
use log::debug;

/// Owns the configuration and all per-channel state.
///
/// Drive it with [`MotionVignetteEngine::tick`] once per frame. Setters
/// take effect on the next tick.
#[derive(Debug, Clone)]
pub struct MotionVignetteEngine {
    slots: PresetSlots,
    sampler: MotionSampler,
    composer: VignetteComposer,
    mode: Option<ComposeMode>,
    last_output: Option<VignetteOutput>,
    last_basis: ViewBasis,
}

impl Default for MotionVignetteEngine {
    fn default() -> Self {
        Self::new(EffectConfig::default())
    }
}

impl MotionVignetteEngine {
    #[must_use]
    pub fn new(config: EffectConfig) -> Self {
        Self {
            slots: PresetSlots::new(config),
            sampler: MotionSampler::new(),
            composer: VignetteComposer::new(),
            mode: None,
            last_output: None,
            last_basis: ViewBasis::default(),
        }
    }

    /// Advance one frame.
    ///
    /// Returns `None` without touching any state when the pose is not
    /// tracked. Never fails otherwise.
    pub fn tick(&mut self, delta_time: f64, pose: &PoseSample) -> Option<VignetteOutput> {
        if !pose.tracking_valid {
            return None;
        }

        let config = self.slots.active();
        let basis = pose.basis();
        let mode = ComposeMode::from_config(config);
        if self.mode != Some(mode) {
            debug!("Vignette mode: {mode:?}");
            self.mode = Some(mode);
        }

        // Direction of travel is measured against the pre-update position
        let motion_direction = self.sampler.motion_direction(&pose.position);

        let radius = match mode {
            ComposeMode::Forced => VignetteComposer::forced_radius(),
            ComposeMode::Measured => {
                let sample = MotionSample {
                    position: pose.position,
                    forward: basis.forward,
                    speed: pose.speed,
                    delta_time,
                };
                let raw = self.sampler.sample(&sample, ChannelUsage::from_config(config));
                self.composer.compose(config, &raw, delta_time)
            }
        };

        let shift = directional_shift(config, &basis.forward, &basis.right, &motion_direction, radius);
        let output = VignetteOutput {
            radius,
            horizontal_shift: shift.horizontal,
            vertical_shift: shift.vertical,
        };

        self.last_output = Some(output);
        self.last_basis = basis;
        Some(output)
    }

    /// Live configuration
    #[must_use]
    pub const fn config(&self) -> &EffectConfig {
        self.slots.active()
    }

    /// The user's configuration, ignoring any loaded preset
    #[must_use]
    pub fn custom_config(&self) -> &EffectConfig {
        self.slots.custom()
    }

    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.slots.active_preset()
    }

    /// Swap `preset` in, stashing the custom configuration
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.slots.apply(preset);
    }

    /// Restore the custom configuration; `false` if no preset was loaded
    pub fn clear_preset(&mut self) -> bool {
        self.slots.clear()
    }

    pub fn set_force_effect(&mut self, force: bool) {
        self.slots.active_mut().force_effect = force;
    }

    pub fn set_direction_specific(&mut self, enabled: bool) {
        self.slots.active_mut().direction_specific = enabled;
    }

    pub fn set_directional_strengths(&mut self, vertical: f64, horizontal: f64) {
        let config = self.slots.active_mut();
        config.directional_vertical_strength = vertical;
        config.directional_horizontal_strength = horizontal;
    }

    pub fn set_coverage(&mut self, coverage: f64) {
        self.slots.active_mut().coverage = coverage;
    }

    pub fn set_channel(&mut self, kind: ChannelKind, channel: ChannelConfig) {
        *self.slots.active_mut().channel_mut(kind) = channel;
    }

    pub fn set_channel_enabled(&mut self, kind: ChannelKind, enabled: bool) {
        self.slots.active_mut().channel_mut(kind).enabled = enabled;
    }

    pub fn set_channel_strength(&mut self, kind: ChannelKind, strength: f64) {
        self.slots.active_mut().channel_mut(kind).strength = strength;
    }

    pub fn set_channel_range(&mut self, kind: ChannelKind, min: f64, max: f64) {
        let channel = self.slots.active_mut().channel_mut(kind);
        channel.min = min;
        channel.max = max;
    }

    pub fn set_channel_smoothing(&mut self, kind: ChannelKind, smoothing: f64) {
        self.slots.active_mut().channel_mut(kind).smoothing = smoothing;
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.slots.active_mut().appearance = appearance;
    }

    #[must_use]
    pub fn channel_state(&self, kind: ChannelKind) -> &ChannelState {
        self.composer.channel(kind)
    }

    /// Weighted channel sum before remapping, from the last measured tick
    #[must_use]
    pub const fn radius_target(&self) -> f64 {
        self.composer.radius_target()
    }

    #[must_use]
    pub const fn last_output(&self) -> Option<VignetteOutput> {
        self.last_output
    }

    #[must_use]
    pub const fn last_basis(&self) -> ViewBasis {
        self.last_basis
    }

    #[must_use]
    pub const fn sampler(&self) -> &MotionSampler {
        &self.sampler
    }

    /// Forget motion history (after a teleport, for instance).
    ///
    /// Configuration and presets are untouched.
    pub fn reset(&mut self) {
        debug!("Resetting vignette motion state");
        self.sampler.reset();
        self.composer.reset();
        self.mode = None;
        self.last_output = None;
    }

    /// Make the next tick a priming sample, keeping channel smoothing
    pub fn reprime(&mut self) {
        debug!("Repriming vignette motion history");
        self.sampler.reset();
    }
}
