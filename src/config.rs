//! Configuration management for the comfort vignette.
//!
//! [`EffectConfig`] is the parameter set read by the per-frame core.
//! [`Config`] is the file-level layout: the live effect, a library of
//! named presets, and settings for the scripted simulation driver.

use crate::channel::ChannelKind;
use crate::constants::{
    DEFAULT_ACCELERATION_MAX, DEFAULT_ANGULAR_MAX, DEFAULT_COVERAGE, DEFAULT_FEATHER, DEFAULT_FPS,
    DEFAULT_SMOOTHING, DEFAULT_VELOCITY_MAX,
};
use crate::preset::Preset;
use crate::simulation::Scenario;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Application configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Live effect parameters
    pub effect: EffectConfig,

    /// Named presets that can be swapped in at runtime
    pub presets: BTreeMap<String, EffectConfig>,

    /// Scripted simulation settings for the CLI driver
    pub simulation: SimulationConfig,
}

/// Parameters consumed by every stage of the vignette pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// How far the vignette closes at full motion (0.0-1.0)
    pub coverage: f64,

    /// Pin the vignette to maximum constriction regardless of motion
    pub force_effect: bool,

    /// Shift the vignette centre toward the direction of travel
    pub direction_specific: bool,

    /// Vertical shift gain applied to camera pitch
    pub directional_vertical_strength: f64,

    /// Horizontal shift gain applied to strafe motion
    pub directional_horizontal_strength: f64,

    /// Turning-rate channel (degrees per second)
    pub angular: ChannelConfig,

    /// Linear speed channel (metres per second)
    pub velocity: ChannelConfig,

    /// Speed change channel (metres per second squared)
    pub acceleration: ChannelConfig,

    /// Render-side look of the effect
    pub appearance: Appearance,
}

/// Per-channel response settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Channel contributes to the radius
    pub enabled: bool,

    /// Weight of the smoothed value in the radius target
    pub strength: f64,

    /// Raw value mapped to 0
    pub min: f64,

    /// Raw value mapped to 1
    pub max: f64,

    /// Smoothing knob (0.0 = sluggish, 1.0 = responsive)
    pub smoothing: f64,
}

/// What is drawn in the occluded periphery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Flat effect colour
    #[default]
    Color,
    /// Static skybox cube map
    Skybox,
    /// Blurred scene
    Blur,
}

/// Stencil masking applied to the effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    #[default]
    Off,
    /// Masked objects are never vignetted
    Mask,
    /// Masked objects show the real world through the vignette
    Portal,
    /// Only masked objects are vignetted
    Window,
}

/// Render-side appearance parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Linear RGB tint of the vignette
    pub effect_color: [f64; 3],

    /// Tint the background with `effect_color`
    pub apply_effect_color: bool,

    /// Edge softness (0.0-1.0)
    pub feather: f64,

    pub background_mode: BackgroundMode,

    pub mask_mode: MaskMode,

    /// Custom depth stencil value used for masking
    pub stencil_index: i32,
}

/// Scripted simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated frame rate
    pub target_fps: f64,

    /// Number of frames to run
    pub frames: usize,

    /// Motion script to play back
    pub scenario: Scenario,

    /// Uniform positional jitter amplitude in metres
    pub jitter: f64,

    /// Seed for the jitter generator
    pub seed: u64,

    /// Drop tracking every N frames (0 disables)
    pub tracking_dropout_every: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            coverage: DEFAULT_COVERAGE,
            force_effect: false,
            direction_specific: false,
            directional_vertical_strength: 1.0,
            directional_horizontal_strength: 1.0,
            angular: ChannelConfig {
                enabled: true,
                max: DEFAULT_ANGULAR_MAX,
                ..ChannelConfig::default()
            },
            velocity: ChannelConfig {
                max: DEFAULT_VELOCITY_MAX,
                ..ChannelConfig::default()
            },
            acceleration: ChannelConfig {
                max: DEFAULT_ACCELERATION_MAX,
                ..ChannelConfig::default()
            },
            appearance: Appearance::default(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 1.0,
            min: 0.0,
            max: 1.0,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            effect_color: [0.0, 0.0, 0.0],
            apply_effect_color: false,
            feather: DEFAULT_FEATHER,
            background_mode: BackgroundMode::default(),
            mask_mode: MaskMode::default(),
            stencil_index: 1,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_FPS,
            frames: 900,
            scenario: Scenario::Mixed,
            jitter: 0.0,
            seed: 7,
            tracking_dropout_every: 0,
        }
    }
}

impl EffectConfig {
    /// Settings for one channel
    #[must_use]
    pub const fn channel(&self, kind: ChannelKind) -> &ChannelConfig {
        match kind {
            ChannelKind::Angular => &self.angular,
            ChannelKind::Velocity => &self.velocity,
            ChannelKind::Acceleration => &self.acceleration,
        }
    }

    /// Mutable settings for one channel
    pub fn channel_mut(&mut self, kind: ChannelKind) -> &mut ChannelConfig {
        match kind {
            ChannelKind::Angular => &mut self.angular,
            ChannelKind::Velocity => &mut self.velocity,
            ChannelKind::Acceleration => &mut self.acceleration,
        }
    }

    /// At least one motion channel is switched on
    #[must_use]
    pub const fn any_channel_enabled(&self) -> bool {
        self.angular.enabled || self.velocity.enabled || self.acceleration.enabled
    }

    /// Validate parameter ranges.
    ///
    /// The runtime core accepts any values; this is for configuration
    /// coming from files or user input.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.coverage) {
            return Err(Error::ConfigError(
                "Coverage must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !self.directional_vertical_strength.is_finite() || !self.directional_horizontal_strength.is_finite() {
            return Err(Error::ConfigError(
                "Directional strengths must be finite".to_string(),
            ));
        }

        for kind in ChannelKind::ALL {
            let channel = self.channel(kind);
            if !(0.0..=1.0).contains(&channel.smoothing) {
                return Err(Error::ConfigError(format!(
                    "{kind} smoothing must be between 0.0 and 1.0"
                )));
            }
            if !channel.strength.is_finite() || channel.strength < 0.0 {
                return Err(Error::ConfigError(format!(
                    "{kind} strength must be finite and non-negative"
                )));
            }
            if !channel.min.is_finite() || !channel.max.is_finite() {
                return Err(Error::ConfigError(format!("{kind} range must be finite")));
            }
        }

        self.appearance.validate()
    }
}

impl Appearance {
    /// Named scalar shader parameters for this appearance
    #[must_use]
    pub fn scalar_parameters(&self) -> [(&'static str, f64); 9] {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        let bg = self.background_mode;
        let mask = self.mask_mode;

        [
            ("BackgroundColor", flag(bg == BackgroundMode::Color)),
            ("BackgroundSkybox", flag(bg == BackgroundMode::Skybox)),
            ("BackgroundBlur", flag(bg == BackgroundMode::Blur)),
            ("MaskOn", flag(mask == MaskMode::Mask)),
            ("MaskPortal", flag(mask == MaskMode::Portal)),
            ("MaskWindow", flag(mask == MaskMode::Window)),
            ("ApplyEffectColor", flag(self.apply_effect_color)),
            ("Feather", self.feather),
            ("MaskStencil", f64::from(self.stencil_index)),
        ]
    }

    /// Named vector shader parameters for this appearance
    #[must_use]
    pub const fn vector_parameters(&self) -> [(&'static str, [f64; 3]); 1] {
        [("EffectColor", self.effect_color)]
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.feather) {
            return Err(Error::ConfigError(
                "Feather must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.effect_color.iter().any(|c| !c.is_finite()) {
            return Err(Error::ConfigError("Effect colour must be finite".to_string()));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Look up a named preset
    pub fn preset(&self, name: &str) -> Result<Preset> {
        self.presets
            .get(name)
            .map(|config| Preset::new(name, config.clone()))
            .ok_or_else(|| Error::PresetError(format!("Unknown preset: {name}")))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.effect.validate()?;

        for (name, preset) in &self.presets {
            preset
                .validate()
                .map_err(|e| Error::ConfigError(format!("Preset '{name}': {e}")))?;
        }

        if !(self.simulation.target_fps.is_finite() && self.simulation.target_fps > 0.0) {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }
        if !self.simulation.jitter.is_finite() || self.simulation.jitter < 0.0 {
            return Err(Error::ConfigError(
                "Jitter must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Comfort Vignette Configuration

# Live effect
effect:
  coverage: 0.75
  force_effect: false
  direction_specific: false
  directional_vertical_strength: 1.0
  directional_horizontal_strength: 1.0
  angular:
    enabled: true
    strength: 1.0
    min: 0.0
    max: 180.0
    smoothing: 0.5
  velocity:
    enabled: false
    strength: 1.0
    min: 0.0
    max: 5.0
    smoothing: 0.5
  acceleration:
    enabled: false
    strength: 1.0
    min: 0.0
    max: 10.0
    smoothing: 0.5
  appearance:
    effect_color: [0.0, 0.0, 0.0]
    apply_effect_color: false
    feather: 0.1
    background_mode: color
    mask_mode: "off"
    stencil_index: 1

# Named presets
presets:
  strong:
    coverage: 0.9
    direction_specific: true
    angular:
      enabled: true
      strength: 1.5
      max: 120.0
      smoothing: 0.7
    velocity:
      enabled: true
      max: 3.0
    acceleration:
      enabled: true
      max: 6.0
    appearance:
      background_mode: skybox
      feather: 0.2
  subtle:
    coverage: 0.4
    angular:
      enabled: true
      strength: 0.5
      max: 240.0
      smoothing: 0.3

# Scripted simulation
simulation:
  target_fps: 90.0
  frames: 900
  scenario: mixed
  jitter: 0.0
  seed: 7
  tracking_dropout_every: 0
"#;
