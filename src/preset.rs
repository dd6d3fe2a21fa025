//! Reversible preset swapping.
//!
//! The live configuration and the user's custom configuration are kept as
//! two whole records. Applying a preset stashes the custom record (once)
//! and loads the preset; clearing restores the stash verbatim.

use crate::config::EffectConfig;
use log::info;

/// A named effect configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    name: String,
    config: EffectConfig,
}

impl Preset {
    #[must_use]
    pub fn new(name: impl Into<String>, config: EffectConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn config(&self) -> &EffectConfig {
        &self.config
    }
}

/// Live configuration plus the stashed custom configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSlots {
    active: EffectConfig,
    custom: Option<EffectConfig>,
    active_preset: Option<String>,
}

impl PresetSlots {
    #[must_use]
    pub const fn new(config: EffectConfig) -> Self {
        Self {
            active: config,
            custom: None,
            active_preset: None,
        }
    }

    /// Configuration read by the pipeline
    #[must_use]
    pub const fn active(&self) -> &EffectConfig {
        &self.active
    }

    /// Edit the live configuration.
    ///
    /// Edits made while a preset is active are discarded by [`Self::clear`].
    pub fn active_mut(&mut self) -> &mut EffectConfig {
        &mut self.active
    }

    /// The user's own configuration, whether or not a preset is loaded
    #[must_use]
    pub fn custom(&self) -> &EffectConfig {
        self.custom.as_ref().unwrap_or(&self.active)
    }

    /// Name of the loaded preset
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Load `preset` into the live configuration.
    ///
    /// The custom configuration is stashed only when no preset is loaded,
    /// so switching between presets never overwrites it.
    pub fn apply(&mut self, preset: &Preset) {
        if self.custom.is_none() {
            self.custom = Some(self.active.clone());
        }
        self.active = preset.config().clone();
        self.active_preset = Some(preset.name().to_string());
        info!("Applied vignette preset '{}'", preset.name());
    }

    /// Restore the stashed custom configuration.
    ///
    /// Returns `false` if no preset was loaded.
    pub fn clear(&mut self) -> bool {
        match self.custom.take() {
            Some(custom) => {
                self.active = custom;
                if let Some(name) = self.active_preset.take() {
                    info!("Cleared vignette preset '{name}'");
                }
                true
            }
            None => false,
        }
    }
}
