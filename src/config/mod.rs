// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editor configuration.
//!
//! Layout constants, navigation feel, playback defaults and logging, read
//! from a TOML file. Every section and field has a default, so a partial
//! (or empty) file is valid.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::timing::Easing;

/// Root editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EditorConfig {
    /// Load and validate a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))
    }

    /// Parse and validate a configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = self.to_toml()?;
        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Reject values the editor cannot work with
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if !(layout.step_width > 0.0) {
            bail!("layout.step_width must be positive, got {}", layout.step_width);
        }
        if layout.steps_per_beat == 0 {
            bail!("layout.steps_per_beat must be at least 1");
        }
        if !(layout.bar_width > 0.0) {
            bail!("layout.bar_width must be positive, got {}", layout.bar_width);
        }

        let nav = &self.navigation;
        if !(nav.speed > 0.0) {
            bail!("navigation.speed must be positive, got {}", nav.speed);
        }
        if !(nav.step_fraction > 0.0 && nav.step_fraction <= 1.0) {
            bail!(
                "navigation.step_fraction must be in (0, 1], got {}",
                nav.step_fraction
            );
        }

        if self.playback.default_bpm == 0 {
            bail!("playback.default_bpm must be at least 1");
        }
        Ok(())
    }
}

/// On-axis layout of bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of one step (sixteenth) column
    #[serde(default = "default_step_width")]
    pub step_width: f64,
    /// Steps in one beat
    #[serde(default = "default_steps_per_beat")]
    pub steps_per_beat: u32,
    /// Width of one bar along the scroll axis
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
}

fn default_step_width() -> f64 {
    75.0
}
fn default_steps_per_beat() -> u32 {
    4
}
fn default_bar_width() -> f64 {
    1200.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            step_width: default_step_width(),
            steps_per_beat: default_steps_per_beat(),
            bar_width: default_bar_width(),
        }
    }
}

impl LayoutConfig {
    /// Width of one beat along the axis
    pub fn beat_width(&self) -> f64 {
        self.step_width * self.steps_per_beat as f64
    }
}

/// Animated navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Tween speed in full distances per second
    #[serde(default = "default_nav_speed")]
    pub speed: f64,
    /// Fraction of a bar moved by a single left/right step
    #[serde(default = "default_step_fraction")]
    pub step_fraction: f64,
    /// Easing curve for navigation tweens
    #[serde(default)]
    pub easing: Easing,
}

fn default_nav_speed() -> f64 {
    2.5
}
fn default_step_fraction() -> f64 {
    0.5
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            speed: default_nav_speed(),
            step_fraction: default_step_fraction(),
            easing: Easing::default(),
        }
    }
}

/// Playback defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Tempo given to the seed bar of an empty track
    #[serde(default = "default_bpm")]
    pub default_bpm: u32,
}

fn default_bpm() -> u32 {
    120
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_bpm: default_bpm(),
        }
    }
}

/// Log output settings for the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file used while the terminal UI owns the screen
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> String {
    "barscroll.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}
