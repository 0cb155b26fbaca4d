// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! YAML song files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{SongConstants, TrackState};

/// A song on disk: constants plus the single track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFile {
    /// Song-level constants
    #[serde(default)]
    pub song: SongConstants,
    /// The track's bars
    #[serde(default)]
    pub track: TrackState,
}

impl SongFile {
    /// Create an empty song in the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            song: SongConstants::new(key),
            track: TrackState::new(),
        }
    }

    /// Load a song from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read song file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a song from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse song YAML")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize song to YAML")
    }

    /// Save the song to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write song file: {:?}", path.as_ref()))
    }
}
