// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track data model.
//!
//! A track is an ordered list of bars. Each bar carries its own tempo and
//! the notes written into it by the note editor.

pub mod file;

pub use file::SongFile;

use serde::{Deserialize, Serialize};

/// A single note entry inside a bar
///
/// The editor core never interprets notes; it only moves them between
/// storage and the per-bar note editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Step position within the bar
    pub step: u32,
    /// MIDI pitch (0-127)
    pub pitch: u8,
    /// Length in steps
    #[serde(default = "default_length")]
    pub length: u32,
    /// Velocity (0-127)
    #[serde(default = "default_velocity")]
    pub velocity: u8,
}

fn default_length() -> u32 {
    1
}
fn default_velocity() -> u8 {
    100
}

impl Note {
    /// Create a note with default length and velocity
    pub fn new(step: u32, pitch: u8) -> Self {
        Self {
            step,
            pitch,
            length: default_length(),
            velocity: default_velocity(),
        }
    }

    /// Builder: set length
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length.max(1);
        self
    }

    /// Builder: set velocity
    pub fn with_velocity(mut self, velocity: u8) -> Self {
        self.velocity = velocity.min(127);
        self
    }
}

/// One bar of the track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRecord {
    /// Position in the track, assigned at creation
    pub index: usize,
    /// Tempo for this bar
    pub beats_per_minute: u32,
    /// Notes in this bar
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl BarRecord {
    /// Create an empty bar
    pub fn new(index: usize, beats_per_minute: u32) -> Self {
        Self {
            index,
            beats_per_minute,
            notes: Vec::new(),
        }
    }

    /// Builder: add notes
    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }
}

/// Song-level constants needed to bind a bar view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongConstants {
    /// Musical key (e.g., "C", "F#")
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    "C".to_string()
}

impl Default for SongConstants {
    fn default() -> Self {
        Self { key: default_key() }
    }
}

impl SongConstants {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// The track being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    /// Bars in index order
    #[serde(default)]
    pub bars: Vec<BarRecord>,
}

impl TrackState {
    /// Create an empty track
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a track of `count` empty bars at one tempo
    pub fn with_bars(count: usize, beats_per_minute: u32) -> Self {
        Self {
            bars: (0..count)
                .map(|index| BarRecord::new(index, beats_per_minute))
                .collect(),
        }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the track has no bars
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Position of the first bar whose index does not match its slot
    pub fn first_misindexed(&self) -> Option<usize> {
        self.bars
            .iter()
            .enumerate()
            .find(|(slot, bar)| bar.index != *slot)
            .map(|(slot, _)| slot)
    }
}
