// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! Tweening for animated navigation, easing curves, and the tempo math that
//! turns a bar's BPM into a scroll speed.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::Tween;

/// Seconds per beat at the given tempo
pub fn seconds_per_beat(bpm: u32) -> f64 {
    60.0 / bpm as f64
}

/// Playback scroll speed in axis units per second
///
/// One beat spans `steps_per_beat` steps of `step_width` each.
pub fn scroll_speed(bpm: u32, steps_per_beat: u32, step_width: f64) -> f64 {
    steps_per_beat as f64 * step_width / seconds_per_beat(bpm)
}
