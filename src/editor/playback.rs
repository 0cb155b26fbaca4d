// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo-locked scrolling during playback.

use tracing::info;

use super::scroll::ScrollController;
use super::view::PlaybackSink;
use crate::config::LayoutConfig;
use crate::error::{EditorError, Result};
use crate::timing;

/// Scrolls the timeline at a tempo-derived speed and ticks the playback
/// engine with the same frame delta
///
/// Whether playback is running, and at what speed, lives in the editor's
/// [`Mode`](super::Mode); the driver only holds the layout and the clock.
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    layout: LayoutConfig,
    elapsed: f64,
}

impl PlaybackDriver {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            elapsed: 0.0,
        }
    }

    /// Seconds of playback since the last `start`
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Begin playback at `bpm` from the top of the track
    ///
    /// Returns the computed scroll speed.
    pub fn start<P: PlaybackSink>(
        &mut self,
        bpm: u32,
        scroll: &mut ScrollController,
        sink: &mut P,
    ) -> Result<f64> {
        if bpm == 0 {
            return Err(EditorError::invalid_state("cannot play at 0 BPM"));
        }

        let scroll_speed =
            timing::scroll_speed(bpm, self.layout.steps_per_beat, self.layout.step_width);
        self.elapsed = 0.0;
        scroll.snap_to(0.0);
        sink.begin();

        info!(bpm, scroll_speed, "playback started");
        Ok(scroll_speed)
    }

    /// Return the scroll to the origin
    ///
    /// The sink is left alone; stopping its own transport is up to the host.
    pub fn stop(&mut self, scroll: &mut ScrollController) {
        scroll.snap_to(0.0);
    }

    /// Scroll forward by one frame at `scroll_speed` and tick the sink
    pub fn tick<P: PlaybackSink>(
        &mut self,
        delta_time: f64,
        scroll_speed: f64,
        scroll: &mut ScrollController,
        sink: &mut P,
    ) {
        let delta_time = delta_time.max(0.0);
        self.elapsed += delta_time;
        scroll.scroll_by(-scroll_speed * delta_time);
        sink.advance(delta_time);
    }

    /// Index of the bar currently at the origin for a given offset
    pub fn current_bar(&self, offset: f64) -> usize {
        let bar = (-offset / self.layout.bar_width).floor();
        if bar <= 0.0 {
            0
        } else {
            bar as usize
        }
    }

    /// Beat (0-based) within the current bar for a given offset
    pub fn current_beat(&self, offset: f64) -> u32 {
        let into_bar = (-offset).max(0.0) % self.layout.bar_width;
        (into_bar / self.layout.beat_width()).floor() as u32
    }
}
