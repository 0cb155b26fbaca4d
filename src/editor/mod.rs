// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timeline editor core.
//!
//! `EditorCore` owns the bar store, the scroll controller and the playback
//! driver, and switches between edit and playback modes. The host calls
//! [`EditorCore::tick`] once per frame and the command methods in between.

pub mod bar_store;
pub mod playback;
pub mod scroll;
pub mod view;

pub use bar_store::{BarStore, BoundBar};
pub use playback::PlaybackDriver;
pub use scroll::{ScrollController, ScrollState};
pub use view::{BarView, NoteEditor, PlaybackSink, ViewFactory};

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::track::{BarRecord, Note, SongConstants, TrackState};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    /// Navigation and editing; scroll moves only by tweened requests
    #[default]
    Edit,
    /// Scroll advances with the tempo
    Playback { scroll_speed: f64 },
}

impl Mode {
    pub fn is_playing(&self) -> bool {
        matches!(self, Mode::Playback { .. })
    }
}

/// Navigation and playback state for one track
pub struct EditorCore<F: ViewFactory, P: PlaybackSink> {
    config: EditorConfig,
    factory: F,
    sink: P,
    song: Option<SongConstants>,
    bars: BarStore<F::View>,
    scroll: ScrollController,
    playback: PlaybackDriver,
    mode: Mode,
}

impl<F: ViewFactory, P: PlaybackSink> EditorCore<F, P> {
    /// Create an editor; it holds no bars until [`EditorCore::init`]
    pub fn new(config: EditorConfig, factory: F, sink: P) -> Self {
        let bar_width = config.layout.bar_width;
        Self {
            scroll: ScrollController::new(bar_width, &config.navigation),
            playback: PlaybackDriver::new(config.layout.clone()),
            bars: BarStore::new(bar_width),
            song: None,
            mode: Mode::Edit,
            config,
            factory,
            sink,
        }
    }

    /// Bind a track and bring the editor to its initial state
    ///
    /// An empty track is seeded with one bar at the configured default
    /// tempo. Calling `init` again discards the previous track's views.
    pub fn init(&mut self, track: TrackState, song: SongConstants) -> Result<()> {
        if let Err(err) = self.config.validate() {
            warn!(error = %err, "rejecting invalid editor config");
            return Err(EditorError::invalid_state(format!("invalid config: {:#}", err)));
        }
        if let Some(slot) = track.first_misindexed() {
            warn!(slot, "rejecting track with non-contiguous bar indices");
            return Err(EditorError::invalid_state(format!(
                "bar at position {} has index {}",
                slot, track.bars[slot].index
            )));
        }
        if let Some(bar) = track.bars.iter().find(|bar| bar.beats_per_minute == 0) {
            warn!(index = bar.index, "rejecting track with a 0 BPM bar");
            return Err(EditorError::invalid_state(format!(
                "bar {} has a tempo of 0 BPM",
                bar.index
            )));
        }

        self.playback.stop(&mut self.scroll);
        self.mode = Mode::Edit;
        self.bars.clear();

        let mut bars = track.bars;
        if bars.is_empty() {
            bars.push(BarRecord::new(0, self.config.playback.default_bpm));
        }

        for record in bars {
            let index = record.index;
            self.bars.append(record, index, &mut self.factory, &song)?;
        }

        info!(bars = self.bars.count(), key = %song.key, "editor initialized");
        self.song = Some(song);
        Ok(())
    }

    /// Advance one frame
    pub fn tick(&mut self, delta_time: f64) {
        match self.mode {
            Mode::Edit => {
                self.scroll.tick(delta_time);
            }
            Mode::Playback { scroll_speed } => {
                self.playback
                    .tick(delta_time, scroll_speed, &mut self.scroll, &mut self.sink);
            }
        }
    }

    /// Step half a bar back toward the first bar
    pub fn move_left(&mut self) -> Result<f64> {
        let step = self.nav_step();
        self.navigate("move_left", |_, _| step)
    }

    /// Step half a bar forward toward the last bar
    pub fn move_right(&mut self) -> Result<f64> {
        let step = self.nav_step();
        self.navigate("move_right", |_, _| -step)
    }

    /// Scroll back to the first bar
    pub fn move_first(&mut self) -> Result<f64> {
        self.navigate("move_first", |offset, _| -offset)
    }

    /// Scroll to the end of the last bar
    pub fn move_last(&mut self) -> Result<f64> {
        self.navigate("move_last", |offset, min| min - offset)
    }

    /// Switch to playback, scrolling at bar 0's tempo from the origin
    pub fn play(&mut self) -> Result<f64> {
        self.ensure_initialized("play")?;
        if self.mode.is_playing() {
            warn!("play requested while already playing");
            return Err(EditorError::invalid_state("already playing"));
        }
        let bpm = self
            .bars
            .iter()
            .next()
            .map(|bar| bar.beats_per_minute())
            .ok_or_else(|| EditorError::invalid_state("cannot play a track with no bars"))?;

        let scroll_speed = self.playback.start(bpm, &mut self.scroll, &mut self.sink)?;
        self.mode = Mode::Playback { scroll_speed };
        Ok(scroll_speed)
    }

    /// Return to edit mode with the offset back at the origin
    pub fn pause(&mut self) {
        if self.mode.is_playing() {
            info!(elapsed = self.playback.elapsed(), "playback stopped");
        }
        self.playback.stop(&mut self.scroll);
        self.mode = Mode::Edit;
    }

    /// Append a bar that copies the previous bar's tempo
    ///
    /// Returns the new bar's index.
    pub fn add_new_bar(&mut self) -> Result<usize> {
        let Some(bpm) = self.bars.last_tempo() else {
            warn!("add_new_bar called with no bars");
            return Err(EditorError::invalid_state(
                "the first bar must be seeded by init",
            ));
        };
        let song = self
            .song
            .as_ref()
            .ok_or_else(|| EditorError::invalid_state("editor not initialized"))?;

        let index = self.bars.count();
        self.bars
            .append(BarRecord::new(index, bpm), index, &mut self.factory, song)?;
        debug!(index, bpm, "added bar");
        Ok(index)
    }

    /// Set every bar's tempo
    ///
    /// A running playback keeps its speed until the next `play`.
    pub fn set_tempo(&mut self, beats_per_minute: u32) -> Result<()> {
        if beats_per_minute == 0 {
            return Err(EditorError::invalid_state("tempo must be at least 1 BPM"));
        }
        self.bars.set_tempo_all(beats_per_minute);
        debug!(bpm = beats_per_minute, bars = self.bars.count(), "tempo set");
        Ok(())
    }

    /// Snapshot every bar with the notes currently held by its editor
    pub fn export_bars(&self) -> Vec<BarRecord> {
        self.bars.export_all()
    }

    /// Push the stored notes of every bar into its note editor
    pub fn load_bars(&mut self) -> Result<()> {
        self.ensure_initialized("load_bars")?;
        self.bars.reload_all_notes();
        Ok(())
    }

    /// Deliver notes to a single bar's note editor
    pub fn load_notes(&mut self, index: usize, notes: &[Note]) -> Result<()> {
        self.bars.load_notes_into(index, notes)
    }

    /// Current track contents
    pub fn track(&self) -> TrackState {
        TrackState {
            bars: self.export_bars(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn target(&self) -> f64 {
        self.scroll.target()
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn is_initialized(&self) -> bool {
        self.song.is_some()
    }

    pub fn bar_count(&self) -> usize {
        self.bars.count()
    }

    pub fn bar(&self, index: usize) -> Result<&BoundBar<F::View>> {
        self.bars.get(index)
    }

    /// Mutable access for the host's note editing
    pub fn bar_mut(&mut self, index: usize) -> Result<&mut BoundBar<F::View>> {
        self.bars.get_mut(index)
    }

    pub fn bars(&self) -> &BarStore<F::View> {
        &self.bars
    }

    /// Bar currently at the origin
    pub fn current_bar(&self) -> usize {
        self.playback.current_bar(self.scroll.offset())
    }

    /// Beat within the current bar
    pub fn current_beat(&self) -> u32 {
        self.playback.current_beat(self.scroll.offset())
    }

    /// Playback scroll speed, if playing
    pub fn scroll_speed(&self) -> Option<f64> {
        match self.mode {
            Mode::Playback { scroll_speed } => Some(scroll_speed),
            Mode::Edit => None,
        }
    }

    /// Seconds since the last `play`
    pub fn playback_elapsed(&self) -> f64 {
        self.playback.elapsed()
    }

    pub fn song(&self) -> Option<&SongConstants> {
        self.song.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    fn nav_step(&self) -> f64 {
        self.config.layout.bar_width * self.config.navigation.step_fraction
    }

    fn ensure_initialized(&self, operation: &str) -> Result<()> {
        if self.song.is_none() {
            warn!(operation, "editor not initialized");
            return Err(EditorError::invalid_state(format!(
                "{} called before init",
                operation
            )));
        }
        Ok(())
    }

    /// Run a navigation request; `delta` maps (offset, min_offset) to the
    /// scroll delta
    fn navigate(&mut self, operation: &str, delta: impl FnOnce(f64, f64) -> f64) -> Result<f64> {
        self.ensure_initialized(operation)?;
        if self.mode.is_playing() {
            warn!(operation, "navigation rejected during playback");
            return Err(EditorError::invalid_state(format!(
                "{} is not available during playback",
                operation
            )));
        }

        let count = self.bars.count();
        let delta = delta(self.scroll.offset(), self.scroll.min_offset(count));
        Ok(self.scroll.request_delta(delta, count))
    }
}
