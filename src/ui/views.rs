// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal implementations of the editor's collaborators.

use tracing::debug;

use crate::editor::{BarView, NoteEditor, PlaybackSink, ViewFactory};
use crate::track::Note;

/// Bar view that keeps what the terminal needs to draw a bar
#[derive(Debug, Clone, Default)]
pub struct TerminalBarView {
    index: usize,
    key: String,
    position: f64,
    notes: Vec<Note>,
}

impl TerminalBarView {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl NoteEditor for TerminalBarView {
    fn load_notes(&mut self, notes: &[Note]) {
        self.notes = notes.to_vec();
    }

    fn export_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }
}

impl BarView for TerminalBarView {
    fn bind_data(&mut self, index: usize, key: &str) {
        self.index = index;
        self.key = key.to_string();
    }

    fn set_local_position(&mut self, axis_offset: f64) {
        self.position = axis_offset;
    }
}

/// Creates terminal bar views
#[derive(Debug, Default)]
pub struct TerminalViewFactory {
    created: usize,
}

impl TerminalViewFactory {
    /// Number of views created so far
    pub fn created(&self) -> usize {
        self.created
    }
}

impl ViewFactory for TerminalViewFactory {
    type View = TerminalBarView;

    fn create_view(&mut self) -> TerminalBarView {
        self.created += 1;
        TerminalBarView::default()
    }
}

/// Playback sink with no audio: keeps the elapsed transport time for display
#[derive(Debug, Clone, Default)]
pub struct TransportClock {
    elapsed: f64,
    frames: u64,
    runs: u32,
}

impl TransportClock {
    /// Seconds since playback began
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames advanced since playback began
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of times playback has begun
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Format elapsed time as MM:SS.cc
    pub fn format_time(&self) -> String {
        format_time(self.elapsed)
    }
}

/// Format seconds as MM:SS.cc
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0) as u32;
    format!("{:02}:{:05.2}", mins, seconds % 60.0)
}

impl PlaybackSink for TransportClock {
    fn begin(&mut self) {
        self.elapsed = 0.0;
        self.frames = 0;
        self.runs += 1;
        debug!(run = self.runs, "transport clock started");
    }

    fn advance(&mut self, delta_time: f64) {
        self.elapsed += delta_time;
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_binding() {
        let mut factory = TerminalViewFactory::default();
        let mut view = factory.create_view();
        view.bind_data(3, "Eb");
        view.set_local_position(3600.0);
        view.load_notes(&[Note::new(0, 63)]);

        assert_eq!(factory.created(), 1);
        assert_eq!(view.index(), 3);
        assert_eq!(view.key(), "Eb");
        assert_eq!(view.position(), 3600.0);
        assert_eq!(view.export_notes(), vec![Note::new(0, 63)]);
    }

    #[test]
    fn test_transport_clock() {
        let mut clock = TransportClock::default();
        clock.begin();
        for _ in 0..90 {
            clock.advance(1.0);
        }
        assert_eq!(clock.frames(), 90);
        assert_eq!(clock.format_time(), "01:30.00");

        clock.begin();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.runs(), 2);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(59.994), "00:59.99");
        assert_eq!(format_time(125.25), "02:05.25");
        assert_eq!(format_time(-1.0), "00:00.00");
    }
}
