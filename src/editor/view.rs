// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Collaborator interfaces.
//!
//! The editor core does not draw bars, edit notes or make sound. The host
//! supplies those pieces through these traits. All calls are synchronous and
//! happen while the core holds `&mut self`, so a collaborator cannot call
//! back into the editor.

use crate::track::Note;

/// Note-editing surface for a single bar
pub trait NoteEditor {
    /// Replace the notes shown by this editor
    fn load_notes(&mut self, notes: &[Note]);

    /// Current notes, including any edits made since `load_notes`
    fn export_notes(&self) -> Vec<Note>;
}

/// Visual representation of one bar
pub trait BarView: NoteEditor {
    /// Initialize the view with its bar index and the song key
    fn bind_data(&mut self, index: usize, key: &str);

    /// Place the view along the scroll axis, relative to the timeline origin
    fn set_local_position(&mut self, axis_offset: f64);
}

/// Creates one view per bar
pub trait ViewFactory {
    type View: BarView;

    fn create_view(&mut self) -> Self::View;
}

/// Playback engine driven in lockstep with the scroll
pub trait PlaybackSink {
    /// Playback is starting from the top of the track
    fn begin(&mut self);

    /// Advance the engine by `delta_time` seconds
    fn advance(&mut self, delta_time: f64);
}

/// Test doubles that record every call
#[cfg(test)]
pub(crate) mod fakes {
    use super::*;

    #[derive(Debug, Default, Clone)]
    pub struct RecordingView {
        pub index: Option<usize>,
        pub key: Option<String>,
        pub position: Option<f64>,
        pub notes: Vec<Note>,
        pub loads: usize,
    }

    impl NoteEditor for RecordingView {
        fn load_notes(&mut self, notes: &[Note]) {
            self.notes = notes.to_vec();
            self.loads += 1;
        }

        fn export_notes(&self) -> Vec<Note> {
            self.notes.clone()
        }
    }

    impl BarView for RecordingView {
        fn bind_data(&mut self, index: usize, key: &str) {
            self.index = Some(index);
            self.key = Some(key.to_string());
        }

        fn set_local_position(&mut self, axis_offset: f64) {
            self.position = Some(axis_offset);
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingFactory {
        pub created: usize,
    }

    impl ViewFactory for RecordingFactory {
        type View = RecordingView;

        fn create_view(&mut self) -> RecordingView {
            self.created += 1;
            RecordingView::default()
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub begins: usize,
        pub advanced: f64,
        pub ticks: usize,
    }

    impl PlaybackSink for RecordingSink {
        fn begin(&mut self) {
            self.begins += 1;
            self.advanced = 0.0;
        }

        fn advance(&mut self, delta_time: f64) {
            self.advanced += delta_time;
            self.ticks += 1;
        }
    }
}
