// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Navigation and playback core for a bar-based timeline editor.
//!
//! A track is a row of fixed-width bars along one scroll axis. The
//! [`EditorCore`] scrolls between bars with tweened animation in edit mode
//! and scrolls continuously at the first bar's tempo in playback mode,
//! ticking a playback sink in lockstep.

pub mod config;
pub mod editor;
pub mod error;
pub mod timing;
pub mod track;
pub mod ui;

pub use config::EditorConfig;
pub use editor::{
    BarStore, BarView, BoundBar, EditorCore, Mode, NoteEditor, PlaybackDriver, PlaybackSink,
    ScrollController, ScrollState, ViewFactory,
};
pub use error::{EditorError, Result};
pub use timing::{Easing, Tween};
pub use track::{BarRecord, Note, SongConstants, SongFile, TrackState};
