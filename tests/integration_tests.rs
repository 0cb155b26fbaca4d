// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for barscroll
//!
//! These tests drive the editor through its public API the way a host
//! application would: commands between ticks, one tick per frame.

use barscroll::ui::{TerminalViewFactory, TransportClock};
use barscroll::{
    BarRecord, BarView, EditorConfig, EditorCore, EditorError, Mode, Note, NoteEditor,
    PlaybackSink, SongConstants, SongFile, TrackState, ViewFactory,
};

const FRAME: f64 = 1.0 / 60.0;
const BAR_WIDTH: f64 = 1200.0;

/// Bar view whose note list is edited directly by the tests
#[derive(Default)]
struct LiveView {
    notes: Vec<Note>,
    position: f64,
}

impl NoteEditor for LiveView {
    fn load_notes(&mut self, notes: &[Note]) {
        self.notes = notes.to_vec();
    }

    fn export_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }
}

impl BarView for LiveView {
    fn bind_data(&mut self, _index: usize, _key: &str) {}

    fn set_local_position(&mut self, axis_offset: f64) {
        self.position = axis_offset;
    }
}

#[derive(Default)]
struct LiveFactory;

impl ViewFactory for LiveFactory {
    type View = LiveView;

    fn create_view(&mut self) -> LiveView {
        LiveView::default()
    }
}

#[derive(Default)]
struct CountingSink {
    begun: bool,
    advanced: f64,
}

impl PlaybackSink for CountingSink {
    fn begin(&mut self) {
        self.begun = true;
        self.advanced = 0.0;
    }

    fn advance(&mut self, delta_time: f64) {
        self.advanced += delta_time;
    }
}

type Editor = EditorCore<TerminalViewFactory, TransportClock>;

fn editor_with(bars: usize, bpm: u32) -> Editor {
    let mut editor = EditorCore::new(
        EditorConfig::default(),
        TerminalViewFactory::default(),
        TransportClock::default(),
    );
    editor
        .init(TrackState::with_bars(bars, bpm), SongConstants::new("C"))
        .unwrap();
    editor
}

fn run_until_settled(editor: &mut Editor) -> usize {
    let mut frames = 0;
    while editor.is_animating() {
        editor.tick(FRAME);
        frames += 1;
        assert!(frames < 600, "navigation never settled");
    }
    frames
}

#[test]
fn test_move_last_then_first_scenario() {
    let mut editor = editor_with(3, 120);

    editor.move_last().unwrap();
    let frames = run_until_settled(&mut editor);
    assert!(frames > 1);
    assert_eq!(editor.offset(), -3.0 * BAR_WIDTH);

    editor.move_first().unwrap();
    run_until_settled(&mut editor);
    assert_eq!(editor.offset(), 0.0);
}

#[test]
fn test_targets_stay_in_range_for_any_move_sequence() {
    let mut editor = editor_with(3, 120);
    let min = -3.0 * BAR_WIDTH;

    // Deterministic mix of moves, some interrupted mid-flight
    let script = "RRRRERRRLFRRLLELLLLLRLRLERLRLLFFRRRERRRRRR";
    for (i, step) in script.chars().enumerate() {
        let target = match step {
            'L' => editor.move_left(),
            'R' => editor.move_right(),
            'F' => editor.move_first(),
            _ => editor.move_last(),
        }
        .unwrap();
        assert!(target <= 0.0 && target >= min, "target {} out of range", target);

        for _ in 0..(i % 7) {
            editor.tick(FRAME);
            assert!(editor.offset() <= 0.0 && editor.offset() >= min);
        }
    }
    run_until_settled(&mut editor);
    assert_eq!(editor.offset(), editor.target());
    assert!(editor.offset() <= 0.0 && editor.offset() >= min);
}

#[test]
fn test_interrupted_navigation_uses_last_target() {
    let mut editor = editor_with(5, 120);
    editor.move_last().unwrap();
    editor.tick(FRAME);
    editor.tick(FRAME);

    let target = editor.move_first().unwrap();
    assert_eq!(target, 0.0);
    run_until_settled(&mut editor);
    assert_eq!(editor.offset(), 0.0);
}

#[test]
fn test_playback_scenario() {
    let mut editor = editor_with(4, 120);
    editor.move_right().unwrap();
    run_until_settled(&mut editor);
    assert_eq!(editor.offset(), -600.0);

    let speed = editor.play().unwrap();
    // 4 steps of 75 per beat at two beats per second
    assert!((speed - 4.0 * 75.0 * 2.0).abs() < 1e-9);
    assert_eq!(editor.offset(), 0.0);
    assert!(matches!(editor.mode(), Mode::Playback { .. }));

    let mut t = 0.0;
    for _ in 0..120 {
        editor.tick(FRAME);
        t += FRAME;
    }
    assert!((editor.offset() - -speed * t).abs() < 1e-6);
    assert!((editor.sink().elapsed() - t).abs() < 1e-9);

    editor.pause();
    assert_eq!(editor.mode(), Mode::Edit);
    assert_eq!(editor.offset(), 0.0);
}

#[test]
fn test_add_new_bar_on_uninitialized_editor_fails() {
    let mut editor: Editor = EditorCore::new(
        EditorConfig::default(),
        TerminalViewFactory::default(),
        TransportClock::default(),
    );
    assert!(matches!(editor.add_new_bar(), Err(EditorError::InvalidState(_))));

    editor.init(TrackState::new(), SongConstants::default()).unwrap();
    assert_eq!(editor.bar_count(), 1);
    assert_eq!(editor.add_new_bar().unwrap(), 1);
}

#[test]
fn test_add_bars_keeps_indices_contiguous() {
    let mut editor = editor_with(1, 90);
    for expected in 1..6 {
        assert_eq!(editor.add_new_bar().unwrap(), expected);
    }
    let bars = editor.export_bars();
    assert_eq!(bars.len(), 6);
    for (i, bar) in bars.iter().enumerate() {
        assert_eq!(bar.index, i);
        assert_eq!(bar.beats_per_minute, 90);
        assert_eq!(editor.bar(i).unwrap().position(), i as f64 * BAR_WIDTH);
    }
    assert_eq!(editor.factory().created(), 6);
}

#[test]
fn test_set_tempo_reflected_in_export() {
    let mut editor = editor_with(3, 120);
    editor.set_tempo(75).unwrap();
    let bars = editor.export_bars();
    assert_eq!(bars.len(), 3);
    assert!(bars.iter().all(|b| b.beats_per_minute == 75));
    assert_eq!(
        bars.iter().map(|b| b.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_bar_lookup_out_of_range() {
    let editor = editor_with(2, 120);
    assert!(matches!(
        editor.bar(2),
        Err(EditorError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn test_custom_collaborators() {
    let mut editor = EditorCore::new(EditorConfig::default(), LiveFactory, CountingSink::default());
    let track = TrackState {
        bars: vec![
            BarRecord::new(0, 120).with_notes(vec![Note::new(0, 60)]),
            BarRecord::new(1, 120),
        ],
    };
    editor.init(track, SongConstants::default()).unwrap();
    editor.load_bars().unwrap();
    assert_eq!(editor.bar(1).unwrap().view().position, BAR_WIDTH);

    // Edit made in the note editor itself shows up in the export
    editor.bar_mut(1).unwrap().view_mut().notes.push(Note::new(2, 62));
    let exported = editor.export_bars();
    assert_eq!(exported[0].notes, vec![Note::new(0, 60)]);
    assert_eq!(exported[1].notes, vec![Note::new(2, 62)]);

    editor.play().unwrap();
    editor.tick(0.25);
    assert!(editor.sink().begun);
    assert!((editor.sink().advanced - 0.25).abs() < 1e-12);
}

#[test]
fn test_song_file_round_trip_through_editor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.yaml");

    let mut editor = editor_with(2, 110);
    editor.load_notes(1, &[Note::new(4, 64).with_length(2)]).unwrap();
    editor.add_new_bar().unwrap();
    SongFile {
        song: editor.song().cloned().unwrap(),
        track: editor.track(),
    }
    .save(&path)
    .unwrap();

    let loaded = SongFile::load(&path).unwrap();
    assert_eq!(loaded.song.key, "C");
    assert_eq!(loaded.track.len(), 3);

    let mut reopened = editor_with(1, 120);
    reopened.init(loaded.track, loaded.song).unwrap();
    reopened.load_bars().unwrap();
    assert_eq!(reopened.bar_count(), 3);
    assert_eq!(reopened.bar(1).unwrap().view().notes().len(), 1);
    assert_eq!(reopened.bar(2).unwrap().beats_per_minute(), 110);
}

#[test]
fn test_config_changes_layout() {
    let config = EditorConfig::from_toml(
        "[layout]\nbar_width = 800.0\nstep_width = 50.0\n\n[navigation]\nstep_fraction = 0.25\n",
    )
    .unwrap();
    let mut editor = EditorCore::new(config, TerminalViewFactory::default(), TransportClock::default());
    editor.init(TrackState::with_bars(2, 120), SongConstants::default()).unwrap();

    assert_eq!(editor.move_right().unwrap(), -200.0);
    assert_eq!(editor.move_last().unwrap(), -1600.0);
    run_until_settled(&mut editor);
    assert_eq!(editor.offset(), -1600.0);

    let speed = editor.play().unwrap();
    assert!((speed - 4.0 * 50.0 * 2.0).abs() < 1e-9);
}
