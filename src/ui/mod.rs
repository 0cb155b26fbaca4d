// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the bar timeline.
//!
//! Provides a ratatui-based host for the editor core: terminal bar views,
//! the scrolling timeline, transport display and key bindings.

mod timeline;
mod transport;
mod views;

pub use timeline::{bar_columns, TimelineWidget};
pub use transport::TransportWidget;
pub use views::{format_time, TerminalBarView, TerminalViewFactory, TransportClock};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::warn;

use crate::editor::{EditorCore, NoteEditor, PlaybackSink, ViewFactory};
use crate::error::Result;

/// Everything the UI draws for one frame
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub transport: TransportState,
    pub timeline: TimelineState,
    /// Help text visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl UiState {
    /// Refresh transport and timeline from the editor
    pub fn update_from_editor<F: ViewFactory, P: PlaybackSink>(&mut self, editor: &EditorCore<F, P>) {
        self.transport.update_from_editor(editor);
        self.timeline.update_from_editor(editor);
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// Transport state for UI display
#[derive(Debug, Clone, Default)]
pub struct TransportState {
    pub playing: bool,
    pub animating: bool,
    /// Tempo of the first bar
    pub bpm: u32,
    /// Current bar (1-indexed for display)
    pub bar: usize,
    /// Current beat (1-indexed for display)
    pub beat: u32,
    pub bar_count: usize,
    pub offset: f64,
    /// Elapsed playback time, MM:SS.cc
    pub time: String,
}

impl TransportState {
    pub fn update_from_editor<F: ViewFactory, P: PlaybackSink>(&mut self, editor: &EditorCore<F, P>) {
        self.playing = editor.mode().is_playing();
        self.animating = editor.is_animating();
        self.bpm = editor.bar(0).map(|b| b.beats_per_minute()).unwrap_or(0);
        self.bar = editor.current_bar() + 1;
        self.beat = editor.current_beat() + 1;
        self.bar_count = editor.bar_count();
        self.offset = editor.offset();

        self.time = format_time(editor.playback_elapsed());
    }
}

/// One bar as the timeline draws it
#[derive(Debug, Clone, PartialEq)]
pub struct BarUiState {
    pub index: usize,
    pub bpm: u32,
    pub note_count: usize,
    /// Placement along the axis
    pub position: f64,
}

/// Timeline state for UI display
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    pub bars: Vec<BarUiState>,
    pub offset: f64,
    pub bar_width: f64,
    pub current_bar: usize,
}

impl TimelineState {
    pub fn update_from_editor<F: ViewFactory, P: PlaybackSink>(&mut self, editor: &EditorCore<F, P>) {
        self.offset = editor.offset();
        self.bar_width = editor.config().layout.bar_width;
        self.current_bar = editor.current_bar();
        self.bars.clear();
        self.bars.extend(editor.bars().iter().map(|bar| BarUiState {
            index: bar.index(),
            bpm: bar.beats_per_minute(),
            note_count: bar.view().export_notes().len(),
            position: bar.position(),
        }));
    }
}

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Toggle play/pause
    TogglePlay,
    MoveLeft,
    MoveRight,
    MoveFirst,
    MoveLast,
    AddBar,
    /// Increase tempo of every bar
    TempoUp,
    /// Decrease tempo of every bar
    TempoDown,
    /// Toggle help
    ToggleHelp,
}

/// Run a key action against the editor and describe what happened
pub fn apply_action<F: ViewFactory, P: PlaybackSink>(
    editor: &mut EditorCore<F, P>,
    action: KeyAction,
) -> Result<Option<String>> {
    let message = match action {
        KeyAction::None | KeyAction::Quit | KeyAction::ToggleHelp => None,
        KeyAction::TogglePlay => {
            if editor.mode().is_playing() {
                editor.pause();
                Some("Paused".to_string())
            } else {
                let speed = editor.play()?;
                Some(format!("Playing at {:.0} units/s", speed))
            }
        }
        KeyAction::MoveLeft => Some(format!("Target {:.0}", editor.move_left()?)),
        KeyAction::MoveRight => Some(format!("Target {:.0}", editor.move_right()?)),
        KeyAction::MoveFirst => Some(format!("Target {:.0}", editor.move_first()?)),
        KeyAction::MoveLast => Some(format!("Target {:.0}", editor.move_last()?)),
        KeyAction::AddBar => {
            let index = editor.add_new_bar()?;
            Some(format!("Added bar {}", index + 1))
        }
        KeyAction::TempoUp | KeyAction::TempoDown => {
            let current = editor.bar(0)?.beats_per_minute();
            let bpm = if action == KeyAction::TempoUp {
                current.saturating_add(1).min(300)
            } else {
                current.saturating_sub(1).max(20)
            };
            editor.set_tempo(bpm)?;
            Some(format!("Tempo {} BPM", bpm))
        }
    };
    Ok(message)
}

/// Terminal UI application
pub struct App {
    /// UI state for the next frame
    state: UiState,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Take over the terminal
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state: UiState::default(),
            terminal,
            frame_rate: 60,
            running: true,
        })
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    /// Set frame rate
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps.clamp(1, 120);
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Map a key to an action
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        let action = key_action(code, modifiers);
        match action {
            KeyAction::Quit => self.quit(),
            KeyAction::ToggleHelp => self.state.show_help = !self.state.show_help,
            _ => {}
        }
        action
    }

    /// Poll for a key press, waiting at most one frame
    pub fn poll_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some((key.code, key.modifiers)));
                }
            }
        }
        Ok(None)
    }

    /// Run one editor command from a key, reporting the outcome on the status bar
    pub fn dispatch<F: ViewFactory, P: PlaybackSink>(
        &mut self,
        editor: &mut EditorCore<F, P>,
        action: KeyAction,
    ) {
        match apply_action(editor, action) {
            Ok(Some(message)) => self.state.set_status(message),
            Ok(None) => {}
            Err(e) => {
                warn!(?action, error = %e, "command failed");
                self.state.set_status(e.to_string());
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        self.state.clear_expired_status();
        let state = &self.state;

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Transport
                    Constraint::Min(6),    // Timeline
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            frame.render_widget(
                TransportWidget::new(&state.transport)
                    .block(Block::default().borders(Borders::ALL).title(" Transport ")),
                chunks[0],
            );
            frame.render_widget(
                TimelineWidget::new(&state.timeline)
                    .block(Block::default().borders(Borders::ALL).title(" Track ")),
                chunks[1],
            );
            render_status_bar(frame, chunks[2], state);

            if state.show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Key bindings
pub fn key_action(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match (code, modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::TogglePlay,

        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::MoveLeft,
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::MoveRight,
        (KeyCode::Home, _) => KeyAction::MoveFirst,
        (KeyCode::End, _) => KeyAction::MoveLast,

        (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::AddBar,

        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => KeyAction::TempoUp,
        (KeyCode::Char('-'), KeyModifiers::NONE) => KeyAction::TempoDown,

        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::ToggleHelp,

        _ => KeyAction::None,
    }
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg.as_str(), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " Space: Play/Pause | ←/→: Move | Home/End: First/Last | a: Add bar | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 44.min(area.width.saturating_sub(4));
    let height = 15.min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled("Navigation", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Left/Right  Half a bar back/forward"),
        Line::from("  Home/End    First/last bar"),
        Line::from(""),
        Line::from(Span::styled("Playback", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Space       Play/Pause"),
        Line::from("  +/-         Tempo +/- 1 BPM"),
        Line::from(""),
        Line::from(Span::styled("Track", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  a           Add bar"),
        Line::from(""),
        Line::from("  h/?         Toggle help"),
        Line::from("  q/Ctrl+c    Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
