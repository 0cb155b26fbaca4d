// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Transport display widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph, Widget},
};

use super::TransportState;

/// Transport widget for displaying mode, position and tempo
pub struct TransportWidget<'a> {
    state: &'a TransportState,
    block: Option<Block<'a>>,
}

impl<'a> TransportWidget<'a> {
    /// Create a new transport widget
    pub fn new(state: &'a TransportState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TransportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(10), // Mode indicator
                Constraint::Length(2),  // Spacer
                Constraint::Length(12), // Bar:Beat
                Constraint::Length(2),  // Spacer
                Constraint::Length(10), // Tempo
                Constraint::Length(2),  // Spacer
                Constraint::Length(10), // Elapsed
                Constraint::Length(2),  // Spacer
                Constraint::Min(0),     // Offset
            ])
            .split(area);

        let (indicator, style) = if self.state.playing {
            ("▶ PLAY", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else if self.state.animating {
            ("↔ MOVE", Style::default().fg(Color::Cyan))
        } else {
            ("✎ EDIT", Style::default().fg(Color::Yellow))
        };
        Paragraph::new(indicator).style(style).render(chunks[0], buf);

        let position = format!(
            "{:03}:{:02} /{:03}",
            self.state.bar, self.state.beat, self.state.bar_count
        );
        Paragraph::new(position)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .render(chunks[2], buf);

        Paragraph::new(format!("{} BPM", self.state.bpm))
            .style(Style::default().fg(Color::Magenta))
            .render(chunks[4], buf);

        Paragraph::new(self.state.time.clone())
            .style(Style::default().fg(Color::White))
            .render(chunks[6], buf);

        Paragraph::new(format!("x {:.0}", self.state.offset))
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[8], buf);
    }
}
