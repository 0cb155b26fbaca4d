// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scrolling bar timeline widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::TimelineState;

/// Number of bars that fit across the widget
const VISIBLE_BARS: f64 = 2.0;

/// Column range `[start, end)` a bar occupies inside a widget `width`
/// columns wide, or None when it is entirely off screen
///
/// The timeline origin sits at column 0, so a bar at `position` is drawn at
/// `position + offset` axis units from the left edge.
pub fn bar_columns(position: f64, offset: f64, bar_width: f64, width: u16) -> Option<(u16, u16)> {
    if width == 0 || bar_width <= 0.0 {
        return None;
    }
    let scale = width as f64 / (bar_width * VISIBLE_BARS);
    let left = ((position + offset) * scale).round();
    let right = ((position + offset + bar_width) * scale).round();
    if right <= 0.0 || left >= width as f64 {
        return None;
    }
    let start = left.max(0.0) as u16;
    let end = right.min(width as f64) as u16;
    (end > start).then_some((start, end))
}

/// Draws the bars that are currently scrolled into view
pub struct TimelineWidget<'a> {
    state: &'a TimelineState,
    block: Option<Block<'a>>,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(state: &'a TimelineState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if area.width == 0 || area.height < 3 {
            return;
        }

        let state = self.state;
        for bar in &state.bars {
            let Some((start, end)) =
                bar_columns(bar.position, state.offset, state.bar_width, area.width)
            else {
                continue;
            };

            let bar_area = Rect::new(area.x + start, area.y, end - start, area.height);
            let border_style = if bar.index == state.current_bar {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let bar_block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", bar.index + 1));
            let inner = bar_block.inner(bar_area);
            bar_block.render(bar_area, buf);

            let lines = vec![
                Line::styled(format!("{} BPM", bar.bpm), Style::default().fg(Color::Magenta)),
                Line::styled(
                    format!("{} notes", bar.note_count),
                    Style::default().fg(Color::Green),
                ),
            ];
            Paragraph::new(lines).render(inner, buf);
        }

        // Playhead at the origin
        let playhead = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        for y in area.top()..area.bottom() {
            buf.set_string(area.x, y, "│", playhead);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::BarUiState;

    #[test]
    fn test_first_bar_at_origin() {
        // Two bars across 80 columns, 40 columns each
        assert_eq!(bar_columns(0.0, 0.0, 1200.0, 80), Some((0, 40)));
        assert_eq!(bar_columns(1200.0, 0.0, 1200.0, 80), Some((40, 80)));
        assert_eq!(bar_columns(2400.0, 0.0, 1200.0, 80), None);
    }

    #[test]
    fn test_scrolled_bars() {
        // Half a bar scrolled: first bar half visible
        assert_eq!(bar_columns(0.0, -600.0, 1200.0, 80), Some((0, 20)));
        assert_eq!(bar_columns(2400.0, -600.0, 1200.0, 80), Some((60, 80)));
        assert_eq!(bar_columns(0.0, -1200.0, 1200.0, 80), None);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(bar_columns(0.0, 0.0, 1200.0, 0), None);
        assert_eq!(bar_columns(0.0, 0.0, 0.0, 80), None);
    }

    #[test]
    fn test_render_draws_visible_bars() {
        let state = TimelineState {
            bars: vec![
                BarUiState { index: 0, bpm: 120, note_count: 3, position: 0.0 },
                BarUiState { index: 1, bpm: 120, note_count: 0, position: 1200.0 },
            ],
            offset: 0.0,
            bar_width: 1200.0,
            current_bar: 0,
        };
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&state).render(area, &mut buf);

        let row: String = (0..40).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("120 BPM"));
        let row: String = (0..40).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("3 notes"));
    }
}
