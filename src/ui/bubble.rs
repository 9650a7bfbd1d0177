//! Highlight bubble widget.
//!
//! Drawn over the tapped word, in the word's own cells, until the user
//! taps it or it times out.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use super::theme::{COLOR_ACCENT, COLOR_BUBBLE_BG, COLOR_BUBBLE_HOVER_BG};

/// The bubble over a highlighted word.
pub struct Bubble<'a> {
    word: &'a str,
    hovered: bool,
}

impl<'a> Bubble<'a> {
    pub fn new(word: &'a str) -> Self {
        Self {
            word,
            hovered: false,
        }
    }

    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Clear.render(area, buf);

        let bg = if self.hovered {
            COLOR_BUBBLE_HOVER_BG
        } else {
            COLOR_BUBBLE_BG
        };
        let style = Style::default()
            .bg(bg)
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD);

        buf.set_style(area, style);
        Paragraph::new(Line::from(Span::styled(self.word, style)))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
