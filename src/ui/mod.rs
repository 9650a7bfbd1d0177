//! Terminal rendering for the demo.
//!
//! - Text surface: the wrapped text, scrolled by the controller's offset
//! - Bubble: over the highlighted word
//! - Panel: the detail panel, animated by [`TerminalPresenter`]
//! - Footer: keybind hints and the last session event

mod bubble;
mod geometry;
mod overlay;
mod panel;
mod theme;

pub use bubble::Bubble;
pub use geometry::{CellMetrics, CELL_SIZE};
pub use overlay::{OverlaySnapshot, TerminalPresenter};
pub use panel::{image_lines, meaning_lines, DetailPanel};
pub use theme::*;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};
use std::time::Instant;

use crate::app::App;
use crate::gesture::HitTarget;
use crate::session::{PanelLayout, SessionPhase};
use crate::text::MonospaceLayout;

/// Area inside the frame border, above the footer row.
pub fn text_area(screen: Rect) -> Rect {
    Rect {
        x: screen.x + 1,
        y: screen.y + 1,
        width: screen.width.saturating_sub(2),
        height: screen.height.saturating_sub(3),
    }
}

/// Render the whole demo.
pub fn render(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    let now = Instant::now();
    let metrics = app.metrics();

    let frame_area = Rect {
        height: screen.height.saturating_sub(1),
        ..screen
    };
    Block::default()
        .title(Span::styled(
            " tappable ",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .render(frame_area, frame.buffer_mut());

    render_text(&app.layout, &metrics, frame.buffer_mut());

    let snapshot = app.presenter.snapshot(now);
    let session = app.controller.session();
    let hovered = app.arbiter.hovered();

    if let (Some(rect), Some(session)) = (snapshot.bubble, session) {
        if let Some(area) = metrics.to_screen(rect) {
            Bubble::new(session.word().text())
                .hovered(hovered == Some(HitTarget::Bubble))
                .render(area, frame.buffer_mut());
        }
    }

    if let (Some(rect), Some(session)) = (snapshot.panel, session) {
        if let Some(area) = metrics.to_screen(rect) {
            let image_area = metrics.to_screen(PanelLayout::new(rect).image_area);
            DetailPanel::new(session)
                .image_area(image_area)
                .hovered(hovered)
                .render(area, frame.buffer_mut());
        }
    }

    let footer = Rect {
        y: screen.bottom().saturating_sub(1),
        height: screen.height.min(1),
        ..screen
    };
    Paragraph::new(footer_line(app)).render(footer, frame.buffer_mut());
}

/// Draw the visible lines of `layout` into the metrics' area.
pub fn render_text(layout: &MonospaceLayout, metrics: &CellMetrics, buf: &mut Buffer) {
    let area = metrics.area;
    let first = metrics.first_visible_row();
    for row in 0..area.height {
        let Some(text) = layout.line_text(first + usize::from(row)) else {
            break;
        };
        buf.set_stringn(
            area.x,
            area.y + row,
            text,
            usize::from(area.width),
            Style::default(),
        );
    }
}

fn footer_line(app: &App) -> Line<'static> {
    let hint = match app.controller.phase() {
        None => "click a word",
        Some(SessionPhase::Highlighted) => "click the highlight to open it",
        Some(SessionPhase::Expanding | SessionPhase::Detail) => {
            "drag or flick the panel · n next image · Esc close"
        }
        Some(SessionPhase::Dismissing) => "",
    };
    let mut spans = vec![Span::styled(
        format!(" {hint} · q quit"),
        Style::default().fg(COLOR_DIM),
    )];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("   {status}"),
            Style::default().fg(COLOR_LOADING),
        ));
    }
    Line::from(spans)
}
