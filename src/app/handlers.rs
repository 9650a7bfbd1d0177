//! Input and message handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;

use super::App;
use crate::gesture::GestureOutcome;
use crate::session::{MessageOutcome, SessionMessage};

/// Lines scrolled per wheel notch or arrow key
const SCROLL_STEP_ROWS: f64 = 3.0;

impl App {
    /// Merge an enrichment completion.
    pub fn handle_session_message(&mut self, message: SessionMessage) {
        if self.controller.handle_message(message) != MessageOutcome::Stale {
            self.mark_dirty();
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let metrics = self.metrics();
        let inside = metrics.to_content(mouse.column, mouse.row);
        // A press already under way keeps tracking outside the text area
        let tracked = metrics.to_content_unclipped(mouse.column, mouse.row);
        let outcome = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(point) = inside else {
                    return;
                };
                self.arbiter.pointer_down(&self.controller, point, now);
                GestureOutcome::Pending
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.arbiter.pointer_moved(&mut self.controller, tracked, now)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.arbiter
                    .pointer_up(&mut self.controller, &self.layout, tracked, now)
            }
            MouseEventKind::Moved => {
                let Some(point) = inside else {
                    return;
                };
                if self.arbiter.hover(&self.controller, point) {
                    self.mark_dirty();
                }
                return;
            }
            MouseEventKind::ScrollDown => {
                self.scroll_by(SCROLL_STEP_ROWS, now);
                return;
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-SCROLL_STEP_ROWS, now);
                return;
            }
            _ => return,
        };

        match outcome {
            GestureOutcome::Pending | GestureOutcome::Ignored => {}
            GestureOutcome::NoWord(reason) => {
                tracing::trace!("Click at {}:{} hit no word: {}", mouse.column, mouse.row, reason);
            }
            other => {
                tracing::debug!("Gesture: {:?}", other);
                self.mark_dirty();
            }
        }
    }

    /// Press and release at the same cell.
    pub fn click(&mut self, column: u16, row: u16, now: Instant) {
        for kind in [
            MouseEventKind::Down(MouseButton::Left),
            MouseEventKind::Up(MouseButton::Left),
        ] {
            self.handle_mouse(
                MouseEvent {
                    kind,
                    column,
                    row,
                    modifiers: KeyModifiers::NONE,
                },
                now,
            );
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if self.controller.close_pressed(now) {
                    self.mark_dirty();
                }
            }
            KeyCode::Char('n') => {
                if self.controller.request_next_image() {
                    self.mark_dirty();
                }
            }
            KeyCode::Down => self.scroll_by(1.0, now),
            KeyCode::Up => self.scroll_by(-1.0, now),
            KeyCode::PageDown => self.scroll_by(f64::from(self.text_area.height), now),
            KeyCode::PageUp => self.scroll_by(-f64::from(self.text_area.height), now),
            _ => {}
        }
    }

    /// Scroll the text by `rows` (negative scrolls up).
    pub fn scroll_by(&mut self, rows: f64, now: Instant) {
        let current = self.controller.scroll_offset();
        let target = (current + rows * self.metrics().cell.height).clamp(0.0, self.max_scroll());
        if target == current {
            return;
        }
        self.arbiter.scrolled(&mut self.controller, target, now);
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::super::SAMPLE_TEXT;
    use super::*;
    use crate::adapters::mock::ScriptedEnrichment;
    use crate::config::InteractionConfig;
    use crate::session::SessionPhase;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let mut app = App::new(
            SAMPLE_TEXT,
            InteractionConfig::immediate(),
            Arc::new(ScriptedEnrichment::new()),
        );
        app.resize(60, 12);
        app
    }

    #[tokio::test]
    async fn test_click_word_then_bubble_opens_panel() {
        let mut app = app();
        let now = Instant::now();
        app.click(2, 1, now);
        assert_eq!(app.controller.phase(), Some(SessionPhase::Highlighted));
        app.click(2, 1, now);
        assert_eq!(app.controller.phase(), Some(SessionPhase::Detail));

        app.handle_key(key(KeyCode::Esc), now);
        assert!(app.controller.session().is_none());
    }

    #[tokio::test]
    async fn test_scroll_is_clamped() {
        let mut app = app();
        let now = Instant::now();
        app.scroll_by(-5.0, now);
        assert_eq!(app.controller.scroll_offset(), 0.0);
        app.scroll_by(1000.0, now);
        assert_eq!(app.controller.scroll_offset(), app.max_scroll());
    }

    #[tokio::test]
    async fn test_q_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')), Instant::now());
        assert!(app.should_quit);
    }
}
