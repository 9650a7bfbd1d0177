//! Demo application state.
//!
//! Owns the text layout, the session controller and the gesture arbiter,
//! and translates terminal input into gestures. Rendering lives in
//! [`crate::ui`].

mod handlers;

use ratatui::layout::Rect as CellRect;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast::error::TryRecvError;

use crate::config::InteractionConfig;
use crate::gesture::GestureArbiter;
use crate::session::{SessionEvent, SessionEventReceiver, WordSessionController};
use crate::text::{MonospaceLayout, TextLayout};
use crate::traits::EnrichmentService;
use crate::ui::{self, CellMetrics, TerminalPresenter, CELL_SIZE};

/// Text shown when no file is given.
pub const SAMPLE_TEXT: &str = "\
Lorem ipsum dolor sit amet, lamet consectetur adipiscing elit. Tap any word \
to highlight it, then tap the highlight to open its meanings and pictures.

The panel can be dragged around and flicked away. Scrolling the text far \
enough closes it too, as does the close button in its corner or Escape.

Words worth trying: serendipity, ephemeral, quixotic, lantern, harbor, \
meadow, glacier, falcon, velvet, compass.";

pub struct App {
    pub controller: WordSessionController,
    pub arbiter: GestureArbiter,
    /// Shared with the controller, which pushes overlay commands into it
    pub presenter: TerminalPresenter,
    pub layout: MonospaceLayout,
    /// Screen area the text is drawn into
    pub text_area: CellRect,
    pub events: SessionEventReceiver,
    /// Footer status derived from the last session event
    pub status: Option<String>,
    pub should_quit: bool,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(
        text: impl Into<String>,
        config: InteractionConfig,
        enrichment: Arc<dyn EnrichmentService>,
    ) -> Self {
        let presenter = TerminalPresenter::new();
        let controller =
            WordSessionController::new(config, enrichment).with_presenter(presenter.clone());
        let arbiter = GestureArbiter::for_controller(&controller);
        let events = controller.subscribe();

        Self {
            controller,
            arbiter,
            presenter,
            layout: MonospaceLayout::with_cell_size(text, 80, CELL_SIZE),
            text_area: CellRect::default(),
            events,
            status: None,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.controller.shutdown();
        self.should_quit = true;
    }

    /// Cell/content mapping for the current text area and scroll position.
    pub fn metrics(&self) -> CellMetrics {
        CellMetrics::new(self.text_area, self.controller.scroll_offset())
    }

    /// Re-wrap the text for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.text_area = ui::text_area(CellRect::new(0, 0, width, height));
        self.layout.relayout(usize::from(self.text_area.width.max(1)));
        let viewport = self.metrics().viewport();
        self.controller.set_viewport(viewport);

        let word_rect = self
            .controller
            .session()
            .and_then(|session| self.layout.first_rect_for_range(session.word().range()));
        if let Some(rect) = word_rect {
            self.controller.relayout_word(rect);
        }
        self.mark_dirty();
    }

    /// Largest scroll offset that still shows content.
    pub fn max_scroll(&self) -> f64 {
        (self.layout.content_height() - self.metrics().viewport().height).max(0.0)
    }

    /// Fire session deadlines, collect host events and keep animations going.
    pub fn tick(&mut self, now: Instant) {
        if self.controller.tick(now) {
            self.mark_dirty();
        }
        self.drain_events();
        if self.presenter.take_dirty() || self.presenter.snapshot(now).animating {
            self.mark_dirty();
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.status = Some(describe_event(&event));
                    self.mark_dirty();
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} session events", skipped);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

fn describe_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Opened { word, .. } => format!("'{}' highlighted", word.text()),
        SessionEvent::Updated { word, meanings, .. } => {
            format!("'{}': {} meanings", word.text(), meanings.len())
        }
        SessionEvent::Closed { word, reason, .. } => {
            format!("'{}' closed ({:?})", word.text(), reason)
        }
    }
}
