//! The word session state machine.
//!
//! ```text
//! None --tap_word--> Highlighted --tap_bubble--> Expanding --(expand)--> Detail
//!                        |                           |                    |
//!                     timeout                  close_pressed    close / flick / scroll
//!                        v                           v                    v
//!                       None <----(dismiss)---- Dismissing <--------------+
//! ```
//!
//! `start_new_word` tears down whatever session exists (through
//! `Dismissing`, without waiting for the animation) before opening the next
//! one, so at most one session is ever alive.
//!
//! Time only moves when the caller says so: every timed transition takes an
//! explicit `Instant`, and deadlines are checked by [`tick`]. Enrichment runs
//! on spawned tokio tasks whose results come back as [`SessionMessage`]s and
//! are merged by [`handle_message`].
//!
//! [`tick`]: WordSessionController::tick
//! [`handle_message`]: WordSessionController::handle_message

use kurbo::{Point, Rect, Size, Vec2};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use super::events::{create_event_channel, CloseReason, SessionEvent, SessionEventReceiver, SessionEventSender};
use super::messages::{EnrichmentPayload, MessageOutcome, SessionMessage};
use super::panel::{self, PanelRelease};
use super::state::{ContentState, RequestKind, SessionId, SessionPhase, WordSession};
use crate::config::InteractionConfig;
use crate::error::EnrichmentError;
use crate::text::Word;
use crate::traits::{EnrichmentService, NullPresenter, PresentationAdapter, PresentationCommand};

/// Owns the single active [`WordSession`] and drives all of its transitions.
pub struct WordSessionController {
    config: InteractionConfig,
    enrichment: Arc<dyn EnrichmentService>,
    presenter: Box<dyn PresentationAdapter>,
    session: Option<WordSession>,
    next_id: u64,
    viewport: Size,
    scroll_offset: f64,
    message_tx: mpsc::UnboundedSender<SessionMessage>,
    message_rx: Option<mpsc::UnboundedReceiver<SessionMessage>>,
    events: SessionEventSender,
}

impl std::fmt::Debug for WordSessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordSessionController")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}

impl WordSessionController {
    /// Create a controller with no presenter attached.
    pub fn new(config: InteractionConfig, enrichment: Arc<dyn EnrichmentService>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (events, _) = create_event_channel();
        Self {
            config,
            enrichment,
            presenter: Box::new(NullPresenter),
            session: None,
            next_id: 1,
            viewport: Size::ZERO,
            scroll_offset: 0.0,
            message_tx,
            message_rx: Some(message_rx),
            events,
        }
    }

    /// Attach the rendering surface.
    pub fn with_presenter(mut self, presenter: impl PresentationAdapter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&WordSession> {
        self.session.as_ref()
    }

    /// Phase of the active session; `None` when there is no session.
    pub fn phase(&self) -> Option<SessionPhase> {
        self.session.as_ref().map(|s| s.phase)
    }

    /// Subscribe to host notifications.
    pub fn subscribe(&self) -> SessionEventReceiver {
        self.events.subscribe()
    }

    /// Sender for enrichment completions (normally only used by spawned tasks).
    pub fn message_sender(&self) -> mpsc::UnboundedSender<SessionMessage> {
        self.message_tx.clone()
    }

    /// Take the completion receiver so an event loop can `select!` on it.
    pub fn take_message_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<SessionMessage>> {
        self.message_rx.take()
    }

    /// Wait for the next enrichment completion. Returns `None` if the
    /// receiver has been taken.
    pub async fn next_message(&mut self) -> Option<SessionMessage> {
        match self.message_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Size of the visible text surface.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Visible part of the text surface, in content coordinates.
    pub fn viewport(&self) -> Rect {
        Rect::from_origin_size(Point::new(0.0, self.scroll_offset), self.viewport)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// `None -> Highlighted`. Returns false if a session already exists.
    pub fn tap_word(&mut self, word: Word, now: Instant) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.open(word, now);
        true
    }

    /// Tear down any current session, then open one for `word`.
    pub fn start_new_word(&mut self, word: Word, now: Instant) {
        if self.session.is_some() {
            self.begin_dismiss(CloseReason::Replaced, now);
            // A session already on its way out keeps the reason it was closed for.
            let reason = self
                .session
                .as_ref()
                .and_then(|session| session.dismiss_reason)
                .unwrap_or(CloseReason::Replaced);
            self.finish(reason);
        }
        self.open(word, now);
    }

    /// `Highlighted -> Expanding`: cancel auto-dismiss and start enrichment.
    pub fn tap_bubble(&mut self, now: Instant) -> bool {
        let home = panel::panel_home(self.viewport(), self.config.panel_inset);
        let scroll_offset = self.scroll_offset;
        let expand = self.config.expand_duration;

        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.phase != SessionPhase::Highlighted {
            return false;
        }

        set_phase(session, SessionPhase::Expanding);
        session.deadline = Some(now + expand);
        session.panel_rect = Some(home);
        session.panel_anchor_y = scroll_offset;
        let command = PresentationCommand::ExpandPanel {
            session: session.id,
            from: session.bubble_rect,
            to: home,
            duration: expand,
        };
        self.presenter.present(command);

        self.request_meanings();
        self.request_images();

        if expand.is_zero() {
            self.complete_expand();
        }
        true
    }

    /// `Expanding | Detail -> Dismissing`.
    pub fn close_pressed(&mut self, now: Instant) -> bool {
        match self.phase() {
            Some(SessionPhase::Expanding | SessionPhase::Detail) => {
                self.begin_dismiss(CloseReason::ClosePressed, now);
                true
            }
            _ => false,
        }
    }

    /// Advance the image cursor, fetching the image list first if it is empty.
    pub fn request_next_image(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.phase != SessionPhase::Detail {
            return false;
        }

        if session.images.is_empty() {
            self.request_images();
            return true;
        }

        session.current_image_index = (session.current_image_index + 1) % session.images.len();
        session.current_image = None;
        if let Some(handle) = session.pending.remove(&RequestKind::ImageData) {
            handle.abort();
            session.pending_image_url = None;
        }
        tracing::debug!(
            "Session {} showing image {}/{}",
            session.id,
            session.current_image_index + 1,
            session.images.len()
        );
        let id = session.id;
        self.presenter
            .present(PresentationCommand::RefreshPanel { session: id });
        self.request_current_image_data();
        true
    }

    /// Move the open panel with the pointer.
    pub fn pan_moved(&mut self, delta: Vec2) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let (SessionPhase::Detail, Some(rect)) = (session.phase, session.panel_rect) else {
            return false;
        };
        let rect = rect + delta;
        session.panel_rect = Some(rect);
        let command = PresentationCommand::MovePanel {
            session: session.id,
            rect,
        };
        self.presenter.present(command);
        true
    }

    /// End a panel pan. Fast releases dismiss the session; slow ones settle
    /// the panel according to the release policy.
    pub fn pan_released(&mut self, velocity: Vec2, now: Instant) -> Option<PanelRelease> {
        let home = panel::panel_home(self.viewport(), self.config.panel_inset);
        let session = self.session.as_mut()?;
        let (SessionPhase::Detail, Some(rect)) = (session.phase, session.panel_rect) else {
            return None;
        };

        let outcome = panel::release(
            rect,
            home,
            velocity,
            self.config.flick_velocity,
            self.config.release_policy,
        );
        match outcome {
            PanelRelease::Dismiss => {
                tracing::debug!(
                    "Session {} flicked at {:.0} units/s",
                    session.id,
                    velocity.hypot()
                );
                self.begin_dismiss(CloseReason::Flicked, now);
            }
            PanelRelease::Settle { target, duration } => {
                session.panel_rect = Some(target);
                let command = PresentationCommand::SettlePanel {
                    session: session.id,
                    to: target,
                    duration,
                };
                self.presenter.present(command);
            }
        }
        Some(outcome)
    }

    /// The text surface scrolled to `offset_y`. Returns true if this forced
    /// the open panel to dismiss.
    pub fn scrolled(&mut self, offset_y: f64, now: Instant) -> bool {
        self.scroll_offset = offset_y;
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.phase != SessionPhase::Detail {
            return false;
        }
        let distance = (session.panel_anchor_y - offset_y).abs();
        if distance > self.config.scroll_dismiss_distance {
            tracing::debug!(
                "Session {} scrolled {:.0} units from its panel",
                session.id,
                distance
            );
            self.begin_dismiss(CloseReason::Scrolled, now);
            true
        } else {
            false
        }
    }

    /// The text was laid out again and the session's word now sits at
    /// `word_rect`. Moves the bubble over it and re-centres an open panel.
    pub fn relayout_word(&mut self, word_rect: Rect) -> bool {
        let home = panel::panel_home(self.viewport(), self.config.panel_inset);
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let word = Word::new(session.word.text(), session.word.range(), word_rect);
        session.bubble_rect = panel::bubble_rect(word_rect);
        session.word = word;
        let command = match session.phase {
            SessionPhase::Highlighted => Some(PresentationCommand::ShowBubble {
                session: session.id,
                word: session.word.clone(),
                rect: session.bubble_rect,
            }),
            SessionPhase::Expanding => {
                session.panel_rect = Some(home);
                None
            }
            SessionPhase::Detail => {
                session.panel_rect = Some(home);
                Some(PresentationCommand::ShowPanel {
                    session: session.id,
                    rect: home,
                })
            }
            SessionPhase::Dismissing => None,
        };
        tracing::debug!("Session {} relaid out at {:?}", session.id, word_rect);
        if let Some(command) = command {
            self.presenter.present(command);
        }
        true
    }

    /// Fire any deadline that has passed. Returns true if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        match session.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }

        match session.phase {
            SessionPhase::Highlighted => {
                tracing::debug!("Session {} bubble timed out", session.id);
                self.finish(CloseReason::Timeout);
            }
            SessionPhase::Expanding => self.complete_expand(),
            SessionPhase::Dismissing => {
                let reason = session.dismiss_reason.unwrap_or(CloseReason::ClosePressed);
                self.finish(reason);
            }
            SessionPhase::Detail => return false,
        }
        true
    }

    /// End any session immediately.
    pub fn shutdown(&mut self) {
        if self.session.is_some() {
            self.finish(CloseReason::Shutdown);
        }
    }

    // ------------------------------------------------------------------
    // Enrichment results
    // ------------------------------------------------------------------

    /// Merge an enrichment completion into the session that requested it.
    ///
    /// Completions for a session that has ended, or for a request that was
    /// cancelled, are discarded.
    pub fn handle_message(&mut self, message: SessionMessage) -> MessageOutcome {
        let kind = message.payload.kind();
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("Discarding {:?} result for ended session {}", kind, message.session);
            return MessageOutcome::Stale;
        };
        let is_active = session.id == message.session;
        let awaited = is_active
            && session.pending.contains_key(&kind)
            && match &message.payload {
                EnrichmentPayload::ImageData { url, .. } => {
                    session.pending_image_url.as_deref() == Some(url.as_str())
                }
                _ => true,
            };
        if !awaited {
            tracing::debug!(
                "Discarding stale {:?} result for session {} (active {})",
                kind,
                message.session,
                session.id
            );
            if is_active && kind == RequestKind::ImageData {
                self.request_current_image_data();
            }
            return MessageOutcome::Stale;
        }
        session.pending.remove(&kind);
        let id = session.id;

        let outcome = match message.payload {
            EnrichmentPayload::Meanings(Ok(meanings)) => {
                session.meanings_state = ContentState::Loaded;
                for meaning in meanings {
                    session.meanings.push(meaning);
                    let _ = self.events.send(SessionEvent::Updated {
                        session: id,
                        word: session.word.clone(),
                        meanings: session.meanings.clone(),
                    });
                }
                tracing::info!(
                    "Session {} '{}' has {} meanings",
                    id,
                    session.word.text(),
                    session.meanings.len()
                );
                MessageOutcome::Applied
            }
            EnrichmentPayload::Meanings(Err(err)) => {
                session.meanings_state = ContentState::Failed;
                log_failure(id, "meanings", &err);
                MessageOutcome::Failed(err.kind())
            }
            EnrichmentPayload::Images(Ok(images)) => {
                session.images_state = ContentState::Loaded;
                session.images = images;
                session.current_image_index = 0;
                session.current_image = None;
                tracing::debug!("Session {} received {} images", id, session.images.len());
                MessageOutcome::Applied
            }
            EnrichmentPayload::Images(Err(err)) => {
                session.images_state = ContentState::Failed;
                log_failure(id, "images", &err);
                MessageOutcome::Failed(err.kind())
            }
            EnrichmentPayload::ImageData { result, .. } => {
                session.pending_image_url = None;
                match result {
                    Ok(data) => {
                        tracing::debug!(
                            "Session {} image {}x{} ({} bytes)",
                            id,
                            data.width,
                            data.height,
                            data.len()
                        );
                        session.current_image = Some(data);
                        MessageOutcome::Applied
                    }
                    Err(err) => {
                        log_failure(id, "image data", &err);
                        MessageOutcome::Failed(err.kind())
                    }
                }
            }
        };

        self.presenter
            .present(PresentationCommand::RefreshPanel { session: id });
        if kind == RequestKind::Images && outcome == MessageOutcome::Applied {
            self.request_current_image_data();
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn open(&mut self, word: Word, now: Instant) {
        let id = SessionId::new(self.next_id);
        self.next_id += 1;

        let bubble = panel::bubble_rect(word.bounding_rect());
        let mut session = WordSession::new(id, word.clone(), bubble);
        session.deadline = Some(now + self.config.auto_dismiss);
        self.session = Some(session);

        tracing::info!("Session {} opened for '{}'", id, word.text());
        self.presenter.present(PresentationCommand::ShowBubble {
            session: id,
            word: word.clone(),
            rect: bubble,
        });
        let _ = self.events.send(SessionEvent::Opened { session: id, word });
    }

    fn complete_expand(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase != SessionPhase::Expanding {
            return;
        }
        set_phase(session, SessionPhase::Detail);
        session.deadline = None;
        let rect = session.panel_rect.unwrap_or(session.bubble_rect);
        let command = PresentationCommand::ShowPanel {
            session: session.id,
            rect,
        };
        self.presenter.present(command);
    }

    /// Enter `Dismissing`: cancel every request and start the exit animation.
    fn begin_dismiss(&mut self, reason: CloseReason, now: Instant) {
        let dismiss = self.config.dismiss_duration;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase == SessionPhase::Dismissing {
            return;
        }

        session.cancel_pending();
        set_phase(session, SessionPhase::Dismissing);
        session.dismiss_reason = Some(reason);
        session.deadline = Some(now + dismiss);
        let command = PresentationCommand::Dismiss {
            session: session.id,
            to: session.bubble_rect,
            duration: dismiss,
        };
        self.presenter.present(command);

        if dismiss.is_zero() {
            self.finish(reason);
        }
    }

    /// Remove the session (`-> None`) and notify the host.
    fn finish(&mut self, reason: CloseReason) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.cancel_pending();
        let id = session.id;
        let word = session.word.clone();
        drop(session);

        tracing::info!("Session {} closed for '{}' ({:?})", id, word.text(), reason);
        self.presenter.present(PresentationCommand::Clear { session: id });
        let _ = self.events.send(SessionEvent::Closed {
            session: id,
            word,
            reason,
        });
    }

    fn request_meanings(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.meanings_state = ContentState::Loading;
        let word = session.word.text().to_string();
        let service = Arc::clone(&self.enrichment);
        self.dispatch(RequestKind::Meanings, async move {
            EnrichmentPayload::Meanings(service.fetch_meanings(&word).await)
        });
    }

    fn request_images(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.images_state = ContentState::Loading;
        let word = session.word.text().to_string();
        let service = Arc::clone(&self.enrichment);
        self.dispatch(RequestKind::Images, async move {
            EnrichmentPayload::Images(service.fetch_images(&word).await)
        });
    }

    /// Fetch data for the image under the cursor unless it is already
    /// loaded or on its way.
    fn request_current_image_data(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase == SessionPhase::Dismissing || session.current_image.is_some() {
            return;
        }
        let Some(url) = session
            .current_image()
            .and_then(|image| image.display_url())
            .map(str::to_string)
        else {
            return;
        };
        if session.pending_image_url.as_deref() == Some(url.as_str()) {
            return;
        }
        if let Some(handle) = session.pending.remove(&RequestKind::ImageData) {
            handle.abort();
        }
        session.pending_image_url = Some(url.clone());

        let service = Arc::clone(&self.enrichment);
        self.dispatch(RequestKind::ImageData, async move {
            let result = service.fetch_image_data(&url).await;
            EnrichmentPayload::ImageData { url, result }
        });
    }

    /// Spawn `request` for the active session, at most one per kind.
    fn dispatch<F>(&mut self, kind: RequestKind, request: F)
    where
        F: Future<Output = EnrichmentPayload> + Send + 'static,
    {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.pending.contains_key(&kind) {
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!("Cannot start {:?} request without a runtime: {}", kind, err);
                return;
            }
        };

        let id = session.id;
        let tx = self.message_tx.clone();
        let task = runtime.spawn(async move {
            let payload = request.await;
            if tx.send(SessionMessage::new(id, payload)).is_err() {
                tracing::trace!("Controller gone before {:?} result for session {}", kind, id);
            }
        });
        session.pending.insert(kind, task.abort_handle());
    }
}

fn set_phase(session: &mut WordSession, phase: SessionPhase) {
    tracing::debug!(
        "Session {} {} -> {}",
        session.id,
        session.phase.as_str(),
        phase.as_str()
    );
    session.phase = phase;
}

fn log_failure(id: SessionId, what: &str, err: &EnrichmentError) {
    tracing::warn!(
        "Session {} {} lookup failed [{}] ({}): {}",
        id,
        what,
        err.error_code(),
        err.kind().as_str(),
        err
    );
}
