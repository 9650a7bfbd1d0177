//! Word session state.

use kurbo::Rect;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tokio::task::AbortHandle;

use super::events::CloseReason;
use crate::enrichment::{ImageData, ImageRef, Meaning};
use crate::text::Word;

/// Identifies one session instance. Never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase of an active session. "No session" is the absence of a
/// [`WordSession`], not a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Bubble shown over the word, panel not opened
    Highlighted,
    /// Bubble growing into the detail panel
    Expanding,
    /// Panel open
    Detail,
    /// Panel (or bubble) going away
    Dismissing,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Highlighted => "highlighted",
            SessionPhase::Expanding => "expanding",
            SessionPhase::Detail => "detail",
            SessionPhase::Dismissing => "dismissing",
        }
    }

    /// Whether the detail panel is on screen in this phase.
    pub fn shows_panel(&self) -> bool {
        matches!(self, SessionPhase::Expanding | SessionPhase::Detail)
    }
}

/// Kind of in-flight enrichment request. At most one of each per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Meanings,
    Images,
    ImageData,
}

/// Loading state of one enrichment result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentState {
    /// Never requested
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Response merged (possibly empty)
    Loaded,
    /// Request failed; the list stays empty
    Failed,
}

/// The single active word session.
///
/// Read-only outside the session module; all mutation goes through
/// [`WordSessionController`](super::WordSessionController).
#[derive(Debug)]
pub struct WordSession {
    pub(crate) id: SessionId,
    pub(crate) word: Word,
    pub(crate) phase: SessionPhase,
    pub(crate) meanings: Vec<Meaning>,
    pub(crate) meanings_state: ContentState,
    pub(crate) images: Vec<ImageRef>,
    pub(crate) images_state: ContentState,
    pub(crate) current_image_index: usize,
    pub(crate) current_image: Option<ImageData>,
    pub(crate) pending: HashMap<RequestKind, AbortHandle>,
    /// URL the in-flight image data request is for
    pub(crate) pending_image_url: Option<String>,
    pub(crate) bubble_rect: Rect,
    pub(crate) panel_rect: Option<Rect>,
    /// Scroll offset the panel was placed at
    pub(crate) panel_anchor_y: f64,
    /// Completion time of the current timed phase (auto-dismiss, expand, dismiss)
    pub(crate) deadline: Option<Instant>,
    /// Set when the session enters `Dismissing`
    pub(crate) dismiss_reason: Option<CloseReason>,
}

impl WordSession {
    pub(crate) fn new(id: SessionId, word: Word, bubble_rect: Rect) -> Self {
        Self {
            id,
            word,
            phase: SessionPhase::Highlighted,
            meanings: Vec::new(),
            meanings_state: ContentState::Idle,
            images: Vec::new(),
            images_state: ContentState::Idle,
            current_image_index: 0,
            current_image: None,
            pending: HashMap::new(),
            pending_image_url: None,
            bubble_rect,
            panel_rect: None,
            panel_anchor_y: 0.0,
            deadline: None,
            dismiss_reason: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Meanings in arrival order.
    pub fn meanings(&self) -> &[Meaning] {
        &self.meanings
    }

    pub fn meanings_state(&self) -> ContentState {
        self.meanings_state
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn images_state(&self) -> ContentState {
        self.images_state
    }

    pub fn current_image_index(&self) -> usize {
        self.current_image_index
    }

    /// The image the cursor points at, if any images are loaded.
    pub fn current_image(&self) -> Option<&ImageRef> {
        self.images.get(self.current_image_index)
    }

    /// Downloaded data of the current image, once it has arrived.
    pub fn current_image_data(&self) -> Option<&ImageData> {
        self.current_image.as_ref()
    }

    /// Kinds of enrichment requests currently in flight.
    pub fn pending_requests(&self) -> impl Iterator<Item = RequestKind> + '_ {
        self.pending.keys().copied()
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn bubble_rect(&self) -> Rect {
        self.bubble_rect
    }

    /// Panel rectangle in content coordinates, once the panel exists.
    pub fn panel_rect(&self) -> Option<Rect> {
        self.panel_rect
    }

    pub fn panel_anchor_y(&self) -> f64 {
        self.panel_anchor_y
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Abort every in-flight request. Results that still arrive are stale.
    pub(crate) fn cancel_pending(&mut self) {
        for (kind, handle) in self.pending.drain() {
            tracing::debug!("Session {} cancelling {:?} request", self.id, kind);
            handle.abort();
        }
        self.pending_image_url = None;
    }
}

impl Drop for WordSession {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}
