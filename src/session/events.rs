//! Host notifications.
//!
//! The controller broadcasts a [`SessionEvent`] at each observable
//! transition. Hosts call
//! [`WordSessionController::subscribe`](super::WordSessionController::subscribe)
//! and read from the returned receiver; slow receivers lag rather than block
//! the controller.

use tokio::sync::broadcast;

use super::state::SessionId;
use crate::enrichment::Meaning;
use crate::text::Word;

/// Capacity of the event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The bubble was never opened
    Timeout,
    /// Close button or Escape
    ClosePressed,
    /// The panel was flicked away
    Flicked,
    /// The text scrolled away from the panel
    Scrolled,
    /// Another word was tapped
    Replaced,
    /// The controller was shut down
    Shutdown,
}

/// Notification for the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A session started (bubble shown)
    Opened { session: SessionId, word: Word },
    /// The session's meanings changed; carries all meanings so far
    Updated {
        session: SessionId,
        word: Word,
        meanings: Vec<Meaning>,
    },
    /// The session ended
    Closed {
        session: SessionId,
        word: Word,
        reason: CloseReason,
    },
}

impl SessionEvent {
    pub fn session(&self) -> SessionId {
        match self {
            SessionEvent::Opened { session, .. }
            | SessionEvent::Updated { session, .. }
            | SessionEvent::Closed { session, .. } => *session,
        }
    }

    pub fn word(&self) -> &Word {
        match self {
            SessionEvent::Opened { word, .. }
            | SessionEvent::Updated { word, .. }
            | SessionEvent::Closed { word, .. } => word,
        }
    }
}

pub type SessionEventSender = broadcast::Sender<SessionEvent>;
pub type SessionEventReceiver = broadcast::Receiver<SessionEvent>;

/// Create the broadcast channel for session events.
pub fn create_event_channel() -> (SessionEventSender, SessionEventReceiver) {
    broadcast::channel(EVENT_CHANNEL_CAPACITY)
}
