//! Presentation adapter trait.
//!
//! The rendering surface receives one-way instructions from the session
//! controller. It may read the current session for drawing, but the
//! controller remains the only owner of session state.

use kurbo::Rect;
use std::time::Duration;

use crate::session::{SessionId, SessionPhase};
use crate::text::Word;

/// A re-render instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationCommand {
    /// Show the highlight bubble over a word
    ShowBubble {
        session: SessionId,
        word: Word,
        rect: Rect,
    },
    /// Grow the bubble into the detail panel
    ExpandPanel {
        session: SessionId,
        from: Rect,
        to: Rect,
        duration: Duration,
    },
    /// The panel finished expanding and is interactive
    ShowPanel { session: SessionId, rect: Rect },
    /// Meanings, images or the current image changed
    RefreshPanel { session: SessionId },
    /// Move the panel without animation (pan tracking)
    MovePanel { session: SessionId, rect: Rect },
    /// Animate the panel to a resting place after a pan
    SettlePanel {
        session: SessionId,
        to: Rect,
        duration: Duration,
    },
    /// Shrink the panel (or bubble) back toward the word
    Dismiss {
        session: SessionId,
        to: Rect,
        duration: Duration,
    },
    /// Remove everything belonging to the session
    Clear { session: SessionId },
}

impl PresentationCommand {
    /// Session the command belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            PresentationCommand::ShowBubble { session, .. }
            | PresentationCommand::ExpandPanel { session, .. }
            | PresentationCommand::ShowPanel { session, .. }
            | PresentationCommand::RefreshPanel { session }
            | PresentationCommand::MovePanel { session, .. }
            | PresentationCommand::SettlePanel { session, .. }
            | PresentationCommand::Dismiss { session, .. }
            | PresentationCommand::Clear { session } => *session,
        }
    }

    /// Phase the session is in once this command has been issued, if the
    /// command implies one.
    pub fn implied_phase(&self) -> Option<SessionPhase> {
        match self {
            PresentationCommand::ShowBubble { .. } => Some(SessionPhase::Highlighted),
            PresentationCommand::ExpandPanel { .. } => Some(SessionPhase::Expanding),
            PresentationCommand::ShowPanel { .. } => Some(SessionPhase::Detail),
            PresentationCommand::Dismiss { .. } => Some(SessionPhase::Dismissing),
            _ => None,
        }
    }
}

/// Rendering surface driven by the session controller.
pub trait PresentationAdapter: Send {
    /// Apply a re-render instruction.
    fn present(&mut self, command: PresentationCommand);
}

/// Adapter that ignores every instruction (hosts that render purely from
/// [`WordSessionController::session`](crate::session::WordSessionController::session)).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl PresentationAdapter for NullPresenter {
    fn present(&mut self, command: PresentationCommand) {
        tracing::trace!("Dropping presentation command {:?}", command);
    }
}
