//! Terminal presentation adapter.
//!
//! The controller owns one clone of [`TerminalPresenter`] and pushes
//! commands into it; the render loop owns another and reads an
//! [`OverlaySnapshot`] each frame. Animations are interpolated from the
//! command's duration against the wall clock.

use kurbo::{Point, Rect};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::session::SessionId;
use crate::traits::{PresentationAdapter, PresentationCommand};

/// A rectangle moving from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    from: Rect,
    to: Rect,
    start: Instant,
    duration: Duration,
}

impl Motion {
    fn still(rect: Rect, now: Instant) -> Self {
        Self {
            from: rect,
            to: rect,
            start: now,
            duration: Duration::ZERO,
        }
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Ease-out interpolation
    fn at(&self, now: Instant) -> Rect {
        let t = self.progress(now);
        let t = 1.0 - (1.0 - t) * (1.0 - t);
        let p0 = Point::new(self.from.x0, self.from.y0).lerp(Point::new(self.to.x0, self.to.y0), t);
        let p1 = Point::new(self.from.x1, self.from.y1).lerp(Point::new(self.to.x1, self.to.y1), t);
        Rect::from_points(p0, p1)
    }

    fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }
}

/// What the overlays look like right now.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlaySnapshot {
    pub session: Option<SessionId>,
    pub bubble: Option<Rect>,
    pub panel: Option<Rect>,
    /// An animation is in progress; keep redrawing
    pub animating: bool,
}

#[derive(Debug, Default)]
struct OverlayState {
    session: Option<SessionId>,
    bubble: Option<Rect>,
    panel: Option<Motion>,
    dirty: bool,
}

impl OverlayState {
    fn apply(&mut self, command: PresentationCommand, now: Instant) {
        if let PresentationCommand::Clear { session } = command {
            // a replaced session may be cleared after its successor appeared
            if self.session == Some(session) {
                *self = OverlayState::default();
            }
            self.dirty = true;
            return;
        }

        self.session = Some(command.session());
        self.dirty = true;
        match command {
            PresentationCommand::ShowBubble { rect, .. } => {
                self.bubble = Some(rect);
                self.panel = None;
            }
            PresentationCommand::ExpandPanel {
                from, to, duration, ..
            } => {
                self.bubble = None;
                self.panel = Some(Motion {
                    from,
                    to,
                    start: now,
                    duration,
                });
            }
            PresentationCommand::ShowPanel { rect, .. }
            | PresentationCommand::MovePanel { rect, .. } => {
                self.panel = Some(Motion::still(rect, now));
            }
            PresentationCommand::SettlePanel { to, duration, .. }
            | PresentationCommand::Dismiss { to, duration, .. } => {
                if let Some(current) = self.panel.map(|motion| motion.at(now)) {
                    self.panel = Some(Motion {
                        from: current,
                        to,
                        start: now,
                        duration,
                    });
                }
            }
            PresentationCommand::RefreshPanel { .. } | PresentationCommand::Clear { .. } => {}
        }
    }

    fn snapshot(&self, now: Instant) -> OverlaySnapshot {
        OverlaySnapshot {
            session: self.session,
            bubble: self.bubble,
            panel: self.panel.map(|motion| motion.at(now)),
            animating: self.panel.is_some_and(|motion| motion.is_running(now)),
        }
    }
}

/// Presentation adapter for the ratatui demo.
///
/// Clones share the same overlay state.
#[derive(Debug, Clone, Default)]
pub struct TerminalPresenter {
    state: Arc<Mutex<OverlayState>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overlay geometry at `now`.
    pub fn snapshot(&self, now: Instant) -> OverlaySnapshot {
        self.lock().snapshot(now)
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&self) -> bool {
        std::mem::take(&mut self.lock().dirty)
    }
}

impl PresentationAdapter for TerminalPresenter {
    fn present(&mut self, command: PresentationCommand) {
        tracing::trace!("Presenting {:?}", command);
        self.lock().apply(command, Instant::now());
    }
}
