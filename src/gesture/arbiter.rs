//! Routes pointer and scroll input to session transitions.
//!
//! Taps are resolved against the overlays first (bubble on top, then the
//! panel's close button, image area and body) and only fall through to the
//! text when no overlay was hit:
//!
//! | Phase | Tap on text |
//! |-------|-------------|
//! | none | locate word, highlight it |
//! | highlighted / dismissing | locate word, replace the session |
//! | expanding / detail | ignored |
//!
//! A press that starts on an open panel and moves past the tap slop drags
//! the panel; its release velocity decides between flick-dismiss and
//! settling.

use kurbo::Point;
use std::time::Instant;

use super::hit_area::{HitAreaRegistry, HitTarget};
use super::pointer::{PointerGesture, PointerTracker};
use crate::session::{PanelRelease, SessionPhase, WordSessionController};
use crate::text::{ResolutionFailure, TextLayout, Word, WordLocator};

/// What an input event did.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Nothing recognised yet (press in progress, small movement)
    Pending,
    /// A new session was opened for the word
    Highlighted(Word),
    /// The previous session was torn down and a new one opened
    Replaced(Word),
    /// The bubble started expanding into the panel
    BubbleOpened,
    /// The close button was pressed
    PanelClosed,
    /// The image area was tapped
    NextImage,
    /// The tap landed on the panel body and was consumed
    Absorbed,
    /// The tap was on text but not on a word
    NoWord(ResolutionFailure),
    /// The panel followed the pointer
    PanelMoved,
    /// A panel drag ended
    PanelReleased(PanelRelease),
    /// Scrolling moved the text too far from the panel
    ScrollDismissed,
    /// The input had no effect in the current phase
    Ignored,
}

/// Gesture arbitration between the text surface and the session overlays.
#[derive(Debug)]
pub struct GestureArbiter {
    tracker: PointerTracker,
    locator: WordLocator,
    hit_areas: HitAreaRegistry,
    /// The current press started on an open panel
    dragging_panel: bool,
}

impl GestureArbiter {
    pub fn new(tap_slop: f64) -> Self {
        Self {
            tracker: PointerTracker::new(tap_slop),
            locator: WordLocator::new(),
            hit_areas: HitAreaRegistry::new(),
            dragging_panel: false,
        }
    }

    /// Arbiter using the controller's configured tap slop.
    pub fn for_controller(controller: &WordSessionController) -> Self {
        Self::new(controller.config().tap_slop)
    }

    /// Overlay under `point` for the controller's current session.
    pub fn hit_test(&mut self, controller: &WordSessionController, point: Point) -> Option<HitTarget> {
        self.hit_areas.rebuild(controller.session());
        self.hit_areas.hit_test(point)
    }

    /// Pointer pressed at `point` (content coordinates).
    pub fn pointer_down(&mut self, controller: &WordSessionController, point: Point, now: Instant) {
        let on_panel = matches!(
            self.hit_test(controller, point),
            Some(HitTarget::PanelBody | HitTarget::Image | HitTarget::CloseButton)
        );
        self.dragging_panel = on_panel && controller.phase() == Some(SessionPhase::Detail);
        self.tracker.press(point, now);
    }

    /// Pointer moved while pressed.
    pub fn pointer_moved(
        &mut self,
        controller: &mut WordSessionController,
        point: Point,
        now: Instant,
    ) -> GestureOutcome {
        let Some(gesture) = self.tracker.moved(point, now) else {
            return GestureOutcome::Pending;
        };
        if !self.dragging_panel {
            return GestureOutcome::Ignored;
        }

        let delta = match gesture {
            PointerGesture::PanBegan { origin, point } => point - origin,
            PointerGesture::PanChanged { delta, .. } => delta,
            _ => return GestureOutcome::Ignored,
        };
        if controller.pan_moved(delta) {
            GestureOutcome::PanelMoved
        } else {
            GestureOutcome::Ignored
        }
    }

    /// Pointer released at `point`.
    pub fn pointer_up<L: TextLayout + ?Sized>(
        &mut self,
        controller: &mut WordSessionController,
        layout: &L,
        point: Point,
        now: Instant,
    ) -> GestureOutcome {
        let dragging_panel = std::mem::take(&mut self.dragging_panel);
        match self.tracker.release(point, now) {
            Some(PointerGesture::Tap { point }) => self.tap(controller, layout, point, now),
            Some(PointerGesture::PanEnded {
                delta, velocity, ..
            }) if dragging_panel => {
                controller.pan_moved(delta);
                match controller.pan_released(velocity, now) {
                    Some(release) => GestureOutcome::PanelReleased(release),
                    None => GestureOutcome::Ignored,
                }
            }
            _ => GestureOutcome::Ignored,
        }
    }

    /// Dispatch a tap at `point`.
    pub fn tap<L: TextLayout + ?Sized>(
        &mut self,
        controller: &mut WordSessionController,
        layout: &L,
        point: Point,
        now: Instant,
    ) -> GestureOutcome {
        if let Some(target) = self.hit_test(controller, point) {
            tracing::debug!("Tap on {:?}", target);
            let handled = match target {
                HitTarget::Bubble => {
                    return if controller.tap_bubble(now) {
                        GestureOutcome::BubbleOpened
                    } else {
                        GestureOutcome::Ignored
                    };
                }
                HitTarget::CloseButton => controller
                    .close_pressed(now)
                    .then_some(GestureOutcome::PanelClosed),
                HitTarget::Image => controller
                    .request_next_image()
                    .then_some(GestureOutcome::NextImage),
                HitTarget::PanelBody => None,
            };
            return handled.unwrap_or(GestureOutcome::Absorbed);
        }

        match controller.phase() {
            Some(SessionPhase::Expanding | SessionPhase::Detail) => GestureOutcome::Ignored,
            phase => match self.locator.resolve(point, layout) {
                Ok(word) => {
                    if phase.is_none() {
                        if controller.tap_word(word.clone(), now) {
                            GestureOutcome::Highlighted(word)
                        } else {
                            GestureOutcome::Ignored
                        }
                    } else {
                        controller.start_new_word(word.clone(), now);
                        GestureOutcome::Replaced(word)
                    }
                }
                Err(reason) => {
                    tracing::trace!("Tap at ({:.1}, {:.1}) missed: {}", point.x, point.y, reason);
                    GestureOutcome::NoWord(reason)
                }
            },
        }
    }

    /// The text surface scrolled to `offset_y`.
    pub fn scrolled(
        &mut self,
        controller: &mut WordSessionController,
        offset_y: f64,
        now: Instant,
    ) -> GestureOutcome {
        if controller.scrolled(offset_y, now) {
            self.tracker.reset();
            self.dragging_panel = false;
            GestureOutcome::ScrollDismissed
        } else {
            GestureOutcome::Ignored
        }
    }

    /// Track the pointer for hover feedback; true if the hovered overlay changed.
    pub fn hover(&mut self, controller: &WordSessionController, point: Point) -> bool {
        let before = self.hit_areas.hovered().map(|area| area.target);
        self.hit_areas.rebuild(controller.session());
        self.hit_areas.update_hover(point);
        let after = self.hit_areas.hovered().map(|area| area.target);
        before != after
    }

    /// The overlay last hovered.
    pub fn hovered(&self) -> Option<HitTarget> {
        self.hit_areas.hovered().map(|area| area.target)
    }

    pub fn is_dragging_panel(&self) -> bool {
        self.dragging_panel && self.tracker.is_panning()
    }
}
