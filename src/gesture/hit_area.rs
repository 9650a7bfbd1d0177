//! Hit areas for the session's interactive overlays.
//!
//! The bubble and the panel are registered from the current session before a
//! tap is dispatched; anything that misses every area falls through to the
//! text underneath.

use kurbo::{Point, Rect};

use crate::session::{PanelLayout, SessionPhase, WordSession};

/// What a hit area does when tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The highlight bubble (opens the panel)
    Bubble,
    /// Panel close button
    CloseButton,
    /// Panel image area (shows the next image)
    Image,
    /// Anywhere else on the panel (absorbs the tap)
    PanelBody,
}

/// A tappable region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitArea {
    pub rect: Rect,
    pub target: HitTarget,
}

impl HitArea {
    pub fn new(rect: Rect, target: HitTarget) -> Self {
        Self { rect, target }
    }

    /// Check if a point is within this hit area.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }
}

/// Registry of overlay hit areas.
///
/// Areas registered later take priority over earlier ones (z-order: later =
/// on top).
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    hovered: Option<usize>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for whatever the session currently shows.
    pub fn for_session(session: Option<&WordSession>) -> Self {
        let mut registry = Self::new();
        registry.rebuild(session);
        registry
    }

    /// Replace all areas with those of `session`.
    ///
    /// The panel is interactive while it is expanding or open; the bubble
    /// only while it is highlighted, and it sits on top. A hovered target
    /// that is still registered stays hovered.
    pub fn rebuild(&mut self, session: Option<&WordSession>) {
        let hovered = self.hovered().map(|area| area.target);
        self.areas.clear();
        if let Some(session) = session {
            self.register_session(session);
        }
        self.hovered =
            hovered.and_then(|target| self.areas.iter().rposition(|area| area.target == target));
    }

    fn register_session(&mut self, session: &WordSession) {
        match session.phase() {
            SessionPhase::Highlighted => {
                self.register(session.bubble_rect(), HitTarget::Bubble);
            }
            SessionPhase::Expanding | SessionPhase::Detail => {
                if let Some(panel) = session.panel_rect() {
                    let layout = PanelLayout::new(panel);
                    self.register(layout.panel, HitTarget::PanelBody);
                    self.register(layout.image_area, HitTarget::Image);
                    self.register(layout.close_button, HitTarget::CloseButton);
                }
            }
            SessionPhase::Dismissing => {}
        }
    }

    /// Clear all registered areas and reset hover state.
    pub fn clear(&mut self) {
        self.areas.clear();
        self.hovered = None;
    }

    pub fn register(&mut self, rect: Rect, target: HitTarget) {
        self.areas.push(HitArea::new(rect, target));
    }

    /// Topmost target containing the point.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(point))
            .map(|area| area.target)
    }

    /// Update the hover state based on pointer position.
    ///
    /// Returns true if the hover state changed (requiring a redraw).
    pub fn update_hover(&mut self, point: Point) -> bool {
        let hovered = self.areas.iter().rposition(|area| area.contains(point));
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// The area under the pointer, if any.
    pub fn hovered(&self) -> Option<&HitArea> {
        self.hovered.and_then(|index| self.areas.get(index))
    }

    pub fn areas(&self) -> &[HitArea] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_area_contains() {
        let area = HitArea::new(Rect::new(10.0, 5.0, 30.0, 8.0), HitTarget::Bubble);
        assert!(area.contains(Point::new(10.0, 5.0)));
        assert!(area.contains(Point::new(29.9, 7.9)));
        assert!(!area.contains(Point::new(30.0, 5.0)));
        assert!(!area.contains(Point::new(9.9, 6.0)));
    }

    #[test]
    fn test_hit_test_overlapping_areas() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0.0, 0.0, 100.0, 100.0), HitTarget::PanelBody);
        registry.register(Rect::new(80.0, 0.0, 100.0, 20.0), HitTarget::CloseButton);

        assert_eq!(
            registry.hit_test(Point::new(90.0, 10.0)),
            Some(HitTarget::CloseButton)
        );
        assert_eq!(
            registry.hit_test(Point::new(50.0, 50.0)),
            Some(HitTarget::PanelBody)
        );
        assert_eq!(registry.hit_test(Point::new(150.0, 50.0)), None);
    }

    #[test]
    fn test_update_hover_returns_changed() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0.0, 0.0, 10.0, 10.0), HitTarget::Bubble);

        assert!(registry.update_hover(Point::new(5.0, 5.0)));
        assert!(!registry.update_hover(Point::new(6.0, 6.0)));
        assert_eq!(registry.hovered().unwrap().target, HitTarget::Bubble);
        assert!(registry.update_hover(Point::new(50.0, 50.0)));
        assert!(registry.hovered().is_none());
    }

    #[test]
    fn test_registry_clear() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0.0, 0.0, 10.0, 10.0), HitTarget::Bubble);
        registry.update_hover(Point::new(1.0, 1.0));
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.hovered().is_none());
    }

    #[test]
    fn test_rebuild_keeps_hovered_target() {
        use crate::session::SessionId;
        use crate::text::{TextRange, Word};

        let word = Word::new("lamet", TextRange::new(0, 5), Rect::new(0.0, 0.0, 50.0, 20.0));
        let session = WordSession::new(SessionId::new(1), word, Rect::new(0.0, 0.0, 55.0, 20.0));

        let mut registry = HitAreaRegistry::for_session(Some(&session));
        assert!(registry.update_hover(Point::new(10.0, 10.0)));
        registry.rebuild(Some(&session));
        assert_eq!(registry.hovered().unwrap().target, HitTarget::Bubble);

        // gone with its area
        registry.rebuild(None);
        assert!(registry.hovered().is_none());
    }

    #[test]
    fn test_no_session_no_areas() {
        assert!(HitAreaRegistry::for_session(None).is_empty());
    }
}
