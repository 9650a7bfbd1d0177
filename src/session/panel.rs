//! Bubble and panel geometry, and what happens when a panel pan ends.

use kurbo::{Point, Rect, Size, Vec2};
use std::time::Duration;

/// The bubble is this much wider than the word it highlights.
pub const BUBBLE_WIDTH_FACTOR: f64 = 1.1;

/// Size of the close button in the panel's top-right corner.
pub const CLOSE_BUTTON_SIZE: Size = Size::new(32.0, 32.0);

/// Fraction of the panel height above the image area.
const IMAGE_AREA_TOP: f64 = 0.6;

/// Release speed divisor and scale for the slide after a slow release
const SLIDE_SPEED_DIVISOR: f64 = 400.0;
const SLIDE_SCALE: f64 = 0.1;

/// Bubble rectangle for a word: 10% wider, same height, same centre.
pub fn bubble_rect(word_rect: Rect) -> Rect {
    let width = word_rect.width() * BUBBLE_WIDTH_FACTOR;
    Rect::from_center_size(word_rect.center(), Size::new(width, word_rect.height()))
}

/// Resting rectangle of the panel: the visible surface inset on each side.
///
/// Insets larger than the surface collapse to a zero-sized rect at the
/// surface centre.
pub fn panel_home(viewport: Rect, inset: Vec2) -> Rect {
    let width = (viewport.width() - 2.0 * inset.x).max(0.0);
    let height = (viewport.height() - 2.0 * inset.y).max(0.0);
    Rect::from_center_size(viewport.center(), Size::new(width, height))
}

/// Where the panel goes after a pan released below the flick threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Return to the centred resting position
    #[default]
    SnapBack,
    /// Keep sliding in the release direction and stay there
    Inertial,
}

/// Outcome of a pan release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelRelease {
    /// Fast enough to dismiss the panel
    Dismiss,
    /// Animate to `target` over `duration`
    Settle { target: Rect, duration: Duration },
}

/// Decide what a pan release at `velocity` (units/s) does to `panel`.
///
/// Speeds at or above `flick_velocity` dismiss. Slower releases slide for
/// `0.1 * speed / 400` seconds' worth of velocity and animate for twice
/// that long.
pub fn release(
    panel: Rect,
    home: Rect,
    velocity: Vec2,
    flick_velocity: f64,
    policy: ReleasePolicy,
) -> PanelRelease {
    // A velocity the pointer tracker could not measure counts as a still release.
    let velocity = if velocity.is_nan() { Vec2::ZERO } else { velocity };
    let speed = velocity.hypot();
    if speed >= flick_velocity {
        return PanelRelease::Dismiss;
    }

    let slide = SLIDE_SCALE * speed / SLIDE_SPEED_DIVISOR;
    let duration = Duration::from_secs_f64(2.0 * slide);
    let target = match policy {
        ReleasePolicy::SnapBack => home,
        ReleasePolicy::Inertial => panel + velocity * slide,
    };
    PanelRelease::Settle { target, duration }
}

/// Interactive regions of an open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRegion {
    CloseButton,
    Image,
    Body,
}

/// Layout of the panel's interactive regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub close_button: Rect,
    pub image_area: Rect,
}

impl PanelLayout {
    pub fn new(panel: Rect) -> Self {
        let close_button = Rect::new(
            panel.x1 - CLOSE_BUTTON_SIZE.width,
            panel.y0,
            panel.x1,
            panel.y0 + CLOSE_BUTTON_SIZE.height,
        )
        .intersect(panel);
        let image_area = Rect::new(
            panel.x0,
            panel.y0 + panel.height() * IMAGE_AREA_TOP,
            panel.x1,
            panel.y1,
        );
        Self {
            panel,
            close_button,
            image_area,
        }
    }

    /// Topmost region under `point`, if the point is on the panel at all.
    pub fn region_at(&self, point: Point) -> Option<PanelRegion> {
        if !self.panel.contains(point) {
            None
        } else if self.close_button.contains(point) {
            Some(PanelRegion::CloseButton)
        } else if self.image_area.contains(point) {
            Some(PanelRegion::Image)
        } else {
            Some(PanelRegion::Body)
        }
    }
}
