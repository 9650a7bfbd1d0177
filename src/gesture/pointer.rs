//! Pointer gesture recognition
//!
//! Turns raw press / move / release events into taps and pans:
//! - A press released without moving more than the tap slop is a tap
//! - Moving past the slop while pressed starts a pan; the pan ends on release
//!   with a velocity estimated from the last few samples
//!
//! # Usage
//!
//! ```ignore
//! use tappable::gesture::{PointerGesture, PointerTracker};
//!
//! let mut tracker = PointerTracker::new(4.0);
//! tracker.press(point, now);
//! if let Some(PointerGesture::Tap { point }) = tracker.release(point, now) {
//!     // ...
//! }
//! ```

use kurbo::{Point, Vec2};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples older than this are ignored when estimating release velocity
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// A recognised gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    /// Press and release without significant movement, at the press point
    Tap { point: Point },
    /// Movement passed the slop; `origin` is where the press started
    PanBegan { origin: Point, point: Point },
    /// Pointer moved during a pan
    PanChanged { point: Point, delta: Vec2 },
    /// Pointer released during a pan, with velocity in units per second
    PanEnded {
        point: Point,
        delta: Vec2,
        velocity: Vec2,
    },
}

/// Tracks one pointer between press and release.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    /// Movement (units) tolerated before a press becomes a pan
    tap_slop: f64,
    /// Where the current press started
    origin: Option<Point>,
    /// Last reported position
    last: Option<Point>,
    panning: bool,
    samples: VecDeque<(Point, Instant)>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl PointerTracker {
    /// Create a tracker with the given tap slop
    pub fn new(tap_slop: f64) -> Self {
        Self {
            tap_slop: tap_slop.max(0.0),
            origin: None,
            last: None,
            panning: false,
            samples: VecDeque::new(),
        }
    }

    /// Whether a press is in progress
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    /// Whether the current press has become a pan
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Where the current press started
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Pointer pressed
    pub fn press(&mut self, point: Point, now: Instant) {
        self.origin = Some(point);
        self.last = Some(point);
        self.panning = false;
        self.samples.clear();
        self.record(point, now);
    }

    /// Pointer moved; returns a pan gesture once movement passes the slop
    pub fn moved(&mut self, point: Point, now: Instant) -> Option<PointerGesture> {
        let origin = self.origin?;
        let last = self.last.unwrap_or(origin);
        self.record(point, now);
        self.last = Some(point);

        if self.panning {
            return Some(PointerGesture::PanChanged {
                point,
                delta: point - last,
            });
        }

        if origin.distance(point) > self.tap_slop {
            self.panning = true;
            return Some(PointerGesture::PanBegan { origin, point });
        }
        None
    }

    /// Pointer released; returns a tap or the end of a pan
    pub fn release(&mut self, point: Point, now: Instant) -> Option<PointerGesture> {
        let origin = self.origin?;
        let last = self.last.unwrap_or(origin);
        self.record(point, now);

        let gesture = if self.panning {
            PointerGesture::PanEnded {
                point,
                delta: point - last,
                velocity: self.velocity(),
            }
        } else if origin.distance(point) > self.tap_slop {
            // Moved far without any intermediate move events: a swipe, not a tap
            PointerGesture::PanEnded {
                point,
                delta: point - origin,
                velocity: self.velocity(),
            }
        } else {
            PointerGesture::Tap { point: origin }
        };

        self.reset();
        Some(gesture)
    }

    /// Abandon the current press without producing a gesture
    pub fn reset(&mut self) {
        self.origin = None;
        self.last = None;
        self.panning = false;
        self.samples.clear();
    }

    fn record(&mut self, point: Point, now: Instant) {
        self.samples.push_back((point, now));
        while let Some((_, time)) = self.samples.front() {
            if now.duration_since(*time) > VELOCITY_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity across the retained samples, in units per second
    fn velocity(&self) -> Vec2 {
        match (self.samples.front(), self.samples.back()) {
            (Some((first, start)), Some((last, end))) => {
                let elapsed = end.duration_since(*start).as_secs_f64();
                if elapsed > 0.0 {
                    (*last - *first) / elapsed
                } else {
                    Vec2::ZERO
                }
            }
            _ => Vec2::ZERO,
        }
    }
}
