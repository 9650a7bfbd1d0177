//! Pointer input for tappable text.
//!
//! [`PointerTracker`] classifies raw presses into taps and pans,
//! [`HitAreaRegistry`] knows where the session overlays are, and
//! [`GestureArbiter`] combines both to drive a [`WordSessionController`].
//!
//! [`WordSessionController`]: crate::session::WordSessionController

pub mod arbiter;
pub mod hit_area;
pub mod pointer;

pub use arbiter::{GestureArbiter, GestureOutcome};
pub use hit_area::{HitArea, HitAreaRegistry, HitTarget};
pub use pointer::{PointerGesture, PointerTracker};
