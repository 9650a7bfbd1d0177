//! Text layout and tap-to-word resolution
//!
//! - [`TextLayout`]: what a display surface must provide (hit testing and
//!   range-to-rect conversion)
//! - [`MonospaceLayout`]: a wrapped cell-grid layout used by the terminal UI
//! - [`WordLocator`]: resolves a point to the enclosing [`Word`]

pub mod layout;
pub mod locator;
pub mod word;

pub use layout::{MonospaceLayout, TextHit, TextLayout};
pub use locator::{ResolutionFailure, WordLocator};
pub use word::{TextRange, Word};
