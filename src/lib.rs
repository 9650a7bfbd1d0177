//! Tappable text: tap a word, get a highlight bubble, open its meanings and
//! images in a detail panel.
//!
//! The library is split by concern:
//! - [`text`]: layouts and tap-to-word resolution
//! - [`session`]: the word session state machine
//! - [`gesture`]: pointer arbitration between text and overlays
//! - [`enrichment`]: dictionary and image lookups over HTTP
//! - [`ui`], [`app`], [`terminal`]: the ratatui demo

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod prelude;
pub mod session;
pub mod terminal;
pub mod text;
pub mod traits;
pub mod ui;
