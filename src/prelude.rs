//! Commonly used types.
//!
//! ```ignore
//! use tappable::prelude::*;
//! ```

pub use crate::config::{EnrichmentConfig, InteractionConfig};
pub use crate::enrichment::{Definition, ImageData, ImageRef, Meaning, RemoteEnrichmentClient};
pub use crate::error::{EnrichmentError, EnrichmentResult, FailureKind};
pub use crate::gesture::{GestureArbiter, GestureOutcome, HitTarget};
pub use crate::session::{
    CloseReason, MessageOutcome, SessionEvent, SessionMessage, SessionPhase, WordSession,
    WordSessionController,
};
pub use crate::text::{MonospaceLayout, ResolutionFailure, TextLayout, Word, WordLocator};
pub use crate::traits::{EnrichmentService, HttpClient, PresentationAdapter, PresentationCommand};
