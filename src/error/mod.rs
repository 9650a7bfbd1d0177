//! Error handling for the tappable text widget.
//!
//! | Failure | Type | Handling |
//! |---------|------|----------|
//! | Tap not on a word | [`ResolutionFailure`] | Ignored, no transition |
//! | Transport / non-2xx | [`EnrichmentError`] ([`FailureKind::Network`]) | Logged, empty results |
//! | Bad payload | [`EnrichmentError`] ([`FailureKind::Decode`]) | Logged, empty results |
//! | Result for a closed session | [`MessageOutcome::Stale`] | Discarded silently |
//!
//! Nothing here is fatal to the widget. Violating the single-session rule is
//! not representable through the controller's API.
//!
//! [`ResolutionFailure`]: crate::text::ResolutionFailure
//! [`MessageOutcome::Stale`]: crate::session::MessageOutcome::Stale

mod enrichment;

pub use enrichment::{EnrichmentError, FailureKind};

/// Result type for enrichment operations.
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;
