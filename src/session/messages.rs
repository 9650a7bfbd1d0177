//! Messages from enrichment tasks back to the event loop.

use super::state::{RequestKind, SessionId};
use crate::enrichment::{ImageData, ImageRef, Meaning};
use crate::error::{EnrichmentResult, FailureKind};

/// Result of one enrichment request.
#[derive(Debug, Clone)]
pub enum EnrichmentPayload {
    Meanings(EnrichmentResult<Vec<Meaning>>),
    Images(EnrichmentResult<Vec<ImageRef>>),
    ImageData {
        url: String,
        result: EnrichmentResult<ImageData>,
    },
}

impl EnrichmentPayload {
    pub fn kind(&self) -> RequestKind {
        match self {
            EnrichmentPayload::Meanings(_) => RequestKind::Meanings,
            EnrichmentPayload::Images(_) => RequestKind::Images,
            EnrichmentPayload::ImageData { .. } => RequestKind::ImageData,
        }
    }
}

/// Completion of an enrichment request, tagged with the session that
/// issued it.
#[derive(Debug, Clone)]
pub struct SessionMessage {
    pub session: SessionId,
    pub payload: EnrichmentPayload,
}

impl SessionMessage {
    pub fn new(session: SessionId, payload: EnrichmentPayload) -> Self {
        Self { session, payload }
    }
}

/// What [`handle_message`](super::WordSessionController::handle_message)
/// did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Results merged into the session
    Applied,
    /// The request failed; the session shows no results for it
    Failed(FailureKind),
    /// The session that issued the request is gone or no longer waiting for
    /// it; the message was discarded
    Stale,
}
