//! Enrichment service trait.
//!
//! The session controller only talks to this trait, so tests can substitute
//! a scripted implementation for the HTTP-backed
//! [`RemoteEnrichmentClient`](crate::enrichment::RemoteEnrichmentClient).

use async_trait::async_trait;

use crate::enrichment::{ImageData, ImageRef, Meaning};
use crate::error::EnrichmentResult;

/// Asynchronous lookups of dictionary meanings and images for a word.
///
/// Implementations must be idempotent: calling the same operation twice for
/// the same input returns equivalent results. Cancellation is done by
/// dropping (aborting) the future.
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    /// Dictionary meanings for the exact word text.
    async fn fetch_meanings(&self, word: &str) -> EnrichmentResult<Vec<Meaning>>;

    /// Candidate images for the exact word text.
    async fn fetch_images(&self, word: &str) -> EnrichmentResult<Vec<ImageRef>>;

    /// Download one image.
    async fn fetch_image_data(&self, url: &str) -> EnrichmentResult<ImageData>;
}
