//! Dictionary and image enrichment.
//!
//! [`RemoteEnrichmentClient`] implements
//! [`EnrichmentService`](crate::traits::EnrichmentService) over HTTP, with
//! bounded per-instance caches.

pub mod cache;
pub mod client;
pub mod models;
pub mod wire;

pub use cache::EnrichmentCache;
pub use client::RemoteEnrichmentClient;
pub use models::{Definition, ImageData, ImageRef, ImageUrls, Meaning, QualityTier};
