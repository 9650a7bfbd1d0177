//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET requests
//! - [`EnrichmentService`] - dictionary and image lookups
//! - [`PresentationAdapter`] - the rendering surface driven by the session controller

pub mod enrichment;
pub mod http;
pub mod presenter;

pub use enrichment::EnrichmentService;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use presenter::{NullPresenter, PresentationAdapter, PresentationCommand};
