//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`ScriptedEnrichment`] - enrichment service with scripted results
//! - [`RecordingPresenter`] - presentation adapter that records commands

pub mod enrichment;
pub mod http;
pub mod presenter;

pub use enrichment::{EnrichmentCall, ScriptedEnrichment};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use presenter::RecordingPresenter;
