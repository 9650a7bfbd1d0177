//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::ScriptedEnrichment`] - Scripted meanings and images
//! - [`mock::RecordingPresenter`] - Records presentation commands

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, RecordingPresenter, ScriptedEnrichment};
pub use reqwest_http::ReqwestHttpClient;
