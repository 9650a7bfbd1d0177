//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let (mut controller, presenter) = controller_with(ScriptedEnrichment::new(), InteractionConfig::immediate());
//! let word = locate(&layout(), lamet_point());
//! controller.tap_word(word, Instant::now());
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use kurbo::{Point, Size};
use std::sync::Arc;
use std::time::Duration;

use tappable::config::{EnrichmentConfig, InteractionConfig};
use tappable::enrichment::RemoteEnrichmentClient;
use tappable::session::{MessageOutcome, SessionEvent, SessionEventReceiver, WordSessionController};
use tappable::text::{MonospaceLayout, Word, WordLocator};
use tappable::traits::EnrichmentService;

/// Text shared by the flow tests.
pub const TEXT: &str = "Lorem ipsum dolor sit amet, lamet consectetur adipiscing elit.";

/// 10x20 cells, 80 columns: the whole text fits on one line.
pub fn layout() -> MonospaceLayout {
    MonospaceLayout::with_cell_size(TEXT, 80, Size::new(10.0, 20.0))
}

/// Centre of "lamet" (chars 28..33).
pub fn lamet_point() -> Point {
    Point::new(305.0, 10.0)
}

/// Centre of "ipsum" (chars 6..11).
pub fn ipsum_point() -> Point {
    Point::new(85.0, 10.0)
}

/// Resolve the word under `point`, panicking if there is none.
pub fn locate(layout: &MonospaceLayout, point: Point) -> Word {
    WordLocator::new()
        .locate(point, layout)
        .expect("word under point")
}

/// Controller with an 800x600 viewport and a recording presenter.
pub fn controller_with(
    service: impl EnrichmentService + 'static,
    config: InteractionConfig,
) -> (WordSessionController, RecordingPresenter) {
    let presenter = RecordingPresenter::new();
    let mut controller =
        WordSessionController::new(config, Arc::new(service)).with_presenter(presenter.clone());
    controller.set_viewport(Size::new(800.0, 600.0));
    (controller, presenter)
}

/// Enrichment configuration pointing at the mocked endpoints.
pub fn mock_config() -> EnrichmentConfig {
    EnrichmentConfig::default()
        .with_dictionary_base_url(DICT_URL)
        .with_image_search_url(SEARCH_URL)
        .with_image_api_key("test-key")
}

/// Enrichment client over a mocked HTTP client.
pub fn mock_client(http: MockHttpClient) -> RemoteEnrichmentClient<MockHttpClient> {
    RemoteEnrichmentClient::new(http, mock_config())
}

/// Receive and apply `count` enrichment completions.
pub async fn apply_messages(
    controller: &mut WordSessionController,
    count: usize,
) -> Vec<MessageOutcome> {
    let mut outcomes = Vec::with_capacity(count);
    for _ in 0..count {
        let message = tokio::time::timeout(Duration::from_secs(2), controller.next_message())
            .await
            .expect("enrichment result in time")
            .expect("receiver available");
        outcomes.push(controller.handle_message(message));
    }
    outcomes
}

/// Everything currently queued on an event receiver.
pub fn drain_events(events: &mut SessionEventReceiver) -> Vec<SessionEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
