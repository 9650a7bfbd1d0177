//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `tappable::adapters::mock` and adds fixtures for the dictionary and image
//! search contracts.

pub use tappable::adapters::mock::http::MockResponse;
pub use tappable::adapters::mock::{
    EnrichmentCall, MockHttpClient, RecordingPresenter, ScriptedEnrichment,
};
pub use tappable::traits::{HttpError, PresentationCommand, Response};

use std::io::Cursor;

/// Dictionary base URL used by mocked clients
pub const DICT_URL: &str = "https://dict.test/entries/";

/// Image search URL used by mocked clients
pub const SEARCH_URL: &str = "https://images.test/search";

/// Dictionary answer for "lamet": one entry with one noun meaning.
pub const LAMET_ENTRY: &str = r#"[{
    "word": "lamet",
    "phonetics": [],
    "meanings": [{
        "partOfSpeech": "noun",
        "definitions": [{
            "definition": "A thin plate or layer.",
            "example": "a lamet of gold",
            "synonyms": [],
            "antonyms": []
        }]
    }]
}]"#;

/// Dictionary answer for an unknown word.
pub const NOT_FOUND_BODY: &str = r#"{"title":"No Definitions Found","message":"Sorry pal, we couldn't find definitions for the word you were looking for."}"#;

/// Image search answer with two usable results and one without URLs.
pub const LAMET_IMAGES: &str = r#"{
    "total": 3,
    "total_pages": 1,
    "results": [
        {"id": "one", "width": 4, "height": 3, "urls": {"regular": "https://img.test/one.png", "thumb": "https://img.test/one-thumb.png"}},
        {"id": "empty", "width": 1, "height": 1, "urls": {}},
        {"id": "two", "width": 2, "height": 2, "urls": {"small": "https://img.test/two.png"}}
    ]
}"#;

/// URL of the first image in [`LAMET_IMAGES`]
pub const IMAGE_ONE: &str = "https://img.test/one.png";

/// URL of the second image in [`LAMET_IMAGES`]
pub const IMAGE_TWO: &str = "https://img.test/two.png";

/// Encode a blank PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a 200 JSON response.
    pub fn with_json_response(self, url: &str, json: &str) -> Self {
        self.client.set_response(url, MockResponse::json(json));
        self
    }

    /// Configures a response with a bare status and body.
    pub fn with_status_response(self, url: &str, status: u16, body: &str) -> Self {
        self.client
            .set_response(url, MockResponse::status(status, body.to_string()));
        self
    }

    /// Configures a 200 image response.
    pub fn with_image_response(self, url: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.client
            .set_response(url, MockResponse::bytes(content_type, bytes));
        self
    }

    /// Configures a transport failure.
    pub fn with_error_response(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Dictionary, image search and both image bodies for "lamet".
    pub fn lamet() -> Self {
        Self::new()
            .with_json_response(&format!("{DICT_URL}lamet"), LAMET_ENTRY)
            .with_json_response(SEARCH_URL, LAMET_IMAGES)
            .with_image_response(IMAGE_ONE, "image/png", png_bytes(4, 3))
            .with_image_response(IMAGE_TWO, "image/png", png_bytes(2, 2))
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
