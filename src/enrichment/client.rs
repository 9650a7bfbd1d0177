//! HTTP-backed enrichment client.
//!
//! Fetches dictionary meanings and image search results for a word, and
//! downloads image data. Successful results are kept in per-instance LRU
//! caches keyed on the exact word text (or image URL).

use async_trait::async_trait;
use std::io::Cursor;

use super::cache::EnrichmentCache;
use super::models::{ImageData, ImageRef, Meaning};
use super::wire::{DictionaryEntry, ImageSearchResponse, WireImage};
use crate::config::EnrichmentConfig;
use crate::error::{EnrichmentError, EnrichmentResult};
use crate::traits::{EnrichmentService, Headers, HttpClient, Response};

const DICTIONARY: &str = "dictionary";
const IMAGE_SEARCH: &str = "image search";
const IMAGE_DATA: &str = "image";

/// Enrichment client over any [`HttpClient`].
///
/// # Example
///
/// ```ignore
/// use tappable::adapters::ReqwestHttpClient;
/// use tappable::config::EnrichmentConfig;
/// use tappable::enrichment::RemoteEnrichmentClient;
///
/// let client = RemoteEnrichmentClient::new(ReqwestHttpClient::new(), EnrichmentConfig::from_env());
/// let meanings = client.fetch_meanings("lamet").await?;
/// ```
#[derive(Debug)]
pub struct RemoteEnrichmentClient<C> {
    http: C,
    config: EnrichmentConfig,
    meanings: EnrichmentCache<Vec<Meaning>>,
    images: EnrichmentCache<Vec<ImageRef>>,
    image_data: EnrichmentCache<ImageData>,
}

impl<C: HttpClient> RemoteEnrichmentClient<C> {
    /// Create a client with empty caches sized by `config.cache_capacity`.
    pub fn new(http: C, config: EnrichmentConfig) -> Self {
        let capacity = config.cache_capacity;
        Self {
            http,
            config,
            meanings: EnrichmentCache::new(capacity),
            images: EnrichmentCache::new(capacity),
            image_data: EnrichmentCache::new(capacity),
        }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Cached meanings for a word, if any.
    pub fn cached_meanings(&self, word: &str) -> Option<Vec<Meaning>> {
        self.meanings.get(word)
    }

    /// Cached image list for a word, if any.
    pub fn cached_images(&self, word: &str) -> Option<Vec<ImageRef>> {
        self.images.get(word)
    }

    /// Dictionary URL for a word.
    pub fn dictionary_url(&self, word: &str) -> String {
        let base = &self.config.dictionary_base_url;
        let separator = if base.ends_with('/') { "" } else { "/" };
        format!("{}{}{}", base, separator, urlencoding::encode(word))
    }

    /// Image search URL for a word.
    pub fn image_search_url(&self, word: &str) -> String {
        let base = &self.config.image_search_url;
        let separator = if base.contains('?') { '&' } else { '?' };
        format!(
            "{}{}query={}&per_page={}",
            base,
            separator,
            urlencoding::encode(word),
            self.config.image_results_per_page
        )
    }

    fn image_search_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept-Version".to_string(), "v1".to_string());
        if let Some(key) = &self.config.image_api_key {
            headers.insert("Authorization".to_string(), format!("Client-ID {}", key));
        }
        headers
    }

    fn check_status(endpoint: &'static str, response: &Response) -> EnrichmentResult<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(EnrichmentError::Status {
                endpoint,
                status: response.status,
            })
        }
    }
}

/// `image/png; charset=...` -> true
fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false)
}

fn image_dimensions(bytes: &[u8]) -> EnrichmentResult<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EnrichmentError::InvalidImage {
            message: e.to_string(),
        })?;
    reader
        .into_dimensions()
        .map_err(|e| EnrichmentError::InvalidImage {
            message: e.to_string(),
        })
}

#[async_trait]
impl<C: HttpClient> EnrichmentService for RemoteEnrichmentClient<C> {
    async fn fetch_meanings(&self, word: &str) -> EnrichmentResult<Vec<Meaning>> {
        if let Some(cached) = self.meanings.get(word) {
            tracing::debug!("Meanings for '{}' served from cache", word);
            return Ok(cached);
        }

        let url = self.dictionary_url(word);
        let response = self.http.get(&url, &Headers::new()).await?;

        // The dictionary answers unknown words with a 404 and an error object
        if response.status == 404 {
            return Err(EnrichmentError::NotFound {
                word: word.to_string(),
            });
        }
        Self::check_status(DICTIONARY, &response)?;

        let entries: Vec<DictionaryEntry> = response
            .json()
            .map_err(|e| EnrichmentError::decode(DICTIONARY, &e, &response.body))?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| EnrichmentError::NotFound {
                word: word.to_string(),
            })?;

        let meanings: Vec<Meaning> = entry.meanings.into_iter().map(Meaning::from).collect();
        tracing::debug!("Fetched {} meanings for '{}'", meanings.len(), word);
        self.meanings.insert(word, meanings.clone());
        Ok(meanings)
    }

    async fn fetch_images(&self, word: &str) -> EnrichmentResult<Vec<ImageRef>> {
        if let Some(cached) = self.images.get(word) {
            tracing::debug!("Images for '{}' served from cache", word);
            return Ok(cached);
        }

        let url = self.image_search_url(word);
        let response = self.http.get(&url, &self.image_search_headers()).await?;
        Self::check_status(IMAGE_SEARCH, &response)?;

        let search: ImageSearchResponse = response
            .json()
            .map_err(|e| EnrichmentError::decode(IMAGE_SEARCH, &e, &response.body))?;

        let images: Vec<ImageRef> = search
            .results
            .into_iter()
            .filter_map(WireImage::into_image_ref)
            .collect();
        tracing::debug!(
            "Fetched {} images for '{}' ({} total)",
            images.len(),
            word,
            search.total
        );
        self.images.insert(word, images.clone());
        Ok(images)
    }

    async fn fetch_image_data(&self, url: &str) -> EnrichmentResult<ImageData> {
        if let Some(cached) = self.image_data.get(url) {
            return Ok(cached);
        }

        let response = self.http.get(url, &Headers::new()).await?;
        if response.status != 200 {
            return Err(EnrichmentError::Status {
                endpoint: IMAGE_DATA,
                status: response.status,
            });
        }

        let content_type = match response.content_type() {
            Some(content_type) if is_image_content_type(content_type) => content_type.to_string(),
            other => {
                return Err(EnrichmentError::UnsupportedContent {
                    content_type: other.map(str::to_string),
                })
            }
        };

        let (width, height) = image_dimensions(&response.body)?;
        let data = ImageData {
            url: url.to_string(),
            content_type,
            width,
            height,
            bytes: response.body,
        };
        self.image_data.insert(url, data.clone());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::FailureKind;
    use crate::traits::HttpError;

    const DICT: &str = "https://dict.test/entries/";
    const SEARCH: &str = "https://images.test/search";

    fn client(http: MockHttpClient) -> RemoteEnrichmentClient<MockHttpClient> {
        let config = EnrichmentConfig::default()
            .with_dictionary_base_url(DICT)
            .with_image_search_url(SEARCH)
            .with_image_api_key("key-123")
            .with_image_results_per_page(5);
        RemoteEnrichmentClient::new(http, config)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_fetch_meanings_uses_first_entry() {
        let http = MockHttpClient::new();
        http.set_response(
            &format!("{}lamet", DICT),
            MockResponse::json(
                r#"[{"word":"lamet","meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"A plate."}]}]},
                    {"word":"lamet","meanings":[{"partOfSpeech":"verb","definitions":[]}]}]"#,
            ),
        );
        let client = client(http.clone());

        let meanings = client.fetch_meanings("lamet").await.unwrap();
        assert_eq!(meanings.len(), 1);
        assert_eq!(meanings[0].part_of_speech, "noun");
        assert_eq!(meanings[0].definitions[0].text, "A plate.");

        // second call is served from the cache
        let again = client.fetch_meanings("lamet").await.unwrap();
        assert_eq!(again, meanings);
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_cache_is_case_sensitive() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(
            r#"[{"word":"x","meanings":[{"partOfSpeech":"noun","definitions":[]}]}]"#,
        ));
        let client = client(http.clone());

        client.fetch_meanings("Lamet").await.unwrap();
        client.fetch_meanings("lamet").await.unwrap();
        assert_eq!(http.get_requests().len(), 2);
        assert!(client.cached_meanings("Lamet").is_some());
    }

    #[tokio::test]
    async fn test_word_is_percent_encoded() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json("[]"));
        let client = client(http.clone());

        let _ = client.fetch_meanings("naïve café").await;
        assert_eq!(
            http.get_requests()[0].url,
            format!("{}na%C3%AFve%20caf%C3%A9", DICT)
        );
    }

    #[tokio::test]
    async fn test_empty_dictionary_array_is_not_found() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json("[]"));
        let client = client(http);

        let err = client.fetch_meanings("zzzz").await.unwrap_err();
        assert_eq!(
            err,
            EnrichmentError::NotFound {
                word: "zzzz".to_string()
            }
        );
        assert!(client.cached_meanings("zzzz").is_none());
    }

    #[tokio::test]
    async fn test_dictionary_404_is_not_found() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(404, r#"{"title":"No Definitions Found"}"#));
        let client = client(http);

        let err = client.fetch_meanings("zzzz").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_dictionary_failures_are_classified() {
        let http = MockHttpClient::new();
        http.set_response(&format!("{}bad", DICT), MockResponse::json("{not json"));
        http.set_response(&format!("{}down", DICT), MockResponse::status(503, ""));
        http.set_response(
            &format!("{}offline", DICT),
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        let client = client(http);

        let err = client.fetch_meanings("bad").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);

        let err = client.fetch_meanings("down").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
        assert!(err.is_retryable());

        let err = client.fetch_meanings("offline").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[tokio::test]
    async fn test_fetch_images_sends_query_and_authorization() {
        let http = MockHttpClient::new();
        http.set_response(
            SEARCH,
            MockResponse::json(
                r#"{"total":1,"total_pages":1,"results":[
                    {"id":"a1","width":640,"height":480,"urls":{"small":"https://img.test/a1-small","raw":"https://img.test/a1"}}
                ]}"#,
            ),
        );
        let client = client(http.clone());

        let images = client.fetch_images("lamet").await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].display_url(), Some("https://img.test/a1-small"));

        let request = &http.get_requests()[0];
        assert_eq!(request.url, format!("{}?query=lamet&per_page=5", SEARCH));
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Client-ID key-123")
        );

        assert!(client.cached_images("lamet").is_some());
    }

    #[tokio::test]
    async fn test_fetch_images_non_success_is_network_failure() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(401, "unauthorized"));
        let client = client(http);

        let err = client.fetch_images("lamet").await.unwrap_err();
        assert_eq!(
            err,
            EnrichmentError::Status {
                endpoint: IMAGE_SEARCH,
                status: 401
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_image_data_decodes_dimensions() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/a1",
            MockResponse::bytes("image/png", png_bytes(4, 3)),
        );
        let client = client(http.clone());

        let data = client.fetch_image_data("https://img.test/a1").await.unwrap();
        assert_eq!((data.width, data.height), (4, 3));
        assert_eq!(data.content_type, "image/png");
        assert!(!data.is_empty());

        client.fetch_image_data("https://img.test/a1").await.unwrap();
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_image_data_rejects_non_image_content() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/page",
            MockResponse::bytes("text/html; charset=utf-8", "<html></html>"),
        );
        http.set_response("https://img.test/bare", MockResponse::status(200, "??"));
        let client = client(http);

        let err = client
            .fetch_image_data("https://img.test/page")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EnrichmentError::UnsupportedContent {
                content_type: Some("text/html; charset=utf-8".to_string())
            }
        );

        let err = client
            .fetch_image_data("https://img.test/bare")
            .await
            .unwrap_err();
        assert_eq!(err, EnrichmentError::UnsupportedContent { content_type: None });
    }

    #[tokio::test]
    async fn test_fetch_image_data_requires_status_200() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(204, ""));
        let client = client(http);

        let err = client.fetch_image_data("https://img.test/x").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::Status { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_fetch_image_data_invalid_bytes() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::bytes("image/png", "not a png"));
        let client = client(http);

        let err = client.fetch_image_data("https://img.test/x").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::InvalidImage { .. }));
    }

    #[test]
    fn test_urls() {
        let client = client(MockHttpClient::new());
        assert_eq!(client.dictionary_url("a b"), format!("{}a%20b", DICT));

        let config = EnrichmentConfig::default()
            .with_dictionary_base_url("https://dict.test/entries")
            .with_image_search_url("https://images.test/search?orientation=squarish");
        let client = RemoteEnrichmentClient::new(MockHttpClient::new(), config);
        assert_eq!(client.dictionary_url("x"), "https://dict.test/entries/x");
        assert_eq!(
            client.image_search_url("x"),
            "https://images.test/search?orientation=squarish&query=x&per_page=10"
        );
    }

    #[test]
    fn test_is_image_content_type() {
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("IMAGE/PNG"));
        assert!(is_image_content_type("image/webp; q=1"));
        assert!(!is_image_content_type("application/json"));
        assert!(!is_image_content_type(""));
    }
}
