//! Scripted enrichment service for testing.
//!
//! Results are configured per word (or per URL for image data). Unscripted
//! lookups fail with `NotFound` / an empty image list.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::enrichment::{ImageData, ImageRef, Meaning};
use crate::error::{EnrichmentError, EnrichmentResult};
use crate::traits::EnrichmentService;

/// A recorded enrichment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentCall {
    Meanings(String),
    Images(String),
    ImageData(String),
}

#[derive(Debug, Default)]
struct Script {
    meanings: HashMap<String, EnrichmentResult<Vec<Meaning>>>,
    images: HashMap<String, EnrichmentResult<Vec<ImageRef>>>,
    image_data: HashMap<String, EnrichmentResult<ImageData>>,
    calls: Vec<EnrichmentCall>,
    delay: Option<Duration>,
}

/// Enrichment service returning scripted results.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEnrichment {
    script: Arc<Mutex<Script>>,
}

impl ScriptedEnrichment {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Script the meanings result for a word.
    pub fn set_meanings(&self, word: &str, result: EnrichmentResult<Vec<Meaning>>) {
        self.lock().meanings.insert(word.to_string(), result);
    }

    /// Script the image list result for a word.
    pub fn set_images(&self, word: &str, result: EnrichmentResult<Vec<ImageRef>>) {
        self.lock().images.insert(word.to_string(), result);
    }

    /// Script the image data result for a URL.
    pub fn set_image_data(&self, url: &str, result: EnrichmentResult<ImageData>) {
        self.lock().image_data.insert(url.to_string(), result);
    }

    /// Delay every result, to keep requests in flight.
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<EnrichmentCall> {
        self.lock().calls.clone()
    }

    async fn record(&self, call: EnrichmentCall) {
        let delay = {
            let mut script = self.lock();
            script.calls.push(call);
            script.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl EnrichmentService for ScriptedEnrichment {
    async fn fetch_meanings(&self, word: &str) -> EnrichmentResult<Vec<Meaning>> {
        self.record(EnrichmentCall::Meanings(word.to_string())).await;
        self.lock()
            .meanings
            .get(word)
            .cloned()
            .unwrap_or_else(|| {
                Err(EnrichmentError::NotFound {
                    word: word.to_string(),
                })
            })
    }

    async fn fetch_images(&self, word: &str) -> EnrichmentResult<Vec<ImageRef>> {
        self.record(EnrichmentCall::Images(word.to_string())).await;
        self.lock().images.get(word).cloned().unwrap_or(Ok(Vec::new()))
    }

    async fn fetch_image_data(&self, url: &str) -> EnrichmentResult<ImageData> {
        self.record(EnrichmentCall::ImageData(url.to_string())).await;
        self.lock()
            .image_data
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(EnrichmentError::UnsupportedContent { content_type: None })
            })
    }
}
