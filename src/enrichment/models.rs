//! Enrichment result types.
//!
//! These are produced by decoding remote responses and are never mutated
//! afterwards. They are `Clone` so that the cache and the session can each
//! hold a copy.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One part of speech with its definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
}

impl Meaning {
    pub fn new(part_of_speech: impl Into<String>, definitions: Vec<Definition>) -> Self {
        Self {
            part_of_speech: part_of_speech.into(),
            definitions,
        }
    }
}

/// A single dictionary definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
    pub synonyms: Option<Vec<String>>,
}

impl Definition {
    /// Definition with no example and no synonyms
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            example: None,
            synonyms: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }
}

/// Image resolution tiers offered by the image search provider.
///
/// Declaration order is the order of preference when picking a URL to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Regular,
    Small,
    Thumb,
    Full,
    Raw,
}

impl QualityTier {
    /// All tiers, most preferred first
    pub const PREFERENCE: [QualityTier; 5] = [
        QualityTier::Regular,
        QualityTier::Small,
        QualityTier::Thumb,
        QualityTier::Full,
        QualityTier::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Regular => "regular",
            QualityTier::Small => "small",
            QualityTier::Thumb => "thumb",
            QualityTier::Full => "full",
            QualityTier::Raw => "raw",
        }
    }
}

/// URLs of one image, keyed by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls(BTreeMap<QualityTier, String>);

impl ImageUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tier: QualityTier, url: impl Into<String>) -> Self {
        self.insert(tier, url);
        self
    }

    pub fn insert(&mut self, tier: QualityTier, url: impl Into<String>) {
        self.0.insert(tier, url.into());
    }

    pub fn get(&self, tier: QualityTier) -> Option<&str> {
        self.0.get(&tier).map(String::as_str)
    }

    /// URL of the most preferred tier present.
    pub fn preferred(&self) -> Option<(QualityTier, &str)> {
        QualityTier::PREFERENCE
            .iter()
            .find_map(|tier| self.get(*tier).map(|url| (*tier, url)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An image search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub urls: ImageUrls,
}

impl ImageRef {
    pub fn new(id: impl Into<String>, width: u32, height: u32, urls: ImageUrls) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            urls,
        }
    }

    /// The URL to display for this image.
    pub fn display_url(&self) -> Option<&str> {
        self.urls.preferred().map(|(_, url)| url)
    }
}

/// Downloaded bytes of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub url: String,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Bytes,
}

impl ImageData {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_tier_order() {
        let urls = ImageUrls::new()
            .with(QualityTier::Raw, "raw")
            .with(QualityTier::Thumb, "thumb");
        assert_eq!(urls.preferred(), Some((QualityTier::Thumb, "thumb")));

        let urls = urls.with(QualityTier::Regular, "regular");
        assert_eq!(urls.preferred(), Some((QualityTier::Regular, "regular")));
        assert_eq!(urls.len(), 3);
    }

    #[test]
    fn test_image_without_urls_has_no_display_url() {
        let image = ImageRef::new("a", 10, 10, ImageUrls::new());
        assert!(image.display_url().is_none());
        assert!(image.urls.is_empty());
    }

    #[test]
    fn test_definition_builder() {
        let definition = Definition::new("A thing")
            .with_example("A thing happened")
            .with_synonyms(vec!["item".to_string()]);
        assert_eq!(definition.example.as_deref(), Some("A thing happened"));
        assert_eq!(definition.synonyms.unwrap(), vec!["item".to_string()]);
    }
}
