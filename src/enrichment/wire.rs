//! Wire formats of the dictionary and image search APIs.
//!
//! Only the fields the widget uses are declared; everything else in the
//! payloads is ignored.

use serde::Deserialize;

use super::models::{Definition, ImageRef, ImageUrls, Meaning, QualityTier};

/// One element of the dictionary response array.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<WireMeaning>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMeaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<WireDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDefinition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Option<Vec<String>>,
}

impl From<WireDefinition> for Definition {
    fn from(wire: WireDefinition) -> Self {
        Definition {
            text: wire.definition,
            example: wire.example.filter(|e| !e.is_empty()),
            // The API sends `[]` for "no synonyms"
            synonyms: wire.synonyms.filter(|s| !s.is_empty()),
        }
    }
}

impl From<WireMeaning> for Meaning {
    fn from(wire: WireMeaning) -> Self {
        Meaning {
            part_of_speech: wire.part_of_speech,
            definitions: wire.definitions.into_iter().map(Definition::from).collect(),
        }
    }
}

/// Image search response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
    pub results: Vec<WireImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireImage {
    pub id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub urls: WireImageUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireImageUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

impl From<WireImageUrls> for ImageUrls {
    fn from(wire: WireImageUrls) -> Self {
        let mut urls = ImageUrls::new();
        let tiers = [
            (QualityTier::Raw, wire.raw),
            (QualityTier::Full, wire.full),
            (QualityTier::Regular, wire.regular),
            (QualityTier::Small, wire.small),
            (QualityTier::Thumb, wire.thumb),
        ];
        for (tier, url) in tiers {
            if let Some(url) = url.filter(|u| !u.is_empty()) {
                urls.insert(tier, url);
            }
        }
        urls
    }
}

impl WireImage {
    /// Convert into an [`ImageRef`], dropping results that carry no URL.
    pub fn into_image_ref(self) -> Option<ImageRef> {
        let urls = ImageUrls::from(self.urls);
        if urls.is_empty() {
            return None;
        }
        Some(ImageRef::new(self.id, self.width, self.height, urls))
    }
}
