//! Configuration types.
//!
//! [`InteractionConfig`] holds the timing and threshold policy of the word
//! session state machine; [`EnrichmentConfig`] holds the remote endpoints
//! and cache sizing. Both use the builder pattern.

use std::time::Duration;

use kurbo::Vec2;

use crate::enrichment::cache::DEFAULT_CACHE_CAPACITY;
use crate::session::ReleasePolicy;

/// Default dictionary endpoint; the word is appended to it
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en_US/";

/// Default image search endpoint
pub const DEFAULT_IMAGE_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Interaction policy for the word session state machine.
///
/// # Example
///
/// ```ignore
/// use tappable::config::InteractionConfig;
/// use std::time::Duration;
///
/// let config = InteractionConfig::default()
///     .with_auto_dismiss(Duration::from_secs(3))
///     .with_flick_velocity(900.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    /// How long an unopened bubble stays up (default: 2s)
    pub auto_dismiss: Duration,
    /// Bubble-to-panel animation length (default: 400ms)
    pub expand_duration: Duration,
    /// Panel dismissal animation length (default: 400ms)
    pub dismiss_duration: Duration,
    /// Release speed at or above which a pan dismisses the panel (default: 700 units/s)
    pub flick_velocity: f64,
    /// Scroll distance from the panel's anchor that forces dismissal (default: 80 units)
    pub scroll_dismiss_distance: f64,
    /// Horizontal and vertical inset of the panel from the surface bounds (default: 10 x 25)
    pub panel_inset: Vec2,
    /// Pointer movement below which a press counts as a tap (default: 4 units)
    pub tap_slop: f64,
    /// Where the panel goes after a slow pan release
    pub release_policy: ReleasePolicy,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            auto_dismiss: Duration::from_secs(2),
            expand_duration: Duration::from_millis(400),
            dismiss_duration: Duration::from_millis(400),
            flick_velocity: 700.0,
            scroll_dismiss_distance: 80.0,
            panel_inset: Vec2::new(10.0, 25.0),
            tap_slop: 4.0,
            release_policy: ReleasePolicy::default(),
        }
    }
}

impl InteractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bubble auto-dismiss timeout.
    pub fn with_auto_dismiss(mut self, timeout: Duration) -> Self {
        self.auto_dismiss = timeout;
        self
    }

    /// Set the expand animation length.
    pub fn with_expand_duration(mut self, duration: Duration) -> Self {
        self.expand_duration = duration;
        self
    }

    /// Set the dismiss animation length.
    pub fn with_dismiss_duration(mut self, duration: Duration) -> Self {
        self.dismiss_duration = duration;
        self
    }

    /// Set the flick-to-dismiss velocity threshold.
    pub fn with_flick_velocity(mut self, velocity: f64) -> Self {
        self.flick_velocity = velocity;
        self
    }

    /// Set the scroll-dismiss distance.
    pub fn with_scroll_dismiss_distance(mut self, distance: f64) -> Self {
        self.scroll_dismiss_distance = distance;
        self
    }

    /// Set the panel inset.
    pub fn with_panel_inset(mut self, inset: Vec2) -> Self {
        self.panel_inset = inset;
        self
    }

    /// Set the tap slop.
    pub fn with_tap_slop(mut self, slop: f64) -> Self {
        self.tap_slop = slop;
        self
    }

    /// Set the pan release policy.
    pub fn with_release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.release_policy = policy;
        self
    }

    /// Durations of zero make transient phases complete on the next tick.
    pub fn immediate() -> Self {
        Self::default()
            .with_expand_duration(Duration::ZERO)
            .with_dismiss_duration(Duration::ZERO)
    }
}

/// Remote endpoints and cache sizing for enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    /// Dictionary base URL; the percent-encoded word is appended
    pub dictionary_base_url: String,
    /// Image search URL; `query` and `per_page` are added as parameters
    pub image_search_url: String,
    /// Image search access key, sent as `Authorization: Client-ID <key>`
    pub image_api_key: Option<String>,
    /// Entries per cache (meanings, image lists, image data)
    pub cache_capacity: usize,
    /// Number of image results requested per search
    pub image_results_per_page: u32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            dictionary_base_url: DEFAULT_DICTIONARY_URL.to_string(),
            image_search_url: DEFAULT_IMAGE_SEARCH_URL.to_string(),
            image_api_key: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            image_results_per_page: 10,
        }
    }
}

impl EnrichmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dictionary base URL.
    pub fn with_dictionary_base_url(mut self, url: impl Into<String>) -> Self {
        self.dictionary_base_url = url.into();
        self
    }

    /// Set the image search URL.
    pub fn with_image_search_url(mut self, url: impl Into<String>) -> Self {
        self.image_search_url = url.into();
        self
    }

    /// Set the image search access key.
    pub fn with_image_api_key(mut self, key: impl Into<String>) -> Self {
        self.image_api_key = Some(key.into());
        self
    }

    /// Set the per-cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the number of image results requested.
    pub fn with_image_results_per_page(mut self, count: u32) -> Self {
        self.image_results_per_page = count;
        self
    }

    /// Build from defaults overridden by `TAPPABLE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TAPPABLE_DICTIONARY_URL") {
            config = config.with_dictionary_base_url(url);
        }
        if let Ok(url) = std::env::var("TAPPABLE_IMAGE_SEARCH_URL") {
            config = config.with_image_search_url(url);
        }
        if let Ok(key) = std::env::var("TAPPABLE_IMAGE_API_KEY") {
            if !key.trim().is_empty() {
                config = config.with_image_api_key(key.trim());
            }
        }
        if let Ok(raw) = std::env::var("TAPPABLE_CACHE_CAPACITY") {
            match raw.parse::<usize>() {
                Ok(capacity) => config = config.with_cache_capacity(capacity),
                Err(_) => tracing::warn!("Ignoring invalid TAPPABLE_CACHE_CAPACITY={:?}", raw),
            }
        }

        config
    }
}
