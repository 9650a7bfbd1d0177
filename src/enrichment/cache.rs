//! Bounded result cache.
//!
//! Each [`RemoteEnrichmentClient`](super::RemoteEnrichmentClient) owns its
//! own caches, so a fresh client starts empty. Keys are the exact word text
//! (or image URL); no case folding is applied.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

/// Default number of entries per cache
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Thread-safe least-recently-used cache keyed by string.
///
/// Concurrent inserts for the same key are last-write-wins; the values are
/// immutable per key, so it does not matter which write lands.
#[derive(Debug)]
pub struct EnrichmentCache<V> {
    entries: Mutex<LruCache<String, V>>,
}

impl<V: Clone> EnrichmentCache<V> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, V>> {
        // The cache holds plain data; a poisoned lock still holds valid entries
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a key, marking it as most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key).cloned()
    }

    /// Insert or replace a value.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some((evicted, _)) = self.lock().push(key.clone(), value) {
            if evicted != key {
                tracing::trace!("Evicted cache entry '{}'", evicted);
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<V: Clone> Default for EnrichmentCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache = EnrichmentCache::new(4);
        cache.insert("lamet", 1);
        assert_eq!(cache.get("lamet"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let cache = EnrichmentCache::new(4);
        cache.insert("Lamet", 1);
        assert_eq!(cache.get("lamet"), None);
        assert!(cache.contains("Lamet"));
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = EnrichmentCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        // touch "a" so "b" becomes the eviction candidate
        assert_eq!(cache.get("a"), Some(1));
        cache.insert("c", 3);

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_overwrite_same_key() {
        let cache = EnrichmentCache::new(2);
        cache.insert("a", 1);
        cache.insert("a", 2);
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache: EnrichmentCache<u8> = EnrichmentCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert("a", 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
