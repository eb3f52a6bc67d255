//! Injectable prompt cache with a time-to-live.
//!
//! The cache is a plain value owned by whoever builds the generator, never
//! process-global state. Entries are keyed by the normalized prompt, evicted
//! least-recently-used once `capacity` is reached, and dropped on read once
//! older than `ttl`. A cache only saves work; it never changes what a
//! generator returns for a fresh prompt.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::debug;

use crate::error::GeneratorError;
use crate::generator::{normalize_prompt, validate_prompt, GeneratedPattern, PatternGenerator};

pub const DEFAULT_CACHE_CAPACITY: usize = 128;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    pattern: GeneratedPattern,
    inserted: Instant,
}

/// Bounded LRU of generated patterns with per-entry expiry.
#[derive(Debug)]
pub struct PromptCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl PromptCache {
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Live entry for `key`, if any. Expired entries are removed.
    pub fn get(&self, key: &str) -> Option<GeneratedPattern> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.inserted.elapsed() < self.ttl => {
                return Some(entry.pattern.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
            debug!("prompt_cache_expired");
        }
        None
    }

    pub fn insert(&self, key: String, pattern: GeneratedPattern) {
        self.lock().put(
            key,
            CacheEntry {
                pattern,
                inserted: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        // Entries are plain data; a panic elsewhere cannot leave them torn.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PromptCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }
}

/// Wraps a generator with a shared [`PromptCache`].
#[derive(Debug)]
pub struct CachedGenerator<G> {
    inner: G,
    cache: Arc<PromptCache>,
}

impl<G: PatternGenerator> CachedGenerator<G> {
    pub fn new(inner: G, cache: Arc<PromptCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<PromptCache> {
        &self.cache
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: PatternGenerator> PatternGenerator for CachedGenerator<G> {
    fn generate(&self, prompt: &str) -> Result<GeneratedPattern, GeneratorError> {
        validate_prompt(prompt)?;
        let key = normalize_prompt(prompt);
        if let Some(hit) = self.cache.get(&key) {
            debug!("prompt_cache_hit");
            return Ok(hit);
        }

        debug!("prompt_cache_miss");
        let generated = self.inner.generate(prompt)?;
        self.cache.insert(key, generated.clone());
        Ok(generated)
    }
}
