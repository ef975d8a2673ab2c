//! LRU cache for compiled policy patterns
//!
//! Shared by every thread evaluating a `RegexChecker`, so the LRU list sits
//! behind a mutex. Compilation happens under the lock: a pattern compiles at
//! most once until it is evicted.

use lru::LruCache;
use parking_lot::Mutex;
use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

use super::PatternCompiler;
use crate::error::Result;

/// Cache key for a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    pattern: String,
    start_tag: char,
    end_tag: char,
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Number of compiler invocations
    pub misses: u64,
    pub evictions: u64,
}

struct Inner {
    entries: LruCache<CacheKey, Arc<Regex>>,
    stats: CacheStats,
}

/// Bounded, thread-safe cache of compiled patterns
pub struct PatternCache {
    inner: Mutex<Inner>,
}

impl PatternCache {
    /// Create a new pattern cache with given capacity (at least one entry)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        PatternCache {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Get the compiled form of a tagged pattern, compiling it on a miss
    ///
    /// Compile failures are returned and not cached.
    pub fn get_or_compile(&self, pattern: &str, start_tag: char, end_tag: char) -> Result<Arc<Regex>> {
        let key = CacheKey {
            pattern: pattern.to_string(),
            start_tag,
            end_tag,
        };

        let mut inner = self.inner.lock();
        if let Some(regex) = inner.entries.get(&key) {
            let regex = Arc::clone(regex);
            inner.stats.hits += 1;
            return Ok(regex);
        }

        inner.stats.misses += 1;
        debug!(pattern, "Compiling policy pattern");
        let regex = Arc::new(PatternCompiler::compile(pattern, start_tag, end_tag)?);

        // Key was absent, so anything handed back is the LRU victim
        if let Some((evicted, _)) = inner.entries.push(key, Arc::clone(&regex)) {
            inner.stats.evictions += 1;
            debug!(pattern = %evicted.pattern, "Evicted compiled pattern");
        }

        Ok(regex)
    }

    /// Check whether a pattern is cached, without touching recency
    pub fn contains(&self, pattern: &str, start_tag: char, end_tag: char) -> bool {
        let key = CacheKey {
            pattern: pattern.to_string(),
            start_tag,
            end_tag,
        };
        self.inner.lock().entries.contains(&key)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Maximum number of cached patterns
    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PatternCache")
            .field("len", &inner.entries.len())
            .field("capacity", &inner.entries.cap())
            .field("stats", &inner.stats)
            .finish()
    }
}
