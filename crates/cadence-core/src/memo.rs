// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded memoization.
//!
//! [`MemoCache`] keeps computed values keyed by their input and evicts the
//! least-recently-used key once a capacity is reached. [`Memoized`] bundles a
//! cache with the function it memoizes. Neither depends on the scheduler.
//!
//! The wrapped function must be a pure function of its input; the cache has no
//! way to detect hidden state.

use lru::LruCache;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Counters describing how a cache has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute the value.
    pub misses: u64,
    /// Keys dropped to make room for new ones.
    pub evictions: u64,
}

impl MemoStats {
    /// Fraction of lookups answered from the cache, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A key/value cache with least-recently-used eviction.
///
/// A capacity of `0` means unbounded: nothing is ever evicted.
pub struct MemoCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    capacity: usize,
    stats: MemoStats,
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        let entries = match NonZeroUsize::new(capacity) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            entries,
            capacity,
            stats: MemoStats::default(),
        }
    }

    /// Creates an empty cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Returns the cached value for `key`, computing and storing it with `f` on a miss.
    ///
    /// A hit marks `key` as most recently used and does not call `f`. On a miss
    /// in a full cache the least-recently-used key is evicted before `f` runs.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        match self.try_get_or_insert_with(key, |k| Ok::<V, Infallible>(f(k))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// An error from `f` is returned unchanged and nothing is cached for `key`.
    pub fn try_get_or_insert_with<E, F>(&mut self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(value.clone());
        }
        self.stats.misses += 1;

        if self.capacity > 0 && self.entries.len() >= self.capacity {
            if self.entries.pop_lru().is_some() {
                self.stats.evictions += 1;
                log::trace!("Memo cache full ({} entries), evicted LRU key", self.capacity);
            }
        }

        let value = f(&key)?;
        self.entries.put(key, value.clone());
        Ok(value)
    }

    /// Returns `true` if `key` is cached. Does not change recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured capacity (`0` = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns usage counters.
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    /// Drops every cached entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Hash + Eq, V> fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish()
    }
}

/// A function bundled with the cache of its results.
pub struct Memoized<K: Hash + Eq, V, F> {
    func: F,
    cache: MemoCache<K, V>,
}

impl<K, V, F> Memoized<K, V, F>
where
    K: Hash + Eq,
    V: Clone,
    F: FnMut(&K) -> V,
{
    /// Wraps `func` with a cache of at most `capacity` entries (`0` = unbounded).
    pub fn new(func: F, capacity: usize) -> Self {
        Self {
            func,
            cache: MemoCache::new(capacity),
        }
    }

    /// Returns `func(key)`, from the cache when possible.
    pub fn call(&mut self, key: K) -> V {
        let func = &mut self.func;
        self.cache.get_or_insert_with(key, |k| func(k))
    }

    /// Read access to the underlying cache.
    pub fn cache(&self) -> &MemoCache<K, V> {
        &self.cache
    }

    /// Drops every cached result.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<K: Hash + Eq, V, F> fmt::Debug for Memoized<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cache", &self.cache)
            .finish()
    }
}
