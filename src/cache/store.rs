//! Cache Store Module
//!
//! Thread-safe wrapper around the LRU store holding a group's values.

use parking_lot::Mutex;

use crate::cache::{ByteView, LruCache};

// == Main Cache ==
/// Mutex-guarded LRU store of [`ByteView`]s.
///
/// The LRU is allocated on the first `add`, so a group that never caches
/// anything never allocates a store.
#[derive(Debug)]
pub struct MainCache {
    /// Maximum total weight passed to the LRU (0 = unbounded)
    cache_bytes: usize,
    lru: Mutex<Option<LruCache<ByteView>>>,
}

impl MainCache {
    // == Constructor ==
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            cache_bytes,
            lru: Mutex::new(None),
        }
    }

    // == Add ==
    /// Inserts a value, creating the LRU on first use.
    pub fn add(&self, key: &str, value: ByteView) {
        let mut guard = self.lru.lock();
        guard
            .get_or_insert_with(|| LruCache::new(self.cache_bytes, None))
            .add(key, value);
    }

    // == Get ==
    /// Looks up a value; never allocates the LRU.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.lru.lock();
        (*guard).as_mut()?.get(key).cloned()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        (*self.lru.lock()).as_ref().map_or(0, |lru| lru.len())
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current total weight of cached entries.
    pub fn bytes(&self) -> usize {
        (*self.lru.lock()).as_ref().map_or(0, |lru| lru.bytes())
    }

    #[cfg(test)]
    fn is_initialized(&self) -> bool {
        self.lru.lock().is_some()
    }
}
