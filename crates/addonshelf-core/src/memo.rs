// Single-slot memoization for the derivation pipeline
use tracing::debug;

/// Most-recent-arguments cache with exactly one entry.
///
/// The pipeline is called on every state change, usually with arguments
/// identical to the previous call, so remembering just the last (key, value)
/// pair captures nearly all the wins without an eviction policy. A hit
/// requires the new key to compare equal to the stored one; a miss replaces
/// the slot. Owned explicitly by each engine - there is no hidden
/// module-level cache.
#[derive(Debug)]
pub struct MemoSlot<K, V> {
    slot: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

// Manual impl: an empty slot needs no bounds on K or V
impl<K, V> Default for MemoSlot<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V: Clone> MemoSlot<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value when `key` matches the previous call,
    /// otherwise compute, store, and return a fresh one.
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some((cached_key, cached_value)) = &self.slot {
            if *cached_key == key {
                self.hits += 1;
                debug!(hits = self.hits, "memo hit, reusing previous result");
                return cached_value.clone();
            }
        }
        self.misses += 1;
        debug!(misses = self.misses, "memo miss, recomputing");
        let value = compute(&key);
        self.slot = Some((key, value.clone()));
        value
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
