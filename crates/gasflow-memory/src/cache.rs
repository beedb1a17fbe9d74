//! Fixed-capacity observation cache in most-recently-used order.
//!
//! Backed by a flat `Vec` allocated once at full capacity. Reordering is a
//! slice rotation; eviction overwrites the least-recently-used slot and
//! rotates it to the front, so the cache never reallocates after construction.

use serde::{Deserialize, Serialize};

use gasflow_core::models::Observation;

use crate::neighbor::{self, NeighborMatch};

/// What [`ObservationCache::insert_or_touch`] did with the observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheInsert {
    /// An identical entry existed at this index and was moved to the front.
    Touched(usize),
    /// A 2-of-3 partial match at this index was corrected and moved to the front.
    Corrected(usize),
    /// Added at the front; the cache grew by one.
    Inserted,
    /// Cache was full: the least-recently-used entry (returned) was overwritten.
    Evicted(Observation),
}

/// Running counters for cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub inserts: u64,
    pub touches: u64,
    pub corrections: u64,
    pub evictions: u64,
}

/// Bounded LRU list of observations. Index 0 is the most recently used.
///
/// Not thread-safe: every mutation takes `&mut self` and the cache is owned by
/// the control loop.
#[derive(Debug, Clone)]
pub struct ObservationCache {
    entries: Vec<Observation>,
    capacity: usize,
    stats: CacheStats,
}

impl ObservationCache {
    /// Create an empty cache. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            stats: CacheStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.entries
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move the entry at `index` to the front, shifting `[0, index)` one slot
    /// toward the tail in their original order. Entries after `index` are
    /// untouched.
    ///
    /// Returns `false` and changes nothing when `index >= len`.
    pub fn move_to_front(&mut self, index: usize) -> bool {
        if !self.rotate_to_front(index) {
            return false;
        }
        self.stats.touches += 1;
        true
    }

    /// Merge an observation into the cache.
    ///
    /// A perfect or partial duplicate of an existing entry only refreshes that
    /// entry's recency (partial matches are corrected first). Anything else is
    /// inserted at the front, evicting the least-recently-used entry when full.
    pub fn insert_or_touch(&mut self, observation: Observation) -> CacheInsert {
        match neighbor::find(&mut self.entries, &observation) {
            Some(NeighborMatch::Perfect(index)) => {
                self.move_to_front(index);
                CacheInsert::Touched(index)
            }
            Some(NeighborMatch::Corrected(index)) => {
                self.stats.corrections += 1;
                self.move_to_front(index);
                CacheInsert::Corrected(index)
            }
            None => match self.evict_and_insert_at_front(observation) {
                Some(evicted) => CacheInsert::Evicted(evicted),
                None => CacheInsert::Inserted,
            },
        }
    }

    /// Put `observation` at the front without a duplicate check.
    ///
    /// When the cache is full the last slot's fields are overwritten and that
    /// slot is rotated to the front; the previous values are returned.
    pub fn evict_and_insert_at_front(&mut self, observation: Observation) -> Option<Observation> {
        if !self.is_full() {
            self.entries.insert(0, observation);
            self.stats.inserts += 1;
            return None;
        }

        let last = self.capacity - 1;
        let evicted = std::mem::replace(&mut self.entries[last], observation);
        self.rotate_to_front(last);
        self.stats.inserts += 1;
        self.stats.evictions += 1;
        tracing::trace!(?evicted, "cache full, overwrote least-recently-used entry");
        Some(evicted)
    }

    /// Seed the cache from an existing sequence, oldest first, so the last
    /// observation ends up most recent.
    pub fn warm<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = Observation>,
    {
        for observation in observations {
            self.insert_or_touch(observation);
        }
    }

    fn rotate_to_front(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries[..=index].rotate_right(1);
        true
    }
}
