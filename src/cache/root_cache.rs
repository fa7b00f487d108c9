//! Bounded root cache with sampled least-frequently-used eviction

use super::{CacheKey, CacheStats, HashCache};
use crate::model::Root;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Entries inspected per eviction; the least used of them is dropped.
const EVICTION_SAMPLES: usize = 5;

#[derive(Clone, Debug)]
struct Slot {
    key: CacheKey,
    root: Root,
    frequency: u32,
}

/// Slot vector plus key index, so random sampling is O(1)
#[derive(Default)]
struct Slots {
    entries: Vec<Slot>,
    index: HashMap<CacheKey, usize>,
}

impl Slots {
    fn evict_one(&mut self, rng: &mut impl Rng) -> Option<CacheKey> {
        if self.entries.is_empty() {
            return None;
        }
        let mut victim = rng.gen_range(0..self.entries.len());
        for _ in 1..EVICTION_SAMPLES {
            let candidate = rng.gen_range(0..self.entries.len());
            if self.entries[candidate].frequency < self.entries[victim].frequency {
                victim = candidate;
            }
        }

        let removed = self.entries.swap_remove(victim);
        self.index.remove(&removed.key);
        if let Some(moved) = self.entries.get(victim) {
            self.index.insert(moved.key, victim);
        }
        Some(removed.key)
    }
}

/// Concurrent root cache guarded by a single mutex
///
/// Lookups and inserts are short critical sections without I/O, so one
/// coarse lock is enough.
pub struct RootCache {
    slots: Mutex<Slots>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

impl RootCache {
    /// Create a cache holding at most `capacity` roots
    pub fn new(capacity: usize) -> Self {
        RootCache {
            slots: Mutex::new(Slots::default()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl HashCache for RootCache {
    fn get(&self, key: &CacheKey) -> Option<Root> {
        let mut slots = self.slots.lock();
        let found = match slots.index.get(key).copied() {
            Some(position) => {
                let slot = &mut slots.entries[position];
                slot.frequency = slot.frequency.saturating_add(1);
                Some(slot.root)
            }
            None => None,
        };
        drop(slots);

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(?key, "hash cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(?key, "hash cache miss");
        }
        found
    }

    fn put(&self, key: CacheKey, root: Root) {
        if self.capacity == 0 {
            return;
        }
        let mut slots = self.slots.lock();
        if let Some(position) = slots.index.get(&key).copied() {
            slots.entries[position].root = root;
            return;
        }

        if slots.entries.len() >= self.capacity {
            let mut rng = rand::thread_rng();
            if let Some(evicted) = slots.evict_one(&mut rng) {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(?evicted, len = slots.entries.len(), "evicted hash cache entry");
            }
        }

        let position = slots.entries.len();
        slots.entries.push(Slot {
            key,
            root,
            frequency: 1,
        });
        slots.index.insert(key, position);
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            len: self.len(),
            capacity: self.capacity,
        }
    }
}
