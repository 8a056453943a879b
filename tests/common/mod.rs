//! Shared test support: a deliberately boring LRU reference.
//!
//! `TreeLru` keeps a hash index from key to value plus a tree of recency
//! stamps, the textbook two-structure shape the fused cache collapses into
//! one buffer. Both integration suites drive it next to `FusedLru` through
//! the shared traits and require identical observable behavior.

#![allow(dead_code)]

use std::collections::BTreeMap;

use fusedlru::layout::SENTINEL;
use fusedlru::traits::{IntCache, IntLruCache};
use rustc_hash::FxHashMap;

struct Entry {
    value: i32,
    stamp: u64,
}

/// Tree-map-backed LRU reference implementation.
pub struct TreeLru {
    cache_size: usize,
    entries: FxHashMap<i32, Entry>,
    /// Recency order, oldest stamp first.
    recency: BTreeMap<u64, i32>,
    clock: u64,
}

impl TreeLru {
    pub fn new(cache_size: usize) -> Self {
        Self {
            cache_size,
            entries: FxHashMap::default(),
            recency: BTreeMap::new(),
            clock: 0,
        }
    }

    /// Snapshot of the present keys, in no particular order.
    pub fn keys(&self) -> Vec<i32> {
        self.entries.keys().copied().collect()
    }

    fn next_stamp(&mut self) -> u64 {
        let stamp = self.clock;
        self.clock += 1;
        stamp
    }

    fn refresh(&mut self, key: i32) {
        let stamp = self.next_stamp();
        let entry = self.entries.get_mut(&key).expect("refreshing absent key");
        self.recency.remove(&entry.stamp);
        entry.stamp = stamp;
        self.recency.insert(stamp, key);
    }
}

impl IntCache for TreeLru {
    fn put(&mut self, key: i32, value: i32) -> i32 {
        if self.entries.contains_key(&key) {
            self.refresh(key);
            let entry = self.entries.get_mut(&key).unwrap();
            return std::mem::replace(&mut entry.value, value);
        }
        if self.entries.len() == self.cache_size {
            let (_, victim) = self.recency.pop_first().expect("full cache has entries");
            self.entries.remove(&victim);
        }
        let stamp = self.next_stamp();
        self.entries.insert(key, Entry { value, stamp });
        self.recency.insert(stamp, key);
        SENTINEL
    }

    fn get(&mut self, key: i32) -> i32 {
        if !self.entries.contains_key(&key) {
            return SENTINEL;
        }
        self.refresh(key);
        self.entries[&key].value
    }

    fn peek(&self, key: i32) -> i32 {
        self.entries.get(&key).map_or(SENTINEL, |e| e.value)
    }

    fn contains(&self, key: i32) -> bool {
        self.entries.contains_key(&key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.cache_size
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}

impl IntLruCache for TreeLru {
    fn remove(&mut self, key: i32) -> i32 {
        match self.entries.remove(&key) {
            Some(entry) => {
                self.recency.remove(&entry.stamp);
                entry.value
            }
            None => SENTINEL,
        }
    }

    fn pop_lru(&mut self) -> Option<(i32, i32)> {
        let (_, key) = self.recency.pop_first()?;
        let entry = self.entries.remove(&key).expect("recency entry has a key");
        Some((key, entry.value))
    }

    fn peek_lru(&self) -> Option<(i32, i32)> {
        let (_, &key) = self.recency.iter().next()?;
        Some((key, self.entries[&key].value))
    }

    fn touch(&mut self, key: i32) -> bool {
        if !self.entries.contains_key(&key) {
            return false;
        }
        self.refresh(key);
        true
    }
}
