//! Trait surface for integer-keyed caches.
//!
//! Two tiers, mirroring the split between universal cache operations and
//! recency-aware ones:
//!
//! | Trait           | Extends       | Purpose                                   |
//! |-----------------|---------------|-------------------------------------------|
//! | [`IntCache`]    | -             | Core int→int operations, sentinel-in-band |
//! | [`IntLruCache`] | [`IntCache`]  | Removal and recency-order access          |
//!
//! The traits exist so that alternative references (a plain tree-map-backed
//! LRU, for instance) can stand in for [`FusedLru`] behind one interface,
//! which is exactly how the differential tests drive the two side by side.
//!
//! Absence is signalled in-band: `put`, `get`, `peek`, and `remove` return
//! [`SENTINEL`] instead of an `Option`, matching the fixed `i32` value
//! domain. Operations on pairs (`pop_lru`, `peek_lru`) have no in-band
//! encoding and use `Option` instead.
//!
//! [`FusedLru`]: crate::cache::FusedLru
//! [`SENTINEL`]: crate::layout::SENTINEL

/// Core operations of an int→int cache with in-band absence.
///
/// Keys are restricted to `[0, i32::MAX]`; the sentinel value `-1` is
/// reserved (see [`SENTINEL`](crate::layout::SENTINEL)).
///
/// # Example
///
/// ```
/// use fusedlru::cache::FusedLru;
/// use fusedlru::traits::IntCache;
///
/// fn warm_cache<C: IntCache>(cache: &mut C, pairs: &[(i32, i32)]) {
///     for &(key, value) in pairs {
///         cache.put(key, value);
///     }
/// }
///
/// let mut cache = FusedLru::new(100, 0.66);
/// warm_cache(&mut cache, &[(1, 10), (2, 20)]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait IntCache {
    /// Inserts a key-value pair, returning the previous value for the key,
    /// or the sentinel if the key was absent. May evict.
    fn put(&mut self, key: i32, value: i32) -> i32;

    /// Returns the value for `key`, or the sentinel if absent. A hit
    /// refreshes the entry's recency.
    fn get(&mut self, key: i32) -> i32;

    /// Returns the value for `key` without touching recency order, or the
    /// sentinel if absent.
    fn peek(&self, key: i32) -> i32;

    /// Returns `true` if `key` is present, without touching recency order.
    ///
    /// Unlike comparing [`peek`](Self::peek) against the sentinel, this
    /// stays accurate for entries whose stored *value* is `-1`.
    fn contains(&self, key: i32) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache will hold.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Recency-aware operations over an [`IntCache`].
///
/// # Example
///
/// ```
/// use fusedlru::cache::FusedLru;
/// use fusedlru::traits::{IntCache, IntLruCache};
///
/// let mut cache = FusedLru::new(3, 0.66);
/// cache.put(1, 10);
/// cache.put(2, 20);
///
/// // Key 1 is the oldest entry.
/// assert_eq!(cache.peek_lru(), Some((1, 10)));
///
/// // Touching it moves key 2 to the cold end.
/// assert!(cache.touch(1));
/// assert_eq!(cache.pop_lru(), Some((2, 20)));
/// ```
pub trait IntLruCache: IntCache {
    /// Removes `key`, returning its value, or the sentinel if absent.
    fn remove(&mut self, key: i32) -> i32;

    /// Removes and returns the least recently used entry, or `None` if the
    /// cache is empty.
    fn pop_lru(&mut self) -> Option<(i32, i32)>;

    /// Returns the least recently used entry without removing it or
    /// refreshing its recency.
    fn peek_lru(&self) -> Option<(i32, i32)>;

    /// Marks `key` as most recently used without returning its value.
    /// Returns `true` if the key was present.
    fn touch(&mut self, key: i32) -> bool;
}
