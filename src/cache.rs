//! # Fused LRU cache core
//!
//! [`FusedLru`] is an int→int LRU cache whose hash index and recency list
//! are not two data structures: both live in a single contiguous `i32`
//! buffer, and one probe sequence resolves a key *and* exposes the
//! adjacency pointers needed to splice its entry to the hot end of the
//! recency order.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────────┐
//!   │                      FusedLru (one Box<[i32]>)                      │
//!   │                                                                     │
//!   │   slot 0        slot 1        slot 2        slot 3                  │
//!   │  ┌───────────┬─────────────┬───────────┬─────────────┐              │
//!   │  │ k  v  l  r│ -1  .  .  . │ k  v  l  r│ k  v  l  r  │ ...          │
//!   │  └───────────┴─────────────┴───────────┴─────────────┘              │
//!   │     ▲            ▲             ▲  │  │                              │
//!   │     │            │             │  │  └── right: offset of the next  │
//!   │     │            │             │  │        (newer) entry, or -1     │
//!   │     │            empty slot    │  └───── left: offset of the prev   │
//!   │     │            (key == -1)   │           (older) entry, or -1     │
//!   │     │                          │                                    │
//!   │  linear probing: hash(k) ──► next slot ──► ... (wraps via mask)     │
//!   │                                                                     │
//!   │  head ──► oldest entry (eviction victim)                            │
//!   │  tail ──► newest entry (most recently put/got)                      │
//!   └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation starts with the same linear probe from the key's home
//! slot. Because a slot's list links sit right next to its key and value,
//! the splice to the tail touches memory the probe already pulled into
//! cache. Collisions are resolved by linear probing; deletions are
//! tombstone-free: [backshift](FusedLru::remove) slides later entries of
//! the probe chain backward whenever the move preserves reachability,
//! fixing up the moved entry's list neighbors as it goes.
//!
//! ## Operations
//!
//! | Method      | Recency effect      | Complexity |
//! |-------------|---------------------|------------|
//! | `put`       | entry becomes MRU   | O(1) avg   |
//! | `get`       | hit becomes MRU     | O(1) avg   |
//! | `peek`      | none                | O(1) avg   |
//! | `contains`  | none                | O(1) avg   |
//! | `touch`     | hit becomes MRU     | O(1) avg   |
//! | `remove`    | entry leaves list   | O(1) avg   |
//! | `pop_lru`   | head leaves list    | O(1) avg   |
//! | `peek_lru`  | none                | O(1)       |
//! | `clear`     | list emptied        | O(capacity)|
//!
//! ## Key and value domains
//!
//! `-1` ([`SENTINEL`]) is the universal absence marker, so keys are
//! restricted to `[0, i32::MAX]` and a *returned* `-1` means "not present".
//! Storing `-1` as a value is legal but indistinguishable from absence in
//! `get`/`peek`; use [`contains`](FusedLru::contains) when that matters.
//!
//! ## When to use
//!
//! **Use when:**
//! - Keys and values fit in 32 bits and throughput matters
//! - Steady-state operation must not allocate
//!
//! **Avoid when:**
//! - You need generic key/value types (use a node-based LRU)
//! - You need thread safety (wrap in external mutual exclusion, or don't)
//!
//! ## Thread safety
//!
//! `FusedLru` is a purely sequential structure: no locks, no atomics, no
//! interior mutability. It is `Send` (the buffer is owned); sharing it
//! across threads requires external synchronization.

use std::fmt;

use crate::error::{ConfigError, InvariantError};
use crate::layout::{
    self, KEY_OFFSET, LEFT_OFFSET, RIGHT_OFFSET, SENTINEL, SLOT_INTS, VALUE_OFFSET,
};
use crate::traits::{IntCache, IntLruCache};

/// An integer-keyed LRU cache in a single flat buffer.
///
/// Construction chooses a power-of-two hash-table capacity from the
/// requested `cache_size` and `load_factor` (see
/// [`CacheBuilder`](crate::builder::CacheBuilder)); eviction fires on the
/// logical `cache_size`, leaving table slack that keeps probes short.
///
/// # Example
///
/// ```
/// use fusedlru::cache::FusedLru;
/// use fusedlru::layout::SENTINEL;
///
/// let mut cache = FusedLru::new(3, 0.66);
///
/// assert_eq!(cache.put(1, 10), SENTINEL);
/// assert_eq!(cache.put(2, 20), SENTINEL);
/// assert_eq!(cache.put(3, 30), SENTINEL);
///
/// // A fourth insert evicts key 1, the least recently used.
/// cache.put(4, 40);
/// assert_eq!(cache.get(1), SENTINEL);
/// assert_eq!(cache.get(4), 40);
/// ```
pub struct FusedLru {
    /// The fused buffer: `table_capacity * 4` integers, all slots either
    /// occupied or fully sentinel-keyed.
    data: Box<[i32]>,
    /// Logical capacity: eviction threshold, not the table size.
    cache_size: i32,
    /// `table_capacity - 1`; folds a hash to a slot number.
    slot_mask: i32,
    /// `table_capacity * 4 - 1`; wraps an absolute offset during probing.
    offset_mask: i32,
    size: i32,
    /// Offset of the least recently used entry, or [`SENTINEL`].
    head: i32,
    /// Offset of the most recently used entry, or [`SENTINEL`].
    tail: i32,
}

impl FusedLru {
    /// Creates a cache holding at most `cache_size` entries, with a hash
    /// table sized for the given `load_factor`.
    ///
    /// # Panics
    ///
    /// Panics when the configuration is invalid; use
    /// [`try_new`](Self::try_new) to handle that as an error.
    pub fn new(cache_size: i32, load_factor: f32) -> Self {
        match Self::try_new(cache_size, load_factor) {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }

    /// Fallible counterpart of [`new`](Self::new).
    ///
    /// Fails when `cache_size < 2`, when `load_factor` is outside `(0, 1)`,
    /// or when the derived table would be too large for 32-bit slot
    /// offsets.
    ///
    /// # Example
    ///
    /// ```
    /// use fusedlru::cache::FusedLru;
    ///
    /// assert!(FusedLru::try_new(100, 0.66).is_ok());
    /// assert!(FusedLru::try_new(100, 0.0).is_err());
    /// ```
    pub fn try_new(cache_size: i32, load_factor: f32) -> Result<Self, ConfigError> {
        let capacity = layout::table_capacity(cache_size, load_factor)?;
        let buffer_len = capacity * SLOT_INTS as usize;
        Ok(FusedLru {
            data: vec![SENTINEL; buffer_len].into_boxed_slice(),
            cache_size,
            slot_mask: (capacity - 1) as i32,
            offset_mask: (buffer_len - 1) as i32,
            size: 0,
            head: SENTINEL,
            tail: SENTINEL,
        })
    }

    // -- slot field access --------------------------------------------------

    #[inline(always)]
    fn key_at(&self, pos: i32) -> i32 {
        self.data[(pos + KEY_OFFSET) as usize]
    }

    #[inline(always)]
    fn set_key(&mut self, pos: i32, key: i32) {
        self.data[(pos + KEY_OFFSET) as usize] = key;
    }

    #[inline(always)]
    fn value_at(&self, pos: i32) -> i32 {
        self.data[(pos + VALUE_OFFSET) as usize]
    }

    #[inline(always)]
    fn set_value(&mut self, pos: i32, value: i32) {
        self.data[(pos + VALUE_OFFSET) as usize] = value;
    }

    #[inline(always)]
    fn left_at(&self, pos: i32) -> i32 {
        self.data[(pos + LEFT_OFFSET) as usize]
    }

    #[inline(always)]
    fn set_left(&mut self, pos: i32, left: i32) {
        self.data[(pos + LEFT_OFFSET) as usize] = left;
    }

    #[inline(always)]
    fn right_at(&self, pos: i32) -> i32 {
        self.data[(pos + RIGHT_OFFSET) as usize]
    }

    #[inline(always)]
    fn set_right(&mut self, pos: i32, right: i32) {
        self.data[(pos + RIGHT_OFFSET) as usize] = right;
    }

    #[inline(always)]
    fn home_slot(&self, key: i32) -> i32 {
        layout::home_slot(key, self.slot_mask)
    }

    #[inline(always)]
    fn next_slot(&self, pos: i32) -> i32 {
        (pos + SLOT_INTS) & self.offset_mask
    }

    // -- hash index ---------------------------------------------------------

    /// Probes for `key`, returning its slot offset or [`SENTINEL`].
    ///
    /// The walk stops at the first empty slot: backshift deletion
    /// guarantees no live key ever sits beyond one on its probe path.
    #[inline]
    fn find_slot(&self, key: i32) -> i32 {
        let home = self.home_slot(key);
        let mut pos = home;
        loop {
            let k = self.key_at(pos);
            if k == SENTINEL {
                return SENTINEL;
            }
            if k == key {
                return pos;
            }
            pos = self.next_slot(pos);
            if pos == home {
                return SENTINEL;
            }
        }
    }

    /// Backshift deletion: refills the slot freed at `pos` by walking the
    /// probe chain forward and sliding back every entry that stays
    /// reachable from its home slot after the move.
    ///
    /// Each relocation also rewires the moved entry's recency-list
    /// neighbors and, when the moved slot was `head` or `tail`, the list
    /// endpoint itself. Terminates at the first empty slot, which becomes
    /// the final hole.
    fn shift_keys(&mut self, mut pos: i32) {
        loop {
            let free = pos;
            pos = self.next_slot(pos);
            loop {
                let key = self.key_at(pos);
                if key == SENTINEL {
                    self.set_key(free, SENTINEL);
                    return;
                }
                let home = self.home_slot(key);
                // The entry at `pos` may drop back into `free` only if its
                // home slot does not lie strictly inside (free, pos]: the
                // probe from `home` must still reach `free` first.
                let movable = if free <= pos {
                    home <= free || home > pos
                } else {
                    pos < home && home <= free
                };
                if movable {
                    break;
                }
                pos = self.next_slot(pos);
            }
            self.set_key(free, self.key_at(pos));
            self.set_value(free, self.value_at(pos));
            let left = self.left_at(pos);
            let right = self.right_at(pos);
            self.set_left(free, left);
            self.set_right(free, right);
            if left != SENTINEL {
                self.set_right(left, free);
            }
            if right != SENTINEL {
                self.set_left(right, free);
            }
            if pos == self.head {
                self.head = free;
            }
            if pos == self.tail {
                self.tail = free;
            }
        }
    }

    // -- recency list -------------------------------------------------------

    /// Splices the entry at `pos` out of the recency list. The entry's own
    /// `left`/`right` fields are left stale; callers relink or discard it.
    #[inline]
    fn unlink(&mut self, pos: i32) {
        let left = self.left_at(pos);
        let right = self.right_at(pos);
        if left != SENTINEL {
            self.set_right(left, right);
        } else {
            self.head = right;
        }
        if right != SENTINEL {
            self.set_left(right, left);
        } else {
            self.tail = left;
        }
    }

    /// Appends the entry at `pos` after the current tail, making it the
    /// most recently used.
    #[inline]
    fn push_tail(&mut self, pos: i32) {
        if self.tail != SENTINEL {
            self.set_right(self.tail, pos);
        }
        self.set_left(pos, self.tail);
        self.set_right(pos, SENTINEL);
        self.tail = pos;
        if self.head == SENTINEL {
            self.head = pos;
        }
    }

    /// Cheap endpoint consistency checks (debug builds only).
    #[inline(always)]
    fn validate_endpoints(&self) {
        debug_assert_eq!(self.head == SENTINEL, self.size == 0);
        debug_assert_eq!(self.tail == SENTINEL, self.size == 0);
        debug_assert!(self.size >= 0 && self.size <= self.cache_size);
    }

    // -- operations ---------------------------------------------------------

    /// Inserts `key` → `value`, returning the previous value for `key`, or
    /// the sentinel if the key was absent. The entry becomes the most
    /// recently used either way. If the cache is full and the key is new,
    /// the least recently used entry is evicted first.
    ///
    /// # Panics
    ///
    /// Panics if `key` is negative: `-1` is the empty-slot sentinel, and
    /// the remaining negative range is reserved with it.
    ///
    /// # Example
    ///
    /// ```
    /// use fusedlru::cache::FusedLru;
    /// use fusedlru::layout::SENTINEL;
    ///
    /// let mut cache = FusedLru::new(10, 0.66);
    /// assert_eq!(cache.put(7, 70), SENTINEL);
    /// assert_eq!(cache.put(7, 71), 70);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn put(&mut self, key: i32, value: i32) -> i32 {
        assert!(
            key >= 0,
            "negative keys collide with the empty-slot sentinel: {key}"
        );
        assert!(
            self.size <= self.cache_size,
            "entry count {} exceeds cache size {}",
            self.size,
            self.cache_size
        );
        let home = self.home_slot(key);
        let mut pos = home;
        loop {
            let k = self.key_at(pos);
            if k == key {
                let previous = self.value_at(pos);
                self.set_value(pos, value);
                self.unlink(pos);
                self.push_tail(pos);
                self.validate_endpoints();
                return previous;
            }
            if k == SENTINEL {
                if self.size < self.cache_size {
                    self.set_key(pos, key);
                    self.set_value(pos, value);
                    self.push_tail(pos);
                    self.size += 1;
                    self.validate_endpoints();
                    return SENTINEL;
                }
                // Full, and the key is new: evict the LRU entry. Backshift
                // may relocate entries into the empty slot this probe just
                // found, so the probe must restart from the home slot.
                let victim = self.head;
                self.unlink(victim);
                self.shift_keys(victim);
                self.size -= 1;
                break;
            }
            pos = self.next_slot(pos);
        }
        let mut pos = home;
        loop {
            if self.key_at(pos) == SENTINEL {
                self.set_key(pos, key);
                self.set_value(pos, value);
                self.push_tail(pos);
                self.size += 1;
                self.validate_endpoints();
                return SENTINEL;
            }
            pos = self.next_slot(pos);
            if pos == home {
                // The table always has more slots than cache_size, and the
                // eviction above freed one on this very probe path.
                unreachable!("no empty slot on the probe path after eviction");
            }
        }
    }

    /// Returns the value for `key` and marks the entry most recently used,
    /// or returns the sentinel if the key is absent.
    ///
    /// A hit is a *mutating* operation: it changes eviction order. Use
    /// [`peek`](Self::peek) for a read that leaves recency alone.
    ///
    /// # Example
    ///
    /// ```
    /// use fusedlru::cache::FusedLru;
    /// use fusedlru::layout::SENTINEL;
    ///
    /// let mut cache = FusedLru::new(3, 0.66);
    /// cache.put(1, 10);
    /// assert_eq!(cache.get(1), 10);
    /// assert_eq!(cache.get(99), SENTINEL);
    /// ```
    #[inline]
    pub fn get(&mut self, key: i32) -> i32 {
        debug_assert!(key >= 0, "negative key: {key}");
        let pos = self.find_slot(key);
        if pos == SENTINEL {
            return SENTINEL;
        }
        self.unlink(pos);
        self.push_tail(pos);
        self.validate_endpoints();
        self.value_at(pos)
    }

    /// Returns the value for `key` without updating recency order, or the
    /// sentinel if absent.
    #[inline]
    pub fn peek(&self, key: i32) -> i32 {
        debug_assert!(key >= 0, "negative key: {key}");
        let pos = self.find_slot(key);
        if pos == SENTINEL {
            return SENTINEL;
        }
        self.value_at(pos)
    }

    /// Returns `true` if `key` is present. Does not update recency order,
    /// and stays accurate for entries whose stored value is `-1`.
    #[inline]
    pub fn contains(&self, key: i32) -> bool {
        debug_assert!(key >= 0, "negative key: {key}");
        self.find_slot(key) != SENTINEL
    }

    /// Marks `key` as most recently used without reading its value.
    /// Returns `true` if the key was present.
    #[inline]
    pub fn touch(&mut self, key: i32) -> bool {
        debug_assert!(key >= 0, "negative key: {key}");
        let pos = self.find_slot(key);
        if pos == SENTINEL {
            return false;
        }
        self.unlink(pos);
        self.push_tail(pos);
        self.validate_endpoints();
        true
    }

    /// Removes `key`, returning its value, or the sentinel if absent.
    ///
    /// The freed slot is refilled by backshift, so no tombstones
    /// accumulate and later probes stay short.
    ///
    /// # Example
    ///
    /// ```
    /// use fusedlru::cache::FusedLru;
    /// use fusedlru::layout::SENTINEL;
    ///
    /// let mut cache = FusedLru::new(3, 0.66);
    /// cache.put(1, 10);
    /// assert_eq!(cache.remove(1), 10);
    /// assert_eq!(cache.remove(1), SENTINEL);
    /// assert!(cache.is_empty());
    /// ```
    pub fn remove(&mut self, key: i32) -> i32 {
        debug_assert!(key >= 0, "negative key: {key}");
        let pos = self.find_slot(key);
        if pos == SENTINEL {
            return SENTINEL;
        }
        let removed = self.value_at(pos);
        self.unlink(pos);
        self.shift_keys(pos);
        self.size -= 1;
        self.validate_endpoints();
        removed
    }

    /// Removes and returns the least recently used entry, or `None` if the
    /// cache is empty.
    pub fn pop_lru(&mut self) -> Option<(i32, i32)> {
        if self.head == SENTINEL {
            return None;
        }
        let pos = self.head;
        let entry = (self.key_at(pos), self.value_at(pos));
        self.unlink(pos);
        self.shift_keys(pos);
        self.size -= 1;
        self.validate_endpoints();
        Some(entry)
    }

    /// Returns the least recently used entry without removing it.
    #[inline]
    pub fn peek_lru(&self) -> Option<(i32, i32)> {
        if self.head == SENTINEL {
            return None;
        }
        Some((self.key_at(self.head), self.value_at(self.head)))
    }

    /// Removes all entries. The buffer is retained and refilled with the
    /// sentinel, so the cache is immediately reusable without reallocating.
    pub fn clear(&mut self) {
        self.data.fill(SENTINEL);
        self.size = 0;
        self.head = SENTINEL;
        self.tail = SENTINEL;
    }

    /// Returns the current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.size as usize
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the logical capacity: the entry count at which the next
    /// new-key insert evicts.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cache_size as usize
    }

    /// Returns the hash-table capacity in slots. Always a power of two
    /// strictly greater than [`capacity`](Self::capacity); the slack keeps
    /// probe chains short.
    #[inline]
    pub fn table_capacity(&self) -> usize {
        (self.slot_mask + 1) as usize
    }

    // -- diagnostics --------------------------------------------------------

    /// Validates the full set of structural invariants, returning a
    /// description of the first violation found.
    ///
    /// Checks size bounds, the occupied-slot count, `head`/`tail`
    /// consistency, the recency-list links in both directions, and that
    /// every stored key is reachable by its probe sequence (which also
    /// rules out duplicates). Intended for tests and debugging; it walks
    /// the whole table.
    ///
    /// # Example
    ///
    /// ```
    /// use fusedlru::cache::FusedLru;
    ///
    /// let mut cache = FusedLru::new(10, 0.66);
    /// cache.put(1, 10);
    /// cache.check_invariants().expect("structure is consistent");
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.size < 0 || self.size > self.cache_size {
            return Err(InvariantError::new(format!(
                "size {} outside [0, {}]",
                self.size, self.cache_size
            )));
        }

        let buffer_len = self.data.len() as i32;
        let mut occupied = 0;
        let mut pos = 0;
        while pos < buffer_len {
            if self.key_at(pos) != SENTINEL {
                occupied += 1;
            }
            pos += SLOT_INTS;
        }
        if occupied != self.size {
            return Err(InvariantError::new(format!(
                "{} occupied slots but size is {}",
                occupied, self.size
            )));
        }

        if (self.head == SENTINEL) != (self.size == 0) {
            return Err(InvariantError::new(format!(
                "head {} disagrees with size {}",
                self.head, self.size
            )));
        }
        if (self.tail == SENTINEL) != (self.size == 0) {
            return Err(InvariantError::new(format!(
                "tail {} disagrees with size {}",
                self.tail, self.size
            )));
        }

        // Forward walk: exactly `size` entries, consistent back-links,
        // ending at `tail`.
        let mut visited = 0;
        let mut prev = SENTINEL;
        let mut pos = self.head;
        while pos != SENTINEL {
            if self.key_at(pos) == SENTINEL {
                return Err(InvariantError::new(format!(
                    "recency list visits empty slot {pos}"
                )));
            }
            if self.left_at(pos) != prev {
                return Err(InvariantError::new(format!(
                    "left link of slot {} is {}, expected {}",
                    pos,
                    self.left_at(pos),
                    prev
                )));
            }
            visited += 1;
            if visited > self.size {
                return Err(InvariantError::new("cycle in recency list"));
            }
            prev = pos;
            pos = self.right_at(pos);
        }
        if visited != self.size {
            return Err(InvariantError::new(format!(
                "recency list has {} entries but size is {}",
                visited, self.size
            )));
        }
        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "recency list ends at {} but tail is {}",
                prev, self.tail
            )));
        }

        // Probe reachability: every stored key's probe sequence reaches its
        // slot before any empty slot. Hitting a different slot with the
        // same key would mean a duplicate.
        let mut pos = 0;
        while pos < buffer_len {
            let key = self.key_at(pos);
            if key != SENTINEL {
                let home = self.home_slot(key);
                let mut probe = home;
                loop {
                    let k = self.key_at(probe);
                    if k == SENTINEL {
                        return Err(InvariantError::new(format!(
                            "key {key} at slot {pos} unreachable: empty slot \
                             {probe} on its probe path"
                        )));
                    }
                    if k == key {
                        if probe != pos {
                            return Err(InvariantError::new(format!(
                                "key {key} stored at slots {probe} and {pos}"
                            )));
                        }
                        break;
                    }
                    probe = self.next_slot(probe);
                    if probe == home {
                        return Err(InvariantError::new(format!(
                            "probe for key {key} wrapped the whole table"
                        )));
                    }
                }
            }
            pos += SLOT_INTS;
        }

        Ok(())
    }
}

impl fmt::Debug for FusedLru {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FusedLru")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("table_capacity", &self.table_capacity())
            .finish_non_exhaustive()
    }
}

impl IntCache for FusedLru {
    #[inline]
    fn put(&mut self, key: i32, value: i32) -> i32 {
        FusedLru::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: i32) -> i32 {
        FusedLru::get(self, key)
    }

    #[inline]
    fn peek(&self, key: i32) -> i32 {
        FusedLru::peek(self, key)
    }

    #[inline]
    fn contains(&self, key: i32) -> bool {
        FusedLru::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        FusedLru::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        FusedLru::capacity(self)
    }

    fn clear(&mut self) {
        FusedLru::clear(self)
    }
}

impl IntLruCache for FusedLru {
    #[inline]
    fn remove(&mut self, key: i32) -> i32 {
        FusedLru::remove(self, key)
    }

    #[inline]
    fn pop_lru(&mut self) -> Option<(i32, i32)> {
        FusedLru::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(i32, i32)> {
        FusedLru::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: i32) -> bool {
        FusedLru::touch(self, key)
    }
}
