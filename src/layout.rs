//! Slot geometry and table sizing for the fused buffer.
//!
//! The cache stores everything, hash-table entries *and* recency-list
//! links, in one contiguous `i32` buffer. Each logical slot spans four
//! consecutive integers:
//!
//! ```text
//!   offset   +0     +1      +2      +3
//!          ┌──────┬───────┬───────┬───────┐
//!          │ key  │ value │ left  │ right │   16 bytes per slot, so a
//!          └──────┴───────┴───────┴───────┘   64B cache line holds 4 slots
//! ```
//!
//! A slot is addressed by its absolute offset into the buffer (always a
//! multiple of `SLOT_INTS`), never by its logical slot number: the same
//! integer is used for hash-probe arithmetic, for the `left`/`right`
//! neighbor fields, and for the cache's `head`/`tail` cursors. [`SENTINEL`]
//! plays every "absent" role at once (empty key, null neighbor, empty
//! list endpoint), which is why negative user keys are not supported.
//!
//! `home_slot` is the Fibonacci multiplicative mix used by the probe
//! sequence, and `table_capacity` performs the construction-time sizing:
//! round `cache_size / load_factor` up to a power of two so both the slot
//! mask and the offset mask are simple AND operations.

use crate::error::ConfigError;

/// The reserved integer standing for "absent": an empty slot's key, a null
/// recency-list neighbor, and the in-band "no such key" return value.
pub const SENTINEL: i32 = -1;

/// Number of `i32` fields per slot.
pub(crate) const SLOT_INTS: i32 = 4;

/// Field offsets within a slot, relative to the slot's base offset.
pub(crate) const KEY_OFFSET: i32 = 0;
pub(crate) const VALUE_OFFSET: i32 = 1;
pub(crate) const LEFT_OFFSET: i32 = 2;
pub(crate) const RIGHT_OFFSET: i32 = 3;

/// Largest supported table capacity, in slots.
///
/// Slot offsets must stay representable in the `i32` neighbor fields: a
/// table of `2^29` slots ends at offset `2^31 - 4`, the last slot base an
/// `i32` can address. One power of two more and the offsets wrap.
pub(crate) const MAX_TABLE_CAPACITY: u64 = 1 << 29;

/// Fibonacci hashing multiplier (2^32 / φ, as used by fastutil's phiMix).
const PHI_MIX: i32 = 0x9E37_79B9_u32 as i32;

/// Maps a key to its home slot offset for a table with the given slot mask.
///
/// The multiply wraps modulo 2^32 and the shift is the arithmetic shift of
/// `i32`; the mask folds the mixed bits to a slot number, which the final
/// multiply converts to an absolute buffer offset.
#[inline(always)]
pub(crate) fn home_slot(key: i32, slot_mask: i32) -> i32 {
    let h = key.wrapping_mul(PHI_MIX);
    ((h ^ (h >> 16)) & slot_mask) * SLOT_INTS
}

/// Computes the hash-table capacity (in slots) for a requested cache size
/// and load factor: the least power of two ≥ `ceil(cache_size / load_factor)`.
///
/// Fails when `cache_size < 2`, when `load_factor` is not in `(0, 1)`, or
/// when the resulting table would exceed [`MAX_TABLE_CAPACITY`].
pub(crate) fn table_capacity(cache_size: i32, load_factor: f32) -> Result<usize, ConfigError> {
    if cache_size < 2 {
        return Err(ConfigError::new(format!(
            "cache size must be at least 2, got {cache_size}"
        )));
    }
    if !(load_factor > 0.0 && load_factor < 1.0) {
        return Err(ConfigError::new(format!(
            "load factor must be in (0, 1), got {load_factor}"
        )));
    }
    let desired = (cache_size as f64 / load_factor as f64).ceil() as u64;
    if desired > MAX_TABLE_CAPACITY {
        return Err(ConfigError::new(format!(
            "table for cache size {cache_size} at load factor {load_factor} \
             needs {desired} slots, more than the {MAX_TABLE_CAPACITY} a \
             32-bit slot offset can address"
        )));
    }
    // cache_size >= 2 and load_factor < 1 force desired >= 3, so the
    // power-of-two round-up never drops below 4 slots.
    Ok(desired.next_power_of_two() as usize)
}
