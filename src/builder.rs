//! Cache construction with explicit sizing configuration.
//!
//! Wraps the two construction-time knobs (logical cache size and hash-table
//! load factor) behind a builder, so call sites that only care about the
//! entry bound never mention the load factor at all.
//!
//! ## Example
//!
//! ```
//! use fusedlru::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100).build();
//! cache.put(1, 10);
//! assert_eq!(cache.get(1), 10);
//! ```

use crate::cache::FusedLru;
use crate::error::ConfigError;

/// Load factor used when none is configured.
///
/// Keeps roughly one empty table slot for every two entries, which holds
/// expected probe lengths to a few slots without doubling memory.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.66;

/// Builder for [`FusedLru`].
///
/// # Example
///
/// ```
/// use fusedlru::builder::CacheBuilder;
///
/// // Trade memory for shorter probe chains.
/// let cache = CacheBuilder::new(1000).load_factor(0.5).try_build().unwrap();
/// assert_eq!(cache.capacity(), 1000);
/// assert_eq!(cache.table_capacity(), 2048);
/// ```
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    cache_size: i32,
    load_factor: f32,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding at most `cache_size` entries.
    pub fn new(cache_size: i32) -> Self {
        Self {
            cache_size,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }

    /// Sets the hash-table load factor, in `(0, 1)`. Lower values allocate
    /// a larger table and shorten probe chains.
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Builds the cache, validating the configuration.
    pub fn try_build(self) -> Result<FusedLru, ConfigError> {
        FusedLru::try_new(self.cache_size, self.load_factor)
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics when the configuration is invalid; use
    /// [`try_build`](Self::try_build) to handle that as an error.
    pub fn build(self) -> FusedLru {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_load_factor_applies() {
        let cache = CacheBuilder::new(3).build();
        // ceil(3 / 0.66) = 5, rounded up to 8 slots.
        assert_eq!(cache.table_capacity(), 8);
    }

    #[test]
    fn custom_load_factor_changes_table_size() {
        let cache = CacheBuilder::new(3).load_factor(0.8).build();
        assert_eq!(cache.table_capacity(), 4);
    }

    #[test]
    fn try_build_reports_invalid_config() {
        assert!(CacheBuilder::new(1).try_build().is_err());
        assert!(CacheBuilder::new(10).load_factor(0.0).try_build().is_err());
        assert!(CacheBuilder::new(10).load_factor(1.0).try_build().is_err());
    }

    #[test]
    #[should_panic(expected = "invalid cache configuration")]
    fn build_panics_on_invalid_config() {
        let _ = CacheBuilder::new(0).build();
    }
}
