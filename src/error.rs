//! Error types for the fusedlru library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (cache size below the minimum, load factor outside `(0, 1)`, or a
//!   backing table too large to index).
//! - [`InvariantError`]: Returned by [`FusedLru::check_invariants`] when the
//!   fused table/list structure is internally inconsistent.
//!
//! Hot-path operations never produce errors: absence is signalled in-band
//! via the sentinel value, and contract violations panic.
//!
//! ## Example Usage
//!
//! ```
//! use fusedlru::builder::CacheBuilder;
//! use fusedlru::cache::FusedLru;
//! use fusedlru::error::ConfigError;
//!
//! // Fallible construction for user-configurable parameters
//! let cache: Result<FusedLru, ConfigError> =
//!     CacheBuilder::new(100).load_factor(0.66).try_build();
//! assert!(cache.is_ok());
//!
//! // Invalid load factor is caught without panicking
//! let bad = CacheBuilder::new(100).load_factor(1.5).try_build();
//! assert!(bad.is_err());
//! ```
//!
//! [`FusedLru::check_invariants`]: crate::cache::FusedLru::check_invariants

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache construction parameters are invalid.
///
/// Produced by [`FusedLru::try_new`](crate::cache::FusedLru::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
/// Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use fusedlru::cache::FusedLru;
///
/// let err = FusedLru::try_new(1, 0.66).unwrap_err();
/// assert!(err.to_string().contains("cache size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the cache's internal invariants are violated.
///
/// Produced by [`FusedLru::check_invariants`](crate::cache::FusedLru::check_invariants),
/// which walks the fused structure and reports the first inconsistency it
/// finds (size drift, broken recency links, an unreachable key). Reaching
/// this error indicates a bug in the cache, not in the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
