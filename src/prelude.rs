pub use crate::builder::{CacheBuilder, DEFAULT_LOAD_FACTOR};
pub use crate::cache::FusedLru;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::layout::SENTINEL;
pub use crate::traits::{IntCache, IntLruCache};
