//! Content-addressed cache of compiled blocks.

mod key;
mod store;

pub use key::CacheKey;
pub use store::{CACHE_DIR, CacheError, CacheStore, Cached};
