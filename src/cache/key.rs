//! Content-addressed cache keys.

use std::fmt;

/// `md5_hex(release + raw)` for one aggregation block.
///
/// The key covers the block's raw markup, not the assets it references:
/// changing a referenced file does not change the key until the release
/// identifier is bumped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(release: &str, raw: &str) -> Self {
        let mut context = md5::Context::new();
        context.consume(release.as_bytes());
        context.consume(raw.as_bytes());
        Self(format!("{:x}", context.compute()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_md5_of_concatenation() {
        let key = CacheKey::new("v1", "abc");
        assert_eq!(key.as_str(), format!("{:x}", md5::compute("v1abc")));
        assert_eq!(key.as_str().len(), 32);
    }

    #[test]
    fn test_known_digest() {
        // md5("") and md5("abc") split across release and raw
        assert_eq!(CacheKey::new("", "").as_str(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(CacheKey::new("a", "bc").as_str(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_release_changes_key() {
        assert_ne!(CacheKey::new("v1", "<link>"), CacheKey::new("v2", "<link>"));
        assert_eq!(CacheKey::new("v1", "<link>"), CacheKey::new("v1", "<link>"));
    }
}
