//! Asset kind definitions.

use std::fmt;

/// Kind of aggregated asset.
///
/// The extension doubles as the cache subdirectory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// JavaScript, collected from `<script>` tags.
    Script,
    /// CSS, collected from `<link>` and `<style>` tags.
    Style,
}

impl AssetKind {
    /// File extension and cache subdirectory (`js` / `css`).
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Style => "css",
        }
    }

    /// Parse from an extension (`js` / `css`).
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "js" => Some(Self::Script),
            "css" => Some(Self::Style),
            _ => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}
